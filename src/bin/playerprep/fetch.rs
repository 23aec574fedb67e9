//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::error::Error;

use super::utils::{host_arg, open_provisioner, root_arg};
use playerprep::provision::{RepoDescriptor, DEFAULT_BRANCH, DEFAULT_SOURCE_DIR};

pub(crate) const SUBCOMMAND: &str = "fetch";

pub(crate) fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let repo = matches
        .get_one::<String>("repository")
        .unwrap()
        .parse::<RepoDescriptor>()?
        .with_branch(matches.get_one::<String>("branch").unwrap().as_str());
    let prune = matches
        .get_many::<String>("prune")
        .map(|values| values.cloned().collect::<Vec<_>>())
        .unwrap_or_default();

    let provisioner = open_provisioner(matches)?;
    let source_dir = provisioner
        .root()
        .join(matches.get_one::<String>("source_dir").unwrap());
    let project_dir = provisioner.fetch(&repo, &source_dir)?;
    provisioner.prune(&project_dir, prune.as_slice())?;

    println!("Provisioned {}", project_dir.display());
    Ok(())
}

pub(crate) fn get_app() -> Command {
    Command::new(SUBCOMMAND)
        .about("Fetches a single repository archive and extracts it into the source tree.")
        .arg(
            Arg::new("repository")
                .required(true)
                .index(1)
                .help("The repository to fetch, as owner/project."),
        )
        .arg(root_arg())
        .arg(host_arg())
        .arg(
            Arg::new("branch")
                .long("branch")
                .short('b')
                .value_name("name")
                .default_value(DEFAULT_BRANCH)
                .help("The branch whose archive is fetched."),
        )
        .arg(
            Arg::new("source_dir")
                .long("source-dir")
                .value_name("dir")
                .default_value(DEFAULT_SOURCE_DIR)
                .help("Where to extract the project, relative to the root."),
        )
        .arg(
            Arg::new("prune")
                .long("prune")
                .value_name("subdir")
                .action(ArgAction::Append)
                .help("A subdirectory of the project to delete after extraction. Can be repeated."),
        )
}
