//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

use clap::{Arg, ArgMatches, Command};
use std::error::Error;

use super::utils::{host_arg, open_provisioner, root_arg};
use playerprep::log::measure_ok;
use playerprep::provision::Manifest;

pub(crate) const SUBCOMMAND: &str = "provision";

pub(crate) fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let manifest = match matches.get_one::<String>("manifest") {
        Some(path) => Manifest::load(path)?,
        None => Manifest::default(),
    };
    let provisioner = open_provisioner(matches)?;

    let (elapsed, report) = measure_ok(|| provisioner.run(&manifest))?;

    for project in &report.projects {
        println!("Provisioned {}", project.display());
    }
    for (file, outcome) in &report.patches {
        println!("Patched {} ({})", file.display(), outcome);
    }
    println!("Done in {:.1?}", elapsed);
    Ok(())
}

pub(crate) fn get_app() -> Command {
    Command::new(SUBCOMMAND)
        .about(
            "Fetches the libraries the firmware depends on into the source tree \
            and patches their buffer sizes.",
        )
        .arg(root_arg())
        .arg(host_arg())
        .arg(
            Arg::new("manifest")
                .long("manifest")
                .short('m')
                .value_name("file")
                .help(
                    "A JSON manifest listing the dependencies and patches. \
                    Defaults to the built-in manifest (see the manifest subcommand).",
                ),
        )
}
