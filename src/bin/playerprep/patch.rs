//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::warn;
use std::error::Error;
use std::path::Path;

use playerprep::provision::{patch_constant, Error as ProvisionError, PatchOutcome};

pub(crate) const SUBCOMMAND: &str = "patch";

pub(crate) fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let file = Path::new(matches.get_one::<String>("file").unwrap());
    let old = matches.get_one::<String>("old").unwrap();
    let new = matches.get_one::<String>("new").unwrap();
    let is_strict = matches.get_flag("strict");

    let outcome = patch_constant(file, old, new)?;
    match outcome {
        PatchOutcome::NotFound if is_strict => {
            return Err(Box::new(ProvisionError::PatchTargetNotFound {
                file: file.to_path_buf(),
                old: old.to_owned(),
            }))
        }
        PatchOutcome::NotFound => warn!("'{}' was not found in {}", old, file.display()),
        _ => {}
    }
    println!("{}: {}", file.display(), outcome);
    Ok(())
}

pub(crate) fn get_app() -> Command {
    Command::new(SUBCOMMAND)
        .about("Replaces all occurrences of a string in a file.")
        .arg(
            Arg::new("file")
                .required(true)
                .index(1)
                .help("The file to patch."),
        )
        .arg(
            Arg::new("old")
                .required(true)
                .index(2)
                .help("The text to replace, e.g. 'MQTT_MAX_PACKET_SIZE 128'."),
        )
        .arg(
            Arg::new("new")
                .required(true)
                .index(3)
                .help("The replacement text, e.g. 'MQTT_MAX_PACKET_SIZE 256'."),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail when neither the text nor its replacement is in the file.")
                .action(ArgAction::SetTrue),
        )
}
