//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

use clap::{ArgMatches, Command};
use std::error::Error;

use playerprep::provision::Manifest;

pub(crate) const SUBCOMMAND: &str = "manifest";

pub(crate) fn run(_matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    println!("{}", Manifest::default().to_json()?);
    Ok(())
}

pub(crate) fn get_app() -> Command {
    Command::new(SUBCOMMAND)
        .about("Prints the built-in provisioning manifest. Use it as a starting point for --manifest.")
}
