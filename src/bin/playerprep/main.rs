//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

mod fetch;
mod manifest;
mod patch;
mod provision;
mod track_header;
mod utils;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::error;
use playerprep::log::Logger;
use std::error::Error;

const ERROR_EXIT_CODE: i32 = 1;

fn main() {
    let mut app = get_app();
    let matches = app.clone().get_matches();
    let is_verbose = matches.get_flag("verbose");
    Logger::init(if is_verbose {
        log::Level::Info
    } else {
        log::Level::Warn
    });

    if let Err(e) = run_subcommand(&mut app, &matches) {
        error!("*FATAL*: {}", e);
        std::process::exit(ERROR_EXIT_CODE);
    }
}

fn run_subcommand(app: &mut Command, matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    match matches.subcommand() {
        Some((provision::SUBCOMMAND, matches)) => provision::run(matches),
        Some((fetch::SUBCOMMAND, matches)) => fetch::run(matches),
        Some((patch::SUBCOMMAND, matches)) => patch::run(matches),
        Some((track_header::SUBCOMMAND, matches)) => track_header::run(matches),
        Some((manifest::SUBCOMMAND, matches)) => manifest::run(matches),
        _ => {
            app.print_long_help()?;
            println!();
            Ok(())
        }
    }
}

fn get_app() -> Command {
    Command::new("playerprep")
        .about("Prepares the music player firmware sources for a build.")
        .subcommand(provision::get_app())
        .subcommand(fetch::get_app())
        .subcommand(patch::get_app())
        .subcommand(track_header::get_app())
        .subcommand(manifest::get_app())
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enables verbose description of the execution process.")
                .action(ArgAction::SetTrue)
                .global(true),
        )
}
