//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::error::Error;
use std::path::Path;

use playerprep::log::measure_ok;
use playerprep::tracks::{
    generate_track_header, TrackHeaderOptions, TrackOrder, DEFAULT_MUSIC_DIR, DEFAULT_OUTPUT,
};

pub(crate) const SUBCOMMAND: &str = "track-header";

/// The default capacity (0xff) as a command line value.
const DEFAULT_CAPACITY_ARG: &str = "255";

pub(crate) fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let music_dir = Path::new(matches.get_one::<String>("music_dir").unwrap());
    let output = Path::new(matches.get_one::<String>("output").unwrap());

    let mut opts = TrackHeaderOptions::default();
    opts.set_capacity(*matches.get_one::<usize>("capacity").unwrap());
    opts.set_strict(matches.get_flag("strict"));
    if matches.get_flag("sort") {
        opts.set_order(TrackOrder::Name);
    }

    let (elapsed, report) = measure_ok(|| generate_track_header(music_dir, output, &opts))?;
    println!(
        "Wrote {} tracks to {} in {:.1?}",
        report.tracks,
        output.display(),
        elapsed
    );
    if report.dropped > 0 {
        println!("{} tracks did not fit and were left out", report.dropped);
    }
    Ok(())
}

pub(crate) fn get_app() -> Command {
    Command::new(SUBCOMMAND)
        .about("Generates the C header listing the names of the tracks in a directory.")
        .arg(
            Arg::new("music_dir")
                .index(1)
                .default_value(DEFAULT_MUSIC_DIR)
                .help("The directory containing the tracks."),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("file")
                .default_value(DEFAULT_OUTPUT)
                .help("The header to write. Existing content is overwritten."),
        )
        .arg(
            Arg::new("capacity")
                .long("capacity")
                .value_name("n")
                .default_value(DEFAULT_CAPACITY_ARG)
                .value_parser(value_parser!(usize))
                .help("The number of slots in the generated array."),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .help("Orders the tracks by file name instead of directory listing order.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail instead of leaving out tracks that do not fit.")
                .action(ArgAction::SetTrue),
        )
}
