//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

use clap::{Arg, ArgMatches};
use log::info;
use playerprep::progress::ProgressReporter;
use playerprep::provision::{HttpFetcher, Provisioner, DEFAULT_HOST};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicIsize, Ordering},
    Arc,
};

/// The `--root` argument shared by the provisioning subcommands.
pub(crate) fn root_arg() -> Arg {
    Arg::new("root")
        .long("root")
        .value_name("dir")
        .help("The firmware project directory. Defaults to the current directory.")
}

/// The `--host` argument shared by the provisioning subcommands.
pub(crate) fn host_arg() -> Arg {
    Arg::new("host")
        .long("host")
        .value_name("url")
        .default_value(DEFAULT_HOST)
        .help("The host serving <owner>/<project>/archive/<branch>.zip.")
}

/// Creates a provisioner for the `--root` and `--host` given on the command
/// line, printing download progress.
pub(crate) fn open_provisioner(
    matches: &ArgMatches,
) -> Result<Provisioner<HttpFetcher>, Box<dyn std::error::Error>> {
    let root = match matches.get_one::<String>("root") {
        Some(root) => PathBuf::from(root),
        None => std::env::current_dir()?,
    };
    info!("Provisioning below {}", root.display());
    let mut provisioner = Provisioner::new(root, HttpFetcher::new());
    if let Some(host) = matches.get_one::<String>("host") {
        provisioner.set_host(host.as_str());
    }
    provisioner.set_progress_reporter(|msg| create_percentage_print_reporter(msg, 5));
    Ok(provisioner)
}

/// Formats file sizes to human-readable format.
pub fn format_size(bytes: u64) -> String {
    format!("{:.3} MiB", bytes as f64 / 1024.0 / 1024.0)
}

pub fn create_percentage_print_reporter(message: &str, step: u32) -> ProgressReporter<'static> {
    assert!(step <= 100);

    let current = Arc::new(AtomicIsize::new(-100));
    let message = message.to_owned();
    ProgressReporter::new(move |checkpoint| {
        if let Some(remaining) = checkpoint.remaining {
            let total = checkpoint.done + remaining;
            if total == 0 {
                return;
            }
            let percentage = (100 * checkpoint.done / total) as isize;
            if percentage - current.load(Ordering::Acquire) >= step as isize {
                current.store(percentage, Ordering::Release);
                println!("{}... {}%", message, percentage);
                let _ = std::io::stdout().flush();
            }
        } else {
            // Unknown size, report every MiB.
            let mebibytes = (checkpoint.done >> 20) as isize;
            if mebibytes > current.load(Ordering::Acquire) {
                current.store(mebibytes, Ordering::Release);
                println!("{}... {}", message, format_size(checkpoint.done as u64));
                let _ = std::io::stdout().flush();
            }
        }
    })
}
