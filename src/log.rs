//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

//! Tools for logging.
use lazy_static::lazy_static;
use log::{set_logger, set_max_level, Level, Log, Metadata, Record};
use std::sync::RwLock;
use std::time::{Duration, Instant};

lazy_static! {
    static ref LOGGER: Logger = Logger {
        level: RwLock::new(Level::Error),
        init_at: Instant::now(),
    };
}

/// The [`Log`] implementation used by playerprep.
pub struct Logger {
    level: RwLock<Level>,
    init_at: Instant,
}

impl Logger {
    /// Initialise with the specified log level.
    /// Calling this again only changes the level.
    pub fn init(level: Level) {
        if let Ok(mut w) = LOGGER.level.write() {
            *w = level;
        }
        let instance: &'static Logger = &*LOGGER;
        // Fails on repeat calls; the level is still updated.
        let _ = set_logger(instance);
        set_max_level(level.to_level_filter());
    }

    fn level(&self) -> Level {
        match self.level.read() {
            Ok(level) => *level,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let level_string = match record.level() {
                Level::Error => "ERROR",
                Level::Warn => "WARN",
                Level::Info => "INFO",
                Level::Debug => "DEBUG",
                Level::Trace => "TRACE",
            };
            let elapsed = Instant::now() - self.init_at;
            let thread = std::thread::current();
            let thread_string = match thread.name() {
                Some(name) => name.to_owned(),
                None => format!("{:?}", thread.id()),
            };
            eprintln!(
                "[{} ({}) {:?}]: {}",
                level_string,
                thread_string,
                elapsed,
                record.args()
            );
        }
    }
    fn flush(&self) {}
}

/// Measures the time it took to run the specified block.
pub fn measure<F, T>(f: F) -> (Duration, T)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let elapsed = Instant::now() - start;
    (elapsed, result)
}

/// Measures the time it took to run the specified block, short-circuiting
/// on error.
pub fn measure_ok<F, T, E>(f: F) -> Result<(Duration, T), E>
where
    F: FnOnce() -> Result<T, E>,
{
    let (elapsed, result) = measure(f);
    Ok((elapsed, result?))
}
