//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

use std::{fmt::Write as _, path::Path};

use log::{info, warn};

use super::constants::{ARRAY_DECLARATION, DEFAULT_CAPACITY};
use super::error::Error;
use super::listing::{list_tracks, TrackOrder};
use crate::fs::{ensure_dir, write_file_atomic};

/// A fixed number of track name slots. Slots past the last track are empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackTable {
    slots: Vec<String>,
    dropped: usize,
}

impl TrackTable {
    /// Fills `capacity` slots from `names`, in order. Names that do not fit
    /// are counted in [`TrackTable::dropped`].
    pub fn new(names: Vec<String>, capacity: usize) -> Self {
        let dropped = names.len().saturating_sub(capacity);
        let mut slots = names;
        slots.truncate(capacity);
        slots.resize(capacity, String::new());
        Self { slots, dropped }
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// The number of occupied slots.
    pub fn tracks(&self) -> usize {
        self.slots.iter().take_while(|s| !s.is_empty()).count()
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Renders the table as a C array definition.
    pub fn render(&self) -> String {
        let mut source = String::new();
        source.push_str(ARRAY_DECLARATION);
        source.push('\n');
        for slot in &self.slots {
            // Writing to a String cannot fail.
            let _ = writeln!(source, "  \"{}\", ", escape_c_string(slot));
        }
        source.push_str("};\n");
        source
    }
}

/// Escapes the characters that would end or corrupt a C string literal.
fn escape_c_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// A struct specifying the track header options.
#[derive(Clone, Debug)]
pub struct TrackHeaderOptions {
    /// The number of slots in the array.
    capacity: usize,
    /// The order of the tracks.
    order: TrackOrder,
    /// Fail instead of dropping tracks that do not fit.
    strict: bool,
}

impl TrackHeaderOptions {
    /// The number of slots in the array.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    /// The number of slots in the array.
    pub fn set_capacity(&mut self, value: usize) {
        self.capacity = value;
    }
    /// The order of the tracks.
    pub fn order(&self) -> TrackOrder {
        self.order
    }
    /// The order of the tracks.
    pub fn set_order(&mut self, value: TrackOrder) {
        self.order = value;
    }
    /// Fail instead of dropping tracks that do not fit.
    pub fn strict(&self) -> bool {
        self.strict
    }
    /// Fail instead of dropping tracks that do not fit.
    pub fn set_strict(&mut self, value: bool) {
        self.strict = value;
    }
}

impl Default for TrackHeaderOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            order: TrackOrder::default(),
            strict: false,
        }
    }
}

/// What [`generate_track_header`] wrote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackHeaderReport {
    /// The number of tracks in the header.
    pub tracks: usize,
    /// The number of tracks left out because the array was full.
    pub dropped: usize,
}

/// Lists `source_dir` and writes the track name array to `output`,
/// overwriting it.
pub fn generate_track_header(
    source_dir: &Path,
    output: &Path,
    opts: &TrackHeaderOptions,
) -> Result<TrackHeaderReport, Error> {
    let names = list_tracks(source_dir, opts.order)?;
    let found = names.len();
    let table = TrackTable::new(names, opts.capacity);

    if table.dropped() > 0 {
        if opts.strict {
            return Err(Error::Truncated {
                capacity: opts.capacity,
                found,
            });
        }
        warn!(
            "{} contains {} tracks, only the first {} are written to {}",
            source_dir.display(),
            found,
            opts.capacity,
            output.display()
        );
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    write_file_atomic(table.render().as_bytes(), output)?;
    info!(
        "Wrote {} of {} slots to {}",
        table.tracks(),
        opts.capacity,
        output.display()
    );

    Ok(TrackHeaderReport {
        tracks: table.tracks(),
        dropped: table.dropped(),
    })
}
