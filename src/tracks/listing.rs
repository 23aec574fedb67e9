//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

use std::path::Path;

use walkdir::WalkDir;

use super::error::Error;

/// The order of the tracks in the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackOrder {
    /// Whatever order the filesystem lists the directory in.
    Listing,
    /// Sorted by file name.
    Name,
}

impl Default for TrackOrder {
    fn default() -> Self {
        Self::Listing
    }
}

/// Returns the names of the entries (files and directories) directly inside
/// `dir`. Hidden entries are skipped.
pub fn list_tracks(dir: &Path, order: TrackOrder) -> Result<Vec<String>, Error> {
    if !dir.is_dir() {
        return Err(Error::SourceDirNotFound(dir.to_path_buf()));
    }

    let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1);
    if order == TrackOrder::Name {
        walker = walker.sort_by_file_name();
    }

    let mut names = vec![];
    for entry in walker {
        let entry = entry?;
        let name = entry
            .file_name()
            .to_str()
            .ok_or_else(|| Error::Utf8Error(entry.file_name().to_owned()))?;
        if name.starts_with('.') {
            continue;
        }
        names.push(name.to_owned());
    }
    Ok(names)
}
