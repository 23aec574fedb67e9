//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

use std::ffi::OsString;
use std::path::PathBuf;
use std::{fmt::Display, io};

/// The type of error used by the track header generator.
#[derive(Debug)]
pub enum Error {
    IOError(io::Error),
    WalkDirError(walkdir::Error),
    /// The track directory does not exist
    SourceDirNotFound(PathBuf),
    /// A track name cannot be represented in the header
    Utf8Error(OsString),
    /// More tracks than slots and truncation was not allowed
    Truncated { capacity: usize, found: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::IOError(ioerr) => ioerr.fmt(f),
            Self::WalkDirError(wderr) => wderr.fmt(f),
            Self::SourceDirNotFound(path) => {
                write!(f, "The track directory {} does not exist!", path.display())
            }
            Self::Utf8Error(s) => write!(f, "unable to interpret track name as utf8: {:?}", s),
            Self::Truncated { capacity, found } => write!(
                f,
                "Found {} tracks, but the header only has room for {}!",
                found, capacity
            ),
        }
    }
}

impl std::error::Error for Error {}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Self::WalkDirError(err)
    }
}

impl std::convert::From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::IOError(err)
    }
}
