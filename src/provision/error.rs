//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

use std::path::PathBuf;
use std::{fmt::Display, io};

/// The type of error used by provisioning operations.
#[derive(Debug)]
pub enum Error {
    IOError(io::Error),
    HttpError(Box<ureq::Error>),
    ZipError(zip::result::ZipError),
    /// The manifest is not valid JSON or does not match the expected layout
    ManifestError(serde_json::Error),
    /// The repository identifier is not of the form owner/project
    BadRepository(String),
    /// The archive host and repository do not form a valid URL
    BadUrl(String),
    /// The archive does not contain exactly the expected top-level directory
    UnexpectedArchiveLayout {
        expected: String,
        found: Vec<String>,
    },
    /// A directory could not be removed before extraction
    StaleDirectory(PathBuf),
    /// A prune path is absolute or escapes the project directory
    BadPrunePath(PathBuf),
    /// A directory listed for pruning does not exist
    PruneTargetMissing(PathBuf),
    /// The text to replace is empty
    EmptyPatchTarget(PathBuf),
    /// Neither the original nor the replacement text is present in the file
    PatchTargetNotFound { file: PathBuf, old: String },
    /// The file is not valid UTF-8
    Utf8Error(PathBuf),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::IOError(ioerr) => ioerr.fmt(f),
            Self::HttpError(httperr) => httperr.fmt(f),
            Self::ZipError(ziperr) => write!(f, "bad archive: {}", ziperr),
            Self::ManifestError(jsonerr) => write!(f, "bad manifest: {}", jsonerr),
            Self::BadRepository(repo) => write!(
                f,
                "'{}' is not a repository identifier of the form owner/project!",
                repo
            ),
            Self::BadUrl(url) => write!(f, "'{}' is not a valid archive URL!", url),
            Self::UnexpectedArchiveLayout { expected, found } => write!(
                f,
                "The archive should contain a single top-level directory '{}', but contains {:?}!",
                expected, found
            ),
            Self::StaleDirectory(path) => write!(
                f,
                "The directory {} could not be removed before extraction!",
                path.display()
            ),
            Self::BadPrunePath(path) => write!(
                f,
                "The prune path {} must be relative to the project directory!",
                path.display()
            ),
            Self::PruneTargetMissing(path) => write!(
                f,
                "The directory {} was listed for removal, but does not exist!",
                path.display()
            ),
            Self::EmptyPatchTarget(path) => {
                write!(f, "Refusing to patch {} with an empty pattern!", path.display())
            }
            Self::PatchTargetNotFound { file, old } => write!(
                f,
                "'{}' was not found in {} and the file is not patched yet!",
                old,
                file.display()
            ),
            Self::Utf8Error(path) => write!(f, "{} is not valid UTF-8!", path.display()),
        }
    }
}

impl std::error::Error for Error {}

impl std::convert::From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::IOError(err)
    }
}

impl std::convert::From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Self::HttpError(Box::new(err))
    }
}

impl std::convert::From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Self::ZipError(err)
    }
}

impl std::convert::From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ManifestError(err)
    }
}
