//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

use std::{fmt::Display, fs, path::Path};

use super::error::Error;
use crate::fs::write_file_atomic;

/// What [`patch_constant`] found in the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The number of replaced occurrences (at least one).
    Applied(usize),
    /// The original text is absent but the replacement is present.
    AlreadyApplied,
    /// Neither the original nor the replacement text is present.
    NotFound,
}

impl Display for PatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Applied(1) => write!(f, "1 replacement"),
            Self::Applied(n) => write!(f, "{} replacements", n),
            Self::AlreadyApplied => write!(f, "already patched"),
            Self::NotFound => write!(f, "pattern not found"),
        }
    }
}

/// Replaces all occurrences of `old` in the file with `new`.
///
/// The patch counts as already applied when every occurrence of `old` is
/// part of an occurrence of `new` (so `X 1` -> `X 10` is not applied twice).
/// Files are only rewritten by [`PatchOutcome::Applied`].
pub fn patch_constant(file: &Path, old: &str, new: &str) -> Result<PatchOutcome, Error> {
    if old.is_empty() {
        return Err(Error::EmptyPatchTarget(file.to_path_buf()));
    }
    let bytes = fs::read(file).map_err(|e| {
        std::io::Error::new(e.kind(), format!("couldn't read {}", file.display()))
    })?;
    let text = String::from_utf8(bytes).map_err(|_| Error::Utf8Error(file.to_path_buf()))?;

    let count = text.matches(old).count();
    let already_applied = !new.is_empty()
        && text.contains(new)
        && count == text.matches(new).count() * new.matches(old).count();
    if already_applied {
        return Ok(PatchOutcome::AlreadyApplied);
    }
    if count == 0 {
        return Ok(PatchOutcome::NotFound);
    }

    let patched = text.replace(old, new);
    write_file_atomic(patched.as_bytes(), file)?;
    Ok(PatchOutcome::Applied(count))
}
