//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

//! Fetches third-party libraries into the firmware source tree and adjusts them.
mod constants;
mod error;
mod fetch;
mod manifest;
mod patch;
mod provisioner;
mod repository;

pub use constants::{ARCHIVE_EXTENSION, DEFAULT_BRANCH, DEFAULT_HOST, DEFAULT_SOURCE_DIR};
pub use error::Error;
pub use fetch::{install_archive, ArchiveFetcher, HttpFetcher};
pub use manifest::{Dependency, Manifest, TextPatch};
pub use patch::{patch_constant, PatchOutcome};
pub use provisioner::{ProvisionReport, Provisioner};
pub use repository::RepoDescriptor;
