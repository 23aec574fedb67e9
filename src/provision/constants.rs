//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

/// The host serving `<owner>/<project>/archive/<branch>.zip`.
pub const DEFAULT_HOST: &str = "https://github.com";
/// The branch whose archive is fetched when none is specified.
pub const DEFAULT_BRANCH: &str = "master";
/// Where libraries are extracted, relative to the provisioning root.
pub const DEFAULT_SOURCE_DIR: &str = "src";
/// The file extension of a downloaded archive.
pub const ARCHIVE_EXTENSION: &str = "zip";
/// Timeout for establishing the connection to the host.
pub const CONNECT_TIMEOUT_SECS: u64 = 30;
