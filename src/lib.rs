//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

//! Build-time preparation for the music player firmware: provisioning of
//! third-party Arduino libraries and generation of the track name header.
pub mod fs;
pub mod log;
pub mod progress;
pub mod provision;
pub mod tracks;
