//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

//! Generates the header holding the names of the tracks on the player's SD card.
mod constants;
mod error;
mod header;
mod listing;

pub use constants::{ARRAY_DECLARATION, DEFAULT_CAPACITY, DEFAULT_MUSIC_DIR, DEFAULT_OUTPUT};
pub use error::Error;
pub use header::{generate_track_header, TrackHeaderOptions, TrackHeaderReport, TrackTable};
pub use listing::{list_tracks, TrackOrder};
