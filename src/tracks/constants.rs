//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

/// The number of slots in the generated array (the firmware indexes it with a byte).
pub const DEFAULT_CAPACITY: usize = 0xff;
/// The directory scanned for tracks, relative to the project root.
pub const DEFAULT_MUSIC_DIR: &str = "music_data/05 2019年2月ランキング";
/// The generated header, relative to the project root.
pub const DEFAULT_OUTPUT: &str = "src/YamakenMusicPlayer/tracknames.h";
/// The opening line of the generated array.
pub const ARRAY_DECLARATION: &str = "char *track_names[] = {";
