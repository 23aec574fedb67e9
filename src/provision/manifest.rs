//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

use std::{
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use super::constants::{DEFAULT_BRANCH, DEFAULT_SOURCE_DIR};
use super::error::Error;
use super::repository::RepoDescriptor;
use crate::fs::open_file;

/// Describes what to provision: the libraries to fetch and the patches to
/// apply to them once fetched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Where libraries are extracted, relative to the provisioning root.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub patches: Vec<TextPatch>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dependency {
    /// `owner/project`
    pub repository: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Subdirectories of the project to delete after extraction.
    #[serde(default)]
    pub prune: Vec<PathBuf>,
}

/// A literal substring replacement in a file relative to the provisioning root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextPatch {
    pub file: PathBuf,
    pub old: String,
    pub new: String,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE_DIR)
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_owned()
}

impl Dependency {
    pub fn descriptor(&self) -> Result<RepoDescriptor, Error> {
        Ok(self
            .repository
            .parse::<RepoDescriptor>()?
            .with_branch(self.branch.clone()))
    }
}

impl Manifest {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Manifest, Error> {
        let reader = BufReader::new(open_file(path)?);
        Self::read(reader)
    }

    pub fn read<R: std::io::Read>(reader: R) -> Result<Manifest, Error> {
        let manifest: Manifest = serde_json::from_reader(reader)?;
        // Reject bad identifiers before anything is downloaded.
        for dependency in &manifest.dependencies {
            dependency.descriptor()?;
        }
        Ok(manifest)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Manifest {
    /// The libraries the player firmware builds against.
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            dependencies: vec![
                Dependency {
                    repository: "kroimon/Arduino-SerialCommand".to_owned(),
                    branch: default_branch(),
                    prune: vec![],
                },
                Dependency {
                    repository: "knolleary/pubsubclient".to_owned(),
                    branch: default_branch(),
                    prune: vec!["tests".into(), "examples".into()],
                },
            ],
            patches: vec![
                TextPatch {
                    file: ["src", "pubsubclient", "src", "PubSubClient.h"]
                        .iter()
                        .collect(),
                    old: "MQTT_MAX_PACKET_SIZE 128".to_owned(),
                    new: "MQTT_MAX_PACKET_SIZE 256".to_owned(),
                },
                TextPatch {
                    file: ["src", "Arduino-SerialCommand", "SerialCommand.h"]
                        .iter()
                        .collect(),
                    old: "SERIALCOMMAND_BUFFER 32".to_owned(),
                    new: "SERIALCOMMAND_BUFFER 64".to_owned(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_read_works() -> Result<(), Error> {
        let manifest = Manifest::read(
            r#"{
                "dependencies": [
                    { "repository": "knolleary/pubsubclient", "prune": ["tests"] },
                    { "repository": "kroimon/Arduino-SerialCommand", "branch": "dev" }
                ],
                "patches": [
                    { "file": "src/a.h", "old": "X 1", "new": "X 2" }
                ]
            }"#
            .as_bytes(),
        )?;

        assert_eq!(manifest.source_dir, PathBuf::from("src"));
        assert_eq!(manifest.dependencies.len(), 2);
        assert_eq!(manifest.dependencies[0].branch, "master");
        assert_eq!(manifest.dependencies[0].prune, vec![PathBuf::from("tests")]);
        assert_eq!(manifest.dependencies[1].descriptor()?.archive_root(), "Arduino-SerialCommand-dev");
        assert_eq!(manifest.patches[0].new, "X 2");
        Ok(())
    }

    #[test]
    fn test_manifest_rejects_bad_repository() {
        let r = Manifest::read(r#"{ "dependencies": [{ "repository": "pubsubclient" }] }"#.as_bytes());
        assert!(matches!(r, Err(Error::BadRepository(_))));
    }

    #[test]
    fn test_manifest_rejects_unknown_fields() {
        let r = Manifest::read(r#"{ "dependecies": [] }"#.as_bytes());
        assert!(matches!(r, Err(Error::ManifestError(_))));
    }

    #[test]
    fn test_default_manifest_survives_json() -> Result<(), Error> {
        let manifest = Manifest::default();
        let json = manifest.to_json()?;
        assert_eq!(Manifest::read(json.as_bytes())?, manifest);
        Ok(())
    }
}
