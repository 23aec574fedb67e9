//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

use std::{fmt::Display, str::FromStr};

use url::Url;

use super::constants::{ARCHIVE_EXTENSION, DEFAULT_BRANCH};
use super::error::Error;

/// Identifies a repository archive on the host: `owner/project` at `branch`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RepoDescriptor {
    owner: String,
    project: String,
    branch: String,
}

impl RepoDescriptor {
    pub fn new<S1, S2>(owner: S1, project: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self {
            owner: owner.into(),
            project: project.into(),
            branch: DEFAULT_BRANCH.to_owned(),
        }
    }

    pub fn with_branch<S: Into<String>>(mut self, branch: S) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// The URL of the archive, `<host>/<owner>/<project>/archive/<branch>.zip`.
    pub fn archive_url(&self, host: &str) -> Result<Url, Error> {
        let url = format!(
            "{}/{}/{}/archive/{}.{}",
            host.trim_end_matches('/'),
            self.owner,
            self.project,
            self.branch,
            ARCHIVE_EXTENSION
        );
        url.parse::<Url>().map_err(|_| Error::BadUrl(url))
    }

    /// The name of the top-level directory inside the archive.
    pub fn archive_root(&self) -> String {
        format!("{}-{}", self.project, self.branch)
    }

    /// The file name the archive is downloaded to.
    pub fn archive_file_name(&self) -> String {
        format!("{}.{}", self.project, ARCHIVE_EXTENSION)
    }
}

impl FromStr for RepoDescriptor {
    type Err = Error;

    /// Parses `owner/project`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(project), None) if is_valid_name(owner) && is_valid_name(project) => {
                Ok(Self::new(owner, project))
            }
            _ => Err(Error::BadRepository(s.to_owned())),
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('\\')
}

impl Display for RepoDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.project, self.branch)
    }
}
