//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

use std::path::{Path, PathBuf};

use log::{info, warn};

use super::constants::DEFAULT_HOST;
use super::error::Error;
use super::fetch::{install_archive, ArchiveFetcher};
use super::manifest::{Manifest, TextPatch};
use super::patch::{patch_constant, PatchOutcome};
use super::repository::RepoDescriptor;
use crate::fs::{ensure_dir, is_contained_relative_path, remove_dir_confirmed};
use crate::log::measure_ok;
use crate::progress::ProgressReporter;

/// What a [`Provisioner::run`] did.
#[derive(Debug, Default)]
pub struct ProvisionReport {
    /// The directories the libraries were extracted to.
    pub projects: Vec<PathBuf>,
    /// The outcome of each patch, in manifest order.
    pub patches: Vec<(PathBuf, PatchOutcome)>,
}

/// Fetches, prunes and patches libraries below a root directory.
pub struct Provisioner<F: ArchiveFetcher> {
    root: PathBuf,
    host: String,
    fetcher: F,
    progress_reporter_factory: Box<dyn Fn(&str) -> ProgressReporter<'static> + Send + Sync>,
}

impl<F: ArchiveFetcher> Provisioner<F> {
    pub fn new<P: Into<PathBuf>>(root: P, fetcher: F) -> Self {
        Self {
            root: root.into(),
            host: DEFAULT_HOST.to_owned(),
            fetcher,
            progress_reporter_factory: Box::new(|_| ProgressReporter::dummy()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn set_host<S: Into<String>>(&mut self, host: S) {
        self.host = host.into();
    }

    pub fn set_progress_reporter<R>(&mut self, factory: R)
    where
        R: 'static + Fn(&str) -> ProgressReporter<'static> + Send + Sync,
    {
        self.progress_reporter_factory = Box::new(factory);
    }

    /// Fetches every dependency in the manifest, prunes it, then applies the
    /// patches. Stops at the first error.
    pub fn run(&self, manifest: &Manifest) -> Result<ProvisionReport, Error> {
        let source_dir = self.root.join(&manifest.source_dir);
        let mut report = ProvisionReport::default();

        for dependency in &manifest.dependencies {
            let repo = dependency.descriptor()?;
            let project_dir = self.fetch(&repo, &source_dir)?;
            self.prune(&project_dir, dependency.prune.as_slice())?;
            report.projects.push(project_dir);
        }

        for patch in &manifest.patches {
            let outcome = self.patch(patch)?;
            report.patches.push((patch.file.clone(), outcome));
        }

        Ok(report)
    }

    /// Downloads the archive of `repo` and extracts it to
    /// `<source_dir>/<project>`, replacing what was there.
    pub fn fetch(&self, repo: &RepoDescriptor, source_dir: &Path) -> Result<PathBuf, Error> {
        ensure_dir(source_dir)?;
        let url = repo.archive_url(&self.host)?;
        let archive_path = source_dir.join(repo.archive_file_name());

        info!("Fetching {}...", repo);
        let reporter = (self.progress_reporter_factory)(&format!("Fetching {}", repo));
        let (elapsed, bytes) =
            measure_ok(|| self.fetcher.fetch(&url, &archive_path, &reporter))?;
        info!("Fetching {} ({} bytes) took {:?}", url, bytes, elapsed);

        let (elapsed, project_dir) =
            measure_ok(|| install_archive(&archive_path, repo, source_dir))?;
        info!("Extracting to {} took {:?}", project_dir.display(), elapsed);
        Ok(project_dir)
    }

    /// Deletes the listed subdirectories of `project_dir`. Each must exist.
    pub fn prune<P: AsRef<Path>>(&self, project_dir: &Path, paths: &[P]) -> Result<(), Error> {
        for path in paths {
            let path = path.as_ref();
            if !is_contained_relative_path(path) {
                return Err(Error::BadPrunePath(path.to_path_buf()));
            }
            let full_path = project_dir.join(path);
            if !full_path.is_dir() {
                return Err(Error::PruneTargetMissing(full_path));
            }
            info!("Removing {}", full_path.display());
            remove_dir_confirmed(&full_path)?;
        }
        Ok(())
    }

    /// Applies a patch relative to the root. A pattern that is neither
    /// present nor already replaced is an error.
    pub fn patch(&self, patch: &TextPatch) -> Result<PatchOutcome, Error> {
        let file = self.root.join(&patch.file);
        let outcome = patch_constant(&file, &patch.old, &patch.new)?;
        match outcome {
            PatchOutcome::Applied(_) => info!("Patched {}: {}", file.display(), outcome),
            PatchOutcome::AlreadyApplied => {
                warn!("{} already contains '{}'", file.display(), patch.new)
            }
            PatchOutcome::NotFound => {
                return Err(Error::PatchTargetNotFound {
                    file,
                    old: patch.old.clone(),
                })
            }
        }
        Ok(outcome)
    }
}
