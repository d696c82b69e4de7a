//! Distribution detachment and checksum staging.
//!
//! The assembly step attaches source and binary archives (and their PGP
//! signatures) to the project. Apache Commons does not publish those to the
//! binary repository; they go to the distribution area instead. This module
//! removes them from the project's attached artifacts, records a SHA-512 for
//! every attached artifact in `sha512.properties`, and stages the detached
//! files together with `.sha512` sidecars for the upload step.

use crate::artifact::Artifact;
use crate::config::StagingConfig;
use crate::digest::{Sha512Digest, sha512_file};
use crate::error::{ReleaseError, Result};
use crate::project::Project;
use crate::properties::SortedProperties;
use crate::stager::Stager;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Why the workflow returned without doing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The module is not flagged as producing distributions.
    NotDistModule,
    /// No distribution staging URL is configured.
    StagingUrlUnset,
    /// None of the attached artifacts is a distribution.
    NoDistributions,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDistModule => write!(f, "module is not a distribution module"),
            Self::StagingUrlUnset => write!(f, "distribution staging URL is not set"),
            Self::NoDistributions => write!(f, "project has no distributions attached"),
        }
    }
}

/// Everything the workflow wrote and removed when it ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingReport {
    /// Directory the files were staged into.
    pub working_directory: Utf8PathBuf,
    /// Path of the written `sha512.properties`.
    pub properties_file: Utf8PathBuf,
    /// Digests of every artifact that was attached when the workflow started.
    pub digests: SortedProperties,
    /// Artifacts removed from the project, in attachment order.
    pub detached: Vec<Artifact>,
    /// Copies of the detached artifacts in the working directory.
    pub staged_files: Vec<Utf8PathBuf>,
    /// Sidecar `.sha512` files written.
    pub digest_files: Vec<Utf8PathBuf>,
}

/// Result of a successful workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetachOutcome {
    /// A guard condition held and nothing was changed.
    Skipped(SkipReason),
    /// Distributions were detached and staged.
    Staged(StagingReport),
}

/// Detach distributions from `project` and stage them with their digests.
///
/// Guards are checked in order: the module must be a distribution module,
/// a staging URL must be configured, and at least one attached artifact must
/// be a distribution. Any guard that fails returns
/// [`DetachOutcome::Skipped`] without touching the project or the filesystem.
///
/// Artifacts removed from `project` stay removed if a later step fails.
///
/// # Errors
///
/// Returns the first I/O failure: an unreadable artifact, an uncreatable
/// working directory, or a failed manifest write, copy, or sidecar write.
pub fn detach_distributions(
    project: &mut Project,
    config: &StagingConfig,
) -> Result<DetachOutcome> {
    if !config.is_dist_module {
        info!(
            "This module is marked as a non distribution or assembly module, and the plugin will not run."
        );
        return Ok(DetachOutcome::Skipped(SkipReason::NotDistModule));
    }
    if !config.has_staging_url() {
        warn!("commons.distSvnStagingUrl is not set, the commons-release-plugin will not run.");
        return Ok(DetachOutcome::Skipped(SkipReason::StagingUrlUnset));
    }

    info!("Detaching Assemblies");
    let digests = digest_attached_artifacts(project.attached_artifacts())?;
    if !project.attached_artifacts().iter().any(Artifact::is_distribution) {
        info!("Current project contains no distributions. Not executing.");
        return Ok(DetachOutcome::Skipped(SkipReason::NoDistributions));
    }
    let detached = project.detach_where(Artifact::is_distribution);

    let stager = Stager::new(config.working_directory_for(project));
    let manifest = manifest_of(&digests);
    stager.prepare()?;
    let properties_file = stager.write_properties(&manifest)?;
    let staged_files = copy_detached(&stager, &detached)?;
    let digest_files = write_digest_files(&stager, &detached, &digests)?;

    Ok(DetachOutcome::Staged(StagingReport {
        working_directory: stager.working_directory().to_owned(),
        properties_file,
        digests: manifest,
        detached,
        staged_files,
        digest_files,
    }))
}

/// Compute the SHA-512 of every artifact, keyed by file name.
fn digest_attached_artifacts(artifacts: &[Artifact]) -> Result<BTreeMap<String, Sha512Digest>> {
    let mut digests = BTreeMap::new();
    for artifact in artifacts {
        let key = artifact.key()?;
        let digest = sha512_file(artifact.path()).map_err(|source| ReleaseError::ArtifactDigest {
            artifact: artifact.to_string(),
            source,
        })?;
        if digests.insert(key.to_owned(), digest).is_some() {
            debug!("SHA-512 for {key} replaced by a later artifact with the same file name");
        }
    }
    Ok(digests)
}

fn manifest_of(digests: &BTreeMap<String, Sha512Digest>) -> SortedProperties {
    let mut manifest = SortedProperties::new();
    for (key, digest) in digests {
        manifest.insert(key.as_str(), digest.as_str());
    }
    manifest
}

fn copy_detached(stager: &Stager, detached: &[Artifact]) -> Result<Vec<Utf8PathBuf>> {
    info!(
        "Copying {} detached artifacts to working directory {}",
        detached.len(),
        absolute_display(stager.working_directory())
    );
    detached
        .iter()
        .map(|artifact| stager.stage(artifact.path(), artifact.key()?))
        .collect()
}

/// Render `path` made absolute against the current directory, or as given
/// if that fails.
fn absolute_display(path: &Utf8Path) -> String {
    std::path::absolute(path).map_or_else(
        |_| path.to_string(),
        |absolute| absolute.display().to_string(),
    )
}

/// Write sidecars for detached artifacts, skipping PGP signatures.
///
/// Sidecars hold the manifest's digest for the key, so a later artifact with
/// the same file name wins here too.
fn write_digest_files(
    stager: &Stager,
    detached: &[Artifact],
    digests: &BTreeMap<String, Sha512Digest>,
) -> Result<Vec<Utf8PathBuf>> {
    let detached_keys = detached
        .iter()
        .map(Artifact::key)
        .collect::<Result<BTreeSet<&str>>>()?;
    digests
        .iter()
        .filter(|(key, _)| detached_keys.contains(key.as_str()) && !key.contains("asc"))
        .map(|(key, digest)| stager.write_digest_file(key, digest))
        .collect()
}

#[cfg(test)]
#[path = "detach_tests.rs"]
mod tests;
