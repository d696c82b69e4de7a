//! Build artifacts attached to a project.
//!
//! An [`Artifact`] carries Maven-style coordinates, a type tag such as `zip`
//! or `tar.gz.asc`, and the path of its backing file. The type tag decides
//! whether the artifact is a release distribution that should be detached.

use crate::error::{ReleaseError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Artifact types produced by the assembly step that are detached from the
/// binary-repository deployment: source and binary archives plus their PGP
/// signatures.
pub const DETACHED_ARTIFACT_TYPES: [&str; 4] = ["zip", "tar.gz", "zip.asc", "tar.gz.asc"];

/// A build output registered with the project for publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Group identifier, e.g. `org.apache.commons`.
    pub group_id: String,
    /// Artifact identifier, e.g. `commons-text`.
    pub artifact_id: String,
    /// Version string.
    pub version: String,
    /// Optional classifier such as `src` or `bin`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    /// Type tag derived from the file extension family.
    #[serde(rename = "type")]
    pub artifact_type: String,
    /// Path to the backing file on disk.
    pub file: Utf8PathBuf,
}

impl Artifact {
    /// Return whether this artifact's type is one that gets detached.
    #[must_use]
    pub fn is_distribution(&self) -> bool {
        DETACHED_ARTIFACT_TYPES.contains(&self.artifact_type.as_str())
    }

    /// Return the backing file's name, if the path has one.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file.file_name()
    }

    /// Return the key under which this artifact's digest is recorded.
    ///
    /// The key is the backing file's name, e.g. `commons-text-1.4-src.tar.gz`.
    /// Artifacts sharing a file name share a key.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::MissingFileName`] if the path ends in `..` or is
    /// empty.
    pub fn key(&self) -> Result<&str> {
        self.file_name()
            .ok_or_else(|| ReleaseError::MissingFileName {
                artifact: self.to_string(),
                path: self.file.clone(),
            })
    }

    /// Return the backing file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.file
    }
}

impl fmt::Display for Artifact {
    /// Formats as `artifactId-classifier-version type: type`, the identity used
    /// in failure messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{} type: {}",
            self.artifact_id,
            self.classifier.as_deref().unwrap_or("null"),
            self.version,
            self.artifact_type
        )
    }
}
