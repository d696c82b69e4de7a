//! The host project whose attached artifacts the workflow detaches.
//!
//! A [`Project`] owns the ordered attached-artifact list. The workflow takes it
//! by mutable reference and removes distributions from it in place; whatever
//! remains is what the host build publishes. On the command line the project
//! is exchanged as a JSON descriptor.

use crate::artifact::Artifact;
use crate::error::{ReleaseError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;

/// Name of the working directory created under the build directory.
pub const PLUGIN_DIRECTORY_NAME: &str = "commons-release-plugin";

fn default_build_directory() -> Utf8PathBuf {
    Utf8PathBuf::from("target")
}

/// A project's build output directory and attached artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// The build output directory, `target` by default.
    #[serde(default = "default_build_directory")]
    pub build_directory: Utf8PathBuf,
    /// Artifacts registered for publication, in attachment order.
    #[serde(default)]
    pub attached_artifacts: Vec<Artifact>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            build_directory: default_build_directory(),
            attached_artifacts: Vec::new(),
        }
    }
}

impl Project {
    /// Create a project with the given build directory and artifacts.
    #[must_use]
    pub fn new(build_directory: Utf8PathBuf, attached_artifacts: Vec<Artifact>) -> Self {
        Self {
            build_directory,
            attached_artifacts,
        }
    }

    /// Return the attached artifacts in attachment order.
    #[must_use]
    pub fn attached_artifacts(&self) -> &[Artifact] {
        &self.attached_artifacts
    }

    /// Remove every attached artifact for which `detach` returns true.
    ///
    /// The relative order of the remaining artifacts is preserved. Removed
    /// artifacts are returned in their original order.
    pub fn detach_where<F>(&mut self, mut detach: F) -> Vec<Artifact>
    where
        F: FnMut(&Artifact) -> bool,
    {
        let (detached, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.attached_artifacts)
            .into_iter()
            .partition(|artifact| detach(artifact));
        self.attached_artifacts = kept;
        detached
    }

    /// Return the default working directory, `<build>/commons-release-plugin`.
    #[must_use]
    pub fn default_working_directory(&self) -> Utf8PathBuf {
        self.build_directory.join(PLUGIN_DIRECTORY_NAME)
    }

    /// Parse a project descriptor from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::ProjectDescriptor`] if the JSON is malformed.
    pub fn from_json_str(path: &Utf8Path, contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| ReleaseError::ProjectDescriptor {
            path: path.to_owned(),
            reason: e.to_string(),
        })
    }

    /// Load a project descriptor from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::ProjectDescriptor`] if the file cannot be read
    /// or parsed.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| ReleaseError::ProjectDescriptor {
            path: path.to_owned(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(path, &contents)
    }

    /// Write the project descriptor back to disk as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::ProjectDescriptor`] if serialisation or the
    /// write fails.
    pub fn save(&self, path: &Utf8Path) -> Result<()> {
        let descriptor_error = |reason: String| ReleaseError::ProjectDescriptor {
            path: path.to_owned(),
            reason,
        };
        let mut json =
            serde_json::to_string_pretty(self).map_err(|e| descriptor_error(e.to_string()))?;
        json.push('\n');
        fs::write(path, json).map_err(|e| descriptor_error(e.to_string()))
    }
}
