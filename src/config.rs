//! Staging configuration.
//!
//! `StagingConfig` carries the three settings the release step reads from the
//! build: where to stage, where the staged files will eventually be uploaded,
//! and whether the current module produces distributions at all. Values are
//! deserialised from a TOML file when one is supplied and fall back to the
//! defaults below otherwise; command-line flags are layered on top by the
//! binary.

use crate::error::{ReleaseError, Result};
use crate::project::Project;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;

/// Settings for the detachment and staging workflow.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StagingConfig {
    /// Directory the artifacts and digests are staged into.
    ///
    /// When absent, the project's `<build_directory>/commons-release-plugin`
    /// is used.
    pub working_directory: Option<Utf8PathBuf>,
    /// Subversion URL the staged distributions are later uploaded to.
    ///
    /// The workflow does not contact this URL; an empty value means staging
    /// is not configured and the workflow does nothing.
    pub dist_svn_staging_url: String,
    /// Whether this module produces release distributions. Defaults to
    /// `false` so the workflow only runs where it is switched on explicitly.
    pub is_dist_module: bool,
}

impl StagingConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use commons_release::config::StagingConfig;
    ///
    /// let config = StagingConfig::from_toml_str(
    ///     Utf8Path::new("release.toml"),
    ///     "is_dist_module = true\n",
    /// )
    /// .unwrap();
    /// assert!(config.is_dist_module);
    /// assert!(config.dist_svn_staging_url.is_empty());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::InvalidConfig`] for malformed TOML or unknown
    /// keys.
    pub fn from_toml_str(path: &Utf8Path, contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ReleaseError::InvalidConfig {
            path: path.to_owned(),
            reason: e.to_string(),
        })
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::InvalidConfig`] if the file cannot be read or
    /// parsed.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| ReleaseError::InvalidConfig {
            path: path.to_owned(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(path, &contents)
    }

    /// Return true when a staging URL has been configured.
    #[must_use]
    pub fn has_staging_url(&self) -> bool {
        !self.dist_svn_staging_url.is_empty()
    }

    /// Resolve the working directory for `project`.
    #[must_use]
    pub fn working_directory_for(&self, project: &Project) -> Utf8PathBuf {
        self.working_directory
            .clone()
            .unwrap_or_else(|| project.default_working_directory())
    }
}
