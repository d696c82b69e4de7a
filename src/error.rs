//! Error types for the release detachment workflow.
//!
//! Every I/O failure is fatal to the workflow, so each variant names the file
//! or artifact involved and keeps the underlying [`std::io::Error`] as its
//! source. Configuration skips are not errors; see
//! [`crate::detach::DetachOutcome`].

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while detaching and staging distributions.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// The backing file of an attached artifact could not be read for hashing.
    #[error("could not compute SHA-512 for artifact {artifact}")]
    ArtifactDigest {
        /// Coordinates and type of the artifact, as `id-classifier-version type: type`.
        artifact: String,
        /// The underlying read failure.
        #[source]
        source: std::io::Error,
    },

    /// The artifact's backing file path has no file name component.
    #[error("artifact {artifact} has no file name in path {path}")]
    MissingFileName {
        /// Coordinates and type of the artifact.
        artifact: String,
        /// The offending path.
        path: Utf8PathBuf,
    },

    /// The working directory could not be created.
    #[error("could not create directory {path}")]
    DirectoryCreation {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The `sha512.properties` manifest could not be written.
    #[error("failure to write SHA-512s to {path}")]
    PropertiesWrite {
        /// Path of the properties file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A detached artifact could not be copied into the working directory.
    #[error("failed to copy {from} to {to}")]
    CopyFailed {
        /// Source file.
        from: Utf8PathBuf,
        /// Destination file.
        to: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A `.sha512` sidecar file could not be written.
    #[error("could not write SHA-512 file for {file_name}")]
    DigestFileWrite {
        /// File name of the artifact whose sidecar failed.
        file_name: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A string is not a well-formed hex-encoded SHA-512 digest.
    #[error("invalid SHA-512 digest: {reason}")]
    InvalidSha512Digest {
        /// Description of the validation failure.
        reason: String,
    },

    /// A project descriptor could not be read, parsed, or written.
    #[error("invalid project descriptor {path}: {reason}")]
    ProjectDescriptor {
        /// Path to the descriptor.
        path: Utf8PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// A configuration file could not be read or parsed.
    #[error("invalid configuration {path}: {reason}")]
    InvalidConfig {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// Description of the parse error.
        reason: String,
    },
}

/// Result type alias using [`ReleaseError`].
pub type Result<T> = std::result::Result<T, ReleaseError>;
