//! File staging into the release working directory.
//!
//! This module handles creating the working directory and writing everything
//! a later upload step picks up from it: the `sha512.properties` manifest,
//! byte-for-byte copies of detached artifacts, and `.sha512` sidecar files.

use crate::digest::Sha512Digest;
use crate::error::{ReleaseError, Result};
use crate::properties::SortedProperties;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use std::fs::{self, File};
use std::io::{self, BufWriter};

/// File name of the digest manifest inside the working directory.
pub const SHA512_PROPERTIES_FILE: &str = "sha512.properties";

/// Header comment written at the top of the digest manifest.
pub const SHA512_PROPERTIES_COMMENT: &str = "Release SHA-512s";

/// Extension appended to an artifact's file name for its sidecar digest file.
pub const SHA512_EXTENSION: &str = "sha512";

/// Handles staging of detached artifacts into the working directory.
#[derive(Debug, Clone)]
pub struct Stager {
    working_directory: Utf8PathBuf,
}

impl Stager {
    /// Create a stager writing into `working_directory`.
    #[must_use]
    pub fn new(working_directory: Utf8PathBuf) -> Self {
        Self { working_directory }
    }

    /// Return the working directory.
    #[must_use]
    pub fn working_directory(&self) -> &Utf8Path {
        &self.working_directory
    }

    /// Create the working directory, and any missing parents, if absent.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::DirectoryCreation`] if the directory cannot be
    /// created.
    pub fn prepare(&self) -> Result<()> {
        if self.working_directory.is_dir() {
            return Ok(());
        }
        init_directory(&self.working_directory)
    }

    /// Return the path of the digest manifest.
    #[must_use]
    pub fn properties_path(&self) -> Utf8PathBuf {
        self.working_directory.join(SHA512_PROPERTIES_FILE)
    }

    /// Write `digests` to `sha512.properties`, replacing any previous file.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::PropertiesWrite`] if the file cannot be written.
    pub fn write_properties(&self, digests: &SortedProperties) -> Result<Utf8PathBuf> {
        let path = self.properties_path();
        info!("Writing {path}");
        File::create(&path)
            .and_then(|file| digests.store(BufWriter::new(file), Some(SHA512_PROPERTIES_COMMENT)))
            .map_err(|source| ReleaseError::PropertiesWrite {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }

    /// Copy `source` into the working directory under `file_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::CopyFailed`] if the copy fails.
    pub fn stage(&self, source: &Utf8Path, file_name: &str) -> Result<Utf8PathBuf> {
        let destination = self.working_directory.join(file_name);
        info!("Copying: {file_name}");
        copy_file(source, &destination)?;
        Ok(destination)
    }

    /// Return the sidecar digest path for an artifact file name.
    #[must_use]
    pub fn digest_file_path(&self, file_name: &str) -> Utf8PathBuf {
        self.working_directory
            .join(format!("{file_name}.{SHA512_EXTENSION}"))
    }

    /// Write `<file_name>.sha512` holding the digest and a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::DigestFileWrite`] if the file cannot be written.
    pub fn write_digest_file(&self, file_name: &str, digest: &Sha512Digest) -> Result<Utf8PathBuf> {
        let path = self.digest_file_path(file_name);
        info!("{file_name} sha512: {digest}");
        fs::write(&path, format!("{digest}\n")).map_err(|source| {
            ReleaseError::DigestFileWrite {
                file_name: file_name.to_owned(),
                source,
            }
        })?;
        Ok(path)
    }
}

/// Create `directory` and any missing parents.
///
/// # Errors
///
/// Returns [`ReleaseError::DirectoryCreation`] if creation fails.
pub fn init_directory(directory: &Utf8Path) -> Result<()> {
    debug!("Creating directory {directory}");
    fs::create_dir_all(directory).map_err(|source| ReleaseError::DirectoryCreation {
        path: directory.to_owned(),
        source,
    })
}

/// Copy `from` to `to` byte for byte, overwriting `to` if it exists.
///
/// # Errors
///
/// Returns [`ReleaseError::CopyFailed`] naming both paths if the copy fails,
/// including when `from` and `to` resolve to the same file.
pub fn copy_file(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    let copy_failed = |source| ReleaseError::CopyFailed {
        from: from.to_owned(),
        to: to.to_owned(),
        source,
    };
    if is_same_file(from, to) {
        return Err(copy_failed(io::Error::new(
            io::ErrorKind::InvalidInput,
            "source and destination are the same file",
        )));
    }
    fs::copy(from, to).map_err(copy_failed)?;
    Ok(())
}

/// Opening the destination truncates it, so a copy onto itself empties the
/// source.
fn is_same_file(from: &Utf8Path, to: &Utf8Path) -> bool {
    match (fs::canonicalize(from), fs::canonicalize(to)) {
        (Ok(from), Ok(to)) => from == to,
        _ => false,
    }
}

#[cfg(test)]
#[path = "stager_tests.rs"]
mod tests;
