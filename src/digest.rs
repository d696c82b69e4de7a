//! SHA-512 digests for release artifacts.
//!
//! [`Sha512Digest`] wraps a 128-character lowercase hexadecimal string, the
//! form written to `sha512.properties` and to `.sha512` sidecar files.

use crate::error::{ReleaseError, Result};
use camino::Utf8Path;
use sha2::{Digest, Sha512};
use std::fmt;
use std::fs::File;
use std::io;

/// Expected length of a hex-encoded SHA-512 digest.
const DIGEST_HEX_LEN: usize = 128;

/// A validated hex-encoded SHA-512 digest string.
///
/// # Examples
///
/// ```
/// use commons_release::digest::Sha512Digest;
///
/// let hex = "a".repeat(128);
/// let digest = Sha512Digest::try_from(hex.as_str()).unwrap();
/// assert_eq!(digest.as_str().len(), 128);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha512Digest(String);

impl Sha512Digest {
    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    fn from_hasher(hasher: Sha512) -> Self {
        // LowerHex on the output array always yields 128 lowercase characters.
        Self(format!("{:x}", hasher.finalize()))
    }
}

impl TryFrom<&str> for Sha512Digest {
    type Error = ReleaseError;

    fn try_from(value: &str) -> Result<Self> {
        validate_sha512(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for Sha512Digest {
    type Error = ReleaseError;

    fn try_from(value: String) -> Result<Self> {
        validate_sha512(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for Sha512Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha512Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_sha512(value: &str) -> Result<()> {
    if value.len() != DIGEST_HEX_LEN {
        return Err(ReleaseError::InvalidSha512Digest {
            reason: format!(
                "expected {DIGEST_HEX_LEN} hex characters, got {}",
                value.len()
            ),
        });
    }
    if let Some(bad) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ReleaseError::InvalidSha512Digest {
            reason: format!("non-hex character '{bad}'"),
        });
    }
    if value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ReleaseError::InvalidSha512Digest {
            reason: "digest must be lowercase".to_owned(),
        });
    }
    Ok(())
}

/// Compute the SHA-512 digest of everything `reader` yields.
///
/// # Errors
///
/// Returns the underlying I/O error if reading fails.
pub fn sha512_of_reader<R: io::Read>(mut reader: R) -> io::Result<Sha512Digest> {
    let mut hasher = Sha512::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(Sha512Digest::from_hasher(hasher))
}

/// Compute the SHA-512 digest of the file at `path`.
///
/// The file is streamed through the hasher rather than read into memory.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be opened or read.
pub fn sha512_file(path: &Utf8Path) -> io::Result<Sha512Digest> {
    let file = File::open(path)?;
    sha512_of_reader(file)
}
