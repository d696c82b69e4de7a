//! Apache Commons release tooling.
//!
//! This crate detaches release distributions (source and binary zips and
//! tarballs, plus their PGP signatures) from a project's attached artifacts so
//! they are not deployed to the binary repository, and stages them with
//! SHA-512 digests for upload to the distribution area.
//!
//! # Modules
//!
//! - [`artifact`] - Attached artifacts and the distribution type allow-list
//! - [`cli`] - Command-line argument definitions
//! - [`command`] - Command handlers used by the binary
//! - [`config`] - Staging configuration and its TOML loader
//! - [`detach`] - The detachment and checksum staging workflow
//! - [`digest`] - SHA-512 computation and the digest newtype
//! - [`error`] - Error types for every failing step
//! - [`logging`] - Stderr `tracing-subscriber` setup for the CLI
//! - [`project`] - The project whose artifacts are detached
//! - [`properties`] - Key-sorted Java properties output
//! - [`stager`] - Writing the working directory's contents

pub mod artifact;
pub mod cli;
pub mod command;
pub mod config;
pub mod detach;
pub mod digest;
pub mod error;
pub mod logging;
pub mod project;
pub mod properties;
pub mod stager;

pub use artifact::Artifact;
pub use config::StagingConfig;
pub use detach::{DetachOutcome, SkipReason, StagingReport, detach_distributions};
pub use error::{ReleaseError, Result};
pub use project::Project;
