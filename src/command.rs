//! Command handlers behind the CLI.
//!
//! Handlers take parsed arguments, resolve configuration and the project
//! descriptor, and call into the library. They are kept out of `main.rs` so
//! tests can drive them without spawning the binary.

use crate::cli::DetachArgs;
use crate::config::StagingConfig;
use crate::detach::{DetachOutcome, detach_distributions};
use crate::error::Result;
use crate::project::Project;
use log::{debug, info};

/// Run `detach-distributions`.
///
/// Settings are read from `--config` when given, then overridden by flags.
/// After a successful staging run the project descriptor is rewritten with the
/// remaining attached artifacts unless `--no-write-back` is set. Skipped runs
/// never touch the descriptor.
///
/// # Errors
///
/// Returns an error if the configuration or descriptor cannot be loaded, if
/// the workflow fails, or if the descriptor cannot be rewritten.
pub fn run_detach(args: &DetachArgs) -> Result<DetachOutcome> {
    let base = match &args.config {
        Some(path) => StagingConfig::load(path)?,
        None => StagingConfig::default(),
    };
    let config = args.apply_overrides(base);
    let mut project = Project::load(&args.project)?;

    let outcome = detach_distributions(&mut project, &config)?;

    if let DetachOutcome::Staged(report) = &outcome {
        if args.no_write_back {
            debug!("Leaving {} unchanged", args.project);
        } else {
            project.save(&args.project)?;
            info!(
                "Detached {} artifacts; {} remain attached in {}",
                report.detached.len(),
                project.attached_artifacts().len(),
                args.project
            );
        }
    }
    Ok(outcome)
}
