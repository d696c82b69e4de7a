//! CLI argument definitions for `commons-release`.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use crate::config::StagingConfig;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Apache Commons release steps.
#[derive(Parser, Debug)]
#[command(name = "commons-release")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Detach and stage the distributions listed in a project descriptor:\n",
    "    $ commons-release detach-distributions --project target/project.json \\\n",
    "        --dist-module --dist-svn-staging-url scm:svn:https://dist.apache.org/repos/dist/dev/commons/text\n\n",
    "  Read settings from a file and keep the descriptor untouched:\n",
    "    $ commons-release detach-distributions -p target/project.json -c release.toml --no-write-back",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Detach zip and tarball distributions and stage them with SHA-512s.
    DetachDistributions(DetachArgs),
}

/// Arguments for the `detach-distributions` command.
#[derive(Parser, Debug, Clone)]
pub struct DetachArgs {
    /// Project descriptor (JSON) listing the attached artifacts.
    #[arg(short, long, value_name = "FILE")]
    pub project: Utf8PathBuf,

    /// TOML file with staging settings; flags below take precedence.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Staging directory [default: <build_directory>/commons-release-plugin].
    #[arg(short, long, alias = "output-directory", value_name = "DIR")]
    pub working_directory: Option<Utf8PathBuf>,

    /// Subversion URL the staged distributions will be uploaded to.
    #[arg(long, value_name = "URL")]
    pub dist_svn_staging_url: Option<String>,

    /// Mark this module as producing release distributions.
    #[arg(long)]
    pub dist_module: bool,

    /// Do not rewrite the project descriptor after detaching.
    #[arg(long)]
    pub no_write_back: bool,
}

impl DetachArgs {
    /// Layer command-line overrides on top of `base`.
    #[must_use]
    pub fn apply_overrides(&self, mut base: StagingConfig) -> StagingConfig {
        if let Some(dir) = &self.working_directory {
            base.working_directory = Some(dir.clone());
        }
        if let Some(url) = &self.dist_svn_staging_url {
            base.dist_svn_staging_url.clone_from(url);
        }
        if self.dist_module {
            base.is_dist_module = true;
        }
        base
    }
}
