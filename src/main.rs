//! `commons-release` CLI entrypoint.
//!
//! Parses arguments, installs the stderr logger, and dispatches to the
//! command handlers in the library.

use clap::Parser;
use commons_release::cli::{Cli, Command};
use commons_release::command::run_detach;
use commons_release::error::{ReleaseError, Result};
use commons_release::logging;
use std::error::Error as _;
use std::io::Write;
use std::{fmt, iter};

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    if let Err(err) = logging::init(logging::level_for(cli.verbosity, cli.quiet)) {
        write_line(&mut stderr, format_args!("warning: logging disabled: {err}"));
    }
    let status = match run(&cli) {
        Ok(()) => 0,
        Err(err) => report_failure(&err, &mut stderr),
    };
    if status != 0 {
        std::process::exit(status);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::DetachDistributions(args) => run_detach(args).map(|_| ()),
    }
}

/// Print `err` and each of its causes, then return the failure exit status.
fn report_failure(err: &ReleaseError, stderr: &mut dyn Write) -> i32 {
    write_line(stderr, format_args!("error: {err}"));
    let causes = iter::successors(err.source(), |&cause| cause.source());
    for cause in causes {
        write_line(stderr, format_args!("  caused by: {cause}"));
    }
    1
}

fn write_line(stderr: &mut dyn Write, line: fmt::Arguments<'_>) {
    // Nowhere left to report a failed stderr write.
    let _ = stderr.write_fmt(format_args!("{line}\n"));
}
