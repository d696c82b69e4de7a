//! Log output for the CLI.
//!
//! Library code only talks to the `log` facade. The binary installs a
//! `tracing-subscriber` formatter on stderr, whose `tracing-log` bridge
//! forwards those records. `RUST_LOG` directives take precedence over the
//! `-v`/`-q` flags.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Error returned when a global subscriber is already installed.
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Map the CLI's `-v`/`-q` flags to a level filter.
#[must_use]
pub const fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::WARN;
    }
    match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Build the filter: `directives` if given, otherwise everything at `level`.
#[must_use]
pub fn filter_for(level: LevelFilter, directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Install the stderr subscriber at `level`, honouring `RUST_LOG`.
///
/// # Errors
///
/// Returns [`InitError`] if a global subscriber or logger is already set.
pub fn init(level: LevelFilter) -> Result<(), InitError> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(level, directives.as_deref()))
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init()
}
