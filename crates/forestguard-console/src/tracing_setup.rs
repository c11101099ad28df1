//! Tracing subscriber initialization for the `forestguard` binary.
//!
//! The terminal belongs to the TUI, so logs go to `--log-file` when one is
//! given. Without a log file only errors reach stderr, and only while the
//! TUI does not own the terminal (see [`set_terminal_owned`]).
//!
//! # Filter priority (highest to lowest)
//!
//! 1. `FORESTGUARD_LOG` (directives, e.g. `forestguard::spatial=trace,warn`)
//! 2. `RUST_LOG`
//! 3. CLI flags (`-v` → debug, `-q` → error)
//! 4. `FORESTGUARD_LOG_LEVEL` (a bare level name)
//! 5. Default: `info` with a log file, `error` without one

use std::error::Error;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use forestguard_core::tracing_config;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub const ENV_LOG: &str = "FORESTGUARD_LOG";

static TERMINAL_OWNED: AtomicBool = AtomicBool::new(false);

/// Mark the terminal as taken over by the TUI. Stderr output is dropped
/// while set, since it would draw over the alternate screen.
pub fn set_terminal_owned(owned: bool) {
    TERMINAL_OWNED.store(owned, Ordering::Relaxed);
}

#[must_use]
pub fn stderr_enabled() -> bool {
    !TERMINAL_OWNED.load(Ordering::Relaxed)
}

fn stderr_writer() -> Box<dyn Write + Send> {
    if stderr_enabled() {
        Box::new(io::stderr())
    } else {
        Box::new(io::sink())
    }
}

/// Verbosity level derived from CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// `-q` / `--quiet`.
    Quiet,
    #[default]
    Normal,
    /// `-v` / `--verbose`.
    Verbose,
}

impl Verbosity {
    /// `--verbose` wins when both flags are given.
    #[must_use]
    pub const fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    /// Level used when no environment directive applies.
    #[must_use]
    pub const fn default_level(self, has_log_file: bool) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Verbose => Level::DEBUG,
            Self::Normal if has_log_file => Level::INFO,
            Self::Normal => Level::ERROR,
        }
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails when the log file cannot be opened or a global subscriber is
/// already installed.
pub fn init_subscriber(
    verbosity: Verbosity,
    log_file: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let env_directives = std::env::var(ENV_LOG)
        .ok()
        .or_else(|| std::env::var("RUST_LOG").ok());
    let filter = build_env_filter(verbosity, log_file.is_some(), env_directives.as_deref());

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true)
                    .with_timer(fmt::time::uptime()),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(stderr_writer)
                    .with_target(true)
                    .without_time()
                    .compact(),
            )
            .try_init()?;
    }
    Ok(())
}

/// Build the filter from environment directives or the CLI verbosity.
///
/// Unparseable directives fall back to the verbosity default.
#[must_use]
pub fn build_env_filter(
    verbosity: Verbosity,
    has_log_file: bool,
    env_directives: Option<&str>,
) -> EnvFilter {
    if let Some(directives) = env_directives
        && let Ok(filter) = EnvFilter::try_new(directives)
    {
        return filter;
    }
    let level = resolve_level(verbosity, has_log_file);
    EnvFilter::new(default_directive(verbosity, level))
}

/// Level for a verbosity. Without a flag, `FORESTGUARD_LOG_LEVEL` may
/// replace the default.
#[must_use]
pub fn resolve_level(verbosity: Verbosity, has_log_file: bool) -> Level {
    let level = verbosity.default_level(has_log_file);
    match verbosity {
        Verbosity::Normal => tracing_config::level_from_env(level),
        Verbosity::Quiet | Verbosity::Verbose => level,
    }
}

/// Directive string for a verbosity at `level`; verbose mode applies the
/// level to forestguard targets only and keeps dependencies at `warn`.
#[must_use]
pub fn default_directive(verbosity: Verbosity, level: Level) -> String {
    if verbosity == Verbosity::Verbose {
        format!("warn,{}={level}", tracing_config::TARGET_PREFIX)
    } else {
        level.to_string()
    }
}
