//! Logging utilities for the PlayOn client.
//!
//! Every crate logs through `tracing` macros; this module owns the one place
//! where a subscriber gets installed. Read paths that degrade to empty lists
//! log at WARN, failed writes at ERROR.

use std::path::Path;
use std::str::FromStr;
use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// # Examples
///
/// ```
/// use playon_common::logging;
///
/// // Initialize with default log level (INFO)
/// logging::init();
///
/// // Initialize with a specific log level
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// Output goes to stderr so it never interleaves with what the CLI prints
/// on stdout. `RUST_LOG` directives are honoured on top of `level`.
pub fn init_with_level(level: Level) {
    let result = tracing_subscriber::registry()
        .with(stderr_layer())
        .with(filter_for(level))
        .try_init();

    // try_init fails if a global subscriber is already set, which is fine in tests
    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Initialize stderr logging plus a daily rolling log file under `directory`.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the program.
pub fn init_with_file(level: Level, directory: &Path) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(directory, "playon.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let result = tracing_subscriber::registry()
        .with(stderr_layer())
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .with(filter_for(level))
        .try_init();

    if result.is_ok() {
        info!(
            "Logging initialized at level: {} (files in {})",
            level,
            directory.display()
        );
    }
    guard
}

/// Parses a level name from configuration, defaulting to INFO.
pub fn parse_level(name: &str) -> Level {
    Level::from_str(name.trim()).unwrap_or(Level::INFO)
}

fn stderr_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
}

fn filter_for(level: Level) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("playon={}", level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
