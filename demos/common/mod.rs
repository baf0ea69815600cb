//! Shared utilities for the holdem_equity demos.
//!
//! Tracing setup with CLI argument support.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// CLI arguments for controlling tracing/logging output.
///
/// Embed into a demo's CLI with `#[command(flatten)]`.
#[derive(clap::Args, Debug, Clone)]
pub struct TracingArgs {
    /// Increase logging verbosity (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Suppress all output except warnings and errors
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log output format: compact, pretty, or json
    #[arg(long = "log-format", default_value = "compact", global = true)]
    pub log_format: LogFormat,
}

/// Available log output formats.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact single-line format (default)
    #[default]
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for machine parsing
    Json,
}

impl TracingArgs {
    /// Initialize the tracing subscriber.
    ///
    /// `RUST_LOG` wins when set. Otherwise `-q` is warn, the default is info,
    /// `-v` is debug and `-vv` is trace.
    ///
    /// # Panics
    ///
    /// Panics if the subscriber has already been set.
    pub fn init_tracing(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            let level = if self.quiet {
                "warn"
            } else {
                match self.verbosity {
                    0 => "info",
                    1 => "debug",
                    _ => "trace",
                }
            };
            EnvFilter::new(format!("{level},holdem_equity={level}"))
        };

        match self.log_format {
            LogFormat::Compact => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact())
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty())
                    .init();
            }
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json())
                    .init();
            }
        }
    }
}
