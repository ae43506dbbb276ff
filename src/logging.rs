//! Process-wide logging setup.
//!
//! A [`LogContext`] is built once at process start and handed to the runner,
//! which runs the whole lifecycle inside the context's span.

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing::{info, info_span, Span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Prefix of every application log name.
pub const LOG_NAME_PREFIX: &str = "youpi2-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogLevel {
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Pick the level selected by the `--debug` / `--verbose` flags. `--debug` wins.
    pub fn from_flags(debug: bool, verbose: bool) -> Self {
        if debug {
            LogLevel::Trace
        } else if verbose {
            LogLevel::Debug
        } else {
            LogLevel::Info
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogContext {
    name: String,
    level: LogLevel,
}

impl LogContext {
    /// Install the global subscriber and return the context for `app_name`.
    ///
    /// `RUST_LOG` directives are applied on top of `level`. A subscriber that
    /// is already installed (several runners in one test binary) is kept.
    pub fn init(app_name: &str, level: LogLevel) -> Self {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from(level).into())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init();

        Self::new(app_name, level)
    }

    /// Context without touching the global subscriber.
    pub fn new(app_name: &str, level: LogLevel) -> Self {
        Self {
            name: format!("{LOG_NAME_PREFIX}{app_name}"),
            level,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub(crate) fn span(&self) -> Span {
        info_span!("app", name = %self.name)
    }

    pub(crate) fn starting_banner(&self, version: Option<&str>) {
        info!(
            "-------- starting {} (version {}) --------",
            self.name,
            version.unwrap_or("n/a")
        );
    }
}
