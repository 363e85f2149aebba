//! Configuration types and CLI option enums.
//!
//! This module defines the library `Config` together with the enums used for
//! command-line argument parsing.

use std::fmt;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_CONTENT_ROOT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, LISTEN_PROBE_TIMEOUT_MS,
    TCP_CONNECT_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Exit code policy for the CLI.
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Always exit 0 once a report has been produced
    Never,
    /// Exit 2 when any entry of the report failed
    AnyFailure,
}

/// How the CLI prints a report.
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One coloured line per entry followed by its description
    Plain,
    /// The report serialized as a JSON document
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use service_check::Config;
///
/// let config = Config {
///     timeout_seconds: 5,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Site publishing start pages, without a trailing slash
    pub content_root: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// TCP connect timeout in seconds
    pub connect_timeout_seconds: u64,

    /// Timeout of the plain-HTTP listening probe in milliseconds
    pub listen_probe_timeout_ms: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_root: DEFAULT_CONTENT_ROOT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            connect_timeout_seconds: TCP_CONNECT_TIMEOUT_SECS,
            listen_probe_timeout_ms: LISTEN_PROBE_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// A configuration field holding an unusable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what is accepted instead
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

impl Config {
    /// Checks that every field holds a usable value.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError {
                field: "timeout_seconds",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.connect_timeout_seconds == 0 {
            return Err(ConfigValidationError {
                field: "connect_timeout_seconds",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.listen_probe_timeout_ms == 0 {
            return Err(ConfigValidationError {
                field: "listen_probe_timeout_ms",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.listen_probe_timeout() >= self.request_timeout() {
            return Err(ConfigValidationError {
                field: "listen_probe_timeout_ms",
                message: format!(
                    "must be shorter than the request timeout ({}s)",
                    self.timeout_seconds
                ),
            });
        }
        match url::Url::parse(&self.content_root) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {}
            _ => {
                return Err(ConfigValidationError {
                    field: "content_root",
                    message: format!(
                        "'{}' is not an absolute http:// or https:// URL",
                        self.content_root
                    ),
                });
            }
        }
        Ok(())
    }

    /// Per-request timeout applied by the shared HTTP client.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Short timeout used only by the HTTP-listening probe.
    pub fn listen_probe_timeout(&self) -> Duration {
        Duration::from_millis(self.listen_probe_timeout_ms)
    }

    /// Content root with any trailing slash removed, ready to prefix a slug.
    pub fn content_root_trimmed(&self) -> &str {
        self.content_root.trim_end_matches('/')
    }
}
