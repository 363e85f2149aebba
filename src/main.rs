//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `service_check` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Report output and exit codes
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use service_check::app::exit::EXIT_STARTUP_ERROR;
use service_check::app::{evaluate_exit_code, render_report};
use service_check::config::{
    DEFAULT_CONTENT_ROOT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, LISTEN_PROBE_TIMEOUT_MS,
    TCP_CONNECT_TIMEOUT_SECS,
};
use service_check::initialization::init_logger_with;
use service_check::{Config, FailOn, LogFormat, LogLevel, OutputFormat, ServiceChecker};

/// Audit the service linked from a GOV.UK start page.
#[derive(Debug, Parser)]
#[command(name = "service_check", version, about)]
struct Cli {
    /// Start page slug (e.g. `register-to-vote`) or its full URL
    #[arg(value_name = "SLUG")]
    slug: String,

    /// Site publishing the start pages
    #[arg(long, default_value = DEFAULT_CONTENT_ROOT)]
    content_root: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_seconds: u64,

    /// TCP connect timeout in seconds
    #[arg(long, default_value_t = TCP_CONNECT_TIMEOUT_SECS)]
    connect_timeout_seconds: u64,

    /// Timeout of the plain-HTTP listening probe in milliseconds
    #[arg(long, default_value_t = LISTEN_PROBE_TIMEOUT_MS)]
    listen_probe_timeout_ms: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,

    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// When to exit non-zero
    #[arg(long, value_enum, default_value_t = FailOn::Never)]
    fail_on: FailOn,
}

impl Cli {
    fn to_config(&self) -> Config {
        Config {
            content_root: self.content_root.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            timeout_seconds: self.timeout_seconds,
            connect_timeout_seconds: self.connect_timeout_seconds,
            listen_probe_timeout_ms: self.listen_probe_timeout_ms,
            user_agent: self.user_agent.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.to_config();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let checker = match ServiceChecker::new(config) {
        Ok(checker) => checker,
        Err(e) => {
            eprintln!("service_check error: {:#}", e);
            process::exit(EXIT_STARTUP_ERROR);
        }
    };

    let report = checker.run_service_check(&cli.slug).await;
    let rendered = render_report(&report, &cli.format).context("Failed to render report")?;
    println!("{}", rendered);

    process::exit(evaluate_exit_code(&cli.fail_on, &report))
}
