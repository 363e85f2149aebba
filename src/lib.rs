//! service_check library: audits a service linked from a GOV.UK start page
//!
//! Given the slug of a start page on the content site, the library fetches
//! the page, finds its "Start now" link and, if that link points at a
//! `service.gov.uk` domain, runs a fixed set of independent probes against
//! the service concurrently: bare-domain redirect, plain-HTTP behaviour,
//! HSTS, canonical `www.` naming, robots.txt and cookie attributes.
//!
//! # Example
//!
//! ```no_run
//! use service_check::{Config, ServiceChecker};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     timeout_seconds: 5,
//!     ..Default::default()
//! };
//! let checker = ServiceChecker::new(config)?;
//!
//! let report = checker.run_service_check("/register-to-vote").await;
//! println!("{}: {} failures", report.slug, report.failures().count());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod app;
pub mod check;
pub mod config;
pub mod domain;
pub mod error_handling;
pub mod fetch;
pub mod headers;
pub mod initialization;
pub mod probes;
pub mod start_page;
mod utils;

// Re-export public API
pub use check::{run_probes, run_service_check, ServiceChecker, ServiceReport};
pub use config::{Config, FailOn, LogFormat, LogLevel, OutputFormat};
pub use error_handling::{FetchError, InitializationError, ProbeError, ResolveError};
pub use fetch::{FetchedPage, HttpFetcher, PageFetcher};
pub use probes::{CheckResult, CheckTarget, ProbeKind};
