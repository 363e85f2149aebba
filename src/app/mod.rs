//! CLI-facing helpers.
//!
//! Rendering of a [`ServiceReport`](crate::ServiceReport) for the terminal and
//! the exit-code policy applied to it by the binary.

pub mod exit;
pub mod output;

pub use exit::evaluate_exit_code;
pub use output::{render_json, render_plain, render_report, strip_markup};
