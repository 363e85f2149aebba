//! Shared helpers.
//!
//! This module provides:
//! - CSS selector parsing for compile-time selector constants
//! - HTML escaping of untrusted text placed into report descriptions

mod escape;
mod selector;

pub use escape::escape_html;
pub use selector::parse_selector_unsafe;
