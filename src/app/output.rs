//! Report rendering.

use colored::Colorize;
use scraper::Html;

use crate::check::ServiceReport;
use crate::config::OutputFormat;

/// Renders `report` in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_report(
    report: &ServiceReport,
    format: &OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Plain => Ok(render_plain(report)),
        OutputFormat::Json => render_json(report),
    }
}

/// Pretty-printed JSON, descriptions kept as HTML.
pub fn render_json(report: &ServiceReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Human-readable report: a header, then one `PASS`/`FAIL` line per entry
/// with its description as indented plain text.
pub fn render_plain(report: &ServiceReport) -> String {
    let mut out = format!("{}\n", report.slug.bold());
    if let Some(link) = &report.link {
        out.push_str(&format!("  links to {}\n", link));
    }
    out.push('\n');

    for entry in &report.entries {
        let verdict = if entry.passed {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };
        out.push_str(&format!("{} {}\n", verdict, entry.title));
        for line in strip_markup(&entry.description).lines() {
            let line = line.trim();
            if !line.is_empty() {
                out.push_str(&format!("     {}\n", line));
            }
        }
    }

    let failed = report.failures().count();
    out.push_str(&format!(
        "\n{} of {} checks passed\n",
        report.entries.len() - failed,
        report.entries.len()
    ));
    out
}

/// Plain text of an HTML description.
///
/// `<br />` becomes a line break, other tags are dropped and entities are
/// decoded.
pub fn strip_markup(description: &str) -> String {
    let with_breaks = description.replace("<br />", "\n");
    Html::parse_fragment(&with_breaks)
        .root_element()
        .text()
        .collect()
}
