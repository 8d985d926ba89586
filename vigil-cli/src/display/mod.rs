//! Terminal rendering for status results.

mod spinner;

pub use spinner::Spinner;

use colored::{ColoredString, Colorize};
use vigil_core::{ServiceStatus, Severity, VigilError};

fn glyph(severity: Severity) -> ColoredString {
    match severity {
        Severity::Pass => "✔".green(),
        Severity::Warn => "⚠".yellow(),
        Severity::Fail => "✖".red(),
    }
}

fn level_text(status: &ServiceStatus) -> ColoredString {
    let text = status.level.to_string().to_lowercase();
    match status.level.severity() {
        Severity::Pass => text.green(),
        Severity::Warn => text.yellow(),
        Severity::Fail => text.red(),
    }
}

/// One result line, e.g. `✔ github 👉 operational`.
pub fn status_line(status: &ServiceStatus) -> String {
    let mut line = format!(
        "{} {} 👉 {}",
        glyph(status.level.severity()),
        status.service,
        level_text(status)
    );
    if let Some(description) = &status.description {
        line.push_str(&format!(" ({})", description));
    }
    line
}

pub fn report_error(err: &VigilError, verbose: bool) {
    eprintln!("{} {}", "Error:".red(), err);
    if verbose {
        eprintln!("{:?}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::StatusLevel;

    #[test]
    fn test_status_line_contains_service_and_level() {
        colored::control::set_override(false);
        let line = status_line(&ServiceStatus::new("github", StatusLevel::Operational));
        assert_eq!(line, "✔ github 👉 operational");
    }

    #[test]
    fn test_status_line_appends_description() {
        colored::control::set_override(false);
        let line = status_line(
            &ServiceStatus::new("slack", StatusLevel::PartialOutage)
                .with_description("API errors"),
        );
        assert_eq!(line, "⚠ slack 👉 partial outage (API errors)");
    }
}
