//! Console reporter - per-test lines, suite headers, and the final summary

use colored::{Color, Colorize};

use crate::outcome::{Outcome, Status};
use crate::runner::RunSummary;

/// Renders outcomes to stdout as the runner produces them.
///
/// Honors `NO_COLOR` through the `colored` crate; tests and embedders can
/// also force plain output with `colored::control::set_override(false)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_suite_header(&self, name: &str) {
        println!("\n=== {name} ===");
    }

    /// One streamed line per test: status glyph, name, elapsed time, then any
    /// failure details or the skip reason.
    pub fn print_result(&self, name: &str, outcome: &Outcome) {
        let (glyph, color) = match outcome.status {
            Status::Pass => ("\u{2713}", Color::Green),  // ✓
            Status::Fail => ("\u{2717}", Color::Red),    // ✗
            Status::Skip => ("\u{25cb}", Color::Yellow), // ○
        };

        println!(
            "  {} ({:.2}ms)",
            format!("{glyph} {name}").color(color),
            outcome.elapsed_ms
        );

        match outcome.status {
            Status::Fail => {
                for detail in &outcome.details {
                    println!("      {}", detail.message.as_str().color(color));
                    if !detail.expected.is_empty() {
                        println!("        Expected: {}", detail.expected);
                        println!("        Actual:   {}", detail.actual);
                    }
                }
            }
            Status::Skip => {
                if let Some(detail) = outcome.details.first() {
                    println!("      {}", format!("[{}]", detail.message).color(color));
                }
            }
            Status::Pass => {}
        }
    }

    /// Reported distinctly from an individual test failure.
    pub fn print_setup_failure(&self, err: &anyhow::Error) {
        println!("  {}", format!("\u{2717} Setup failed: {err}").red());
    }

    pub fn print_suite_footer(&self, total_ms: f64) {
        println!("  ({total_ms:.2}ms)");
    }

    /// Final line for the whole run; returns the process exit code (1 when
    /// any failure occurred, else 0).
    pub fn print_summary(&self, summary: &RunSummary) -> i32 {
        let line = summary_line(summary);
        println!();
        if summary.failed == 0 {
            println!("{}", line.green());
        } else {
            println!("{}", line.red());
        }
        i32::from(summary.failed > 0)
    }
}

/// `P/T passed[, F failed][, S skipped] (T ms)` - the failed and skipped
/// clauses appear only when nonzero.
pub fn summary_line(summary: &RunSummary) -> String {
    let mut line = format!("{}/{} passed", summary.passed, summary.total());
    if summary.failed > 0 {
        line.push_str(&format!(", {} failed", summary.failed));
    }
    if summary.skipped > 0 {
        line.push_str(&format!(", {} skipped", summary.skipped));
    }
    line.push_str(&format!(" ({:.2}ms)", summary.total_ms));
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{combine, fail_with, pass, skip};
    use pretty_assertions::assert_eq;

    #[test]
    fn summary_line_hides_zero_clauses() {
        let summary = RunSummary {
            passed: 3,
            failed: 0,
            skipped: 0,
            total_ms: 12.5,
        };
        assert_eq!(summary_line(&summary), "3/3 passed (12.50ms)");
    }

    #[test]
    fn summary_line_shows_failures_and_skips() {
        let summary = RunSummary {
            passed: 2,
            failed: 1,
            skipped: 1,
            total_ms: 7.0,
        };
        assert_eq!(summary_line(&summary), "2/4 passed, 1 failed, 1 skipped (7.00ms)");
    }

    #[test]
    fn exit_code_reflects_failures() {
        let reporter = ConsoleReporter::new();
        colored::control::set_override(false);
        let clean = RunSummary {
            passed: 1,
            ..Default::default()
        };
        assert_eq!(reporter.print_summary(&clean), 0);
        let dirty = RunSummary {
            failed: 1,
            ..Default::default()
        };
        assert_eq!(reporter.print_summary(&dirty), 1);
    }

    #[test]
    fn print_result_handles_every_status() {
        colored::control::set_override(false);
        let reporter = ConsoleReporter::new();
        reporter.print_result("fine", &pass());
        reporter.print_result(
            "broken",
            &combine(
                fail_with("first", "1", "2"),
                fail_with("second", "a", "b"),
            ),
        );
        reporter.print_result("later", &skip("not on this platform"));
    }
}
