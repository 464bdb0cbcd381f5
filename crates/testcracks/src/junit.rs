//! JUnit XML reporter - serializes a run record for CI consumption
//!
//! The document shape is the de-facto JUnit schema: `testsuites` >
//! `testsuite` > `testcase`, with `failure`/`skipped` children. This
//! framework has no error category distinct from failure, so `errors` is
//! always reported as 0. Suite-level times are the sum of the stored
//! per-test times, which can diverge slightly from the wall-clock suite time
//! shown on the console.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::outcome::{Detail, Status, MAX_MSG_LEN};
use crate::runner::{RunRecord, SuiteRecord};

/// Output cap for a single escaped string.
const XML_ESCAPE_MAX: usize = MAX_MSG_LEN * 2;

/// Output cap for an assembled failure body.
const FAILURE_BODY_MAX: usize = MAX_MSG_LEN * 4;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot open '{path}' for writing: {source}")]
    Create {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed writing report to '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Write the most recent run as a JUnit-compatible XML document.
pub fn write_junit_xml(path: impl AsRef<Path>, record: &RunRecord) -> Result<(), ReportError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let file = File::create(path).map_err(|source| ReportError::Create {
        path: display.clone(),
        source,
    })?;

    let mut out = BufWriter::new(file);
    render(&mut out, record)
        .and_then(|()| out.flush())
        .map_err(|source| ReportError::Write {
            path: display,
            source,
        })
}

fn render(out: &mut impl Write, record: &RunRecord) -> io::Result<()> {
    let total = &record.summary;
    writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(
        out,
        "<testsuites tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"{}\" time=\"{:.3}\">",
        total.total(),
        total.failed,
        total.skipped,
        total.total_ms / 1000.0
    )?;

    for suite in &record.suites {
        render_suite(out, suite)?;
    }

    writeln!(out, "</testsuites>")
}

fn render_suite(out: &mut impl Write, suite: &SuiteRecord) -> io::Result<()> {
    // Counts and time come from the stored per-test outcomes, not the console
    // summary; a setup-failed suite stored nothing and serializes empty.
    let mut passed = 0usize;
    let mut failed = 0usize;
    let mut skipped = 0usize;
    let mut suite_ms = 0.0f64;
    for test in &suite.tests {
        suite_ms += test.outcome.elapsed_ms;
        match test.outcome.status {
            Status::Pass => passed += 1,
            Status::Fail => failed += 1,
            Status::Skip => skipped += 1,
        }
    }

    writeln!(
        out,
        "    <testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"{}\" time=\"{:.3}\">",
        xml_escape(&suite.name),
        passed + failed + skipped,
        failed,
        skipped,
        suite_ms / 1000.0
    )?;

    for test in &suite.tests {
        let name = xml_escape(&test.name);
        let outcome = &test.outcome;
        match outcome.status {
            Status::Pass => {
                writeln!(
                    out,
                    "        <testcase name=\"{}\" time=\"{:.3}\"/>",
                    name,
                    outcome.elapsed_ms / 1000.0
                )?;
            }
            Status::Fail => {
                writeln!(
                    out,
                    "        <testcase name=\"{}\" time=\"{:.3}\">",
                    name,
                    outcome.elapsed_ms / 1000.0
                )?;
                if let Some(first) = outcome.details.first() {
                    writeln!(
                        out,
                        "            <failure message=\"{}\" type=\"AssertionError\">{}</failure>",
                        xml_escape(&first.message),
                        failure_body(&outcome.details)
                    )?;
                }
                writeln!(out, "        </testcase>")?;
            }
            Status::Skip => {
                writeln!(out, "        <testcase name=\"{}\" time=\"0\">", name)?;
                match outcome.details.first() {
                    Some(detail) => writeln!(
                        out,
                        "            <skipped message=\"{}\"/>",
                        xml_escape(&detail.message)
                    )?,
                    None => writeln!(out, "            <skipped/>")?,
                }
                writeln!(out, "        </testcase>")?;
            }
        }
    }

    writeln!(out, "    </testsuite>")
}

/// Every accumulated message, plus labeled expected/actual lines where
/// present. Bounded: assembly stops silently once the cap is near, the same
/// truncate-don't-error policy applied everywhere else.
fn failure_body(details: &[Detail]) -> String {
    let mut body = String::new();
    for detail in details {
        if body.len() >= FAILURE_BODY_MAX - 100 {
            break;
        }
        body.push_str(&xml_escape(&detail.message));
        body.push('\n');
        if !detail.expected.is_empty() {
            body.push_str("  Expected: ");
            body.push_str(&xml_escape(&detail.expected));
            body.push('\n');
            body.push_str("  Actual:   ");
            body.push_str(&xml_escape(&detail.actual));
            body.push('\n');
        }
    }
    body
}

/// Entity-escape text for attribute or body positions. Output is bounded at
/// [`XML_ESCAPE_MAX`]: once within one entity's width of the cap, further
/// input is silently dropped.
fn xml_escape(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for c in src.chars() {
        if out.len() >= XML_ESCAPE_MAX - 6 {
            break;
        }
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{combine, fail_with, pass, skip};
    use crate::runner::{RunSummary, TestRecord};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn escape_produces_entities_without_double_escaping() {
        assert_eq!(xml_escape("a < b & c \"d\""), "a &lt; b &amp; c &quot;d&quot;");
        assert_eq!(xml_escape("&amp;"), "&amp;amp;");
        assert_eq!(xml_escape("'quoted'"), "&apos;quoted&apos;");
        assert_eq!(xml_escape("plain"), "plain");
    }

    #[test]
    fn escape_truncates_at_buffer_cap() {
        let huge = "x".repeat(XML_ESCAPE_MAX * 2);
        let escaped = xml_escape(&huge);
        assert!(escaped.len() <= XML_ESCAPE_MAX);

        let hostile = "&".repeat(XML_ESCAPE_MAX);
        let escaped = xml_escape(&hostile);
        assert!(escaped.len() <= XML_ESCAPE_MAX);
        assert!(escaped.ends_with("&amp;"));
    }

    fn sample_record() -> RunRecord {
        let mut failing = combine(
            fail_with("first check", "1", "2"),
            fail_with("second check", "hello", "world"),
        );
        failing.elapsed_ms = 4.0;
        let mut passing_a = pass();
        passing_a.elapsed_ms = 1.0;
        let mut passing_b = pass();
        passing_b.elapsed_ms = 2.0;

        let suite = SuiteRecord {
            name: "Math <&\"> Tests".to_string(),
            tests: vec![
                TestRecord {
                    name: "one".into(),
                    outcome: passing_a,
                },
                TestRecord {
                    name: "two".into(),
                    outcome: passing_b,
                },
                TestRecord {
                    name: "bad".into(),
                    outcome: failing,
                },
                TestRecord {
                    name: "later".into(),
                    outcome: skip("not yet"),
                },
            ],
            summary: RunSummary {
                passed: 2,
                failed: 1,
                skipped: 1,
                total_ms: 7.0,
            },
        };

        RunRecord {
            summary: suite.summary,
            suites: vec![suite],
        }
    }

    fn render_to_string(record: &RunRecord) -> String {
        let mut buf = Vec::new();
        render(&mut buf, record).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn document_carries_aggregate_counts() {
        let xml = render_to_string(&sample_record());
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(
            "<testsuites tests=\"4\" failures=\"1\" errors=\"0\" skipped=\"1\""
        ));
        assert!(xml.contains("tests=\"4\" failures=\"1\" errors=\"0\" skipped=\"1\" time=\"0.007\">"));
    }

    #[test]
    fn suite_name_is_escaped() {
        let xml = render_to_string(&sample_record());
        assert!(xml.contains("name=\"Math &lt;&amp;&quot;&gt; Tests\""));
        assert!(!xml.contains("Math <&\"> Tests"));
    }

    #[test]
    fn failure_carries_first_message_and_full_body() {
        let xml = render_to_string(&sample_record());
        assert!(xml.contains("<failure message=\"first check\" type=\"AssertionError\">"));
        assert!(xml.contains("first check\n  Expected: 1\n  Actual:   2\n"));
        assert!(xml.contains("second check\n  Expected: hello\n  Actual:   world\n"));
    }

    #[test]
    fn skip_serializes_with_zero_time_and_reason() {
        let xml = render_to_string(&sample_record());
        assert!(xml.contains("<testcase name=\"later\" time=\"0\">"));
        assert!(xml.contains("<skipped message=\"not yet\"/>"));
    }

    #[test]
    fn pass_is_self_closing() {
        let xml = render_to_string(&sample_record());
        assert!(xml.contains("<testcase name=\"one\" time=\"0.001\"/>"));
    }

    #[test]
    fn suite_time_sums_stored_test_times() {
        let xml = render_to_string(&sample_record());
        // 1.0 + 2.0 + 4.0 + 0.0 ms stored across the tests.
        assert!(xml.contains("time=\"0.007\">"));
    }

    #[test]
    fn setup_failed_suite_serializes_empty() {
        let record = RunRecord {
            suites: vec![SuiteRecord {
                name: "Broken".into(),
                tests: Vec::new(),
                summary: RunSummary {
                    failed: 3,
                    ..Default::default()
                },
            }],
            summary: RunSummary {
                failed: 3,
                ..Default::default()
            },
        };
        let xml = render_to_string(&record);
        assert!(xml.contains("<testsuites tests=\"3\" failures=\"3\""));
        assert!(xml.contains(
            "<testsuite name=\"Broken\" tests=\"0\" failures=\"0\" errors=\"0\" skipped=\"0\""
        ));
    }

    #[test]
    fn unwritable_path_is_a_distinct_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_junit_xml(dir.path(), &RunRecord::default()).unwrap_err();
        assert!(matches!(err, ReportError::Create { .. }));
    }

    #[test]
    fn writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.xml");
        write_junit_xml(&path, &sample_record()).unwrap();
        let xml = std::fs::read_to_string(&path).unwrap();
        assert!(xml.ends_with("</testsuites>\n"));
    }

    proptest! {
        #[test]
        fn escape_output_is_bounded_and_entity_clean(input in "\\PC*") {
            let escaped = xml_escape(&input);
            prop_assert!(escaped.len() <= XML_ESCAPE_MAX);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('"'));
            // Any ampersand left in the output begins an entity we emitted.
            for (i, _) in escaped.match_indices('&') {
                let rest = &escaped[i..];
                prop_assert!(
                    ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"]
                        .iter()
                        .any(|e| rest.starts_with(e))
                );
            }
        }
    }
}
