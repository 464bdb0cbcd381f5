//! CLI filter - selects suites and tests to run, wires up reporting
//!
//! The entry point an embedding test binary hands its suites to:
//!
//! ```no_run
//! use testcracks::{cli, Suite};
//! use testcracks::outcome::pass;
//!
//! fn main() -> std::process::ExitCode {
//!     let suites = vec![Suite::new("Math Tests").test("addition works", |_| pass())];
//!     cli::run(suites)
//! }
//! ```

use std::ffi::OsString;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::junit::write_junit_xml;
use crate::outcome::MAX_SUITES;
use crate::reporter::ConsoleReporter;
use crate::runner::Runner;
use crate::suite::Suite;

/// Run the registered test suites.
#[derive(Parser, Debug, Default)]
#[command(name = "testcracks", disable_version_flag = true)]
struct Args {
    /// List every suite and test without running anything
    #[arg(long)]
    list: bool,

    /// Run only suites whose name contains NAME
    #[arg(long, value_name = "NAME")]
    suite: Option<String>,

    /// Run only tests matching a suite substring and a test substring
    #[arg(long, num_args = 2, value_names = ["SUITE", "TEST"])]
    test: Option<Vec<String>>,

    /// Run tests whose name contains PATTERN, in any suite
    #[arg(long, value_name = "PATTERN")]
    r#match: Option<String>,

    /// Write a JUnit XML report to PATH after the run
    #[arg(long, value_name = "PATH")]
    xml: Option<PathBuf>,
}

/// Parse `std::env::args` and run. Returns the process exit code: 0 for a
/// clean run (or help/list), 1 for any failure, unmatched filters, or an
/// unwritable XML path.
pub fn run(suites: Vec<Suite>) -> ExitCode {
    run_from(std::env::args_os(), suites)
}

/// Like [`run`] but over explicit arguments.
pub fn run_from<I, T>(args: I, suites: Vec<Suite>) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(err) => {
            // Help lands here too; clap prints it to stdout with a zero code.
            let failed = err.use_stderr();
            let _ = err.print();
            return if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };
    ExitCode::from(execute(args, suites) as u8)
}

fn execute(args: Args, suites: Vec<Suite>) -> i32 {
    // Fail fast on an unwritable report path before any test runs.
    if let Some(path) = &args.xml {
        if let Err(err) = File::create(path) {
            eprintln!("Error: cannot create XML file '{}': {err}", path.display());
            return 1;
        }
    }

    if args.list {
        list_tests(&suites);
        return 0;
    }

    // --test constrains the suite as well; its suite component takes
    // precedence over --suite when both are given.
    let (suite_filter, test_filter) = match &args.test {
        Some(pair) => (Some(pair[0].as_str()), Some(pair[1].as_str())),
        None => (args.suite.as_deref(), None),
    };

    let filtered = filter_suites(suites, suite_filter, test_filter, args.r#match.as_deref());
    if filtered.is_empty() {
        println!("No tests matched filters.");
        return 1;
    }

    let record = Runner::new().run_all(&filtered);

    if let Some(path) = &args.xml {
        match write_junit_xml(path, &record) {
            Ok(()) => println!("\nResults written to {}", path.display()),
            Err(err) => eprintln!("Error: {err}"),
        }
    }

    ConsoleReporter::new().print_summary(&record.summary)
}

/// Suite-level substring filter first, then test-level inclusion: a test
/// stays when it matches the `--test` name or the `--match` pattern (either
/// suffices), or unconditionally when no test-level filter was given. Suites
/// left empty are dropped, and at most [`MAX_SUITES`] suites are kept.
fn filter_suites(
    suites: Vec<Suite>,
    suite_filter: Option<&str>,
    test_filter: Option<&str>,
    match_filter: Option<&str>,
) -> Vec<Suite> {
    let mut kept = Vec::new();

    for mut suite in suites {
        if kept.len() >= MAX_SUITES {
            break;
        }
        if let Some(pattern) = suite_filter {
            if !suite.name.contains(pattern) {
                continue;
            }
        }

        if test_filter.is_some() || match_filter.is_some() {
            suite.retain_tests(|test| {
                test_filter.is_some_and(|p| test.name.contains(p))
                    || match_filter.is_some_and(|p| test.name.contains(p))
            });
            if suite.is_empty() {
                continue;
            }
        }

        kept.push(suite);
    }

    kept
}

fn list_tests(suites: &[Suite]) {
    for suite in suites {
        println!("{}:", suite.name);
        for test in &suite.tests {
            let annotation = if test.is_implemented() { "" } else { " [skip]" };
            println!("  - {}{annotation}", test.name);
        }
    }
}
