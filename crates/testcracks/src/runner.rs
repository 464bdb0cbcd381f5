//! Runner - sequential execution of suites and tests
//!
//! Execution is fully sequential and single-threaded: suites in the order
//! given, tests in declaration order. There is no timeout, retry, or fault
//! isolation; a hanging test blocks the whole run.
//!
//! Instead of process-wide result storage, every run returns a [`RunRecord`]
//! session object: populated append-only while the run streams its console
//! output, then handed read-only to the XML reporter.

use std::any::Any;
use std::time::Instant;

use crate::outcome::{skip, Outcome, Status};
use crate::reporter::ConsoleReporter;
use crate::suite::{Env, Suite, Test};

/// Aggregate counts for one suite or a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub total_ms: f64,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}

/// Name and outcome of one executed test.
#[derive(Debug, Clone)]
pub struct TestRecord {
    pub name: String,
    pub outcome: Outcome,
}

/// Everything recorded about one suite's run. A suite whose setup failed has
/// an empty `tests` vec but `summary.failed` equal to its test count.
#[derive(Debug, Clone)]
pub struct SuiteRecord {
    pub name: String,
    pub tests: Vec<TestRecord>,
    pub summary: RunSummary,
}

/// The most recent run: per-suite, per-test outcomes plus the grand total.
#[derive(Debug, Clone, Default)]
pub struct RunRecord {
    pub suites: Vec<SuiteRecord>,
    pub summary: RunSummary,
}

/// Executes tests and streams results to the console as they complete.
pub struct Runner {
    reporter: ConsoleReporter,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    pub fn new() -> Self {
        Self {
            reporter: ConsoleReporter::new(),
        }
    }

    /// Disable colored output for this process.
    pub fn with_no_color(self, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        self
    }

    /// Run one test against the suite environment. A test without a function
    /// short-circuits to a skip before timing starts, so its elapsed time is
    /// exactly zero.
    pub fn run_test(&self, test: &Test, env: &mut dyn Any) -> Outcome {
        let Some(func) = &test.func else {
            return skip(test.skip_reason.as_deref().unwrap_or("skipped"));
        };

        let start = Instant::now();
        let mut outcome = func(env);
        outcome.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        outcome
    }

    /// Run a whole suite: setup, each test in declaration order with
    /// streaming output, then teardown.
    ///
    /// When setup fails the suite is marked fully failed without running any
    /// test, and teardown does not run either: teardown releases what setup
    /// acquired, and a failed setup acquired nothing.
    pub fn run_suite(&self, suite: &Suite) -> SuiteRecord {
        let start = Instant::now();
        let mut summary = RunSummary::default();

        self.reporter.print_suite_header(&suite.name);

        let mut env: Env = Box::new(());
        if let Some(setup) = &suite.setup {
            match setup() {
                Ok(e) => env = e,
                Err(err) => {
                    self.reporter.print_setup_failure(&err);
                    summary.failed = suite.len();
                    return SuiteRecord {
                        name: suite.name.clone(),
                        tests: Vec::new(),
                        summary,
                    };
                }
            }
        }

        let mut tests = Vec::with_capacity(suite.len());
        for test in &suite.tests {
            let outcome = self.run_test(test, env.as_mut());
            self.reporter.print_result(&test.name, &outcome);

            match outcome.status {
                Status::Pass => summary.passed += 1,
                Status::Fail => summary.failed += 1,
                Status::Skip => summary.skipped += 1,
            }
            tests.push(TestRecord {
                name: test.name.clone(),
                outcome,
            });
        }

        // Teardown runs even when tests failed; it consumes the environment.
        if let Some(teardown) = &suite.teardown {
            teardown(env);
        }

        summary.total_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.reporter.print_suite_footer(summary.total_ms);

        SuiteRecord {
            name: suite.name.clone(),
            tests,
            summary,
        }
    }

    /// Run every suite in order and aggregate a grand total. The record's
    /// `total_ms` is wall-clock for the whole run, measured independently of
    /// the per-suite times.
    pub fn run_all(&self, suites: &[Suite]) -> RunRecord {
        let start = Instant::now();
        let mut record = RunRecord::default();

        for suite in suites {
            let suite_record = self.run_suite(suite);
            record.summary.passed += suite_record.summary.passed;
            record.summary.failed += suite_record.summary.failed;
            record.summary.skipped += suite_record.summary.skipped;
            record.suites.push(suite_record);
        }

        record.summary.total_ms = start.elapsed().as_secs_f64() * 1000.0;
        record
    }
}
