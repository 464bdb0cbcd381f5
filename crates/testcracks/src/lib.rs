//! # testcracks
//!
//! Lightweight unit-testing framework built around an accumulating result
//! algebra: every assertion returns an [`Outcome`], multiple outcomes inside
//! one test body merge with [`combine`] so all violated assertions surface in
//! a single run, and suites of tests run sequentially through a streaming
//! console reporter with optional JUnit XML output and substring filtering
//! from the command line.
//!
//! A test binary registers suites and delegates to [`cli::run`]:
//!
//! ```no_run
//! use testcracks::{assert_equal, cli, combine, Suite};
//!
//! fn main() -> std::process::ExitCode {
//!     let math = Suite::new("Math Tests")
//!         .test("addition works", |_| assert_equal(4, 2 + 2, "should equal 4"))
//!         .test("several checks", |_| {
//!             combine(
//!                 assert_equal(10, 5 * 2, "doubling"),
//!                 assert_equal(0, 5 % 5, "remainder"),
//!             )
//!         });
//!     cli::run(vec![math])
//! }
//! ```

pub mod assert;
pub mod cli;
pub mod junit;
pub mod outcome;
pub mod reporter;
pub mod runner;
pub mod suite;

pub use assert::{
    assert_contains, assert_empty, assert_equal, assert_equal_str, assert_false, assert_greater,
    assert_greater_or_equal, assert_in_delta, assert_len, assert_less, assert_less_or_equal,
    assert_none, assert_not_contains, assert_not_empty, assert_not_equal, assert_not_equal_str,
    assert_some, assert_true,
};
pub use junit::{write_junit_xml, ReportError};
pub use outcome::{
    combine, fail, fail_with, pass, skip, skip_if, skip_unless, Detail, Outcome, Status,
    MAX_ERRORS, MAX_MSG_LEN, MAX_SUITES, MAX_TESTS_PER_SUITE,
};
pub use reporter::ConsoleReporter;
pub use runner::{RunRecord, RunSummary, Runner, SuiteRecord, TestRecord};
pub use suite::{Env, Suite, Test};
