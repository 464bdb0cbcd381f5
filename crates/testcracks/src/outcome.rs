//! Outcome algebra - pass/fail/skip results and their composition
//!
//! An [`Outcome`] is the value a test function returns. Failures carry a
//! bounded list of [`Detail`] records, which is what lets a single test body
//! report every violated assertion in one run: each assertion produces its own
//! Outcome and [`combine`] accumulates them.

use std::fmt;

/// Maximum number of details an outcome will accumulate. Further details are
/// silently dropped.
pub const MAX_ERRORS: usize = 50;

/// Maximum byte length of any detail field. Longer text is truncated.
pub const MAX_MSG_LEN: usize = 512;

/// Maximum number of tests a suite will hold. Further tests are silently
/// dropped at registration.
pub const MAX_TESTS_PER_SUITE: usize = 256;

/// Maximum number of suites the CLI filter will run in one invocation.
pub const MAX_SUITES: usize = 64;

/// Tag of an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
    Skip,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pass => write!(f, "pass"),
            Status::Fail => write!(f, "fail"),
            Status::Skip => write!(f, "skip"),
        }
    }
}

/// One human-readable failure (or skip reason) attached to an outcome.
///
/// Absent expected/actual values are empty strings, not placeholders. Fields
/// are truncated to [`MAX_MSG_LEN`] bytes at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl Detail {
    pub fn new(message: &str, expected: &str, actual: &str) -> Self {
        Self {
            message: clamp(message),
            expected: clamp(expected),
            actual: clamp(actual),
        }
    }
}

/// Truncate to `MAX_MSG_LEN` bytes without splitting a UTF-8 sequence.
fn clamp(s: &str) -> String {
    if s.len() <= MAX_MSG_LEN {
        return s.to_string();
    }
    let mut end = MAX_MSG_LEN;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

/// Result of a single test or assertion.
///
/// Invariants, maintained by the constructors in this module: a Pass has no
/// details; a Skip has at most one (the reason); a Fail has between one and
/// [`MAX_ERRORS`]. `elapsed_ms` is zero until the runner stamps it after
/// invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub status: Status,
    pub details: Vec<Detail>,
    pub elapsed_ms: f64,
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        self.status == Status::Pass
    }

    pub fn is_fail(&self) -> bool {
        self.status == Status::Fail
    }

    pub fn is_skip(&self) -> bool {
        self.status == Status::Skip
    }
}

/// A passing outcome.
pub fn pass() -> Outcome {
    Outcome {
        status: Status::Pass,
        details: Vec::new(),
        elapsed_ms: 0.0,
    }
}

/// A failing outcome with a message and no expected/actual text.
pub fn fail(msg: &str) -> Outcome {
    fail_with(msg, "", "")
}

/// A failing outcome carrying expected and actual representations.
pub fn fail_with(msg: &str, expected: &str, actual: &str) -> Outcome {
    Outcome {
        status: Status::Fail,
        details: vec![Detail::new(msg, expected, actual)],
        elapsed_ms: 0.0,
    }
}

/// A skipped outcome with a reason.
pub fn skip(reason: &str) -> Outcome {
    Outcome {
        status: Status::Skip,
        details: vec![Detail::new(reason, "", "")],
        elapsed_ms: 0.0,
    }
}

/// Merge two outcomes with priority Skip > Fail > Pass.
///
/// A Skip operand is returned unchanged (the left one when both are Skip).
/// Two Passes return `a`. Otherwise the result is a Fail whose details are
/// `a`'s followed by `b`'s, truncated at [`MAX_ERRORS`]. The truncation makes
/// this non-associative right at the cap boundary; that is a known limitation.
pub fn combine(a: Outcome, b: Outcome) -> Outcome {
    if a.is_skip() {
        return a;
    }
    if b.is_skip() {
        return b;
    }
    if a.is_pass() && b.is_pass() {
        return a;
    }

    let mut details = a.details;
    details.extend(b.details);
    details.truncate(MAX_ERRORS);

    Outcome {
        status: Status::Fail,
        details,
        elapsed_ms: 0.0,
    }
}

/// Skip with `reason` when `cond` holds, otherwise pass. Enables early-return
/// skip patterns inside test bodies.
pub fn skip_if(cond: bool, reason: &str) -> Outcome {
    if cond {
        skip(reason)
    } else {
        pass()
    }
}

/// Pass when `cond` holds, otherwise skip with `reason`.
pub fn skip_unless(cond: bool, reason: &str) -> Outcome {
    if cond {
        pass()
    } else {
        skip(reason)
    }
}
