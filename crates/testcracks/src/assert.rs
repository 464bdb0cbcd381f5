//! Assertion helpers - typed comparisons reduced to the outcome algebra
//!
//! Every helper returns an [`Outcome`] built through the constructors in
//! [`crate::outcome`], so results from any of them can be merged with
//! [`crate::combine`].

use std::fmt::Display;

use crate::outcome::{fail_with, pass, Outcome};

pub fn assert_true(cond: bool, msg: &str) -> Outcome {
    if cond {
        pass()
    } else {
        fail_with(msg, "true", "false")
    }
}

pub fn assert_false(cond: bool, msg: &str) -> Outcome {
    if !cond {
        pass()
    } else {
        fail_with(msg, "false", "true")
    }
}

/// Equality over any displayable type (integers, floats, strings, ...).
pub fn assert_equal<T: PartialEq + Display>(expected: T, actual: T, msg: &str) -> Outcome {
    if expected == actual {
        return pass();
    }
    fail_with(msg, &expected.to_string(), &actual.to_string())
}

pub fn assert_not_equal<T: PartialEq + Display>(unexpected: T, actual: T, msg: &str) -> Outcome {
    if unexpected != actual {
        return pass();
    }
    fail_with(msg, &format!("not {unexpected}"), &actual.to_string())
}

/// String equality where either side may be absent. Absent values render as
/// the literal `(null)` for readability.
pub fn assert_equal_str(expected: Option<&str>, actual: Option<&str>, msg: &str) -> Outcome {
    if expected == actual {
        return pass();
    }
    fail_with(
        msg,
        expected.unwrap_or("(null)"),
        actual.unwrap_or("(null)"),
    )
}

pub fn assert_not_equal_str(unexpected: Option<&str>, actual: Option<&str>, msg: &str) -> Outcome {
    if unexpected != actual {
        return pass();
    }
    let rendered = match unexpected {
        Some(s) => format!("not \"{s}\""),
        None => "not (null)".to_string(),
    };
    fail_with(msg, &rendered, actual.unwrap_or("(null)"))
}

pub fn assert_some<T: Display>(value: &Option<T>, msg: &str) -> Outcome {
    if value.is_some() {
        pass()
    } else {
        fail_with(msg, "Some(..)", "None")
    }
}

pub fn assert_none<T: Display>(value: &Option<T>, msg: &str) -> Outcome {
    match value {
        None => pass(),
        Some(v) => fail_with(msg, "None", &v.to_string()),
    }
}

pub fn assert_greater<T: PartialOrd + Display>(actual: T, than: T, msg: &str) -> Outcome {
    if actual > than {
        return pass();
    }
    fail_with(msg, &format!("> {than}"), &actual.to_string())
}

pub fn assert_greater_or_equal<T: PartialOrd + Display>(actual: T, than: T, msg: &str) -> Outcome {
    if actual >= than {
        return pass();
    }
    fail_with(msg, &format!(">= {than}"), &actual.to_string())
}

pub fn assert_less<T: PartialOrd + Display>(actual: T, than: T, msg: &str) -> Outcome {
    if actual < than {
        return pass();
    }
    fail_with(msg, &format!("< {than}"), &actual.to_string())
}

pub fn assert_less_or_equal<T: PartialOrd + Display>(actual: T, than: T, msg: &str) -> Outcome {
    if actual <= than {
        return pass();
    }
    fail_with(msg, &format!("<= {than}"), &actual.to_string())
}

/// Floating-point equality within an absolute tolerance.
pub fn assert_in_delta(expected: f64, actual: f64, delta: f64, msg: &str) -> Outcome {
    let diff = (expected - actual).abs();
    if diff <= delta {
        return pass();
    }
    fail_with(
        msg,
        &format!("{expected} +/- {delta}"),
        &format!("{actual} (diff: {diff})"),
    )
}

pub fn assert_empty<T>(items: &[T], msg: &str) -> Outcome {
    if items.is_empty() {
        return pass();
    }
    fail_with(msg, "empty", &format!("{} elements", items.len()))
}

pub fn assert_not_empty<T>(items: &[T], msg: &str) -> Outcome {
    if !items.is_empty() {
        pass()
    } else {
        fail_with(msg, "non-empty", "0 elements")
    }
}

pub fn assert_len(expected: usize, actual: usize, msg: &str) -> Outcome {
    if expected == actual {
        return pass();
    }
    fail_with(
        msg,
        &format!("length {expected}"),
        &format!("length {actual}"),
    )
}

pub fn assert_contains<T: PartialEq + Display>(elem: &T, items: &[T], msg: &str) -> Outcome {
    if items.contains(elem) {
        return pass();
    }
    fail_with(msg, &format!("contains {elem}"), "not found")
}

pub fn assert_not_contains<T: PartialEq + Display>(elem: &T, items: &[T], msg: &str) -> Outcome {
    match items.iter().position(|item| item == elem) {
        None => pass(),
        Some(i) => fail_with(
            msg,
            &format!("not contains {elem}"),
            &format!("found at index {i}"),
        ),
    }
}
