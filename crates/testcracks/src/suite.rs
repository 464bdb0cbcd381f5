//! Suite model - named, ordered groups of tests with optional setup/teardown

use std::any::Any;

use anyhow::Result;

use crate::outcome::{Outcome, MAX_TESTS_PER_SUITE};

/// Opaque environment handle produced by setup and handed to every test in
/// the suite. Tests downcast it to their own type.
pub type Env = Box<dyn Any>;

pub type TestFn = Box<dyn Fn(&mut dyn Any) -> Outcome>;
pub type SetupFn = Box<dyn Fn() -> Result<Env>>;
pub type TeardownFn = Box<dyn Fn(Env)>;

/// A single registered test. A test without a function models a declared but
/// unimplemented test; the runner reports it as skipped with `skip_reason`.
pub struct Test {
    pub name: String,
    pub func: Option<TestFn>,
    pub skip_reason: Option<String>,
}

impl Test {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&mut dyn Any) -> Outcome + 'static,
    {
        Self {
            name: name.into(),
            func: Some(Box::new(func)),
            skip_reason: None,
        }
    }

    /// A declared test with no body, always reported as skipped.
    pub fn skip(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            func: None,
            skip_reason: Some(reason.into()),
        }
    }

    pub fn is_implemented(&self) -> bool {
        self.func.is_some()
    }
}

/// Named ordered collection of tests, holding at most
/// [`MAX_TESTS_PER_SUITE`]; registration beyond that capacity is silently
/// dropped. Setup runs once before the tests and produces the shared
/// environment; teardown consumes it afterwards and is the sole releaser of
/// whatever setup acquired.
pub struct Suite {
    pub name: String,
    pub tests: Vec<Test>,
    pub setup: Option<SetupFn>,
    pub teardown: Option<TeardownFn>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
            setup: None,
            teardown: None,
        }
    }

    /// Register a test. Insertion order is execution order.
    pub fn test<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&mut dyn Any) -> Outcome + 'static,
    {
        self.push(Test::new(name, func));
        self
    }

    /// Register a declared-but-unimplemented test.
    pub fn skip_test(mut self, name: impl Into<String>, reason: impl Into<String>) -> Self {
        self.push(Test::skip(name, reason));
        self
    }

    pub fn with_setup<F>(mut self, setup: F) -> Self
    where
        F: Fn() -> Result<Env> + 'static,
    {
        self.setup = Some(Box::new(setup));
        self
    }

    pub fn with_teardown<F>(mut self, teardown: F) -> Self
    where
        F: Fn(Env) + 'static,
    {
        self.teardown = Some(Box::new(teardown));
        self
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Drop tests not matching `pred`, preserving order. Used by the CLI
    /// filter, which owns the suites and so never needs to clone a test body.
    pub fn retain_tests<P>(&mut self, pred: P)
    where
        P: FnMut(&Test) -> bool,
    {
        self.tests.retain(pred);
    }

    fn push(&mut self, test: Test) {
        if self.tests.len() < MAX_TESTS_PER_SUITE {
            self.tests.push(test);
        }
    }
}
