// Copyright (c) The pushtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

/// A single lifecycle event observed for a test.
///
/// Events are produced by an external driver (a test runner or an adapter
/// over its output) and consumed by a
/// [`PushReporter`](crate::PushReporter).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestEvent {
    /// The raw name of the test this event belongs to, if the event is
    /// associated with one. Events without a name (for example collection
    /// errors) carry `None` and are dropped by the reporter.
    pub test_name: Option<String>,

    /// The lifecycle phase that produced this event.
    pub phase: TestPhase,

    /// The outcome reported for this phase.
    pub outcome: TestOutcome,
}

impl TestEvent {
    /// Creates a new event attributed to the given test.
    pub fn new(test_name: impl Into<String>, phase: TestPhase, outcome: TestOutcome) -> Self {
        Self {
            test_name: Some(test_name.into()),
            phase,
            outcome,
        }
    }

    /// Creates an event that could not be attributed to a test.
    pub fn unattributed(phase: TestPhase, outcome: TestOutcome) -> Self {
        Self {
            test_name: None,
            phase,
            outcome,
        }
    }
}

/// The lifecycle phase of a test that produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TestPhase {
    /// Fixture or precondition setup, before the test body runs.
    Setup,
    /// The test body itself.
    Call,
    /// Cleanup after the test body. Teardown outcomes never change an
    /// already-recorded status.
    Teardown,
}

impl fmt::Display for TestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestPhase::Setup => write!(f, "setup"),
            TestPhase::Call => write!(f, "call"),
            TestPhase::Teardown => write!(f, "teardown"),
        }
    }
}

/// The outcome a phase reported for a test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TestOutcome {
    /// The phase completed successfully.
    Passed,
    /// The phase failed.
    Failed,
    /// The test was skipped in this phase.
    Skipped,
    /// The phase hit an unexpected error. Classified like [`Failed`] by the
    /// aggregator.
    ///
    /// [`Failed`]: TestOutcome::Failed
    Error,
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestOutcome::Passed => write!(f, "passed"),
            TestOutcome::Failed => write!(f, "failed"),
            TestOutcome::Skipped => write!(f, "skipped"),
            TestOutcome::Error => write!(f, "error"),
        }
    }
}

/// The reduced, final classification of one test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FinalStatus {
    /// The test passed.
    Passed,
    /// The test failed, in either its setup or its call phase.
    Failed,
    /// The test was skipped during setup.
    Skipped,
}

impl FinalStatus {
    /// Returns true if this status is terminal, i.e. must not be overwritten
    /// by any later event.
    ///
    /// `Skipped` is deliberately not terminal: a skip recorded during setup
    /// is still overridable by a later call-phase event. This asymmetry is
    /// long-standing observed behavior and is preserved as-is.
    pub fn is_terminal(self) -> bool {
        matches!(self, FinalStatus::Passed | FinalStatus::Failed)
    }
}

impl fmt::Display for FinalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinalStatus::Passed => write!(f, "passed"),
            FinalStatus::Failed => write!(f, "failed"),
            FinalStatus::Skipped => write!(f, "skipped"),
        }
    }
}
