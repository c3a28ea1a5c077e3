// Copyright (c) The pushtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{FinalStatus, TestKey, TestOutcome, TestPhase};
use indexmap::IndexMap;

/// The reduced state of one test, as accumulated from its events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TestRecord {
    /// The best-known final status, or `None` if no event for this test
    /// carried a semantically final outcome.
    pub status: Option<FinalStatus>,
}

/// Reduces a stream of per-phase test events to one final status per test.
///
/// The policy is first-terminal-wins, call-supersedes-setup:
///
/// * a `Passed` or `Failed` status is terminal and is never overwritten,
///   not even by a later teardown failure;
/// * a setup-phase skip or failure sets the status;
/// * a call-phase pass or failure sets the status, overriding an earlier
///   setup skip;
/// * everything else (teardown, passes during setup, skips during call)
///   leaves the status alone but still creates the record, so the test is
///   counted in the run total.
///
/// Records are kept in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct OutcomeAggregator {
    records: IndexMap<TestKey, TestRecord>,
}

impl OutcomeAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one event for the given test.
    ///
    /// [`TestOutcome::Error`] is classified like [`TestOutcome::Failed`] in
    /// both consumed phases. The original runner only ever reported
    /// `error` from the call phase; treating a setup-phase `error` as a
    /// setup failure extends the same classification to a combination the
    /// original never produced.
    pub fn record(&mut self, key: TestKey, phase: TestPhase, outcome: TestOutcome) {
        let record = self.records.entry(key).or_default();
        if record.status.is_some_and(FinalStatus::is_terminal) {
            return;
        }

        let status = match phase {
            TestPhase::Setup => match outcome {
                TestOutcome::Skipped => Some(FinalStatus::Skipped),
                TestOutcome::Failed | TestOutcome::Error => Some(FinalStatus::Failed),
                TestOutcome::Passed => None,
            },
            TestPhase::Call => match outcome {
                TestOutcome::Passed => Some(FinalStatus::Passed),
                TestOutcome::Failed | TestOutcome::Error => Some(FinalStatus::Failed),
                TestOutcome::Skipped => None,
            },
            TestPhase::Teardown => None,
        };

        if let Some(status) = status {
            record.status = Some(status);
        }
    }

    /// Iterates over all known records in first-seen order.
    pub fn records(&self) -> impl Iterator<Item = (&TestKey, &TestRecord)> {
        self.records.iter()
    }

    /// Returns the record for a key, if any event has been seen for it.
    pub fn get(&self, key: &TestKey) -> Option<&TestRecord> {
        self.records.get(key)
    }

    /// The number of distinct tests seen so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
