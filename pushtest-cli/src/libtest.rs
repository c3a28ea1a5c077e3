// Copyright (c) The pushtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps libtest's JSON output format onto reporter events.
//!
//! Libtest has no separate setup or teardown phases, so everything it
//! reports is a call-phase outcome — except `ignored`, which means the test
//! never ran and so lands in the same shape as a setup-phase skip.

use pushtest_reporter::{TestEvent, TestOutcome, TestPhase};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LibtestMessage {
    #[serde(rename = "type")]
    kind: String,
    event: String,
    name: Option<String>,
}

/// Parses one line of libtest JSON output into a reporter event.
///
/// Returns `None` for anything that is not a final per-test outcome: suite
/// records, `started` notifications, and lines that are not libtest JSON at
/// all (for example interleaved human-readable output).
pub(crate) fn parse_event(line: &str) -> Option<TestEvent> {
    let line = line.trim();
    if !line.starts_with('{') {
        return None;
    }
    let message: LibtestMessage = serde_json::from_str(line).ok()?;
    if message.kind != "test" {
        return None;
    }
    let (phase, outcome) = match message.event.as_str() {
        "ok" => (TestPhase::Call, TestOutcome::Passed),
        "failed" => (TestPhase::Call, TestOutcome::Failed),
        "ignored" => (TestPhase::Setup, TestOutcome::Skipped),
        _ => return None,
    };
    Some(TestEvent {
        test_name: message.name,
        phase,
        outcome,
    })
}
