// Copyright (c) The pushtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end checks: a stream of lifecycle events in, the text exposition
//! of the built report out. Pushing itself is exercised against a live
//! Pushgateway, not here.

use pushtest_reporter::{
    parse_extra_labels, MetricsReport, PushReporter, ReporterConfig, TestEvent, TestOutcome,
    TestPhase,
};

fn reporter_with(config: ReporterConfig, events: &[TestEvent]) -> PushReporter {
    let mut reporter = PushReporter::new(config);
    for event in events {
        reporter.record_event(event);
    }
    reporter
}

fn text_of(reporter: &PushReporter) -> String {
    MetricsReport::build(reporter.outcomes(), reporter.config())
        .to_text()
        .expect("text encoding succeeds")
}

fn has_line(text: &str, line: &str) -> bool {
    text.lines().any(|l| l == line)
}

#[test]
fn full_run_partitions_tests_by_final_status() {
    let mut config = ReporterConfig::new("http://localhost:9091");
    config.set_metric_prefix("pytest_");
    let reporter = reporter_with(
        config,
        &[
            // A pass during setup is not a final outcome and changes nothing.
            TestEvent::new("t1", TestPhase::Setup, TestOutcome::Passed),
            TestEvent::new("t1", TestPhase::Call, TestOutcome::Passed),
            TestEvent::new("t2", TestPhase::Call, TestOutcome::Failed),
            TestEvent::new("t3", TestPhase::Setup, TestOutcome::Skipped),
            // No test identity: dropped without creating a record.
            TestEvent::unattributed(TestPhase::Call, TestOutcome::Failed),
        ],
    );

    let text = text_of(&reporter);
    for test in ["t1", "t2", "t3"] {
        assert!(
            has_line(&text, &format!(r#"pytest_total{{testname="pytest_{test}"}} 1"#)),
            "{test} missing from total in:\n{text}"
        );
    }
    assert!(has_line(&text, r#"pytest_passed{testname="pytest_t1"} 1"#));
    assert!(has_line(&text, r#"pytest_failed{testname="pytest_t2"} 1"#));
    assert!(has_line(&text, r#"pytest_skipped{testname="pytest_t3"} 1"#));

    // Exactly three tests were seen; the unattributed event added nothing.
    assert_eq!(reporter.outcomes().len(), 3);
}

#[test]
fn late_events_cannot_downgrade_terminal_statuses() {
    let mut config = ReporterConfig::new("http://localhost:9091");
    config.set_metric_prefix("pytest_");
    let reporter = reporter_with(
        config,
        &[
            TestEvent::new("t1", TestPhase::Call, TestOutcome::Passed),
            // Teardown failure after a pass: the pass stands.
            TestEvent::new("t1", TestPhase::Teardown, TestOutcome::Failed),
        ],
    );

    let text = text_of(&reporter);
    assert!(has_line(&text, r#"pytest_passed{testname="pytest_t1"} 1"#));
    assert!(!text.contains("pytest_failed{"), "unexpected failure in:\n{text}");
}

#[test]
fn user_labels_ride_along_but_cannot_shadow_testname() {
    let mut config = ReporterConfig::new("http://localhost:9091");
    config.set_metric_prefix("pytest_");
    config.set_extra_labels(parse_extra_labels([
        "env=ci",
        "testname=spoofed",
        "not-a-label",
    ]));
    let reporter = reporter_with(
        config,
        &[TestEvent::new("t1", TestPhase::Call, TestOutcome::Passed)],
    );

    // Label pairs are emitted sorted by name; the reserved testname value
    // wins over the user-supplied one, and the malformed token is gone.
    let text = text_of(&reporter);
    assert!(
        has_line(
            &text,
            r#"pytest_passed{env="ci",testname="pytest_t1"} 1"#
        ),
        "series line missing in:\n{text}"
    );
    assert!(!text.contains("spoofed"));
    assert!(!text.contains("not-a-label"));
}
