// Copyright (c) The pushtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    push_report, MetricsReport, OutcomeAggregator, ReporterConfig, TestEvent, TestKey,
};
use tracing::{error, info};

/// Collects test events for one run and pushes the aggregated result to a
/// Prometheus Pushgateway at the end.
///
/// The driver calls [`record_event`](Self::record_event) once per lifecycle
/// event and [`finalize`](Self::finalize) once at end-of-run. Both methods
/// are infallible by contract: reporting must never fail or abort the host
/// test run, so every internal fault is logged and contained here.
///
/// Events are expected to arrive sequentially from a single thread; the
/// reporter carries no synchronization of its own. Drivers running tests in
/// parallel must funnel events through one owner of this value.
#[derive(Clone, Debug)]
pub struct PushReporter {
    config: ReporterConfig,
    outcomes: OutcomeAggregator,
}

impl PushReporter {
    /// Creates a reporter for the given configuration.
    pub fn new(config: ReporterConfig) -> Self {
        Self {
            config,
            outcomes: OutcomeAggregator::new(),
        }
    }

    /// Records one test lifecycle event.
    ///
    /// Events that carry no test name cannot be attributed to a test and
    /// are dropped silently.
    pub fn record_event(&mut self, event: &TestEvent) {
        let Some(test_name) = &event.test_name else {
            return;
        };
        let key = TestKey::new(&self.config.metric_prefix, test_name);
        self.outcomes.record(key, event.phase, event.outcome);
    }

    /// Builds the final report and pushes it to the Pushgateway.
    ///
    /// Performs the run's single network operation. A push failure is
    /// logged at error level and swallowed.
    pub fn finalize(&mut self) {
        info!(
            url = %self.config.pushgateway_url,
            "sending test results to Prometheus pushgateway"
        );
        let report = MetricsReport::build(&self.outcomes, &self.config);
        if let Err(error) = push_report(&report, &self.config.pushgateway_url, &self.config.job_name)
        {
            error!(?error, "failed to push test results");
        }
    }

    /// The outcomes aggregated so far.
    pub fn outcomes(&self) -> &OutcomeAggregator {
        &self.outcomes
    }

    /// The configuration this reporter was built with.
    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }
}
