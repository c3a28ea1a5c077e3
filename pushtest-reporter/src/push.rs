// Copyright (c) The pushtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{MetricsReport, ReportError};
use std::collections::HashMap;

/// Pushes a built report to the Pushgateway at `url`, under `job_name`.
///
/// Exactly one blocking attempt, with an empty grouping key; there is no
/// retry. The caller decides what a failure means — the
/// [`PushReporter`](crate::PushReporter) logs it and moves on, so a
/// flaky gateway can never fail the test run itself.
pub fn push_report(report: &MetricsReport, url: &str, job_name: &str) -> Result<(), ReportError> {
    prometheus::push_metrics(job_name, HashMap::new(), url, report.gather(), None).map_err(
        |error| ReportError::Push {
            url: url.to_owned(),
            error,
        },
    )
}
