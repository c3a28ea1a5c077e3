// Copyright (c) The pushtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while building or exporting a metrics report.

use thiserror::Error;

/// An error that occurred while building or pushing a metrics report.
///
/// Report building recovers from the first two variants internally (the
/// affected metric or series is logged and skipped); [`Push`] is surfaced to
/// the caller of [`push_report`](crate::push_report), where the reporter
/// logs it without failing the run.
///
/// [`Push`]: ReportError::Push
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// A gauge could not be created or registered.
    #[error("failed to register metric `{name}`")]
    RegisterMetric {
        /// The sanitized metric name.
        name: String,
        /// The underlying client error.
        #[source]
        error: prometheus::Error,
    },

    /// A labeled series for one test could not be resolved.
    #[error("failed to build series for test `{testname}` in metric `{metric}`")]
    BuildSeries {
        /// The sanitized metric name.
        metric: String,
        /// The test identity the series was for.
        testname: String,
        /// The underlying client error.
        #[source]
        error: prometheus::Error,
    },

    /// The single push to the Pushgateway failed.
    #[error("failed to push metrics to `{url}`")]
    Push {
        /// The Pushgateway URL.
        url: String,
        /// The underlying client error.
        #[source]
        error: prometheus::Error,
    },
}
