// Copyright (c) The pushtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    key::sanitize_name, FinalStatus, OutcomeAggregator, ReportError, ReporterConfig, TestKey,
};
use prometheus::{proto::MetricFamily, Encoder, IntGaugeVec, Opts, Registry, TextEncoder};
use tracing::warn;

/// Help text for each of the four category metrics.
const TOTAL_HELP: &str = "Total number of tests executed";
const PASSED_HELP: &str = "Number of passed tests";
const FAILED_HELP: &str = "Number of failed tests";
const SKIPPED_HELP: &str = "Number of skipped tests";

/// A built metric set, ready to hand to the Pushgateway.
///
/// Contains four gauge-style counters (`<prefix>total`, `<prefix>passed`,
/// `<prefix>failed`, `<prefix>skipped`). Each metric carries one labeled
/// series per contributing test, valued `1`, so the export keeps per-test
/// resolution instead of only a summary count. Tests that never reached a
/// terminal status still count toward `total`.
///
/// Building a report performs no I/O; see
/// [`push_report`](crate::push_report) for the export step.
#[derive(Clone, Debug)]
pub struct MetricsReport {
    registry: Registry,
}

impl MetricsReport {
    /// Builds the report from the aggregated outcomes.
    ///
    /// A metric that fails to register, or a series that fails to resolve,
    /// is logged at warn level and skipped; the rest of the report is still
    /// built.
    pub fn build(outcomes: &OutcomeAggregator, config: &ReporterConfig) -> Self {
        let registry = Registry::new();
        let label_names = config.label_names();

        let groups: [(&str, &str, Vec<&TestKey>); 4] = [
            ("total", TOTAL_HELP, outcomes.records().map(|(key, _)| key).collect()),
            ("passed", PASSED_HELP, keys_with_status(outcomes, FinalStatus::Passed)),
            ("failed", FAILED_HELP, keys_with_status(outcomes, FinalStatus::Failed)),
            ("skipped", SKIPPED_HELP, keys_with_status(outcomes, FinalStatus::Skipped)),
        ];

        for (name, help, members) in groups {
            let metric = sanitize_name(&format!("{}{name}", config.metric_prefix));
            let gauge = match register_gauge(&registry, &metric, help, &label_names) {
                Ok(gauge) => gauge,
                Err(error) => {
                    warn!(?error, "skipping metric in report");
                    continue;
                }
            };

            for key in members {
                let labels = config.labels_for(key.as_str());
                match gauge.get_metric_with(&labels) {
                    Ok(series) => series.inc(),
                    Err(error) => {
                        let error = ReportError::BuildSeries {
                            metric: metric.clone(),
                            testname: key.as_str().to_owned(),
                            error,
                        };
                        warn!(?error, "skipping series in report");
                    }
                }
            }
        }

        Self { registry }
    }

    /// The registry holding the built metrics.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Gathers the metric families for export.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Renders the report in the Prometheus text exposition format.
    pub fn to_text(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|error| prometheus::Error::Msg(format!("invalid UTF-8 in output: {error}")))
    }
}

fn keys_with_status(outcomes: &OutcomeAggregator, status: FinalStatus) -> Vec<&TestKey> {
    outcomes
        .records()
        .filter(|(_, record)| record.status == Some(status))
        .map(|(key, _)| key)
        .collect()
}

fn register_gauge(
    registry: &Registry,
    name: &str,
    help: &str,
    label_names: &[&str],
) -> Result<IntGaugeVec, ReportError> {
    let register = || -> Result<IntGaugeVec, prometheus::Error> {
        let gauge = IntGaugeVec::new(Opts::new(name, help), label_names)?;
        registry.register(Box::new(gauge.clone()))?;
        Ok(gauge)
    };
    register().map_err(|error| ReportError::RegisterMetric {
        name: name.to_owned(),
        error,
    })
}
