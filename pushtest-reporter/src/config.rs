// Copyright (c) The pushtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;
use tracing::warn;

/// The reserved label key carrying the test identity.
///
/// Applied after user-supplied labels, so it is always present and a
/// user-supplied `testname=...` label can never override it.
pub const TESTNAME_LABEL: &str = "testname";

/// Plain-value configuration for a [`PushReporter`](crate::PushReporter).
///
/// Callers that have no Pushgateway URL should not construct a reporter at
/// all; reporting is an opt-in feature.
#[derive(Clone, Debug)]
pub struct ReporterConfig {
    /// URL of the Pushgateway that receives the final metric set.
    pub pushgateway_url: String,

    /// Prefix prepended to every metric name (and to every test identity
    /// key, which appears under those metrics).
    pub metric_prefix: String,

    /// User-supplied labels attached to every series, in insertion order.
    pub extra_labels: IndexMap<String, String>,

    /// Value for the "job" key in exported metrics; passed through to the
    /// Pushgateway untouched.
    pub job_name: String,
}

impl ReporterConfig {
    /// Creates a configuration for the given Pushgateway URL, with an empty
    /// prefix, no extra labels, and the default job name `pushtest`.
    pub fn new(pushgateway_url: impl Into<String>) -> Self {
        Self {
            pushgateway_url: pushgateway_url.into(),
            metric_prefix: String::new(),
            extra_labels: IndexMap::new(),
            job_name: "pushtest".to_owned(),
        }
    }

    /// Sets the metric name prefix.
    pub fn set_metric_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.metric_prefix = prefix.into();
        self
    }

    /// Sets the job name.
    pub fn set_job_name(&mut self, job_name: impl Into<String>) -> &mut Self {
        self.job_name = job_name.into();
        self
    }

    /// Sets the user-supplied labels.
    pub fn set_extra_labels(&mut self, extra_labels: IndexMap<String, String>) -> &mut Self {
        self.extra_labels = extra_labels;
        self
    }

    /// The label names every series carries: user label keys in insertion
    /// order, then the reserved [`TESTNAME_LABEL`] (deduplicated if a user
    /// label already used that key).
    pub(crate) fn label_names(&self) -> Vec<&str> {
        let mut names: IndexSet<&str> = self.extra_labels.keys().map(String::as_str).collect();
        names.insert(TESTNAME_LABEL);
        names.into_iter().collect()
    }

    /// The full label set for one test's series.
    pub(crate) fn labels_for<'a>(&'a self, testname: &'a str) -> HashMap<&'a str, &'a str> {
        let mut labels: HashMap<&str, &str> = self
            .extra_labels
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        // Reserved key goes in last so user input can't override it.
        labels.insert(TESTNAME_LABEL, testname);
        labels
    }
}

/// Parses repeated `KEY=VALUE` tokens into a label map.
///
/// Malformed tokens (no `=`) are dropped with a warning; this function never
/// fails. Later duplicates of a key overwrite earlier ones, keeping the
/// original position.
pub fn parse_extra_labels<I, S>(tokens: I) -> IndexMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut labels = IndexMap::new();
    for token in tokens {
        let token = token.as_ref();
        match token.split_once('=') {
            Some((key, value)) => {
                labels.insert(key.to_owned(), value.to_owned());
            }
            None => {
                warn!(token, "skipping extra label not in KEY=VALUE form");
            }
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_extra_labels_drops_malformed_tokens() {
        let labels = parse_extra_labels(["env=ci", "bogus", "branch=main", "also-bogus"]);
        let parsed: Vec<_> = labels
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(parsed, [("env", "ci"), ("branch", "main")]);
    }

    #[test]
    fn parse_extra_labels_keeps_empty_values() {
        let labels = parse_extra_labels(["empty=", "eq=a=b"]);
        assert_eq!(labels.get("empty").map(String::as_str), Some(""));
        // Only the first `=` splits; the rest belongs to the value.
        assert_eq!(labels.get("eq").map(String::as_str), Some("a=b"));
    }

    #[test]
    fn label_names_end_with_testname() {
        let mut config = ReporterConfig::new("http://localhost:9091");
        config.set_extra_labels(parse_extra_labels(["env=ci", "branch=main"]));
        assert_eq!(config.label_names(), ["env", "branch", TESTNAME_LABEL]);
    }

    #[test]
    fn reserved_testname_label_wins() {
        let mut config = ReporterConfig::new("http://localhost:9091");
        config.set_extra_labels(parse_extra_labels(["testname=spoofed", "env=ci"]));
        // The name list carries testname exactly once.
        assert_eq!(config.label_names(), [TESTNAME_LABEL, "env"]);
        let labels = config.labels_for("real_test");
        assert_eq!(
            labels,
            hashmap! {
                TESTNAME_LABEL => "real_test",
                "env" => "ci",
            }
        );
    }
}
