// Copyright (c) The pushtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::libtest;
use clap::{Args, Parser};
use color_eyre::Result;
use pushtest_reporter::{parse_extra_labels, PushReporter, ReporterConfig};
use std::io::{self, BufRead, Write};
use tracing::Level;

/// Report test results from a libtest JSON stream to a Prometheus
/// Pushgateway.
///
/// Reads `cargo test -- -Z unstable-options --format json` output on stdin,
/// tees every line through to stdout, and pushes aggregated pass/fail/skip
/// metrics once the stream ends.
#[derive(Debug, Parser)]
#[command(version)]
pub struct PushtestApp {
    #[command(flatten)]
    reporter_opts: ReporterOpts,

    /// Verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Reporter options")]
struct ReporterOpts {
    /// Pushgateway URL to send metrics to [if unset, reporting is disabled]
    #[arg(long, value_name = "URL")]
    pushgateway_url: Option<String>,

    /// Prefix for all metric names
    #[arg(long, value_name = "PREFIX", default_value = "")]
    metric_prefix: String,

    /// Extra label to attach to reported metrics (repeatable)
    #[arg(long = "extra-label", value_name = "KEY=VALUE")]
    extra_labels: Vec<String>,

    /// Value for the "job" key in exported metrics
    #[arg(long, value_name = "NAME", default_value = "pushtest")]
    job_name: String,
}

impl ReporterOpts {
    fn to_reporter(&self) -> Option<PushReporter> {
        let url = self.reporting_url()?;
        let mut config = ReporterConfig::new(url);
        config
            .set_metric_prefix(&self.metric_prefix)
            .set_job_name(&self.job_name)
            .set_extra_labels(parse_extra_labels(&self.extra_labels));
        Some(PushReporter::new(config))
    }

    fn reporting_url(&self) -> Option<&str> {
        self.pushgateway_url.as_deref()
    }
}

impl PushtestApp {
    /// Executes the app: consumes stdin to the end, then pushes the report.
    pub fn exec(self) -> Result<()> {
        self.init_logging();

        let stdin = io::stdin().lock();
        let stdout = io::stdout().lock();
        let mut reporter = self.reporter_opts.to_reporter();
        run_stream(stdin, stdout, reporter.as_mut())?;

        if let Some(reporter) = &mut reporter {
            reporter.finalize();
        }
        Ok(())
    }

    fn init_logging(&self) {
        let level = if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        };
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .init();
    }
}

/// Tees `input` to `output` line by line, feeding recognized libtest events
/// into the reporter as they stream past.
fn run_stream(
    input: impl BufRead,
    mut output: impl Write,
    mut reporter: Option<&mut PushReporter>,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        writeln!(output, "{line}")?;
        if let Some(reporter) = reporter.as_deref_mut() {
            if let Some(event) = libtest::parse_event(&line) {
                reporter.record_event(&event);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use pushtest_reporter::{FinalStatus, TestKey};

    #[test]
    fn clap_definition_is_valid() {
        PushtestApp::command().debug_assert();
    }

    #[test]
    fn no_url_means_no_reporter() {
        let app = PushtestApp::parse_from(["pushtest"]);
        assert!(app.reporter_opts.to_reporter().is_none());
    }

    #[test]
    fn stream_is_teed_and_reduced() {
        let input = concat!(
            "{\"type\":\"suite\",\"event\":\"started\",\"test_count\":2}\n",
            "{\"type\":\"test\",\"event\":\"started\",\"name\":\"tests::works\"}\n",
            "not json at all\n",
            "{\"type\":\"test\",\"name\":\"tests::works\",\"event\":\"ok\"}\n",
            "{\"type\":\"test\",\"name\":\"tests::broken\",\"event\":\"failed\"}\n",
            "{\"type\":\"suite\",\"event\":\"failed\",\"passed\":1,\"failed\":1}\n",
        );
        let app = PushtestApp::parse_from([
            "pushtest",
            "--pushgateway-url",
            "http://localhost:9091",
            "--metric-prefix",
            "ci_",
        ]);
        let mut reporter = app.reporter_opts.to_reporter().expect("url configured");
        let mut output = Vec::new();
        run_stream(input.as_bytes(), &mut output, Some(&mut reporter)).expect("stream runs");

        // Pass-through is byte-for-byte.
        assert_eq!(String::from_utf8(output).unwrap(), input);

        let outcomes = reporter.outcomes();
        assert_eq!(outcomes.len(), 2);
        let passed = outcomes
            .get(&TestKey::new("ci_", "tests::works"))
            .expect("record exists");
        assert_eq!(passed.status, Some(FinalStatus::Passed));
        let failed = outcomes
            .get(&TestKey::new("ci_", "tests::broken"))
            .expect("record exists");
        assert_eq!(failed.status, Some(FinalStatus::Failed));
    }
}
