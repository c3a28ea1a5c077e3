// Copyright (c) The pushtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregate test outcomes and push them to a Prometheus Pushgateway.
//!
//! This crate turns a stream of per-phase test lifecycle events into four
//! gauge-style counter metrics (`total`, `passed`, `failed` and `skipped`),
//! with one labeled series per test, and hands them to a Pushgateway in a
//! single push at the end of the run.
//!
//! The main type here is [`PushReporter`], which an external driver feeds
//! via [`PushReporter::record_event`] and flushes via
//! [`PushReporter::finalize`]. The building blocks ([`OutcomeAggregator`],
//! [`MetricsReport`], [`push_report`]) are exposed for drivers that need
//! finer control, for instance to inspect the report without pushing it.

#![warn(missing_docs)]

mod config;
mod errors;
mod events;
mod key;
mod push;
mod reducer;
mod report;
mod reporter;

pub use config::*;
pub use errors::*;
pub use events::*;
pub use key::*;
pub use push::*;
pub use reducer::*;
pub use report::*;
pub use reporter::*;
