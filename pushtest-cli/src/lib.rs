// Copyright (c) The pushtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipe `cargo test -- -Z unstable-options --format json` through `pushtest`
//! to report the run's pass/fail/skip counts to a Prometheus Pushgateway.
//!
//! Every input line is passed through to stdout untouched, so `pushtest`
//! can sit in the middle of an existing pipeline.

mod cli;
mod libtest;

pub use cli::PushtestApp;
