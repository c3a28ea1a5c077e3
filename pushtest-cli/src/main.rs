// Copyright (c) The pushtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use pushtest_cli::PushtestApp;

fn main() -> Result<()> {
    color_eyre::install()?;
    PushtestApp::parse().exec()
}
