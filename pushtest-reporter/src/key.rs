// Copyright (c) The pushtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

/// The sanitized identity key for one test.
///
/// Derived from the configured metric prefix and the raw test name by
/// replacing every character outside `[A-Za-z0-9_]` with `_`. The same
/// raw name always produces the same key, so repeated events for one test
/// land on one record. The prefix participates in the key, matching the
/// metric names the test ultimately appears under.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct TestKey(String);

impl TestKey {
    /// Creates a key from a metric prefix and a raw test name.
    pub fn new(prefix: &str, raw_name: &str) -> Self {
        Self(sanitize_name(&format!("{prefix}{raw_name}")))
    }

    /// Returns the sanitized key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Replaces every character outside `[A-Za-z0-9_]` with `_`.
///
/// Total over arbitrary input, including non-ASCII: each such character maps
/// to exactly one underscore.
pub(crate) fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
