//! Release version ordering.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Returns the numeric components of a version label, in order.
///
/// Labels without digits sort as `[0]`. Components too large for `u64`
/// saturate.
pub fn version_key(version: &str) -> Vec<u64> {
    let numbers: Vec<u64> = DIGIT_RUN
        .find_iter(version)
        .map(|m| m.as_str().parse().unwrap_or(u64::MAX))
        .collect();
    if numbers.is_empty() {
        vec![0]
    } else {
        numbers
    }
}

/// Orders version labels newest first, breaking ties by label.
pub fn compare_newest_first(a: &str, b: &str) -> Ordering {
    version_key(b)
        .cmp(&version_key(a))
        .then_with(|| a.cmp(b))
}

/// Sorts version labels newest first.
pub fn sort_newest_first(versions: &mut [String]) {
    versions.sort_by(|a, b| compare_newest_first(a, b));
}
