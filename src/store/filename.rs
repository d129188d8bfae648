//! Change-record filename conventions.
//!
//! Change records are stored one file per merge request. Three naming
//! conventions are recognized, tried in order:
//!
//! 1. `mr{number}_{sha}.json`
//! 2. `{YYYYMMDD_HHMMSS}_{sha}_{source-branch}.md` (or `.json`)
//! 3. anything containing a run of at least eight hex characters

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Number of hex characters shown in abbreviated identifiers.
pub const SHORT_ID_LEN: usize = 8;

/// Display value for unknown dates and times.
pub const UNKNOWN: &str = "Unknown";

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static NUMBERED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^mr(\d+)_([a-f0-9]+)\.json").unwrap());

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static TIMESTAMPED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{8}_\d{6})_([a-f0-9]+)_(.+)\.(md|json)").unwrap());

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static HEX_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-f0-9]{8,})").unwrap());

/// Descriptor of one stored change record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Human-readable label.
    pub display_name: String,
    /// Full commit sha.
    pub identifier: String,
    /// Abbreviated commit sha.
    pub short_identifier: String,
    /// Merge request number, when encoded in the filename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mr_number: Option<u64>,
    /// Source branch, when encoded in the filename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_branch: Option<String>,
    /// Creation date as `YYYY-MM-DD`, or "Unknown".
    pub created_date: String,
    /// Creation time as `HH:MM` (UTC), when encoded in the filename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    /// Uppercased file extension, when encoded in the filename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_kind: Option<String>,
    /// Bare filename.
    pub filename: String,
    /// Full object key.
    pub path: String,
    /// Ordering key; records sort by this key, descending.
    pub sort_key: String,
}

/// Parses a change-record filename.
///
/// `created` is the object's creation time, used when the filename carries
/// no timestamp. Returns `None` for filenames following no known convention.
pub fn parse_change_record(
    filename: &str,
    path: &str,
    created: Option<DateTime<Utc>>,
) -> Option<ChangeRecord> {
    let created_date = || {
        created.map_or_else(
            || UNKNOWN.to_string(),
            |at| at.format("%Y-%m-%d").to_string(),
        )
    };

    if let Some(caps) = NUMBERED_PATTERN.captures(filename) {
        let digits = &caps[1];
        let sha = &caps[2];
        let number = digits.parse::<u64>().ok()?;
        return Some(ChangeRecord {
            display_name: format!("MR #{digits} ({})", short_identifier(sha)),
            identifier: sha.to_string(),
            short_identifier: short_identifier(sha).to_string(),
            mr_number: Some(number),
            source_branch: None,
            created_date: created_date(),
            created_time: None,
            file_kind: None,
            filename: filename.to_string(),
            path: path.to_string(),
            sort_key: format!("{number:03}"),
        });
    }

    if let Some(caps) = TIMESTAMPED_PATTERN.captures(filename) {
        let timestamp = &caps[1];
        let sha = &caps[2];
        let branch = &caps[3];
        let (date, time) = match NaiveDateTime::parse_from_str(timestamp, "%Y%m%d_%H%M%S") {
            Ok(at) => (
                at.format("%Y-%m-%d").to_string(),
                at.format("%H:%M").to_string(),
            ),
            Err(_) => (timestamp.chars().take(8).collect(), UNKNOWN.to_string()),
        };
        let short = short_identifier(sha);
        return Some(ChangeRecord {
            display_name: format!("{short}-{branch}"),
            identifier: sha.to_string(),
            short_identifier: short.to_string(),
            mr_number: None,
            source_branch: Some(branch.to_string()),
            created_date: date,
            created_time: Some(time),
            file_kind: Some(caps[4].to_uppercase()),
            filename: filename.to_string(),
            path: path.to_string(),
            sort_key: timestamp.to_string(),
        });
    }

    let sha = HEX_RUN_PATTERN.captures(filename)?.get(1)?.as_str();
    Some(ChangeRecord {
        display_name: format!("MR {} ({filename})", short_identifier(sha)),
        identifier: sha.to_string(),
        short_identifier: short_identifier(sha).to_string(),
        mr_number: None,
        source_branch: None,
        created_date: created_date(),
        created_time: None,
        file_kind: None,
        filename: filename.to_string(),
        path: path.to_string(),
        sort_key: filename.to_string(),
    })
}

/// Truncates a sha to [`SHORT_ID_LEN`] characters.
pub fn short_identifier(sha: &str) -> &str {
    sha.get(..SHORT_ID_LEN).unwrap_or(sha)
}

/// Sorts records by sort key, newest first. Equal keys keep their order.
pub fn sort_records(records: &mut [ChangeRecord]) {
    records.sort_by(|a, b| b.sort_key.cmp(&a.sort_key));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created() -> Option<DateTime<Utc>> {
        Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).single()
    }

    #[test]
    fn numbered_convention() {
        let record =
            parse_change_record("mr12_0123456789abcdef.json", "releases/v1.0/mr_docs/x", created())
                .unwrap();
        assert_eq!(record.display_name, "MR #12 (01234567)");
        assert_eq!(record.mr_number, Some(12));
        assert_eq!(record.sort_key, "012");
        assert_eq!(record.created_date, "2024-05-17");
        assert!(record.created_time.is_none());
        assert_eq!(record.path, "releases/v1.0/mr_docs/x");
    }

    #[test]
    fn timestamped_convention() {
        let record = parse_change_record(
            "20240301_142500_a1b2c3d4e5f6_feature/login-form.md",
            "current_release/x.md",
            None,
        )
        .unwrap();
        assert_eq!(record.display_name, "a1b2c3d4-feature/login-form");
        assert_eq!(record.identifier, "a1b2c3d4e5f6");
        assert_eq!(record.short_identifier, "a1b2c3d4");
        assert_eq!(record.source_branch.as_deref(), Some("feature/login-form"));
        assert_eq!(record.created_date, "2024-03-01");
        assert_eq!(record.created_time.as_deref(), Some("14:25"));
        assert_eq!(record.file_kind.as_deref(), Some("MD"));
        assert_eq!(record.sort_key, "20240301_142500");
    }

    #[test]
    fn timestamped_with_invalid_date_falls_back() {
        let record =
            parse_change_record("20241399_250000_abcdef12_main.json", "k", None).unwrap();
        assert_eq!(record.created_date, "20241399");
        assert_eq!(record.created_time.as_deref(), Some(UNKNOWN));
        assert_eq!(record.file_kind.as_deref(), Some("JSON"));
    }

    #[test]
    fn hex_run_fallback() {
        let record = parse_change_record("notes-deadbeefcafe.txt", "k", None).unwrap();
        assert_eq!(record.display_name, "MR deadbeef (notes-deadbeefcafe.txt)");
        assert_eq!(record.identifier, "deadbeefcafe");
        assert_eq!(record.created_date, UNKNOWN);
        assert_eq!(record.sort_key, "notes-deadbeefcafe.txt");
    }

    #[test]
    fn unknown_convention_is_skipped() {
        assert!(parse_change_record("README.md", "k", None).is_none());
    }

    #[test]
    fn short_sha_kept_whole() {
        assert_eq!(short_identifier("abc"), "abc");
        assert_eq!(short_identifier("0123456789"), "01234567");
    }

    #[test]
    fn records_sort_descending() {
        let mut records: Vec<ChangeRecord> = ["mr2_ab.json", "mr10_cd.json", "mr1_ef.json"]
            .iter()
            .filter_map(|name| parse_change_record(name, name, None))
            .collect();
        sort_records(&mut records);
        let numbers: Vec<_> = records.iter().filter_map(|r| r.mr_number).collect();
        assert_eq!(numbers, [10, 2, 1]);
    }
}
