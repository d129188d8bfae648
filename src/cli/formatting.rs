//! Shared text formatting for CLI output.

use crate::analysis::{AnalysisRecord, MrAnalysisRecord};
use crate::store::ChangeRecord;

/// Formats an analysis record as aligned `label: value` lines.
pub(crate) fn format_analysis(record: &AnalysisRecord) -> String {
    let highlights = if record.technical_highlights.is_empty() {
        "None".to_string()
    } else {
        record
            .technical_highlights
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let rows = [
        ("Title", record.title.clone()),
        ("Summary", record.summary.clone()),
        ("Project", record.project_name.clone()),
        ("Release date", record.release_date.clone()),
        ("Release type", record.release_type.to_string()),
        ("Complexity", record.complexity_score.to_string()),
        ("Features", record.features_count.to_string()),
        ("Improvements", record.improvements_count.to_string()),
        ("Changes", record.changes_count.to_string()),
        ("Merge requests", record.mr_count.to_string()),
        ("Highlights", highlights),
    ];
    format_rows(&rows)
}

/// Formats the header shown above a change record's body.
pub(crate) fn format_mr_header(record: &ChangeRecord) -> String {
    let mut rows = vec![
        ("File", record.filename.clone()),
        ("Created", record.created_date.clone()),
    ];
    if let Some(time) = &record.created_time {
        rows.push(("Time", format!("{time} UTC")));
    }
    rows.push(("SHA", record.short_identifier.clone()));
    if let Some(branch) = &record.source_branch {
        rows.push(("Source branch", branch.clone()));
    }
    format_rows(&rows)
}

/// Formats a change-record analysis.
pub(crate) fn format_mr_analysis(analysis: &MrAnalysisRecord) -> String {
    format_rows(&[
        ("Type", analysis.mr_type.to_string()),
        ("Impact", analysis.impact.to_string()),
        ("Files changed", analysis.files_changed.to_string()),
        ("Lines changed", analysis.lines_changed.to_string()),
    ])
}

/// Formats one line of a change-record listing.
pub(crate) fn format_record_line(record: &ChangeRecord) -> String {
    match &record.created_time {
        Some(time) => format!("{}  {} {time}", record.display_name, record.created_date),
        None => format!("{}  {}", record.display_name, record.created_date),
    }
}

fn format_rows(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 1;
    rows.iter()
        .map(|(label, value)| format!("{:<width$} {value}", format!("{label}:")))
        .collect::<Vec<_>>()
        .join("\n")
}
