//! Markdown heading and section-item helpers.

use super::patterns::PatternTables;

/// Returns the text of a heading line with its `#` marker run stripped.
///
/// `line` must already be trimmed. Returns `None` for non-heading lines.
pub(crate) fn heading_text(line: &str) -> Option<&str> {
    if !line.starts_with('#') {
        return None;
    }
    Some(line.trim_start_matches('#').trim_start())
}

/// Counts list items under each named section and sums them.
///
/// `content_lower` must be lowercased and `section_names` lowercase. Only the
/// first heading matching each name contributes.
pub(crate) fn count_section_items(
    tables: &PatternTables,
    content_lower: &str,
    section_names: &[&str],
) -> usize {
    section_names
        .iter()
        .filter_map(|name| section_body(tables, content_lower, name))
        .map(|body| {
            tables.bullet_item.find_iter(body).count() + tables.numbered_item.find_iter(body).count()
        })
        .sum()
}

/// Returns the text between the first heading named `name` and the next heading.
///
/// The returned slice starts right after the heading text, so it begins with
/// the heading's line break.
fn section_body<'a>(tables: &PatternTables, text: &'a str, name: &str) -> Option<&'a str> {
    let heading_end = heading_ends(text).find_map(|(line, end)| {
        heading_text(line.trim())
            .filter(|heading| *heading == name)
            .map(|_| end)
    })?;

    let rest = &text[heading_end..];
    let len = tables
        .next_heading
        .find(rest)
        .map_or(rest.len(), |m| m.start());
    Some(&rest[..len])
}

/// Yields each line (without its terminator) with the byte offset where it ends.
fn heading_ends(text: &str) -> impl Iterator<Item = (&str, usize)> {
    text.split_inclusive('\n').scan(0, |offset, raw| {
        let start = *offset;
        *offset += raw.len();
        let line = raw.trim_end_matches(['\n', '\r']);
        Some((line, start + line.len()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::patterns::tables;

    #[test]
    fn heading_text_strips_markers() {
        assert_eq!(heading_text("## New Features"), Some("New Features"));
        assert_eq!(heading_text("#Title"), Some("Title"));
        assert_eq!(heading_text("###"), Some(""));
        assert_eq!(heading_text("- item"), None);
    }

    #[test]
    fn counts_bullets_and_numbers_until_next_heading() {
        let text = "# release\n## features\n- one\n* two\n1. three\n## fixes\n- not counted\n";
        assert_eq!(count_section_items(tables(), text, &["features"]), 3);
        assert_eq!(count_section_items(tables(), text, &["fixes"]), 1);
    }

    #[test]
    fn section_runs_to_end_of_document() {
        let text = "## changes\n- a\n  - nested\n• dotted\n";
        assert_eq!(count_section_items(tables(), text, &["changes"]), 3);
    }

    #[test]
    fn heading_must_equal_name() {
        let text = "## new features\n- a\n- b\n";
        assert_eq!(count_section_items(tables(), text, &["features"]), 0);
        assert_eq!(count_section_items(tables(), text, &["new features"]), 2);
    }

    #[test]
    fn only_first_matching_heading_counts() {
        let text = "## features\n- a\n## other\n## features\n- b\n- c\n";
        assert_eq!(count_section_items(tables(), text, &["features"]), 1);
    }

    #[test]
    fn sums_across_all_names_found() {
        let text = "## new features\n- a\n## features\n- b\n- c\n## additions\n1. d\n";
        let names = ["new features", "features", "additions"];
        assert_eq!(count_section_items(tables(), text, &names), 4);
    }

    #[test]
    fn missing_section_counts_zero() {
        assert_eq!(count_section_items(tables(), "- a\n- b\n", &["features"]), 0);
    }

    #[test]
    fn bullet_requires_whitespace() {
        let text = "## fixes\n-no space\n--- rule\n- real\n";
        assert_eq!(count_section_items(tables(), text, &["fixes"]), 1);
    }
}
