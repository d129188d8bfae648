//! Release-notes extractors.

use std::collections::BTreeSet;

use tracing::debug;

use super::patterns::{
    CountCategory, DEFAULT_PROJECT_NAME, DEFAULT_SUMMARY, DEFAULT_TITLE, EMPTY_PROJECT_NAME,
    EMPTY_SUMMARY, MAINTENANCE_KEYWORDS, MAX_TECHNICAL_HIGHLIGHTS, SUMMARY_MIN_CHARS,
    TECHNICAL_KEYWORDS,
};
use super::record::{AnalysisRecord, ComplexityScore, ReleaseType};
use super::sections::{count_section_items, heading_text};
use super::{today_label, ContentAnalyzer};

impl ContentAnalyzer {
    /// Analyzes a release-notes document.
    ///
    /// The change-record count is left at zero; use
    /// [`analyze_with_mr_count`](Self::analyze_with_mr_count) when the
    /// document source can supply it.
    pub fn analyze(&self, content: &str, version: &str) -> AnalysisRecord {
        self.analyze_with_mr_count(content, version, 0)
    }

    /// Analyzes a release-notes document, recording `mr_count` change records.
    ///
    /// Empty content yields [`AnalysisRecord::empty`].
    pub fn analyze_with_mr_count(
        &self,
        content: &str,
        version: &str,
        mr_count: usize,
    ) -> AnalysisRecord {
        if content.is_empty() {
            return AnalysisRecord::empty();
        }

        let features_count = self.count_features(content);
        let record = AnalysisRecord {
            title: self.extract_title(content),
            summary: self.extract_summary(content),
            features_count,
            improvements_count: self.count_improvements(content),
            changes_count: self.count_changes(content),
            mr_count,
            project_name: self.extract_project_name(content),
            release_date: self.extract_release_date(content),
            technical_highlights: self.extract_technical_highlights(content),
            complexity_score: self.complexity_score(content),
            release_type: self.release_type(version, content, features_count),
        };

        debug!(
            version,
            features = record.features_count,
            improvements = record.improvements_count,
            changes = record.changes_count,
            complexity = %record.complexity_score,
            release_type = %record.release_type,
            "Analyzed release content"
        );

        record
    }

    /// Returns the first heading's text, or the default title.
    pub fn extract_title(&self, content: &str) -> String {
        content
            .lines()
            .filter_map(|line| heading_text(line.trim()))
            .find(|text| !text.is_empty())
            .map_or_else(|| DEFAULT_TITLE.to_string(), str::to_string)
    }

    /// Returns the first line long enough to serve as a summary.
    ///
    /// Headings, bullets and blockquotes never qualify.
    pub fn extract_summary(&self, content: &str) -> String {
        content
            .lines()
            .map(str::trim)
            .find(|line| {
                line.chars().count() > SUMMARY_MIN_CHARS
                    && !line.starts_with(['#', '-', '*', '>'])
            })
            .map_or_else(|| DEFAULT_SUMMARY.to_string(), str::to_string)
    }

    /// Counts new-feature mentions; never less than one.
    pub fn count_features(&self, content: &str) -> usize {
        self.count_category(&self.tables.features, content).max(1)
    }

    /// Counts improvement mentions.
    pub fn count_improvements(&self, content: &str) -> usize {
        self.count_category(&self.tables.improvements, content)
    }

    /// Counts change and fix mentions.
    pub fn count_changes(&self, content: &str) -> usize {
        self.count_category(&self.tables.changes, content)
    }

    fn count_category(&self, category: &CountCategory, content: &str) -> usize {
        let lower = content.to_lowercase();
        let mentions: usize = category
            .patterns
            .iter()
            .map(|re| re.find_iter(&lower).count())
            .sum();
        mentions + count_section_items(self.tables, &lower, category.sections)
    }

    /// Returns the first project name pattern match, title-cased.
    pub fn extract_project_name(&self, content: &str) -> String {
        let lower = content.to_lowercase();
        self.tables
            .project_name
            .iter()
            .find_map(|re| re.captures(&lower).and_then(|caps| caps.get(1)))
            .map_or_else(
                || DEFAULT_PROJECT_NAME.to_string(),
                |name| title_case(name.as_str()).replace(['_', '-'], " "),
            )
    }

    /// Returns the first literal date found, or today's date.
    pub fn extract_release_date(&self, content: &str) -> String {
        self.tables
            .release_date
            .iter()
            .find_map(|re| re.find(content))
            .map_or_else(today_label, |m| m.as_str().to_string())
    }

    /// Collects up to five uppercased technical terms.
    pub fn extract_technical_highlights(&self, content: &str) -> BTreeSet<String> {
        let lower = content.to_lowercase();

        let keywords = TECHNICAL_KEYWORDS
            .iter()
            .filter(|keyword| lower.contains(*keyword))
            .map(|keyword| keyword.to_uppercase());
        let terms = self
            .tables
            .technical_groups
            .iter()
            .flat_map(|re| re.find_iter(&lower))
            .map(|m| m.as_str().to_uppercase());

        keywords
            .chain(terms)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .take(MAX_TECHNICAL_HIGHLIGHTS)
            .collect()
    }

    /// Scores complexity from word count and technical-highlight count.
    ///
    /// The highlight set is capped at five entries, so the technical
    /// thresholds alone never raise the score.
    pub fn complexity_score(&self, content: &str) -> ComplexityScore {
        let words = content.split_whitespace().count();
        let technical_count = self.extract_technical_highlights(content).len();
        score_complexity(words, technical_count)
    }

    /// Classifies the release from its version label and content.
    pub fn release_type(&self, version: &str, content: &str, features_count: usize) -> ReleaseType {
        if self.tables.major_version.is_match(version) {
            return ReleaseType::Major;
        }
        if features_count > 3 {
            return ReleaseType::Feature;
        }
        let lower = content.to_lowercase();
        if MAINTENANCE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return ReleaseType::Maintenance;
        }
        ReleaseType::Standard
    }
}

impl AnalysisRecord {
    /// The record reported when there is no content to analyze.
    pub fn empty() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            summary: EMPTY_SUMMARY.to_string(),
            features_count: 0,
            improvements_count: 0,
            changes_count: 0,
            mr_count: 0,
            project_name: EMPTY_PROJECT_NAME.to_string(),
            release_date: today_label(),
            technical_highlights: BTreeSet::new(),
            complexity_score: ComplexityScore::Low,
            release_type: ReleaseType::Unknown,
        }
    }
}

/// Applies the complexity thresholds in order.
pub(crate) fn score_complexity(words: usize, technical_count: usize) -> ComplexityScore {
    if words > 1000 || technical_count > 10 {
        ComplexityScore::High
    } else if words > 500 || technical_count > 5 {
        ComplexityScore::Medium
    } else {
        ComplexityScore::Low
    }
}

/// Title-cases `text` the way project labels are displayed.
///
/// A word is a run of cased characters; any uncased character, including
/// digits and CJK ideographs, starts a new word. Word-initial characters take
/// their titlecase form, which differs from uppercase for the Latin digraphs.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        let cased = is_cased(c);
        if cased && in_word {
            out.extend(c.to_lowercase());
        } else if cased {
            match titlecase_digraph(c) {
                Some(t) => out.push(t),
                None => out.extend(c.to_uppercase()),
            }
        } else {
            out.push(c);
        }
        in_word = cased;
    }
    out
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase() || titlecase_digraph(c).is_some()
}

/// Titlecase form of the Latin digraphs, whose titlecase and uppercase differ.
fn titlecase_digraph(c: char) -> Option<char> {
    match c {
        '\u{01C4}'..='\u{01C6}' => Some('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => Some('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => Some('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => Some('\u{01F2}'),
        _ => None,
    }
}
