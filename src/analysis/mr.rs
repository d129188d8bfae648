//! Change-record (MR) analysis.

use std::collections::HashSet;

use super::patterns::{MR_BUG_FIX_KEYWORDS, MR_FEATURE_KEYWORDS, MR_IMPROVEMENT_KEYWORDS};
use super::record::{Impact, LinesChanged, MrAnalysisRecord, MrType};
use super::ContentAnalyzer;

impl ContentAnalyzer {
    /// Analyzes the text of a single change record.
    pub fn analyze_mr(&self, content: &str) -> MrAnalysisRecord {
        let words = content.split_whitespace().count();
        MrAnalysisRecord {
            mr_type: detect_mr_type(content),
            impact: assess_impact(words),
            files_changed: self.count_files_changed(content),
            lines_changed: estimate_lines_changed(words),
        }
    }

    /// Counts distinct `name.ext` and `dir/name` tokens.
    pub fn count_files_changed(&self, content: &str) -> usize {
        self.tables
            .mr_file_tokens
            .iter()
            .flat_map(|re| re.find_iter(content))
            .map(|m| m.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

fn detect_mr_type(content: &str) -> MrType {
    let lower = content.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if mentions(MR_FEATURE_KEYWORDS) {
        MrType::Feature
    } else if mentions(MR_BUG_FIX_KEYWORDS) {
        MrType::BugFix
    } else if mentions(MR_IMPROVEMENT_KEYWORDS) {
        MrType::Improvement
    } else {
        MrType::Other
    }
}

fn assess_impact(words: usize) -> Impact {
    if words > 500 {
        Impact::High
    } else if words > 200 {
        Impact::Medium
    } else {
        Impact::Low
    }
}

fn estimate_lines_changed(words: usize) -> LinesChanged {
    if words > 300 {
        LinesChanged::OverHundred
    } else if words > 150 {
        LinesChanged::FiftyToHundred
    } else {
        LinesChanged::UnderFifty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mr_type_priority() {
        assert_eq!(detect_mr_type("Add export and fix crash"), MrType::Feature);
        assert_eq!(detect_mr_type("Fix crash on startup"), MrType::BugFix);
        assert_eq!(detect_mr_type("Refactor the parser"), MrType::Improvement);
        assert_eq!(detect_mr_type("Bump version"), MrType::Other);
    }

    #[test]
    fn mr_type_uses_substrings() {
        // "renewal" contains "new"
        assert_eq!(detect_mr_type("Licence renewal"), MrType::Feature);
        // "debugging" contains "bug"
        assert_eq!(detect_mr_type("Debugging notes"), MrType::BugFix);
    }

    #[test]
    fn impact_thresholds() {
        assert_eq!(assess_impact(200), Impact::Low);
        assert_eq!(assess_impact(201), Impact::Medium);
        assert_eq!(assess_impact(501), Impact::High);
    }

    #[test]
    fn lines_changed_thresholds() {
        assert_eq!(estimate_lines_changed(150), LinesChanged::UnderFifty);
        assert_eq!(estimate_lines_changed(151), LinesChanged::FiftyToHundred);
        assert_eq!(estimate_lines_changed(301), LinesChanged::OverHundred);
    }

    #[test]
    fn files_changed_counts_distinct_tokens() {
        let analyzer = ContentAnalyzer::new();
        let content = "Touched src/main.rs and lib.rs, then main.rs again.";
        // main.rs, lib.rs, src/main
        assert_eq!(analyzer.count_files_changed(content), 3);
        assert_eq!(analyzer.count_files_changed("no files here"), 0);
    }

    #[test]
    fn analyze_mr_combines_signals() {
        let analyzer = ContentAnalyzer::new();
        let content = format!("Fix login bug in auth/session.rs {}", "word ".repeat(250));
        let record = analyzer.analyze_mr(&content);
        assert_eq!(record.mr_type, MrType::BugFix);
        assert_eq!(record.impact, Impact::Medium);
        assert_eq!(record.lines_changed, LinesChanged::FiftyToHundred);
        // session.rs, auth/session
        assert_eq!(record.files_changed, 2);
    }
}
