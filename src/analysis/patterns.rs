//! Keyword and pattern tables driving the content analyzer.
//!
//! Every heuristic the analyzer applies is listed here as named data, one
//! table per category, so each table can be reviewed and tested on its own.

use std::sync::LazyLock;

use regex::Regex;

/// Title used when a document has no heading.
pub const DEFAULT_TITLE: &str = "Release Documentation";

/// Summary used when no line qualifies as a summary paragraph.
pub const DEFAULT_SUMMARY: &str =
    "This release introduces enhancements to the system functionality and user experience.";

/// Summary reported for an empty document.
pub const EMPTY_SUMMARY: &str = "No content available for analysis.";

/// Project name used when no project pattern matches.
pub const DEFAULT_PROJECT_NAME: &str = "Library Management System";

/// Project name reported for an empty document.
pub const EMPTY_PROJECT_NAME: &str = "Project";

/// Minimum number of characters (exclusive) for a summary line.
pub const SUMMARY_MIN_CHARS: usize = 50;

/// Maximum number of technical highlights kept.
pub const MAX_TECHNICAL_HIGHLIGHTS: usize = 5;

/// Verb and noun co-occurrences that signal a new feature.
pub const FEATURE_PATTERNS: &[&str] = &[
    r"new\s+(feature|functionality|capability|module)",
    r"introduce[sd]?\s+.*?(feature|functionality|capability)",
    r"add[ed]?\s+.*?(feature|functionality|capability)",
    r"implement[ed]?\s+.*?(feature|functionality|capability)",
];

/// Section headers whose items count as features.
pub const FEATURE_SECTIONS: &[&str] = &["new features", "features", "additions"];

/// Keywords that signal an improvement.
pub const IMPROVEMENT_KEYWORDS: &[&str] = &[
    "improvement",
    "enhancement",
    "optimize",
    "performance",
    "upgrade",
    "refactor",
];

/// Section headers whose items count as improvements.
pub const IMPROVEMENT_SECTIONS: &[&str] = &["improvements", "enhancements", "optimizations"];

/// Keywords that signal a change or fix.
pub const CHANGE_KEYWORDS: &[&str] = &["change", "update", "modify", "fix", "bug", "issue", "patch"];

/// Section headers whose items count as changes.
pub const CHANGE_SECTIONS: &[&str] = &["changes", "updates", "fixes", "bug fixes"];

/// Project name patterns, tried in order against the lowercased text.
///
/// Capture group 1 holds the name.
pub const PROJECT_NAME_PATTERNS: &[&str] = &[
    r"(library\s+management\s+system)",
    r"(demo-project)",
    r"(\w+[-_]\w+)\s+(?:project|system|platform)",
    r"(?:project|system):\s*(\w+[-_\w]*)",
];

/// Release date patterns, tried in order against the raw text.
pub const RELEASE_DATE_PATTERNS: &[&str] = &[
    r"(?i)(january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2},?\s+\d{4}",
    r"(?i)\d{1,2}[/-]\d{1,2}[/-]\d{4}",
    r"(?i)\d{4}[/-]\d{1,2}[/-]\d{1,2}",
];

/// Technical keywords detected by plain substring search.
pub const TECHNICAL_KEYWORDS: &[&str] = &["api", "database", "service", "class", "method", "function"];

/// Code and service terms.
pub const CODE_TERMS: &[&str] = &["class", "method", "function", "api", "endpoint", "service"];

/// Data format terms.
pub const DATA_FORMAT_TERMS: &[&str] = &["database", "sql", "json", "xml", "rest"];

/// Security terms.
pub const SECURITY_TERMS: &[&str] = &["authentication", "authorization", "security"];

/// Substrings marking a maintenance release.
pub const MAINTENANCE_KEYWORDS: &[&str] = &["fix", "bug", "patch", "hotfix"];

/// Substrings marking a feature change record.
pub const MR_FEATURE_KEYWORDS: &[&str] = &["feature", "new", "add"];

/// Substrings marking a bug-fix change record.
pub const MR_BUG_FIX_KEYWORDS: &[&str] = &["fix", "bug", "issue"];

/// Substrings marking an improvement change record.
pub const MR_IMPROVEMENT_KEYWORDS: &[&str] = &["refactor", "improve", "optimize"];

/// File-like token patterns in change records: `name.ext` and `dir/name`.
pub const MR_FILE_PATTERNS: &[&str] = &[r"\b\w+\.\w+\b", r"\b\w+/\w+\b"];

/// One counted category: keyword patterns plus section headers.
#[derive(Debug)]
pub struct CountCategory {
    /// Patterns matched against the lowercased text.
    pub patterns: Vec<Regex>,
    /// Section header names whose items are added to the count.
    pub sections: &'static [&'static str],
}

/// All compiled tables used by the analyzer.
#[derive(Debug)]
pub struct PatternTables {
    /// New-feature signals.
    pub features: CountCategory,
    /// Improvement signals.
    pub improvements: CountCategory,
    /// Change and fix signals.
    pub changes: CountCategory,
    /// Project name patterns in priority order.
    pub project_name: Vec<Regex>,
    /// Release date patterns in priority order.
    pub release_date: Vec<Regex>,
    /// Code, data-format and security term groups.
    pub technical_groups: Vec<Regex>,
    /// Version labels classified as major releases.
    pub major_version: Regex,
    /// Bullet list item preceded by a line break.
    pub bullet_item: Regex,
    /// Numbered list item preceded by a line break.
    pub numbered_item: Regex,
    /// Start of the next heading line.
    pub next_heading: Regex,
    /// File-like token patterns for change records.
    pub mr_file_tokens: Vec<Regex>,
}

impl PatternTables {
    /// Compiles every table.
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            features: CountCategory {
                patterns: compile_all(FEATURE_PATTERNS)?,
                sections: FEATURE_SECTIONS,
            },
            improvements: CountCategory {
                patterns: vec![keyword_boundary(IMPROVEMENT_KEYWORDS)?],
                sections: IMPROVEMENT_SECTIONS,
            },
            changes: CountCategory {
                patterns: vec![keyword_boundary(CHANGE_KEYWORDS)?],
                sections: CHANGE_SECTIONS,
            },
            project_name: compile_all(PROJECT_NAME_PATTERNS)?,
            release_date: compile_all(RELEASE_DATE_PATTERNS)?,
            technical_groups: vec![
                keyword_boundary(CODE_TERMS)?,
                keyword_boundary(DATA_FORMAT_TERMS)?,
                keyword_boundary(SECURITY_TERMS)?,
            ],
            major_version: Regex::new(r"^v?\d+\.0(?:\.0)?$")?,
            bullet_item: Regex::new(r"\n\s*[-*•]\s+")?,
            numbered_item: Regex::new(r"\n\s*\d+\.\s+")?,
            next_heading: Regex::new(r"\n#+\s")?,
            mr_file_tokens: compile_all(MR_FILE_PATTERNS)?,
        })
    }
}

/// Builds a word-boundary alternation over `keywords`.
pub fn keyword_boundary(keywords: &[&str]) -> Result<Regex, regex::Error> {
    let alternation = keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b({alternation})\b"))
}

fn compile_all(patterns: &[&str]) -> Result<Vec<Regex>, regex::Error> {
    patterns.iter().map(|p| Regex::new(p)).collect()
}

#[allow(clippy::expect_used)] // Compile-time constant regex patterns
static TABLES: LazyLock<PatternTables> =
    LazyLock::new(|| PatternTables::compile().expect("built-in analysis patterns are valid"));

/// Returns the process-wide compiled tables.
pub fn tables() -> &'static PatternTables {
    &TABLES
}
