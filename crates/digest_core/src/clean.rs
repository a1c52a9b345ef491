use std::sync::LazyLock;

use regex::Regex;

/// Leading character of a news bullet.
pub const DEFAULT_MARKER: char = '*';
/// Noise marker of the source feed: bullets containing it are dropped.
pub const DEFAULT_EXCLUSION: &str = "今晨央行";

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("blank-run pattern is valid"));

/// Reduces a raw message body to its bullet lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCleaner {
    marker: char,
    exclusions: Vec<String>,
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER, vec![DEFAULT_EXCLUSION.to_string()])
    }
}

impl TextCleaner {
    pub fn new(marker: char, exclusions: Vec<String>) -> Self {
        let exclusions = exclusions.into_iter().filter(|e| !e.is_empty()).collect();
        Self { marker, exclusions }
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    /// True when an already trimmed line survives cleaning.
    pub fn keeps(&self, line: &str) -> bool {
        line.starts_with(self.marker) && !self.exclusions.iter().any(|e| line.contains(e.as_str()))
    }

    /// Returns the cleaned body; an empty string means nothing of interest.
    pub fn clean(&self, body: Option<&str>) -> String {
        let Some(body) = body else {
            return String::new();
        };

        let kept: Vec<&str> = body
            .lines()
            .map(str::trim)
            .filter(|line| self.keeps(line))
            .collect();
        let joined = kept.join("\n");
        BLANK_RUN.replace_all(&joined, "\n").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_marked_lines() {
        let cleaner = TextCleaner::default();
        let body = "Morning brief\n  * first item  \n\nplain text\n*second item\r\n";
        assert_eq!(cleaner.clean(Some(body)), "* first item\n*second item");
    }

    #[test]
    fn drops_lines_with_exclusion() {
        let cleaner = TextCleaner::default();
        let body = "* 今晨央行 announcement\n* kept";
        assert_eq!(cleaner.clean(Some(body)), "* kept");
    }

    #[test]
    fn absent_or_empty_body_yields_empty() {
        let cleaner = TextCleaner::default();
        assert_eq!(cleaner.clean(None), "");
        assert_eq!(cleaner.clean(Some("")), "");
        assert_eq!(cleaner.clean(Some("no bullets here\n\n")), "");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let cleaner = TextCleaner::default();
        let bodies = [
            "* a\n\n\n  * b\n c\n*今晨央行\n*",
            "   \n*\t tab\n* trailing   \n",
            "",
        ];
        for body in bodies {
            let once = cleaner.clean(Some(body));
            assert_eq!(cleaner.clean(Some(&once)), once);
        }
    }

    #[test]
    fn every_output_line_satisfies_keep_predicate() {
        let cleaner = TextCleaner::new('*', vec!["noise".into(), String::new()]);
        let body = "* one\n* noise two\n  *three\n- four\n* five noise";
        let cleaned = cleaner.clean(Some(body));
        assert_eq!(cleaned, "* one\n*three");
        for line in cleaned.lines() {
            assert!(line.starts_with('*'));
            assert!(!line.contains("noise"));
        }
    }

    #[test]
    fn custom_marker() {
        let cleaner = TextCleaner::new('•', Vec::new());
        assert_eq!(cleaner.clean(Some("• a\n* b")), "• a");
    }
}
