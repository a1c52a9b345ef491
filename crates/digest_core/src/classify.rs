use serde::{Deserialize, Serialize};

/// Label for items that match no rule.
pub const DEFAULT_FALLBACK: &str = "International";

/// One classification rule: a label and the substrings that trigger it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub label: String,
    pub triggers: Vec<String>,
}

impl CategoryRule {
    pub fn new(label: impl Into<String>, triggers: &[&str]) -> Self {
        Self {
            label: label.into(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.triggers
            .iter()
            .any(|trigger| !trigger.is_empty() && text.contains(trigger.as_str()))
    }
}

/// Ordered rule list; the first matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTable {
    pub rules: Vec<CategoryRule>,
    pub fallback: String,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self {
            rules: vec![
                CategoryRule::new(
                    "China",
                    &[
                        "China",
                        "China's central bank",
                        "Ministry of Finance",
                        "Lan Fo'an",
                        "中国",
                        "中国央行",
                        "财政部",
                        "蓝佛安",
                        "中央",
                    ],
                ),
                CategoryRule::new(
                    "United States",
                    &[
                        "United States",
                        "Federal Reserve",
                        "Biden",
                        "Trump",
                        "美国",
                        "美联储",
                        "拜登",
                        "特朗普",
                    ],
                ),
            ],
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

impl CategoryTable {
    pub fn new(rules: Vec<CategoryRule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// Returns exactly one label for `text`.
    pub fn classify(&self, text: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.matches(text))
            .map(|rule| rule.label.as_str())
            .unwrap_or(self.fallback.as_str())
    }
}
