use std::fmt::Write;
use std::sync::LazyLock;

use chrono::NaiveDate;
use digest_logging::digest_debug;
use regex::Regex;

use crate::classify::CategoryTable;
use crate::clean::DEFAULT_MARKER;
use crate::message::{ProcessedMessage, TIMESTAMP_FORMAT};
use crate::news::{CategorizedNews, NewsItem};

/// Label that introduces a date header line in the composed text.
pub const DATE_HEADER_LABEL: &str = "时间";

static DATE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"时间:\s*(\d{4}-\d{2}-\d{2})\s*\d{2}:\d{2}:\d{2}")
        .expect("date header pattern is valid")
});

/// Concatenates messages into one text: a date header per message followed
/// by its cleaned body. Messages are expected in ascending time order.
pub fn compose_digest_text(messages: &[ProcessedMessage]) -> String {
    let mut text = String::new();
    for message in messages {
        let _ = writeln!(
            text,
            "{DATE_HEADER_LABEL}: {}",
            message.time.format(TIMESTAMP_FORMAT)
        );
        text.push_str(&message.body);
        text.push_str("\n\n");
    }
    text
}

/// Scans composed text for date headers and news bullets.
#[derive(Debug, Clone)]
pub struct NewsExtractor {
    news_line: Regex,
}

impl Default for NewsExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl NewsExtractor {
    pub fn new(marker: char) -> Self {
        let pattern = format!(r"^{}\s*(.*)", regex::escape(&marker.to_string()));
        let news_line = Regex::new(&pattern).expect("escaped marker forms a valid pattern");
        Self { news_line }
    }

    /// Extracts every news line, dated by the most recent header and filed
    /// under the label `table` assigns to it.
    pub fn extract(&self, text: &str, table: &CategoryTable) -> CategorizedNews {
        let mut news = CategorizedNews::new();
        let mut current_date: Option<NaiveDate> = None;

        for line in text.lines() {
            if let Some(caps) = DATE_HEADER.captures(line) {
                match NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d") {
                    Ok(date) => current_date = Some(date),
                    Err(err) => {
                        digest_debug!("Ignoring malformed date header {:?}: {}", line, err);
                    }
                }
            }

            if let Some(caps) = self.news_line.captures(line) {
                let content = caps.get(1).map_or("", |m| m.as_str());
                let label = table.classify(content);
                news.push(label, NewsItem::new(current_date, content));
            }
        }

        news
    }
}
