use std::fmt::Write;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::message::{ProcessedMessage, TIMESTAMP_FORMAT};
use crate::news::{CategorizedNews, NewsItem};
use crate::query::DateRange;

pub const REPORT_TITLE: &str = "Mail Digest";
pub const UNKNOWN_DATE: &str = "unknown date";
pub const UNCATEGORIZED_HEADING: &str = "Uncategorized";
const DATE_FORMAT: &str = "%Y-%m-%d";
const HEADER_RULE_WIDTH: usize = 50;
const SECTION_RULE_WIDTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub label: String,
    pub entries: Vec<NewsItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum ReportBody {
    Categorized(Vec<ReportSection>),
    /// Extraction produced nothing; the cleaned messages stand in for it.
    Uncategorized(Vec<ProcessedMessage>),
}

/// A fully assembled digest, ready for a document sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub generated_at: NaiveDateTime,
    pub range: DateRange,
    pub body: ReportBody,
}

/// Stable sort by date; undated items come first.
pub fn sort_news_items(items: &[NewsItem]) -> Vec<NewsItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));
    sorted
}

pub fn format_news_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => UNKNOWN_DATE.to_string(),
    }
}

pub fn assemble_report(
    news: &CategorizedNews,
    messages: &[ProcessedMessage],
    range: DateRange,
    generated_at: NaiveDateTime,
) -> Report {
    let body = if news.is_empty() {
        ReportBody::Uncategorized(messages.to_vec())
    } else {
        ReportBody::Categorized(
            news.iter()
                .map(|category| ReportSection {
                    label: category.label.clone(),
                    entries: sort_news_items(&category.items),
                })
                .collect(),
        )
    };

    Report {
        title: REPORT_TITLE.to_string(),
        generated_at,
        range,
        body,
    }
}

impl Report {
    /// Renders the report as Markdown-flavoured plain text.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}\n", self.title);
        let _ = writeln!(
            out,
            "Generated: {}\n",
            self.generated_at.format(TIMESTAMP_FORMAT)
        );
        let _ = writeln!(
            out,
            "Date range: {} to {}\n",
            self.range.start().format(DATE_FORMAT),
            self.range.end().format(DATE_FORMAT)
        );
        let _ = writeln!(out, "{}\n", "=".repeat(HEADER_RULE_WIDTH));

        match &self.body {
            ReportBody::Categorized(sections) => {
                for section in sections {
                    let _ = writeln!(out, "## {} News\n", section.label);
                    for entry in &section.entries {
                        let _ = writeln!(out, "{}: {}", format_news_date(entry.date), entry.text);
                    }
                    let _ = writeln!(out, "\n{}\n", "_".repeat(SECTION_RULE_WIDTH));
                }
            }
            ReportBody::Uncategorized(messages) => {
                let _ = writeln!(out, "## {}\n", UNCATEGORIZED_HEADING);
                for message in messages {
                    let _ = writeln!(out, "Subject: {}", message.subject);
                    let _ = writeln!(out, "Time: {}", message.formatted_time());
                    let _ = writeln!(out, "{}\n", message.body);
                }
                let _ = writeln!(out, "{}\n", "_".repeat(SECTION_RULE_WIDTH));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    fn range() -> DateRange {
        DateRange::new(date("2024-01-01"), date("2024-01-07")).unwrap()
    }

    #[test]
    fn sort_is_stable_with_undated_first() {
        let items = vec![
            NewsItem::new(Some(date("2024-01-05")), "late"),
            NewsItem::new(None, "undated a"),
            NewsItem::new(Some(date("2024-01-03")), "early a"),
            NewsItem::new(None, "undated b"),
            NewsItem::new(Some(date("2024-01-03")), "early b"),
        ];
        let texts: Vec<String> = sort_news_items(&items).into_iter().map(|i| i.text).collect();
        assert_eq!(
            texts,
            vec!["undated a", "undated b", "early a", "early b", "late"]
        );
    }

    #[test]
    fn categorized_report_renders_sections_in_insertion_order() {
        let mut news = CategorizedNews::new();
        news.push("United States", NewsItem::new(Some(date("2024-01-04")), "Fed holds"));
        news.push("China", NewsItem::new(None, "PBoC statement"));
        news.push("United States", NewsItem::new(Some(date("2024-01-02")), "Jobs data"));

        let report = assemble_report(&news, &[], range(), at("2024-01-08 09:00:00"));
        let text = report.render_text();

        assert!(text.starts_with("# Mail Digest\n"));
        assert!(text.contains("Generated: 2024-01-08 09:00:00"));
        assert!(text.contains("Date range: 2024-01-01 to 2024-01-07"));
        let us = text.find("## United States News").unwrap();
        let cn = text.find("## China News").unwrap();
        assert!(us < cn);
        let jobs = text.find("2024-01-02: Jobs data").unwrap();
        let fed = text.find("2024-01-04: Fed holds").unwrap();
        assert!(jobs < fed);
        assert!(text.contains("unknown date: PBoC statement"));
    }

    #[test]
    fn empty_news_falls_back_to_messages() {
        let messages = vec![
            ProcessedMessage {
                subject: "first".into(),
                body: "*".into(),
                time: at("2024-01-02 10:00:00"),
            },
            ProcessedMessage {
                subject: "second".into(),
                body: "*".into(),
                time: at("2024-01-01 10:00:00"),
            },
        ];
        let report = assemble_report(
            &CategorizedNews::new(),
            &messages,
            range(),
            at("2024-01-08 09:00:00"),
        );
        assert_eq!(report.body, ReportBody::Uncategorized(messages));

        let text = report.render_text();
        assert!(text.contains("## Uncategorized"));
        assert!(text.find("Subject: first").unwrap() < text.find("Subject: second").unwrap());
    }
}
