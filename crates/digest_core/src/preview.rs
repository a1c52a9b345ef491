use std::fmt::Write;

use crate::report::{format_news_date, sort_news_items};
use crate::{CategorizedNews, ProcessedMessage};

const TRUNCATED_MARKER: &str = "...";
pub const MAX_PREVIEW_CHARS: usize = 500;
const DIVIDER_WIDTH: usize = 50;

/// Body collapsed onto one line and cut to [`MAX_PREVIEW_CHARS`] characters.
pub fn preview_body(body: &str) -> String {
    let flat = body.replace('\n', " ");
    let flat = flat.trim();
    if flat.chars().count() <= MAX_PREVIEW_CHARS {
        flat.to_string()
    } else {
        let truncated: String = flat.chars().take(MAX_PREVIEW_CHARS).collect();
        format!("{truncated}{TRUNCATED_MARKER}")
    }
}

/// Text shown after a search: the matched messages, then the news by category.
pub fn render_preview(messages: &[ProcessedMessage], news: &CategorizedNews) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Found {} message(s)\n", messages.len());

    for (i, message) in messages.iter().enumerate() {
        let _ = writeln!(out, "{}. Subject: {}", i + 1, message.subject);
        let _ = writeln!(out, "Time: {}", message.formatted_time());
        let _ = writeln!(out, "Preview: {}", preview_body(&message.body));
        let _ = writeln!(out, "{}\n", "-".repeat(DIVIDER_WIDTH));
    }

    out.push_str("\nCategorized news:\n");
    if news.is_empty() {
        out.push_str("No categorized news to show.\n");
        return out;
    }
    for category in news.iter() {
        let _ = writeln!(out, "\n--- {} News ---", category.label);
        for item in sort_news_items(&category.items) {
            let _ = writeln!(out, "{}: {}", format_news_date(item.date), item.text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewsItem;
    use chrono::{NaiveDate, NaiveDateTime};

    #[test]
    fn short_body_is_flattened() {
        assert_eq!(preview_body("* a\n* b\n"), "* a * b");
    }

    #[test]
    fn long_body_is_cut_on_characters() {
        let body = "新".repeat(MAX_PREVIEW_CHARS + 10);
        let preview = preview_body(&body);
        assert!(preview.ends_with(TRUNCATED_MARKER));
        assert_eq!(
            preview.chars().count(),
            MAX_PREVIEW_CHARS + TRUNCATED_MARKER.len()
        );
    }

    #[test]
    fn preview_lists_messages_then_sorted_news() {
        let messages = vec![ProcessedMessage {
            subject: "Morning brief".into(),
            body: "* late\n* early".into(),
            time: NaiveDateTime::parse_from_str("2024-01-05 08:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        }];
        let mut news = CategorizedNews::new();
        let day = |d: u32| NaiveDate::from_ymd_opt(2024, 1, d);
        news.push("International", NewsItem::new(day(5), "late"));
        news.push("International", NewsItem::new(day(3), "early"));

        let text = render_preview(&messages, &news);
        assert!(text.starts_with("Found 1 message(s)"));
        assert!(text.contains("1. Subject: Morning brief"));
        assert!(text.contains("Time: 2024-01-05 08:00:00"));
        assert!(text.contains("--- International News ---"));
        assert!(text.find("2024-01-03: early").unwrap() < text.find("2024-01-05: late").unwrap());
    }

    #[test]
    fn preview_without_news_says_so() {
        let text = render_preview(&[], &CategorizedNews::new());
        assert!(text.contains("No categorized news to show."));
    }
}
