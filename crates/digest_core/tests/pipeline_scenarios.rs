use chrono::{NaiveDate, NaiveDateTime};
use digest_core::{
    assemble_report, CategorizedNews, CategoryRule, CategoryTable, DateRange, FolderId, NewsItem,
    Pipeline, ProcessedMessage, RawMessage, ReportBody, SearchQuery, TextCleaner,
};
use pretty_assertions::assert_eq;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn query() -> SearchQuery {
    SearchQuery {
        folder: FolderId::new("Inbox"),
        range: DateRange::new(date("2024-01-01"), date("2024-01-31")).unwrap(),
        keywords: Vec::new(),
    }
}

#[test]
fn bullets_are_kept_and_classified() {
    let raw = vec![RawMessage::new(
        "Morning brief",
        Some("* China's central bank cuts rate\n* unrelated line\nNot a bullet".to_string()),
        at("2024-01-04 07:30:00"),
    )];

    let results = Pipeline::default().run(query(), raw);

    assert_eq!(
        results.messages[0].body,
        "* China's central bank cuts rate\n* unrelated line"
    );
    assert_eq!(results.news.item_count(), 2);
    assert_eq!(
        results.news.get("China").unwrap(),
        &[NewsItem::new(
            Some(date("2024-01-04")),
            "China's central bank cuts rate"
        )]
    );
    assert_eq!(
        results.news.get("International").unwrap(),
        &[NewsItem::new(Some(date("2024-01-04")), "unrelated line")]
    );
}

#[test]
fn excluded_bullet_is_dropped_and_message_with_nothing_left_disappears() {
    let raw = vec![
        RawMessage::new(
            "Noise only",
            Some("* 今晨央行 announcement".to_string()),
            at("2024-01-02 07:30:00"),
        ),
        RawMessage::new("No body", None, at("2024-01-02 08:30:00")),
    ];

    let results = Pipeline::default().run(query(), raw);

    assert!(results.messages.is_empty());
    assert!(results.news.is_empty());
}

#[test]
fn items_keep_their_own_message_dates() {
    // Delivered newest first, as a mail source does.
    let raw = vec![
        RawMessage::new(
            "Fri",
            Some("* Federal Reserve speaks".to_string()),
            at("2024-01-05 09:00:00"),
        ),
        RawMessage::new(
            "Wed",
            Some("* Federal Reserve minutes".to_string()),
            at("2024-01-03 09:00:00"),
        ),
    ];

    let results = Pipeline::default().run(query(), raw);

    let subjects: Vec<&str> = results.messages.iter().map(|m| m.subject.as_str()).collect();
    assert_eq!(subjects, vec!["Wed", "Fri"]);
    assert_eq!(
        results.news.get("United States").unwrap(),
        &[
            NewsItem::new(Some(date("2024-01-03")), "Federal Reserve minutes"),
            NewsItem::new(Some(date("2024-01-05")), "Federal Reserve speaks"),
        ]
    );
}

#[test]
fn empty_news_report_lists_messages_in_stored_order() {
    let messages = vec![
        ProcessedMessage {
            subject: "a".into(),
            body: "* one".into(),
            time: at("2024-01-02 10:00:00"),
        },
        ProcessedMessage {
            subject: "b".into(),
            body: "* two".into(),
            time: at("2024-01-03 10:00:00"),
        },
    ];

    let report = assemble_report(
        &CategorizedNews::new(),
        &messages,
        query().range,
        at("2024-02-01 12:00:00"),
    );

    assert_eq!(report.body, ReportBody::Uncategorized(messages));
}

#[test]
fn custom_rules_and_marker_drive_the_pipeline() {
    let cleaner = TextCleaner::new('-', vec!["ad:".to_string()]);
    let table = CategoryTable::new(vec![CategoryRule::new("Energy", &["oil"])], "Other");
    let pipeline = Pipeline::new(cleaner, table);
    let raw = vec![RawMessage::new(
        "Digest",
        Some("- oil up\n- ad: buy now\n* star bullet\n- rates flat".to_string()),
        at("2024-01-10 06:00:00"),
    )];

    let results = pipeline.run(query(), raw);

    let labels: Vec<&str> = results.news.labels().collect();
    assert_eq!(labels, vec!["Energy", "Other"]);
    assert_eq!(results.news.get("Other").unwrap()[0].text, "rates flat");
    assert_eq!(results.news.item_count(), 2);
}
