use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use digest_core::{DateRange, FolderId, SearchQuery};
use digest_engine::{MailConnector, MailSource, MaildirConnector, MaildirSource, SourceError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn make_maildir(dir: &Path) {
    for sub in ["cur", "new", "tmp"] {
        fs::create_dir_all(dir.join(sub)).unwrap();
    }
}

fn deliver(dir: &Path, name: &str, subject: &str, date: &str, body: &str) {
    let raw = format!(
        "Subject: {subject}\r\nDate: {date}\r\nContent-Type: text/plain; charset=utf-8\r\n\r\n{body}\r\n"
    );
    fs::write(dir.join("new").join(name), raw).unwrap();
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn store() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    make_maildir(root);
    make_maildir(&root.join("News"));
    make_maildir(&root.join("News").join("Daily"));
    make_maildir(&root.join("Archive"));
    fs::create_dir_all(root.join("notes")).unwrap();

    let news = root.join("News");
    deliver(
        &news,
        "1.eml",
        "Morning brief",
        "Wed, 03 Jan 2024 12:00:00 +0000",
        "* Federal Reserve holds",
    );
    deliver(
        &news,
        "2.eml",
        "Evening 早报",
        "Fri, 05 Jan 2024 12:00:00 +0000",
        "* China trade data",
    );
    deliver(
        &news,
        "3.eml",
        "Invoice",
        "Thu, 04 Jan 2024 12:00:00 +0000",
        "pay now",
    );
    deliver(
        &news,
        "4.eml",
        "Morning brief",
        "Mon, 12 Feb 2024 12:00:00 +0000",
        "* out of range",
    );
    temp
}

fn query(keywords: &[&str]) -> SearchQuery {
    SearchQuery {
        folder: FolderId::new("News"),
        range: DateRange::new(date("2024-01-01"), date("2024-01-31")).unwrap(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

#[test]
fn folder_tree_lists_maildirs_only() {
    let temp = store();
    let source = MaildirSource::new(temp.path().to_path_buf());
    let tree = source.list_folders().unwrap();

    assert_eq!(tree.id, FolderId::new("."));
    let ids: Vec<&str> = tree
        .flatten()
        .into_iter()
        .map(|(_, node)| node.id.as_str())
        .collect();
    assert_eq!(ids, vec![".", "Archive", "News", "News/Daily"]);
}

#[test]
fn fetch_filters_by_range_and_returns_newest_first() {
    let temp = store();
    let source = MaildirSource::new(temp.path().to_path_buf());
    let messages = source.fetch_messages(&query(&[])).unwrap();

    let subjects: Vec<&str> = messages.iter().map(|m| m.subject.as_str()).collect();
    assert_eq!(subjects, vec!["Evening 早报", "Invoice", "Morning brief"]);
}

#[test]
fn fetch_applies_keywords_as_or() {
    let temp = store();
    let source = MaildirSource::new(temp.path().to_path_buf());
    let messages = source.fetch_messages(&query(&["brief", "早报"])).unwrap();

    let subjects: Vec<&str> = messages.iter().map(|m| m.subject.as_str()).collect();
    assert_eq!(subjects, vec!["Evening 早报", "Morning brief"]);
}

#[test]
fn unknown_or_escaping_folder_is_rejected() {
    let temp = store();
    let source = MaildirSource::new(temp.path().to_path_buf());
    for id in ["Missing", "../News", "/etc"] {
        let mut q = query(&[]);
        q.folder = FolderId::new(id);
        assert!(matches!(
            source.fetch_messages(&q),
            Err(SourceError::UnknownFolder(_))
        ));
    }
}

#[test]
fn connector_requires_existing_root() {
    let temp = TempDir::new().unwrap();
    let missing = MaildirConnector::new(temp.path().join("nope"));
    assert!(matches!(
        missing.connect(),
        Err(SourceError::StoreMissing(_))
    ));

    let present = MaildirConnector::new(temp.path());
    assert!(present.connect().is_ok());
}
