use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::folder::FolderId;
use crate::message::RawMessage;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("start date {start} is after end date {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
}

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// True when the timestamp falls on any day from start through end.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        let day = timestamp.date();
        self.start <= day && day <= self.end
    }
}

/// Splits a user-entered, comma-separated keyword string.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub folder: FolderId,
    pub range: DateRange,
    pub keywords: Vec<String>,
}

impl SearchQuery {
    pub fn subject_matches(&self, subject: &str) -> bool {
        self.keywords.is_empty() || self.keywords.iter().any(|k| subject.contains(k.as_str()))
    }

    /// Applies the date range and the OR-ed subject keywords.
    pub fn matches(&self, message: &RawMessage) -> bool {
        self.range.contains(message.received_at) && self.subject_matches(&message.subject)
    }
}
