use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format used in date headers, previews and reports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A message as delivered by a mail source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub subject: String,
    pub body: Option<String>,
    pub received_at: NaiveDateTime,
}

impl RawMessage {
    pub fn new(
        subject: impl Into<String>,
        body: Option<String>,
        received_at: NaiveDateTime,
    ) -> Self {
        Self {
            subject: subject.into(),
            body,
            received_at,
        }
    }
}

/// A message whose body has been reduced to its news lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedMessage {
    pub subject: String,
    pub body: String,
    pub time: NaiveDateTime,
}

impl ProcessedMessage {
    pub fn formatted_time(&self) -> String {
        self.time.format(TIMESTAMP_FORMAT).to_string()
    }
}
