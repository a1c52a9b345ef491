use crate::classify::CategoryTable;
use crate::clean::TextCleaner;
use crate::extract::{compose_digest_text, NewsExtractor};
use crate::message::{ProcessedMessage, RawMessage};
use crate::news::CategorizedNews;
use crate::query::SearchQuery;

/// Everything one search produced. Messages and news always come from the
/// same run and are replaced together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub query: SearchQuery,
    pub messages: Vec<ProcessedMessage>,
    pub news: CategorizedNews,
}

/// Clean → compose → extract → classify.
#[derive(Debug, Clone)]
pub struct Pipeline {
    cleaner: TextCleaner,
    extractor: NewsExtractor,
    table: CategoryTable,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(TextCleaner::default(), CategoryTable::default())
    }
}

impl Pipeline {
    pub fn new(cleaner: TextCleaner, table: CategoryTable) -> Self {
        let extractor = NewsExtractor::new(cleaner.marker());
        Self {
            cleaner,
            extractor,
            table,
        }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    /// Cleans each body, drops messages with nothing left and orders the
    /// rest by time ascending.
    pub fn process_messages(&self, raw: Vec<RawMessage>) -> Vec<ProcessedMessage> {
        let mut processed: Vec<ProcessedMessage> = raw
            .into_iter()
            .filter_map(|message| {
                let body = self.cleaner.clean(message.body.as_deref());
                if body.is_empty() {
                    return None;
                }
                Some(ProcessedMessage {
                    subject: message.subject,
                    body,
                    time: message.received_at,
                })
            })
            .collect();
        processed.sort_by_key(|message| message.time);
        processed
    }

    pub fn run(&self, query: SearchQuery, raw: Vec<RawMessage>) -> SearchResults {
        let messages = self.process_messages(raw);
        let text = compose_digest_text(&messages);
        let news = self.extractor.extract(&text, &self.table);
        SearchResults {
            query,
            messages,
            news,
        }
    }
}
