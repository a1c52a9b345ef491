//! Digest core: pure extraction pipeline, session state machine and view-model helpers.
mod classify;
mod clean;
mod effect;
mod error;
mod extract;
mod folder;
mod message;
mod msg;
mod news;
mod pipeline;
mod preview;
mod query;
mod report;
mod state;
mod update;
mod view_model;

pub use classify::{CategoryRule, CategoryTable, DEFAULT_FALLBACK};
pub use clean::{TextCleaner, DEFAULT_EXCLUSION, DEFAULT_MARKER};
pub use effect::Effect;
pub use error::SessionError;
pub use extract::{compose_digest_text, NewsExtractor, DATE_HEADER_LABEL};
pub use folder::{build_folder_tree, FolderId, FolderNode, MailFolder};
pub use message::{ProcessedMessage, RawMessage, TIMESTAMP_FORMAT};
pub use msg::{Msg, SearchForm};
pub use news::{CategorizedNews, NewsCategory, NewsItem};
pub use pipeline::{Pipeline, SearchResults};
pub use preview::{preview_body, render_preview, MAX_PREVIEW_CHARS};
pub use query::{parse_keywords, DateRange, DateRangeError, SearchQuery};
pub use report::{
    assemble_report, format_news_date, sort_news_items, Report, ReportBody, ReportSection,
    REPORT_TITLE, UNCATEGORIZED_HEADING, UNKNOWN_DATE,
};
pub use state::{AppState, Notice, PendingOp, SessionState};
pub use update::update;
pub use view_model::{AppViewModel, FolderRowView};
