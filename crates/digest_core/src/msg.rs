use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    /// Comma-separated subject keywords, possibly empty.
    pub keywords: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked to connect (or reconnect) to the mail source.
    ConnectClicked,
    /// Mail source is ready and its folders were listed.
    Connected {
        account: String,
        folders: crate::FolderNode,
    },
    /// Mail source could not be opened.
    ConnectionFailed(String),
    /// User picked a folder from the tree.
    FolderSelected(crate::FolderId),
    /// User started a search.
    SearchClicked(SearchForm),
    /// Mail source answered a search.
    MessagesFetched {
        query: crate::SearchQuery,
        result: Result<Vec<crate::RawMessage>, crate::SessionError>,
    },
    /// User asked to save the report into a directory.
    SaveClicked {
        destination: PathBuf,
        requested_at: NaiveDateTime,
    },
    /// Document sink finished writing.
    ReportSaved(Result<PathBuf, String>),
    /// User dropped the current results.
    ClearClicked,
}
