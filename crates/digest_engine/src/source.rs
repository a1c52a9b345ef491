use digest_core::{FolderNode, RawMessage, SearchQuery};

use crate::types::SourceError;

/// A connected mail store.
pub trait MailSource {
    fn account_name(&self) -> String;

    fn list_folders(&self) -> Result<FolderNode, SourceError>;

    /// Messages of `query.folder` inside the date range whose subject
    /// contains any keyword, newest first.
    fn fetch_messages(&self, query: &SearchQuery) -> Result<Vec<RawMessage>, SourceError>;
}

/// Opens a [`MailSource`]; called again whenever the user reconnects.
pub trait MailConnector {
    fn connect(&self) -> Result<Box<dyn MailSource>, SourceError>;
}
