use std::collections::VecDeque;

use digest_core::{update, AppState, Effect, Msg, RawMessage, SearchQuery, SessionError};
use digest_logging::{digest_error, digest_info, digest_warn};

use crate::sink::DocumentSink;
use crate::source::{MailConnector, MailSource};
use crate::types::SourceError;

/// Executes session effects one at a time against the mail source and the
/// document sink. The source handle lives until the next `Connect`.
pub struct Engine {
    connector: Box<dyn MailConnector>,
    source: Option<Box<dyn MailSource>>,
    sink: Box<dyn DocumentSink>,
}

impl Engine {
    pub fn new(connector: Box<dyn MailConnector>, sink: Box<dyn DocumentSink>) -> Self {
        Self {
            connector,
            source: None,
            sink,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.source.is_some()
    }

    /// Runs one effect to completion and returns the message describing its outcome.
    pub fn run(&mut self, effect: Effect) -> Msg {
        match effect {
            Effect::Connect => self.connect(),
            Effect::FetchMessages { query } => {
                let result = self.fetch(&query);
                Msg::MessagesFetched { query, result }
            }
            Effect::WriteReport {
                report,
                destination,
            } => {
                let result = self.sink.write(&report, &destination).map_err(|err| {
                    digest_error!("Saving report to {:?} failed: {}", destination, err);
                    err.to_string()
                });
                Msg::ReportSaved(result)
            }
        }
    }

    /// Applies `msg`, then keeps running produced effects and feeding their
    /// outcomes back until the session settles.
    pub fn dispatch(&mut self, state: AppState, msg: Msg) -> AppState {
        let mut inbox = VecDeque::from([msg]);
        let mut state = state;
        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(state, msg);
            state = next;
            for effect in effects {
                inbox.push_back(self.run(effect));
            }
        }
        state
    }

    /// Opens a fresh source. The previous handle stays in place until the new
    /// one has listed its folders, so a failed reconnect leaves the session
    /// usable.
    fn connect(&mut self) -> Msg {
        let source = match self.connector.connect() {
            Ok(source) => source,
            Err(err) => {
                digest_warn!("Connecting to mail source failed: {}", err);
                return Msg::ConnectionFailed(err.to_string());
            }
        };
        match source.list_folders() {
            Ok(folders) => {
                let account = source.account_name();
                digest_info!("Mail source {} connected", account);
                self.source = Some(source);
                Msg::Connected { account, folders }
            }
            Err(err) => {
                digest_warn!("Listing folders failed: {}", err);
                Msg::ConnectionFailed(err.to_string())
            }
        }
    }

    fn fetch(&self, query: &SearchQuery) -> Result<Vec<RawMessage>, SessionError> {
        let source = self.source.as_ref().ok_or_else(|| {
            SessionError::SourceUnavailable(
                "not connected; connect to the mail source first".to_string(),
            )
        })?;
        source.fetch_messages(query).map_err(|err| {
            digest_error!("Fetching folder {} failed: {}", query.folder, err);
            match err {
                SourceError::StoreMissing(_) => SessionError::SourceUnavailable(err.to_string()),
                _ => SessionError::QueryFailure(err.to_string()),
            }
        })
    }
}
