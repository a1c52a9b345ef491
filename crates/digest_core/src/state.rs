use std::fmt;
use std::path::PathBuf;

use crate::view_model::{AppViewModel, FolderRowView};
use crate::{preview, FolderId, FolderNode, Pipeline, SearchResults, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Connected,
    Searched,
    Saved,
}

/// Operation whose result message has not arrived yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOp {
    Connect,
    Search,
    Save,
}

/// Outcome of the last operation, shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Connected { account: String },
    SearchCompleted { messages: usize, items: usize },
    /// No message matched the filters.
    EmptyResult,
    /// Messages matched but no news line was found in them.
    ExtractionDegraded { messages: usize },
    Saved { path: PathBuf },
    Cleared,
    Failed(SessionError),
}

impl Notice {
    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::Failed(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Connected { account } => write!(f, "connected as {account}"),
            Notice::SearchCompleted { messages, items } => {
                write!(f, "search complete: {messages} message(s), {items} news item(s)")
            }
            Notice::EmptyResult => write!(
                f,
                "no messages matched; adjust the keywords or date range and try again"
            ),
            Notice::ExtractionDegraded { messages } => write!(
                f,
                "{messages} message(s) found but no news lines were recognised; \
                 the report will list them uncategorized"
            ),
            Notice::Saved { path } => write!(f, "report saved to {}", path.display()),
            Notice::Cleared => write!(f, "results cleared"),
            Notice::Failed(err) => write!(f, "{err}"),
        }
    }
}

/// Session context: every piece of state an operation reads or replaces.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    session: SessionState,
    account: Option<String>,
    folders: Option<FolderNode>,
    selected_folder: Option<FolderId>,
    pipeline: Pipeline,
    results: Option<SearchResults>,
    pending: Option<PendingOp>,
    last_saved: Option<PathBuf>,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pipeline(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            ..Self::default()
        }
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn pending(&self) -> Option<PendingOp> {
        self.pending
    }

    pub fn results(&self) -> Option<&SearchResults> {
        self.results.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn can_save(&self) -> bool {
        self.pending.is_none()
            && self
                .results
                .as_ref()
                .is_some_and(|results| !results.messages.is_empty())
    }

    pub fn view(&self) -> AppViewModel {
        let folders = self
            .folders
            .as_ref()
            .map(|tree| {
                tree.flatten()
                    .into_iter()
                    .map(|(depth, node)| FolderRowView {
                        depth,
                        name: node.name.clone(),
                        id: node.id.clone(),
                        selected: self.selected_folder.as_ref() == Some(&node.id),
                    })
                    .collect()
            })
            .unwrap_or_default();

        AppViewModel {
            session: self.session,
            account: self.account.clone(),
            folders,
            selected_folder: self.selected_folder.clone(),
            busy: self.pending.is_some(),
            message_count: self.results.as_ref().map_or(0, |r| r.messages.len()),
            item_count: self.results.as_ref().map_or(0, |r| r.news.item_count()),
            can_save: self.can_save(),
            preview: self
                .results
                .as_ref()
                .map(|r| preview::render_preview(&r.messages, &r.news)),
            notice: self.notice.clone(),
            last_saved: self.last_saved.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a re-render was requested and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub(crate) fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub(crate) fn selected_folder(&self) -> Option<&FolderId> {
        self.selected_folder.as_ref()
    }

    pub(crate) fn begin(&mut self, op: PendingOp) {
        self.pending = Some(op);
        self.mark_dirty();
    }

    pub(crate) fn finish(&mut self) {
        self.pending = None;
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn fail(&mut self, err: SessionError) {
        self.set_notice(Notice::Failed(err));
    }

    pub(crate) fn apply_connected(&mut self, account: String, folders: FolderNode) {
        self.account = Some(account);
        self.folders = Some(folders);
        self.selected_folder = None;
        if self.session == SessionState::Idle {
            self.session = SessionState::Connected;
        }
        self.mark_dirty();
    }

    /// Stores the selection if the folder is part of the loaded tree.
    pub(crate) fn select_folder(&mut self, id: FolderId) -> bool {
        let known = self
            .folders
            .as_ref()
            .is_some_and(|tree| tree.find(&id).is_some());
        if known {
            self.selected_folder = Some(id);
            self.mark_dirty();
        }
        known
    }

    pub(crate) fn replace_results(&mut self, results: SearchResults) {
        self.results = Some(results);
        self.session = SessionState::Searched;
        self.mark_dirty();
    }

    pub(crate) fn record_saved(&mut self, path: PathBuf) {
        self.last_saved = Some(path);
        self.session = SessionState::Saved;
        self.mark_dirty();
    }

    pub(crate) fn clear_results(&mut self) {
        self.results = None;
        self.session = if self.account.is_some() {
            SessionState::Connected
        } else {
            SessionState::Idle
        };
        self.mark_dirty();
    }
}
