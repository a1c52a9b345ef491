use std::path::PathBuf;

use crate::{FolderId, Notice, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub account: Option<String>,
    pub folders: Vec<FolderRowView>,
    pub selected_folder: Option<FolderId>,
    pub busy: bool,
    pub message_count: usize,
    pub item_count: usize,
    pub can_save: bool,
    pub preview: Option<String>,
    pub notice: Option<Notice>,
    pub last_saved: Option<PathBuf>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRowView {
    pub depth: usize,
    pub name: String,
    pub id: FolderId,
    pub selected: bool,
}
