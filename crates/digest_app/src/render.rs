use std::fmt::Write;

use digest_core::{AppViewModel, SessionState};

const INDENT: &str = "  ";

fn session_label(session: SessionState) -> &'static str {
    match session {
        SessionState::Idle => "Idle",
        SessionState::Connected => "Connected",
        SessionState::Searched => "Searched",
        SessionState::Saved => "Saved",
    }
}

/// One-line summary of the session, followed by the current notice.
pub fn render_status(view: &AppViewModel) -> String {
    let mut status = match &view.account {
        Some(account) => format!(
            "Session: {} | Account: {} | Messages: {} | News items: {}",
            session_label(view.session),
            account,
            view.message_count,
            view.item_count
        ),
        None => format!("Session: {}", session_label(view.session)),
    };
    if let Some(notice) = &view.notice {
        let _ = write!(status, "\n{notice}");
    }
    status
}

/// Folder tree, one folder per line, indented by depth. The selected folder
/// is marked with `>`.
pub fn render_folders(view: &AppViewModel) -> String {
    let mut out = String::new();
    for row in &view.folders {
        let marker = if row.selected { ">" } else { " " };
        let _ = writeln!(
            out,
            "{marker} {}{} [{}]",
            INDENT.repeat(row.depth),
            row.name,
            row.id
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use digest_core::{FolderId, FolderRowView, Notice};
    use pretty_assertions::assert_eq;

    fn row(depth: usize, name: &str, id: &str, selected: bool) -> FolderRowView {
        FolderRowView {
            depth,
            name: name.to_string(),
            id: FolderId::new(id),
            selected,
        }
    }

    #[test]
    fn folders_are_indented_and_selection_marked() {
        let view = AppViewModel {
            folders: vec![
                row(0, "mail", ".", false),
                row(1, "News", "News", true),
                row(2, "Daily", "News/Daily", false),
            ],
            ..AppViewModel::default()
        };

        assert_eq!(
            render_folders(&view),
            "  mail [.]\n>   News [News]\n      Daily [News/Daily]\n"
        );
    }

    #[test]
    fn status_without_account_is_short() {
        let view = AppViewModel::default();
        assert_eq!(render_status(&view), "Session: Idle");
    }

    #[test]
    fn status_includes_counts_and_notice() {
        let view = AppViewModel {
            session: SessionState::Searched,
            account: Some("/mail".to_string()),
            message_count: 2,
            item_count: 5,
            notice: Some(Notice::SearchCompleted {
                messages: 2,
                items: 5,
            }),
            ..AppViewModel::default()
        };

        assert_eq!(
            render_status(&view),
            "Session: Searched | Account: /mail | Messages: 2 | News items: 5\n\
             search complete: 2 message(s), 5 news item(s)"
        );
    }
}
