use digest_logging::{digest_info, digest_warn};

use crate::msg::SearchForm;
use crate::state::PendingOp;
use crate::{
    assemble_report, parse_keywords, AppState, DateRange, Effect, Msg, Notice, SearchQuery,
    SessionError,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ConnectClicked => {
            if state.pending().is_some() {
                return (state, Vec::new());
            }
            state.begin(PendingOp::Connect);
            vec![Effect::Connect]
        }
        Msg::Connected { account, folders } => {
            state.finish();
            digest_info!("Connected as {} ({} folders)", account, folders.flatten().len());
            state.apply_connected(account.clone(), folders);
            state.set_notice(Notice::Connected { account });
            Vec::new()
        }
        Msg::ConnectionFailed(cause) => {
            state.finish();
            state.fail(SessionError::SourceUnavailable(cause));
            Vec::new()
        }
        Msg::FolderSelected(id) => {
            if !state.select_folder(id.clone()) {
                state.fail(SessionError::SourceUnavailable(format!(
                    "folder {id} is not in the folder list"
                )));
            }
            Vec::new()
        }
        Msg::SearchClicked(form) => {
            // Searches and saves are serialized: a click during either is dropped.
            if state.pending().is_some() {
                return (state, Vec::new());
            }
            match build_query(&state, form) {
                Ok(query) => {
                    state.begin(PendingOp::Search);
                    vec![Effect::FetchMessages { query }]
                }
                Err(err) => {
                    state.fail(err);
                    Vec::new()
                }
            }
        }
        Msg::MessagesFetched { query, result } => {
            if state.pending() != Some(PendingOp::Search) {
                digest_warn!("Dropping search result with no search in flight");
                return (state, Vec::new());
            }
            state.finish();
            match result {
                Ok(raw) => {
                    let fetched = raw.len();
                    let results = state.pipeline().run(query, raw);
                    let messages = results.messages.len();
                    let items = results.news.item_count();
                    digest_info!(
                        "Search kept {} of {} message(s), extracted {} item(s)",
                        messages,
                        fetched,
                        items
                    );
                    let notice = if messages == 0 {
                        Notice::EmptyResult
                    } else if items == 0 {
                        Notice::ExtractionDegraded { messages }
                    } else {
                        Notice::SearchCompleted { messages, items }
                    };
                    state.replace_results(results);
                    state.set_notice(notice);
                }
                Err(err) => state.fail(err),
            }
            Vec::new()
        }
        Msg::SaveClicked {
            destination,
            requested_at,
        } => {
            if state.pending().is_some() {
                return (state, Vec::new());
            }
            let report = match state.results() {
                Some(results) if !results.messages.is_empty() => assemble_report(
                    &results.news,
                    &results.messages,
                    results.query.range,
                    requested_at,
                ),
                _ => {
                    state.fail(SessionError::NothingToSave);
                    return (state, Vec::new());
                }
            };
            if destination.as_os_str().is_empty() {
                state.fail(SessionError::SinkFailure(
                    "no destination directory selected".to_string(),
                ));
                return (state, Vec::new());
            }
            state.begin(PendingOp::Save);
            vec![Effect::WriteReport {
                report,
                destination,
            }]
        }
        Msg::ReportSaved(result) => {
            if state.pending() != Some(PendingOp::Save) {
                digest_warn!("Dropping save result with no save in flight");
                return (state, Vec::new());
            }
            state.finish();
            match result {
                Ok(path) => {
                    state.record_saved(path.clone());
                    state.set_notice(Notice::Saved { path });
                }
                Err(cause) => state.fail(SessionError::SinkFailure(cause)),
            }
            Vec::new()
        }
        Msg::ClearClicked => {
            if state.pending().is_some() {
                return (state, Vec::new());
            }
            state.clear_results();
            state.set_notice(Notice::Cleared);
            Vec::new()
        }
    };

    (state, effects)
}

fn build_query(state: &AppState, form: SearchForm) -> Result<SearchQuery, SessionError> {
    if state.account().is_none() {
        return Err(SessionError::SourceUnavailable(
            "not connected; connect to the mail source first".to_string(),
        ));
    }
    let folder = state.selected_folder().cloned().ok_or_else(|| {
        SessionError::SourceUnavailable("no folder selected; pick a folder to search".to_string())
    })?;
    let range = DateRange::new(form.start, form.end)
        .map_err(|err| SessionError::QueryFailure(err.to_string()))?;

    Ok(SearchQuery {
        folder,
        range,
        keywords: parse_keywords(&form.keywords),
    })
}
