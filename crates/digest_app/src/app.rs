use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use digest_core::{AppState, FolderId, Msg, Notice, SearchForm};
use digest_engine::{Engine, MaildirConnector};
use digest_logging::digest_info;

use crate::cli::RunArgs;
use crate::config::DigestConfig;
use crate::render;

/// Turns a failure notice into an error so the process exits non-zero.
fn settle(state: &AppState) -> anyhow::Result<()> {
    match state.notice() {
        Some(Notice::Failed(err)) => Err(err.clone().into()),
        _ => Ok(()),
    }
}

fn connect(engine: &mut Engine, state: AppState) -> anyhow::Result<AppState> {
    let state = engine.dispatch(state, Msg::ConnectClicked);
    settle(&state)?;
    Ok(state)
}

/// Prints the folder tree of the store at `maildir`.
pub fn list_folders(
    maildir: PathBuf,
    config: &DigestConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut engine = Engine::new(
        Box::new(MaildirConnector::new(maildir)),
        config.format.document_format().sink(&config.file_prefix),
    );
    let state = connect(&mut engine, AppState::new())?;
    let view = state.view();

    writeln!(out, "{}", render::render_status(&view))?;
    write!(out, "{}", render::render_folders(&view))?;
    Ok(())
}

/// Connects, searches one folder, prints the preview and saves the report.
pub fn run_digest(
    args: RunArgs,
    config: &DigestConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let format = args.format.unwrap_or(config.format);
    let mut engine = Engine::new(
        Box::new(MaildirConnector::new(args.maildir)),
        format.document_format().sink(&config.file_prefix),
    );

    let state = connect(&mut engine, AppState::with_pipeline(config.pipeline()))?;
    let state = engine.dispatch(state, Msg::FolderSelected(FolderId::new(args.folder)));
    settle(&state)?;

    let form = SearchForm {
        keywords: args.keywords,
        start: args.start,
        end: args.end,
    };
    let state = engine.dispatch(state, Msg::SearchClicked(form));
    settle(&state)?;

    let view = state.view();
    if let Some(preview) = &view.preview {
        writeln!(out, "{preview}")?;
    }
    writeln!(out, "{}", render::render_status(&view))?;

    if args.no_save {
        return Ok(());
    }
    if !state.can_save() {
        digest_info!("Nothing to save for this search");
        return Ok(());
    }

    let destination = args
        .out
        .or_else(|| config.destination.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let state = engine.dispatch(
        state,
        Msg::SaveClicked {
            destination: destination.clone(),
            requested_at: Local::now().naive_local(),
        },
    );
    settle(&state).with_context(|| format!("saving into {}", destination.display()))?;

    if let Some(notice) = state.notice() {
        writeln!(out, "{notice}")?;
    }
    Ok(())
}
