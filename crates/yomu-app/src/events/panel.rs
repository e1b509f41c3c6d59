use yomu_types::{Notice, TouchAction, TouchPoint, UiCommand};

use crate::context::AppContext;
use crate::session::ReaderSession;
use crate::words::{dictionary_menu, dictionary_url, lookup_form, word_detail};

pub async fn handle_drag(
    ctx: &AppContext,
    session: &mut ReaderSession,
    action: TouchAction,
    point: TouchPoint,
) {
    if let Some(command) = session.panel.drag(action, point) {
        ctx.emit(command).await;
    }
}

/// Word details, plus the dictionary menu when there is no definition
pub async fn handle_select_word(ctx: &AppContext, session: &mut ReaderSession, index: usize) {
    let Some(word) = session.panel.word(index).cloned() else {
        tracing::warn!("Selected word {} is not on the panel", index);
        return;
    };

    let detail = word_detail(&word);
    let needs_menu = matches!(detail, UiCommand::WordDetail { definition: None, .. });
    ctx.emit(detail).await;

    if needs_menu {
        let menu = {
            let config = ctx.state.config.read().await;
            dictionary_menu(&word, &config.dictionaries)
        };
        ctx.emit(menu).await;
    }
}

pub async fn handle_search_word(
    ctx: &AppContext,
    session: &mut ReaderSession,
    index: usize,
    provider: usize,
) -> anyhow::Result<()> {
    let Some(word) = session.panel.word(index) else {
        tracing::warn!("Searched word {} is not on the panel", index);
        return Ok(());
    };

    let url = {
        let config = ctx.state.config.read().await;
        let Some(dictionary) = config.dictionaries.get(provider) else {
            anyhow::bail!("Unknown dictionary provider {}", provider);
        };
        dictionary_url(dictionary, lookup_form(word))?
    };

    tracing::debug!(">>> [PANEL] Opening {}", url);
    ctx.emit(UiCommand::OpenUrl {
        url: url.to_string(),
    })
    .await;
    Ok(())
}

pub async fn handle_copy(ctx: &AppContext, session: &mut ReaderSession) {
    let Some(panel) = session.panel.current() else {
        return;
    };
    let text = panel.content.source_text.clone();

    let clipboard = ctx.clipboard.clone();
    let copied = tokio::task::spawn_blocking(move || clipboard.copy_text(&text)).await;

    let notice = match copied {
        Ok(Ok(())) => Notice::Copied,
        Ok(Err(e)) => {
            tracing::warn!("Copy failed: {:#}", e);
            Notice::CopyFailed
        }
        Err(e) => {
            tracing::error!("Copy task error: {}", e);
            Notice::CopyFailed
        }
    };
    ctx.notify(notice).await;
}
