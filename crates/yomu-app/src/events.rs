use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;
use yomu_types::{AppEvent, HostEvent, TouchPoint, Viewport};

use crate::context::AppContext;
use crate::session::ReaderSession;

pub mod export;
pub mod keys;
pub mod lookup;
pub mod navigation;
pub mod panel;
pub mod touch;

/// App's main loop, the only owner of the reader session
pub async fn event_loop(
    ctx: AppContext,
    event_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut session = {
        let config = ctx.state.config.read().await;
        ReaderSession::new(&config, ctx.service.clone(), ctx.event_tx.clone())
    };

    tracing::info!("Event loop started");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = event_rx.recv() => event?,
        };

        if matches!(event, AppEvent::Shutdown) {
            tracing::info!("Shutdown event received");
            break;
        }

        // Failures never stop the loop
        if let Err(e) = handle_event(&ctx, &mut session, event).await {
            tracing::error!("Event handling failed: {:#}", e);
        }
    }

    tracing::info!("Event loop stopped");
    Ok(())
}

pub async fn handle_event(
    ctx: &AppContext,
    session: &mut ReaderSession,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Host(event) => handle_host_event(ctx, session, event).await?,
        AppEvent::LookupCompleted {
            id,
            result,
            anchor_y,
        } => {
            tracing::debug!(">>> [LOOKUP] Completed {}", id);
            lookup::handle_lookup_completed(ctx, session, id, result, anchor_y).await;
        }
        AppEvent::TranslationReady { id, text } => {
            lookup::handle_translation_ready(ctx, session, id, text).await;
        }
        AppEvent::ExportFinished(outcome) => {
            export::handle_export_finished(ctx, outcome).await;
        }
        AppEvent::Shutdown => {}
    }

    Ok(())
}

async fn handle_host_event(
    ctx: &AppContext,
    session: &mut ReaderSession,
    event: HostEvent,
) -> anyhow::Result<()> {
    match event {
        HostEvent::Touch { action, x, y } => {
            touch::handle_touch(ctx, session, action, TouchPoint::new(x, y)).await?;
        }
        HostEvent::Key { key, action } => {
            keys::handle_key(ctx, session, key, action).await;
        }
        HostEvent::Navigated { url, title } => {
            tracing::debug!(">>> [NAV] {}", url);
            navigation::handle_navigated(ctx, session, url, title).await;
        }
        HostEvent::Viewport {
            width,
            height,
            density,
        } => {
            navigation::handle_viewport(
                session,
                Viewport {
                    width,
                    height,
                    density,
                },
            );
        }
        HostEvent::Drag { action, x, y } => {
            panel::handle_drag(ctx, session, action, TouchPoint::new(x, y)).await;
        }
        HostEvent::SelectWord { index } => {
            panel::handle_select_word(ctx, session, index).await;
        }
        HostEvent::SearchWord { index, provider } => {
            panel::handle_search_word(ctx, session, index, provider).await?;
        }
        HostEvent::ExportWord { index } => {
            export::handle_export_word(ctx, session, index).await;
        }
        HostEvent::CopyText => {
            panel::handle_copy(ctx, session).await;
        }
        HostEvent::Lifecycle { signal } => {
            navigation::handle_lifecycle(ctx, session, signal).await;
        }
        HostEvent::PageData { json } => {
            navigation::handle_page_data(session, &json);
        }
    }

    Ok(())
}
