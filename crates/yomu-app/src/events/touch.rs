use yomu_core::gesture::GestureAction;
use yomu_types::{Notice, TouchAction, TouchPoint, UiCommand};

use crate::context::AppContext;
use crate::events::lookup::{start_loop_lookup, start_tap_lookup};
use crate::session::ReaderSession;

pub async fn handle_touch(
    ctx: &AppContext,
    session: &mut ReaderSession,
    action: TouchAction,
    point: TouchPoint,
) -> anyhow::Result<()> {
    let outcome = session.classifier.handle(action, point);
    if action == TouchAction::Up {
        tracing::debug!(">>> [TOUCH] {:?}, consumed: {}", outcome.action, outcome.consumed);
    }

    match outcome.action {
        GestureAction::None => {}
        GestureAction::LookupModeToggled { enabled } => {
            announce_lookup_mode(ctx, enabled).await;
        }
        GestureAction::TurnPage(direction) => {
            ctx.emit(UiCommand::turn_page(direction)).await;
        }
        GestureAction::LoopSelection(_) | GestureAction::Tap(_) if session.panel.is_open() => {
            tracing::debug!("Panel open, page gesture ignored");
        }
        GestureAction::LoopSelection(rect) => {
            start_loop_lookup(ctx, session, rect).await?;
        }
        GestureAction::Tap(point) => {
            start_tap_lookup(ctx, session, point).await?;
        }
    }

    Ok(())
}

/// Tell the host the new mode so it can route touches accordingly
pub async fn announce_lookup_mode(ctx: &AppContext, enabled: bool) {
    tracing::info!("Lookup mode {}", if enabled { "on" } else { "off" });
    ctx.emit(UiCommand::LookupMode { enabled }).await;
    ctx.notify(if enabled {
        Notice::LookupModeEnabled
    } else {
        Notice::LookupModeDisabled
    })
    .await;
}
