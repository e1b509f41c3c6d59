use yomu_core::keys::KeyCommand;
use yomu_types::{HardwareKey, KeyAction, Notice, UiCommand};

use crate::context::AppContext;
use crate::events::touch::announce_lookup_mode;
use crate::session::ReaderSession;

pub async fn handle_key(
    ctx: &AppContext,
    session: &mut ReaderSession,
    key: HardwareKey,
    action: KeyAction,
) {
    let command = session.keys.route(
        key,
        action,
        session.location.reading,
        session.panel.is_open(),
    );

    match command {
        KeyCommand::PassThrough | KeyCommand::Swallow => {}
        KeyCommand::TurnPage(direction) => {
            ctx.emit(UiCommand::turn_page(direction)).await;
        }
        KeyCommand::ToggleLookupMode => {
            let enabled = !session.classifier.lookup_mode();
            session.classifier.set_lookup_mode(enabled);
            announce_lookup_mode(ctx, enabled).await;
        }
        KeyCommand::NextChapter => {
            ctx.notify(Notice::NextChapter).await;
        }
        KeyCommand::DismissPanel => {
            session.coordinator.clear();
            if session.panel.dismiss() {
                ctx.emit(UiCommand::DismissPanel).await;
            }
        }
    }
}
