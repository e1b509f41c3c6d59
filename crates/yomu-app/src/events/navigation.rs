use yomu_core::context::{context_name, is_reading_location};
use yomu_core::page::ChapterData;
use yomu_types::{LifecycleSignal, UiCommand, Viewport};

use crate::context::AppContext;
use crate::session::ReaderSession;

/// Track the reading location; leaving it turns lookup mode off
pub async fn handle_navigated(
    ctx: &AppContext,
    session: &mut ReaderSession,
    url: String,
    title: String,
) {
    let (location_marker, title_marker) = {
        let config = ctx.state.config.read().await;
        (
            config.lookup.location_marker.clone(),
            config.lookup.title_marker.clone(),
        )
    };

    let location = &mut session.location;
    if location.url != url {
        location.page_key = None;
        session.pages.clear();
    }
    location.reading = is_reading_location(&url, &location_marker);
    location.context_name = context_name(&title, &title_marker);
    location.url = url;
    location.title = title;

    if !location.reading && session.classifier.set_lookup_mode(false) {
        tracing::info!("Left the reader, lookup mode off");
        ctx.emit(UiCommand::LookupMode { enabled: false }).await;
    }
}

pub fn handle_viewport(session: &mut ReaderSession, viewport: Viewport) {
    tracing::debug!(?viewport, "Viewport changed");
    session.classifier.set_viewport(viewport);
}

pub async fn handle_lifecycle(
    ctx: &AppContext,
    session: &mut ReaderSession,
    signal: LifecycleSignal,
) {
    if session.lifecycle.apply(signal) {
        if session.lifecycle.is_locked() {
            tracing::warn!(state = ?session.lifecycle, "Page locked");
        }
        let visible = session.lifecycle.content_visible();
        ctx.emit(UiCommand::ContentVisible { visible }).await;
    }
}

/// Cache line metadata pushed by the host for the current location.
///
/// Malformed payloads are ignored; the next navigation drops the entry.
pub fn handle_page_data(session: &mut ReaderSession, json: &str) {
    let Some(data) = ChapterData::parse(json) else {
        return;
    };
    let key = data.cache_key();
    tracing::debug!(">>> [PAGE] {} lines for {}", data.items.len(), key);
    session.location.page_key = Some(key.clone());
    session.pages.update(key, data);
}
