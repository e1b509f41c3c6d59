use std::time::Instant;

use yomu_core::geometry::BoundingBox;
use yomu_ocr::{ExtractedRegion, RgbaImage};
use yomu_types::{LookupId, LookupRequest, LookupResult, Notice, TouchPoint, Viewport};

use crate::context::AppContext;
use crate::session::ReaderSession;

pub async fn start_tap_lookup(
    ctx: &AppContext,
    session: &mut ReaderSession,
    tap: TouchPoint,
) -> anyhow::Result<()> {
    if show_cached_line(ctx, session, tap).await {
        return Ok(());
    }

    let extractor = session.extractor.clone();
    let screen = session.viewport();
    run_lookup(ctx, session, move |snapshot| {
        extractor.extract_tap(&snapshot, tap, screen)
    })
    .await
}

pub async fn start_loop_lookup(
    ctx: &AppContext,
    session: &mut ReaderSession,
    rect: BoundingBox,
) -> anyhow::Result<()> {
    let extractor = session.extractor.clone();
    run_lookup(ctx, session, move |snapshot| {
        extractor.extract_loop(&snapshot, &rect)
    })
    .await
}

/// Cooldown, snapshot, extraction, then a fire-and-forget submission
async fn run_lookup<F>(ctx: &AppContext, session: &mut ReaderSession, extract: F) -> anyhow::Result<()>
where
    F: FnOnce(RgbaImage) -> anyhow::Result<ExtractedRegion> + Send + 'static,
{
    let configured = ctx.state.config.read().await.network.is_configured();
    if !configured {
        ctx.notify(Notice::ServerNotConfigured).await;
        return Ok(());
    }

    if !session.coordinator.try_begin(Instant::now()) {
        ctx.notify(Notice::TooFast).await;
        return Ok(());
    }

    // The loop waits here so no later gesture sees a newer frame first
    let renderer = ctx.renderer.clone();
    let extracted = tokio::task::spawn_blocking(move || {
        let snapshot = renderer.snapshot()?;
        extract(snapshot)
    })
    .await;

    let region = match extracted {
        Ok(Ok(region)) => region,
        Ok(Err(e)) => {
            tracing::warn!("Region extraction failed: {:#}", e);
            return Ok(());
        }
        Err(e) => {
            tracing::error!(">>> [LOOKUP] Extraction task error: {}", e);
            return Ok(());
        }
    };

    let request = LookupRequest {
        image_base64: region.image_base64,
        rel_x: region.focus.x,
        rel_y: region.focus.y,
        context_name: session.location.context_name.clone(),
    };
    session.coordinator.submit(request, region.anchor_y);
    Ok(())
}

/// Map a screen point into the image pixels of the cached page
fn to_image_point(tap: TouchPoint, screen: Viewport, img_width: i64, img_height: i64) -> Option<(i32, i32)> {
    if screen.width == 0 || screen.height == 0 || img_width <= 0 || img_height <= 0 {
        return None;
    }
    let x = tap.x * img_width as f32 / screen.width as f32;
    let y = tap.y * img_height as f32 / screen.height as f32;
    Some((x as i32, y as i32))
}

/// Show a line from the page metadata without a network round trip
async fn show_cached_line(ctx: &AppContext, session: &mut ReaderSession, tap: TouchPoint) -> bool {
    let screen = session.viewport();
    let Some(page) = session
        .location
        .page_key
        .as_deref()
        .and_then(|key| session.pages.get(key))
    else {
        return false;
    };
    let Some((x, y)) = to_image_point(tap, screen, page.img_width, page.img_height) else {
        return false;
    };
    let Some(line) = page.line_at(x, y) else {
        return false;
    };

    tracing::debug!(">>> [LOOKUP] Cached line {} at ({}, {})", line.id, x, y);
    let result = LookupResult {
        source_text: line.text.clone(),
        translation: line.translation.clone(),
        words: line.words.clone(),
    };
    let translation = result.translation.clone();

    let id = session.coordinator.claim();
    let command = session.panel.open(
        id,
        result,
        Some(translation),
        session.location.context_name.clone(),
        tap.y as i32,
        screen,
    );
    ctx.emit(command).await;
    true
}

pub async fn handle_lookup_completed(
    ctx: &AppContext,
    session: &mut ReaderSession,
    id: LookupId,
    result: LookupResult,
    anchor_y: i32,
) {
    if !session.coordinator.is_current(id) {
        tracing::debug!(%id, "Dropping stale lookup result");
        return;
    }

    let screen = session.viewport();
    let command = session.panel.open(
        id,
        result,
        None,
        session.location.context_name.clone(),
        anchor_y,
        screen,
    );
    ctx.emit(command).await;
    session.coordinator.fetch_translation(id);
}

pub async fn handle_translation_ready(
    ctx: &AppContext,
    session: &mut ReaderSession,
    id: LookupId,
    text: Option<String>,
) {
    match session.panel.apply_translation(id, text) {
        Some(command) => ctx.emit(command).await,
        None => tracing::debug!(%id, "Dropping translation for a closed panel"),
    }
}
