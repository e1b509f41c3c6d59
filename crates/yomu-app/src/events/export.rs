use yomu_anki::{FlashCard, export_card};
use yomu_types::{AppEvent, ExportOutcome, Notice};

use crate::context::AppContext;
use crate::session::ReaderSession;

/// Export runs off the loop; the outcome comes back as an event
pub async fn handle_export_word(ctx: &AppContext, session: &mut ReaderSession, index: usize) {
    let config = {
        let config = ctx.state.config.read().await;
        config.anki.clone()
    };
    let client = match (&ctx.anki, config.enabled) {
        (Some(client), true) => client.clone(),
        _ => {
            ctx.notify(Notice::ExportDisabled).await;
            return;
        }
    };

    let Some(panel) = session.panel.current() else {
        return;
    };
    let Some(word) = panel.words.get(index) else {
        tracing::warn!("Exported word {} is not on the panel", index);
        return;
    };
    let card = FlashCard::from_word(word, &panel.content.source_text, &panel.context_name);
    tracing::info!("Exporting '{}' to deck {}", card.word, config.deck);

    let template = ctx.card_template.clone();
    let event_tx = ctx.event_tx.clone();
    tokio::spawn(async move {
        let outcome = export_card(&client, &config, &template, &card).await;
        if let Err(e) = event_tx.send(AppEvent::ExportFinished(outcome)).await {
            tracing::error!("Failed to report export outcome: {}", e);
        }
    });
}

pub async fn handle_export_finished(ctx: &AppContext, outcome: ExportOutcome) {
    match &outcome {
        ExportOutcome::Added { note_id } => tracing::info!("Added card to Anki: note_id={}", note_id),
        ExportOutcome::Failed { reason } => tracing::error!("Failed to add card to Anki: {}", reason),
        other => tracing::warn!(?other, "Card not exported"),
    }
    ctx.notify(Notice::Export(outcome)).await;
}
