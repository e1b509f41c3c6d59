mod client;
mod template;

pub use client::{AnkiConnectClient, AnkiError};
pub use template::CardTemplate;

use yomu_config::anki::AnkiConfig;
use yomu_types::{ExportOutcome, Word};

/// Values of one exported note
#[derive(Debug, Clone, PartialEq)]
pub struct FlashCard {
    pub word: String,
    pub reading: String,
    /// HTML, newlines already turned into `<br>`
    pub definition: String,
    pub sentence: String,
    pub source: String,
}

impl FlashCard {
    pub fn from_word(word: &Word, sentence: &str, source: &str) -> Self {
        let front = if word.base_form.is_empty() {
            &word.surface
        } else {
            &word.base_form
        };

        Self {
            word: front.clone(),
            reading: word.reading.clone(),
            definition: word.definition.replace("\r\n", "\n").replace('\n', "<br>"),
            sentence: sentence.to_string(),
            source: source.to_string(),
        }
    }

    fn values(&self) -> [String; 5] {
        [
            self.word.clone(),
            self.reading.clone(),
            self.definition.clone(),
            self.sentence.clone(),
            self.source.clone(),
        ]
    }
}

/// Search for notes of `model` whose front field equals `word`
pub fn duplicate_query(model: &str, word: &str) -> String {
    format!(
        "\"note:{}\" \"{}:{}\"",
        escape_query(model),
        CardTemplate::WORD,
        escape_query(word)
    )
}

fn escape_query(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '*' | '_' | ':') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Export one card, creating the deck and note type when missing.
///
/// Never fails: every error is folded into an [`ExportOutcome`].
pub async fn export_card(
    client: &AnkiConnectClient,
    config: &AnkiConfig,
    template: &CardTemplate,
    card: &FlashCard,
) -> ExportOutcome {
    match try_export(client, config, template, card).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("Anki export failed: {}", e);
            if e.is_unavailable() {
                ExportOutcome::HostUnavailable
            } else if e.is_permission() {
                ExportOutcome::PermissionNotGranted
            } else if e.is_duplicate() {
                ExportOutcome::Duplicate
            } else {
                ExportOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

async fn try_export(
    client: &AnkiConnectClient,
    config: &AnkiConfig,
    template: &CardTemplate,
    card: &FlashCard,
) -> Result<ExportOutcome, AnkiError> {
    if !client.request_permission().await? {
        return Ok(ExportOutcome::PermissionNotGranted);
    }

    if !client.deck_names().await?.contains(&config.deck) {
        tracing::info!("Creating Anki deck {}", config.deck);
        client.create_deck(&config.deck).await?;
    }

    if !client.model_names().await?.contains(&config.model) {
        tracing::info!("Creating Anki note type {}", config.model);
        client.create_model(&config.model, template).await?;
    }

    let existing = client
        .find_notes(&duplicate_query(&config.model, &card.word))
        .await?;
    if !existing.is_empty() {
        tracing::debug!("{} already exported ({} notes)", card.word, existing.len());
        return Ok(ExportOutcome::Duplicate);
    }

    let note_id = client
        .add_note(&config.deck, &config.model, template, &card.values())
        .await?;
    tracing::info!("Exported {} as note {}", card.word, note_id);
    Ok(ExportOutcome::Added { note_id })
}
