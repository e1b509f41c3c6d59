use std::sync::Arc;

use kanal::AsyncSender;
use yomu_anki::{AnkiConnectClient, CardTemplate};
use yomu_io::clipboard::TextSink;
use yomu_ocr::PageRenderer;
use yomu_service::LookupService;
use yomu_types::{AppEvent, Notice, UiCommand};

use crate::state::AppState;

/// Shared dependencies of the event handlers
#[derive(Clone)]
pub struct AppContext {
    pub state: Arc<AppState>,
    /// Completions from spawned tasks loop back through here
    pub event_tx: AsyncSender<AppEvent>,
    pub ui_tx: AsyncSender<UiCommand>,
    pub renderer: Arc<dyn PageRenderer>,
    pub service: Arc<dyn LookupService>,
    pub anki: Option<AnkiConnectClient>,
    pub card_template: Arc<CardTemplate>,
    pub clipboard: Arc<dyn TextSink>,
}

impl AppContext {
    /// Send a command to the host; a closed host link is only logged
    pub async fn emit(&self, command: UiCommand) {
        if let Err(e) = self.ui_tx.send(command).await {
            tracing::error!("Failed to send command to host: {}", e);
        }
    }

    pub async fn notify(&self, notice: Notice) {
        tracing::debug!(?notice, "Notice");
        self.emit(UiCommand::notice(notice)).await;
    }
}
