use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::BufReader;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use yomu_anki::{AnkiConnectClient, CardTemplate};
use yomu_io::bridge::{pump_commands, read_host_events};
use yomu_io::clipboard::TextSink;
use yomu_ocr::PageRenderer;
use yomu_service::LookupService;
use yomu_types::{AppEvent, UiCommand};

use crate::context::AppContext;
use crate::events::event_loop;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    /// Host input and worker completions into the event loop
    pub to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub to_host: (AsyncSender<UiCommand>, AsyncReceiver<UiCommand>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            to_app: kanal::bounded_async(capacity),
            to_host: kanal::bounded_async(capacity),
        }
    }
}

/// External pieces the event loop works with
pub struct Backends {
    pub renderer: Arc<dyn PageRenderer>,
    pub service: Arc<dyn LookupService>,
    pub clipboard: Arc<dyn TextSink>,
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub async fn new(state: Arc<AppState>) -> Self {
        let capacity = state.config.read().await.channel_capacity;
        Self {
            channels: ChannelSet::new(capacity),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn context(&self, backends: Backends) -> AppContext {
        let anki = {
            let config = self.state.config.read().await;
            config
                .anki
                .enabled
                .then(|| AnkiConnectClient::new(config.anki.url.clone()))
        };

        AppContext {
            state: self.state.clone(),
            event_tx: self.channels.to_app.0.clone(),
            ui_tx: self.channels.to_host.0.clone(),
            renderer: backends.renderer,
            service: backends.service,
            anki,
            card_template: Arc::new(CardTemplate::default()),
            clipboard: backends.clipboard,
        }
    }

    /// Event loop plus the stdin/stdout link to the host
    pub async fn spawn_tasks(&self, backends: Backends) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();
        let ctx = self.context(backends).await;

        // Event loop; its exit stops the app
        let cancel = self.cancel_token.clone();
        let event_rx = self.channels.to_app.1.clone();
        tasks.spawn(async move {
            let result = event_loop(ctx, event_rx, cancel.child_token()).await;
            cancel.cancel();
            result
        });

        // Host input
        let event_tx = self.channels.to_app.0.clone();
        tasks.spawn(async move {
            read_host_events(BufReader::new(tokio::io::stdin()), &event_tx).await?;
            tracing::info!("Host closed its input");
            event_tx.send(AppEvent::Shutdown).await?;
            Ok(())
        });

        // Host output
        tasks.spawn(pump_commands(
            tokio::io::stdout(),
            self.channels.to_host.1.clone(),
        ));

        tasks
    }

    /// Resolves once the event loop has stopped
    pub async fn stopped(&self) {
        self.cancel_token.cancelled().await;
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
