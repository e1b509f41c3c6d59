
use std::sync::{Arc, Mutex};
use std::time::Duration;

use kanal::AsyncReceiver;
use tokio::time::timeout;
use yomu_anki::CardTemplate;
use yomu_config::Config;
use yomu_io::clipboard::TextSink;
use yomu_ocr::{PageRenderer, RgbaImage};
use yomu_service::{LookupService, ServiceError};
use yomu_types::{
    AppEvent, HostEvent, LookupRequest, LookupResult, TouchAction, UiCommand, Word,
};

use crate::context::AppContext;
use crate::events::handle_event;
use crate::session::ReaderSession;
use crate::state::AppState;

/// Recognizer answering every request the same way
pub struct FakeService {
    pub result: Option<LookupResult>,
    pub translation: Option<String>,
    pub requests: Mutex<Vec<LookupRequest>>,
}

impl FakeService {
    pub fn answering(result: LookupResult) -> Self {
        Self {
            result: Some(result),
            translation: Some("I ate it".to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            translation: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl LookupService for FakeService {
    async fn recognize(&self, request: &LookupRequest) -> Result<LookupResult, ServiceError> {
        self.requests.lock().unwrap().push(request.clone());
        self.result.clone().ok_or(ServiceError::Status(500))
    }

    async fn fetch_translation(&self) -> Result<String, ServiceError> {
        self.translation
            .clone()
            .ok_or_else(|| ServiceError::Malformed("no translation".to_string()))
    }
}

pub struct BlankPage;

impl PageRenderer for BlankPage {
    fn snapshot(&self) -> anyhow::Result<RgbaImage> {
        Ok(RgbaImage::new(1080, 1920))
    }
}

#[derive(Default)]
pub struct FakeClipboard {
    pub copied: Mutex<Vec<String>>,
}

impl TextSink for FakeClipboard {
    fn copy_text(&self, text: &str) -> Result<(), anyhow::Error> {
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub fn sample_result() -> LookupResult {
    LookupResult {
        source_text: "ごはんを食べた".to_string(),
        translation: String::new(),
        words: vec![
            Word {
                surface: "ごはん".to_string(),
                base_form: "ごはん".to_string(),
                part_of_speech: "名詞".to_string(),
                reading: "ごはん".to_string(),
                definition: "rice; meal".to_string(),
            },
            Word {
                surface: "食べた".to_string(),
                base_form: "食べる".to_string(),
                part_of_speech: "動詞".to_string(),
                reading: "たべる".to_string(),
                definition: String::new(),
            },
        ],
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.network.server_url = "http://ocr.test".to_string();
    config.anki.enabled = false;
    config
}

/// Event loop internals driven by hand, one event at a time
pub struct Harness {
    pub ctx: AppContext,
    pub session: ReaderSession,
    pub event_rx: AsyncReceiver<AppEvent>,
    pub ui_rx: AsyncReceiver<UiCommand>,
    pub service: Arc<FakeService>,
    pub clipboard: Arc<FakeClipboard>,
}

impl Harness {
    pub fn new(config: Config, service: FakeService) -> Self {
        let (event_tx, event_rx) = kanal::unbounded_async();
        let (ui_tx, ui_rx) = kanal::unbounded_async();
        let service = Arc::new(service);
        let clipboard = Arc::new(FakeClipboard::default());

        let session = ReaderSession::new(&config, service.clone(), event_tx.clone());
        let ctx = AppContext {
            state: Arc::new(AppState::new(config)),
            event_tx,
            ui_tx,
            renderer: Arc::new(BlankPage),
            service: service.clone(),
            anki: None,
            card_template: Arc::new(CardTemplate::default()),
            clipboard: clipboard.clone(),
        };

        Self {
            ctx,
            session,
            event_rx,
            ui_rx,
            service,
            clipboard,
        }
    }

    pub async fn host(&mut self, event: HostEvent) {
        handle_event(&self.ctx, &mut self.session, AppEvent::Host(event))
            .await
            .expect("host event failed");
    }

    pub async fn tap(&mut self, x: f32, y: f32) {
        for action in [TouchAction::Down, TouchAction::Up] {
            self.host(HostEvent::Touch { action, x, y }).await;
        }
    }

    pub async fn open_reader(&mut self) {
        self.host(HostEvent::Navigated {
            url: "http://reader.test/manga/12/chapter/3".to_string(),
            title: "ヨツバト 12 - Suwayomi".to_string(),
        })
        .await;
        self.session.classifier.set_lookup_mode(true);
    }

    /// Feed the next worker completion back into the loop
    pub async fn pump(&mut self) -> AppEvent {
        let event = timeout(Duration::from_secs(2), self.event_rx.recv())
            .await
            .expect("Timeout - no worker event")
            .expect("event channel closed");
        handle_event(&self.ctx, &mut self.session, event.clone())
            .await
            .expect("worker event failed");
        event
    }

    pub async fn command(&self) -> UiCommand {
        timeout(Duration::from_secs(2), self.ui_rx.recv())
            .await
            .expect("Timeout - no command")
            .expect("command channel closed")
    }

    pub fn no_command(&self) -> bool {
        matches!(self.ui_rx.try_recv(), Ok(None))
    }
}
