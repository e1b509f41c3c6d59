use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use yomu_config::Config;
use yomu_core::gesture::GestureClassifier;
use yomu_core::keys::KeyRouter;
use yomu_core::lifecycle::PageLifecycle;
use yomu_core::page::PageDataCache;
use yomu_ocr::RegionExtractor;
use yomu_service::LookupService;
use yomu_types::{AppEvent, Viewport};

use crate::coordinator::RequestCoordinator;
use crate::panel::{PanelHost, TextMetrics};

/// Where the reader currently is
#[derive(Debug, Clone, Default)]
pub struct Location {
    pub url: String,
    pub title: String,
    pub reading: bool,
    /// Title with the host marker stripped, sent with every lookup
    pub context_name: String,
    /// Cache key of the line metadata pushed for this location
    pub page_key: Option<String>,
}

/// Everything the event loop mutates. Only the event loop touches it.
pub struct ReaderSession {
    pub classifier: GestureClassifier,
    pub keys: KeyRouter,
    pub lifecycle: PageLifecycle,
    pub panel: PanelHost,
    pub coordinator: RequestCoordinator,
    pub extractor: RegionExtractor,
    pub pages: PageDataCache,
    pub location: Location,
}

impl ReaderSession {
    pub fn new(
        config: &Config,
        service: Arc<dyn LookupService>,
        event_tx: AsyncSender<AppEvent>,
    ) -> Self {
        Self {
            classifier: GestureClassifier::new(config.gesture.clone(), Viewport::default()),
            keys: KeyRouter::new(),
            lifecycle: PageLifecycle::default(),
            panel: PanelHost::new(
                &config.panel,
                Box::new(TextMetrics::from_config(&config.panel)),
            ),
            coordinator: RequestCoordinator::new(
                Duration::from_millis(config.lookup.cooldown_ms),
                service,
                event_tx,
            ),
            extractor: RegionExtractor::new(&config.lookup),
            pages: PageDataCache::default(),
            location: Location::default(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.classifier.viewport()
    }
}
