use std::sync::Arc;
use std::time::{Duration, Instant};

use kanal::AsyncSender;
use yomu_service::LookupService;
use yomu_types::{AppEvent, LookupId, LookupRequest};

/// Minimum spacing between two submissions.
///
/// A plain timestamp comparison: once the window has passed the next
/// lookup is always allowed.
#[derive(Debug, Clone)]
pub struct Cooldown {
    window: Duration,
    last: Option<Instant>,
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Records `now` as the latest submission when the window has passed
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last
            && now.saturating_duration_since(last) < self.window
        {
            return false;
        }
        self.last = Some(now);
        true
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.last
            .map(|last| self.window.saturating_sub(now.saturating_duration_since(last)))
            .unwrap_or_default()
    }
}

/// Owns the cooldown and the identity of the lookup on screen.
///
/// Network calls run on spawned tasks and report back through the event
/// channel; the event loop decides what to do with them.
pub struct RequestCoordinator {
    cooldown: Cooldown,
    current: Option<LookupId>,
    service: Arc<dyn LookupService>,
    event_tx: AsyncSender<AppEvent>,
}

impl RequestCoordinator {
    pub fn new(
        window: Duration,
        service: Arc<dyn LookupService>,
        event_tx: AsyncSender<AppEvent>,
    ) -> Self {
        Self {
            cooldown: Cooldown::new(window),
            current: None,
            service,
            event_tx,
        }
    }

    pub fn try_begin(&mut self, now: Instant) -> bool {
        let allowed = self.cooldown.try_acquire(now);
        if !allowed {
            tracing::debug!(
                "Lookup rejected, {:?} left in cooldown",
                self.cooldown.remaining(now)
            );
        }
        allowed
    }

    /// Completions for any id but the newest are stale
    pub fn is_current(&self, id: LookupId) -> bool {
        self.current == Some(id)
    }

    /// Claim a new id without a network call, for results known locally
    pub fn claim(&mut self) -> LookupId {
        let id = LookupId::new();
        self.current = Some(id);
        id
    }

    /// Fire the recognition call; failures are logged and dropped
    pub fn submit(&mut self, request: LookupRequest, anchor_y: i32) -> LookupId {
        let id = self.claim();
        let service = self.service.clone();
        let tx = self.event_tx.clone();

        tracing::info!(
            %id,
            x = request.rel_x,
            y = request.rel_y,
            context = %request.context_name,
            "Submitting lookup"
        );

        tokio::spawn(async move {
            match service.recognize(&request).await {
                Ok(result) => {
                    tracing::debug!(%id, words = result.words.len(), "Lookup completed");
                    if let Err(e) = tx
                        .send(AppEvent::LookupCompleted {
                            id,
                            result,
                            anchor_y,
                        })
                        .await
                    {
                        tracing::error!("Failed to deliver lookup result: {}", e);
                    }
                }
                Err(e) => tracing::warn!(%id, "Lookup dropped: {}", e),
            }
        });

        id
    }

    /// Companion translation for the panel showing `id`
    pub fn fetch_translation(&self, id: LookupId) {
        let service = self.service.clone();
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let text = match service.fetch_translation().await {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!(%id, "Translation fetch failed: {}", e);
                    None
                }
            };
            if let Err(e) = tx.send(AppEvent::TranslationReady { id, text }).await {
                tracing::error!("Failed to deliver translation: {}", e);
            }
        });
    }

    /// Forget the lookup on screen so late completions are ignored
    pub fn clear(&mut self) {
        self.current = None;
    }
}
