use yomu_config::gesture::GestureConfig;
use yomu_types::{PageDirection, TouchAction, TouchPoint, Viewport};

use crate::geometry::{BoundingBox, bounding_box, is_closed_loop_with};

/// What a finished touch session asks for
#[derive(Debug, Clone, PartialEq)]
pub enum GestureAction {
    None,
    LookupModeToggled { enabled: bool },
    TurnPage(PageDirection),
    LoopSelection(BoundingBox),
    Tap(TouchPoint),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureOutcome {
    pub action: GestureAction,
    /// `false` lets the content underneath receive the event
    pub consumed: bool,
}

impl GestureOutcome {
    fn pass(consumed: bool) -> Self {
        Self {
            action: GestureAction::None,
            consumed,
        }
    }

    fn consume(action: GestureAction) -> Self {
        Self {
            action,
            consumed: true,
        }
    }
}

#[derive(Debug, Default)]
enum Session {
    #[default]
    Idle,
    Tracking {
        start: TouchPoint,
        path: Vec<TouchPoint>,
    },
}

/// Turns press/move/release streams into lookup actions.
///
/// Owns the lookup-mode flag and the gesture path of the current session.
#[derive(Debug)]
pub struct GestureClassifier {
    config: GestureConfig,
    viewport: Viewport,
    lookup_mode: bool,
    session: Session,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig, viewport: Viewport) -> Self {
        Self {
            config,
            viewport,
            lookup_mode: false,
            session: Session::Idle,
        }
    }

    pub fn lookup_mode(&self) -> bool {
        self.lookup_mode
    }

    /// Returns whether the flag changed
    pub fn set_lookup_mode(&mut self, enabled: bool) -> bool {
        let changed = self.lookup_mode != enabled;
        self.lookup_mode = enabled;
        if !enabled && let Session::Tracking { path, .. } = &mut self.session {
            path.clear();
        }
        changed
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn handle(&mut self, action: TouchAction, point: TouchPoint) -> GestureOutcome {
        match action {
            TouchAction::Down => GestureOutcome::pass(self.on_press(point)),
            TouchAction::Move => GestureOutcome::pass(self.on_move(point)),
            TouchAction::Up => self.on_release(point),
            TouchAction::Cancel => {
                self.session = Session::Idle;
                GestureOutcome::pass(self.lookup_mode)
            }
        }
    }

    pub fn on_press(&mut self, point: TouchPoint) -> bool {
        let path = if self.lookup_mode {
            vec![point]
        } else {
            Vec::new()
        };
        self.session = Session::Tracking { start: point, path };
        self.lookup_mode
    }

    pub fn on_move(&mut self, point: TouchPoint) -> bool {
        if self.lookup_mode
            && let Session::Tracking { path, .. } = &mut self.session
        {
            path.push(point);
        }
        self.lookup_mode
    }

    pub fn on_release(&mut self, point: TouchPoint) -> GestureOutcome {
        let (start, mut path) = match std::mem::take(&mut self.session) {
            Session::Tracking { start, path } => (start, path),
            Session::Idle => (point, Vec::new()),
        };
        if self.lookup_mode {
            path.push(point);
        }

        let dx = point.x - start.x;
        let dy = point.y - start.y;
        let (adx, ady) = (dx.abs(), dy.abs());

        if ady > self.config.toggle_fraction * self.viewport.height as f32
            && ady >= self.config.dominance * adx
        {
            self.lookup_mode = !self.lookup_mode;
            tracing::debug!(enabled = self.lookup_mode, "Lookup mode toggled by swipe");
            return GestureOutcome::consume(GestureAction::LookupModeToggled {
                enabled: self.lookup_mode,
            });
        }

        if !self.lookup_mode {
            return GestureOutcome::pass(false);
        }

        if adx > self.config.page_swipe_threshold_px && adx >= self.config.dominance * ady {
            let direction = if dx < 0.0 {
                PageDirection::Next
            } else {
                PageDirection::Previous
            };
            tracing::debug!(?direction, "Page swipe");
            return GestureOutcome::consume(GestureAction::TurnPage(direction));
        }

        let density = self.viewport.density;
        if is_closed_loop_with(&path, density, &self.config)
            && let Some(rect) = bounding_box(&path)
            && rect.exceeds(self.config.min_loop_box_dp * density)
        {
            tracing::debug!(?rect, "Closed loop selection");
            return GestureOutcome::consume(GestureAction::LoopSelection(rect));
        }

        if start.distance_to(&point) < self.config.tap_threshold_px {
            tracing::debug!(x = start.x, y = start.y, "Tap");
            return GestureOutcome::consume(GestureAction::Tap(start));
        }

        GestureOutcome::pass(true)
    }
}
