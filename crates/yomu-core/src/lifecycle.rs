use yomu_types::LifecycleSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockReason {
    VerifyFailed,
    AuthFailed,
    LoadError,
}

/// Load state of the hosted page.
///
/// A lock survives progress updates and is cleared only by a new load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageLifecycle {
    #[default]
    Idle,
    AwaitingVerification,
    Locked(LockReason),
    Ready,
}

impl PageLifecycle {
    /// Returns whether the state changed
    pub fn apply(&mut self, signal: LifecycleSignal) -> bool {
        let next = match (*self, signal) {
            (_, LifecycleSignal::LoadStarted) => Self::Idle,
            (Self::Idle, LifecycleSignal::ProgressComplete) => Self::AwaitingVerification,
            (Self::AwaitingVerification, LifecycleSignal::Verified { ok: true }) => Self::Ready,
            (Self::AwaitingVerification, LifecycleSignal::Verified { ok: false }) => {
                Self::Locked(LockReason::VerifyFailed)
            }
            (_, LifecycleSignal::AuthFailed) => Self::Locked(LockReason::AuthFailed),
            (_, LifecycleSignal::LoadError) => Self::Locked(LockReason::LoadError),
            (state, _) => state,
        };

        if next == *self {
            return false;
        }
        tracing::debug!(from = ?*self, to = ?next, "Page lifecycle");
        *self = next;
        true
    }

    pub fn content_visible(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked(_))
    }
}
