//! Process-wide lifecycle state.

use tokio::sync::watch;

/// Server lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleState {
    /// Binding the listener and wiring subsystems.
    Starting,
    /// Accepting connections and serving traffic.
    Running,
    /// No new connections accepted; in-flight work may finish.
    Draining,
    /// All work finished or forcibly terminated.
    Stopped,
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LifecycleState::Starting => "starting",
            LifecycleState::Running => "running",
            LifecycleState::Draining => "draining",
            LifecycleState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Publisher for the lifecycle state machine.
///
/// Transitions are forward-only; an attempt to move backwards is ignored.
/// Observers hold a watch receiver and never mutate the state.
pub struct Lifecycle {
    tx: watch::Sender<LifecycleState>,
}

impl Lifecycle {
    /// Create a new lifecycle in the `Starting` state.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(LifecycleState::Starting);
        Self { tx }
    }

    /// Advance to a later state. Regressions are ignored.
    pub fn advance(&self, next: LifecycleState) {
        self.tx.send_if_modified(|current| {
            if next > *current {
                tracing::info!(from = %current, to = %next, "lifecycle transition");
                *current = next;
                true
            } else {
                false
            }
        });
    }

    /// Current state.
    pub fn current(&self) -> LifecycleState {
        *self.tx.borrow()
    }

    /// Subscribe to state changes.
    pub fn watch(&self) -> watch::Receiver<LifecycleState> {
        self.tx.subscribe()
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
