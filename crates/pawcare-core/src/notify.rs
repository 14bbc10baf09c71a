//! Notifications and lifecycle events emitted by the dispatcher.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde::Serialize;
use tracing::{debug, info, warn};

/// Handle of a loading notification, used to dismiss it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ToastId(pub u64);

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Notification {
    /// Indeterminate progress indicator
    Loading { id: ToastId, message: String },
    /// Remove a progress indicator
    Dismiss { id: ToastId },
    Success { message: String },
    Error { message: String, forbidden: bool },
}

/// Lifecycle phase of one dispatched operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Pending,
    /// `applied` is false when a newer result had already landed
    Fulfilled { applied: bool },
    Rejected { applied: bool },
}

/// One lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleEvent {
    pub operation: &'static str,
    pub seq: u64,
    pub phase: Phase,
}

/// Receives notifications and lifecycle events.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn lifecycle(&self, _event: LifecycleEvent) {}
}

/// Logs everything through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification {
            Notification::Loading { id, message } => debug!(toast = id.0, %message, "loading"),
            Notification::Dismiss { id } => debug!(toast = id.0, "dismiss"),
            Notification::Success { message } => info!(%message, "success"),
            Notification::Error { message, forbidden } => warn!(%message, forbidden, "error"),
        }
    }

    fn lifecycle(&self, event: LifecycleEvent) {
        debug!(operation = event.operation, seq = event.seq, phase = ?event.phase, "lifecycle");
    }
}

/// Lifecycle events kept by [`QueueNotifier`]; older ones are dropped.
pub const EVENT_CAPACITY: usize = 256;

/// Buffers notifications until the UI drains them.
///
/// Lifecycle events are kept in a ring of [`EVENT_CAPACITY`] and cleared on
/// every drain.
#[derive(Debug, Default)]
pub struct QueueNotifier {
    notifications: Mutex<Vec<Notification>>,
    events: Mutex<VecDeque<LifecycleEvent>>,
}

impl QueueNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all buffered notifications and forget recorded events.
    pub fn drain(&self) -> Vec<Notification> {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
        self.notifications
            .lock()
            .map(|mut n| std::mem::take(&mut *n))
            .unwrap_or_default()
    }

    /// Copy of the buffered notifications.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    /// Copy of the recorded lifecycle events.
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events
            .lock()
            .map(|e| e.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Lifecycle events of one operation, in order.
    pub fn events_for(&self, operation: &str) -> Vec<LifecycleEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.operation == operation)
            .collect()
    }
}

impl Notifier for QueueNotifier {
    fn notify(&self, notification: Notification) {
        TracingNotifier.notify(notification.clone());
        if let Ok(mut n) = self.notifications.lock() {
            n.push(notification);
        }
    }

    fn lifecycle(&self, event: LifecycleEvent) {
        TracingNotifier.lifecycle(event.clone());
        if let Ok(mut events) = self.events.lock() {
            if events.len() == EVENT_CAPACITY {
                events.pop_front();
            }
            events.push_back(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drain_empties() {
        let queue = QueueNotifier::new();
        queue.notify(Notification::Success {
            message: "Saved".into(),
        });

        assert_eq!(queue.drain().len(), 1);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_events_for_filters_by_operation() {
        let queue = QueueNotifier::new();
        queue.lifecycle(LifecycleEvent {
            operation: "pets/fetch",
            seq: 1,
            phase: Phase::Pending,
        });
        queue.lifecycle(LifecycleEvent {
            operation: "clinics/fetch",
            seq: 1,
            phase: Phase::Pending,
        });

        assert_eq!(queue.events_for("pets/fetch").len(), 1);
    }

    #[test]
    fn test_events_cleared_by_drain_and_bounded() {
        let queue = QueueNotifier::new();
        for seq in 0..(EVENT_CAPACITY as u64 + 10) {
            queue.lifecycle(LifecycleEvent {
                operation: "pets/fetch",
                seq,
                phase: Phase::Pending,
            });
        }

        let events = queue.events();
        assert_eq!(events.len(), EVENT_CAPACITY);
        assert_eq!(events[0].seq, 10);

        queue.drain();
        assert!(queue.events().is_empty());

        queue.lifecycle(LifecycleEvent {
            operation: "pets/fetch",
            seq: 999,
            phase: Phase::Pending,
        });
        assert_eq!(queue.events().len(), 1);
    }
}
