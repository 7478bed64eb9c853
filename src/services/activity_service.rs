// ==================== ACTIVITY NOTIFIER ====================
// Fire-and-forget creation events. Services push events into a channel;
// the background logger (jobs::activity_logger) drains it into MongoDB.
// Nothing here may block or fail the write that triggered the event.

use crate::models::ActivityEvent;
use tokio::sync::mpsc;

/// Cheap clonable handle held by the HTTP handlers / services
#[derive(Clone)]
pub struct ActivityNotifier {
    tx: mpsc::UnboundedSender<ActivityEvent>,
}

impl ActivityNotifier {
    /// Emit a creation event. Best-effort: if the logger is gone the
    /// event is dropped with a warning, never an error to the caller.
    pub fn notify(&self, event: ActivityEvent) {
        if self.tx.send(event).is_err() {
            log::warn!("⚠️  Activity logger is down, dropping event: {}", event.message());
        }
    }

    /// Whether the logger task is still draining the channel
    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }
}

pub fn channel() -> (ActivityNotifier, mpsc::UnboundedReceiver<ActivityEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ActivityNotifier { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_reach_the_receiver_in_order() {
        let (notifier, mut rx) = channel();
        notifier.notify(ActivityEvent::UserSignedUp);
        notifier.notify(ActivityEvent::RequestAdded);

        assert_eq!(rx.recv().await, Some(ActivityEvent::UserSignedUp));
        assert_eq!(rx.recv().await, Some(ActivityEvent::RequestAdded));
    }

    #[tokio::test]
    async fn notify_never_panics_without_a_receiver() {
        let (notifier, rx) = channel();
        drop(rx);
        // Dropped receiver means the event is discarded, nothing more.
        notifier.notify(ActivityEvent::RequestAdded);
    }

    #[tokio::test]
    async fn liveness_follows_the_receiver() {
        let (notifier, rx) = channel();
        assert!(notifier.is_running());
        drop(rx);
        assert!(!notifier.is_running());
    }
}
