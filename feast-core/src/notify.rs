use feast_shared::Notification;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;

/// Side channel for user-facing notifications.
///
/// Mutating cart and tracking operations hand their message here instead of
/// returning it; delivery is fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Writes notifications to the log and nowhere else
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        info!(kind = ?notification.kind, "{}", notification.message);
    }
}

/// Fans notifications out to every subscribed view (toast area, badge, ...)
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<Notification>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notification: Notification) {
        // No subscribers just means nobody is showing toasts right now
        let _ = self.tx.send(notification);
    }
}
