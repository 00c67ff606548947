use std::fmt;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::{EventKind, Meta, Notification};

/// Inbound entry point for the push-notification channel.
///
/// The HTTP callback endpoint (or bus subscription) receiving events from
/// the system under test holds a `NotificationSink` and calls
/// [`notify`](Self::notify) once per delivery. The sink only enqueues: it
/// never blocks, never errors toward the caller, and performs no matching
/// logic, so the delivery task cannot be crashed or stalled by test
/// assertion state.
///
/// Sinks are cheap to clone; all clones feed the same
/// [`BusListener`](crate::BusListener). If the listener has been dropped,
/// deliveries are discarded with a debug trace.
#[derive(Clone)]
pub struct NotificationSink {
    sender: UnboundedSender<Notification>,
}

impl NotificationSink {
    pub(crate) fn new(sender: UnboundedSender<Notification>) -> Self {
        Self { sender }
    }

    /// Record that the system under test reported an event.
    ///
    /// Appends to the listener's received log; wakes a blocked wait if
    /// this delivery completes its expectation multiset.
    pub fn notify(&self, kind: EventKind, meta: Meta) {
        self.post(Notification::new(kind, meta));
    }

    /// Enqueue a pre-built notification.
    pub fn post(&self, notification: impl Into<Notification>) {
        let notification = notification.into();
        debug!(kind = %notification.kind(), "bus notification received");
        if self.sender.send(notification).is_err() {
            debug!("listener dropped, discarding notification");
        }
    }

    /// Returns `true` if the owning listener has been dropped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl fmt::Debug for NotificationSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationSink")
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn notify_enqueues_a_notification() {
        let (tx, mut rx) = unbounded_channel();
        let sink = NotificationSink::new(tx);

        sink.notify(EventKind::PaymentSuccess, Meta::empty());

        let notification = rx.try_recv().unwrap();
        assert_eq!(notification.kind(), EventKind::PaymentSuccess);
    }

    #[test]
    fn clones_feed_the_same_channel() {
        let (tx, mut rx) = unbounded_channel();
        let sink = NotificationSink::new(tx);
        let clone = sink.clone();

        sink.post(EventKind::InvoiceCreation);
        clone.post(EventKind::PaymentSuccess);

        assert_eq!(rx.try_recv().unwrap().kind(), EventKind::InvoiceCreation);
        assert_eq!(rx.try_recv().unwrap().kind(), EventKind::PaymentSuccess);
    }

    #[test]
    fn notify_after_listener_drop_is_silent() {
        let (tx, rx) = unbounded_channel();
        let sink = NotificationSink::new(tx);
        drop(rx);

        assert!(sink.is_closed());
        // Must not panic or block.
        sink.notify(EventKind::TagDeletion, Meta::empty());
    }
}
