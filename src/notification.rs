use std::{fmt, hash};

use crate::{EventKind, Meta};

/// The unit carried through the listener's channel.
///
/// Every bus callback the system under test delivers travels as a
/// `Notification`: the [`EventKind`] tag the listener matches on, paired
/// with [`Meta`] (object and account identifiers, capture timestamp).
#[derive(Debug, Clone, PartialEq, Eq, hash::Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Notification {
    kind: EventKind,
    meta: Meta,
}

impl Notification {
    /// Create a notification for the given kind with the given metadata.
    pub fn new(kind: EventKind, meta: Meta) -> Self {
        Self { kind, meta }
    }

    /// A notification carrying only a kind, with empty metadata.
    ///
    /// Convenient in tests and for channels that do not report identifiers.
    pub fn bare(kind: EventKind) -> Self {
        Self::new(kind, Meta::empty())
    }

    /// Returns the event kind this notification reports.
    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Returns the notification metadata (identifiers, timestamp).
    #[inline]
    pub fn meta(&self) -> &Meta {
        &self.meta
    }
}

impl From<EventKind> for Notification {
    fn from(kind: EventKind) -> Self {
        Notification::bare(kind)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Notification {{ kind: {}, {} }}", self.kind, self.meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn bare_notification_has_empty_meta() {
        let notification = Notification::bare(EventKind::AccountCreation);
        assert_eq!(notification.kind(), EventKind::AccountCreation);
        assert!(notification.meta().object_id().is_none());
    }

    #[test]
    fn from_kind_builds_bare_notification() {
        let notification: Notification = EventKind::TagCreation.into();
        assert_eq!(notification.kind(), EventKind::TagCreation);
    }

    #[test]
    fn display_names_the_kind() {
        let meta = Meta::new(Some(Uuid::new_v4()), None);
        let notification = Notification::new(EventKind::InvoiceCreation, meta);
        assert!(notification.to_string().contains("INVOICE_CREATION"));
    }
}
