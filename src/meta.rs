use std::{fmt, hash, time::SystemTime};

use uuid::Uuid;

/// Metadata attached to every [`Notification`](crate::Notification).
///
/// - `object_id`: the domain object the event refers to (invoice, payment,
///   subscription, ...), when the channel reported one.
/// - `account_id`: the account owning that object, when reported.
/// - `timestamp`: capture time in nanoseconds since Unix epoch (`u64`),
///   stamped when the notification enters the process.
///
/// Matching is by [`EventKind`](crate::EventKind) only; `Meta` exists so a
/// test can inspect which object an awaited event referred to after the
/// wait resolves.
#[derive(Debug, Clone, PartialEq, Eq, hash::Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meta {
    object_id: Option<Uuid>,
    account_id: Option<Uuid>,
    timestamp: u64,
}

impl Meta {
    /// Construct metadata for the given object and account identifiers.
    ///
    /// # Panics
    ///
    /// Panics if the system clock is set before the Unix epoch.
    pub fn new(object_id: Option<Uuid>, account_id: Option<Uuid>) -> Self {
        Self {
            object_id,
            account_id,
            timestamp: SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .expect("SystemTime before Unix epoch")
                .as_nanos() as u64,
        }
    }

    /// Metadata with no identifiers, for channels that report only a kind.
    pub fn empty() -> Self {
        Self::new(None, None)
    }

    /// The domain object the event refers to, if reported.
    #[inline]
    pub fn object_id(&self) -> Option<Uuid> {
        self.object_id
    }

    /// The account owning the object, if reported.
    #[inline]
    pub fn account_id(&self) -> Option<Uuid> {
        self.account_id
    }

    /// Capture timestamp in nanoseconds since Unix epoch (u64 truncation).
    #[inline]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

impl Default for Meta {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Meta {{ timestamp: {}", self.timestamp)?;
        if let Some(object_id) = self.object_id {
            write!(f, ", object_id: {object_id}")?;
        }
        if let Some(account_id) = self.account_id {
            write!(f, ", account_id: {account_id}")?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_meta_has_no_identifiers() {
        let meta = Meta::empty();
        assert!(meta.object_id().is_none());
        assert!(meta.account_id().is_none());
        assert_ne!(meta.timestamp(), 0);
    }

    #[test]
    fn identifiers_are_preserved() {
        let object = Uuid::new_v4();
        let account = Uuid::new_v4();
        let meta = Meta::new(Some(object), Some(account));
        assert_eq!(meta.object_id(), Some(object));
        assert_eq!(meta.account_id(), Some(account));
    }

    #[test]
    fn display_includes_present_identifiers() {
        let object = Uuid::new_v4();
        let meta = Meta::new(Some(object), None);
        let rendered = meta.to_string();
        assert!(rendered.contains(&object.to_string()));
        assert!(!rendered.contains("account_id"));
    }
}
