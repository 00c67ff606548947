use std::time::Duration;

use crate::{EventKind, StatusReport};

/// The single error type for all eventgate operations.
///
/// Every fallible API returns `eventgate::Result<T>` (alias for
/// `Result<T, eventgate::Error>`). The wait-related variants carry a
/// [`StatusReport`] so a failing test prints both multisets and their
/// differences without extra digging.
///
/// Protocol misuse (pushing expectations onto a failed, un-reset
/// listener) is a test-authoring defect and panics instead of returning
/// a variant here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A strict wait reached its deadline with expectations outstanding.
    #[error("expected events did not arrive within {timeout:?}: {report}")]
    Timeout {
        /// The deadline that elapsed.
        timeout: Duration,
        /// Multiset snapshot at the moment the deadline elapsed.
        report: StatusReport,
    },

    /// A strict wait drained an event kind with no outstanding
    /// expectation slot.
    #[error("unexpected {kind} event received: {report}")]
    UnexpectedEvent {
        /// The offending kind.
        kind: EventKind,
        /// Multiset snapshot at the moment the offender was drained.
        report: StatusReport,
    },

    /// Every sink was dropped while a strict wait still had expectations
    /// outstanding, so the wait can never be satisfied.
    #[error("notification channel closed with expectations outstanding: {report}")]
    ChannelClosed {
        /// Multiset snapshot at the moment the channel closed.
        report: StatusReport,
    },

    /// A wire label did not name any [`EventKind`].
    #[error("unknown event kind: {0}")]
    UnknownEventKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_embeds_the_report() {
        let err = Error::Timeout {
            timeout: Duration::from_secs(10),
            report: StatusReport::new(&[EventKind::InvoiceCreation], &[]),
        };
        let message = err.to_string();
        assert!(message.contains("10s"));
        assert!(message.contains("INVOICE_CREATION"));
        assert!(message.contains("missing"));
    }

    #[test]
    fn unexpected_message_names_the_kind() {
        let err = Error::UnexpectedEvent {
            kind: EventKind::TagCreation,
            report: StatusReport::new(&[], &[EventKind::TagCreation]),
        };
        assert!(err.to_string().contains("TAG_CREATION"));
    }

    #[test]
    fn variants_compare_by_contents() {
        let a = Error::UnknownEventKind("X".into());
        let b = Error::UnknownEventKind("X".into());
        assert_eq!(a, b);
    }
}
