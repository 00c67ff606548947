use std::collections::BTreeMap;
use std::fmt;

use crate::EventKind;

/// A snapshot of a wait's progress: the expected and received multisets
/// plus their differences in both directions.
///
/// Attached to every [`Error`](crate::Error) raised by a wait so that a
/// failing test names exactly which kinds never arrived and which arrived
/// unannounced, with multiplicities. Order within each list is sorted by
/// kind; matching itself ignores arrival order entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    expected: Vec<EventKind>,
    received: Vec<EventKind>,
    missing: Vec<EventKind>,
    unexpected: Vec<EventKind>,
}

impl StatusReport {
    /// Build a report from the declared expectations and the kinds
    /// received so far.
    pub fn new(expected: &[EventKind], received: &[EventKind]) -> Self {
        let expected_counts = multiset(expected);
        let received_counts = multiset(received);

        let missing = difference(&expected_counts, &received_counts);
        let unexpected = difference(&received_counts, &expected_counts);

        let mut expected = expected.to_vec();
        expected.sort_unstable();
        let mut received = received.to_vec();
        received.sort_unstable();

        Self {
            expected,
            received,
            missing,
            unexpected,
        }
    }

    /// The declared expectation multiset, sorted by kind.
    pub fn expected(&self) -> &[EventKind] {
        &self.expected
    }

    /// The received multiset, sorted by kind.
    pub fn received(&self) -> &[EventKind] {
        &self.received
    }

    /// Kinds expected but not (yet) received, one entry per missing slot.
    pub fn missing(&self) -> &[EventKind] {
        &self.missing
    }

    /// Kinds received with no outstanding expectation slot, one entry per
    /// excess arrival.
    pub fn unexpected(&self) -> &[EventKind] {
        &self.unexpected
    }

    /// Returns `true` if the two multisets are equal.
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }

    /// Returns `true` if every expected slot has been filled, regardless
    /// of extra arrivals.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// The first kind that arrived with no outstanding slot, if any.
    pub fn first_unexpected(&self) -> Option<EventKind> {
        self.unexpected.first().copied()
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected {:?}, received {:?}, missing {:?}, unexpected {:?}",
            labels(&self.expected),
            labels(&self.received),
            labels(&self.missing),
            labels(&self.unexpected),
        )
    }
}

fn multiset(kinds: &[EventKind]) -> BTreeMap<EventKind, usize> {
    let mut counts = BTreeMap::new();
    for kind in kinds {
        *counts.entry(*kind).or_insert(0) += 1;
    }
    counts
}

/// Per-kind count surplus of `left` over `right`, flattened back into a
/// sorted list with one entry per surplus slot.
fn difference(
    left: &BTreeMap<EventKind, usize>,
    right: &BTreeMap<EventKind, usize>,
) -> Vec<EventKind> {
    let mut out = Vec::new();
    for (kind, count) in left {
        let matched = right.get(kind).copied().unwrap_or(0);
        for _ in matched..*count {
            out.push(*kind);
        }
    }
    out
}

fn labels(kinds: &[EventKind]) -> Vec<&'static str> {
    kinds.iter().map(EventKind::label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use EventKind::*;

    #[test]
    fn equal_multisets_are_satisfied() {
        let report = StatusReport::new(
            &[InvoiceCreation, PaymentSuccess],
            &[PaymentSuccess, InvoiceCreation],
        );
        assert!(report.is_satisfied());
        assert!(report.missing().is_empty());
        assert!(report.unexpected().is_empty());
    }

    #[test]
    fn duplicates_count() {
        let report = StatusReport::new(
            &[SubscriptionCreation, SubscriptionCreation],
            &[SubscriptionCreation],
        );
        assert!(!report.is_satisfied());
        assert_eq!(report.missing(), &[SubscriptionCreation]);
    }

    #[test]
    fn excess_arrivals_are_unexpected() {
        let report = StatusReport::new(&[AccountCreation], &[AccountCreation, TagCreation]);
        assert!(report.is_complete());
        assert!(!report.is_satisfied());
        assert_eq!(report.unexpected(), &[TagCreation]);
        assert_eq!(report.first_unexpected(), Some(TagCreation));
    }

    #[test]
    fn excess_of_an_expected_kind_is_unexpected() {
        let report = StatusReport::new(
            &[PaymentSuccess],
            &[PaymentSuccess, PaymentSuccess],
        );
        assert_eq!(report.unexpected(), &[PaymentSuccess]);
    }

    #[test]
    fn display_names_all_four_sets() {
        let report = StatusReport::new(&[InvoiceCreation], &[PaymentFailed]);
        let rendered = report.to_string();
        assert!(rendered.contains("expected"));
        assert!(rendered.contains("INVOICE_CREATION"));
        assert!(rendered.contains("unexpected"));
        assert!(rendered.contains("PAYMENT_FAILED"));
    }

    #[test]
    fn empty_report_is_satisfied() {
        let report = StatusReport::new(&[], &[]);
        assert!(report.is_satisfied());
    }
}
