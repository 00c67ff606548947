use std::{fmt, hash};

/// Lifecycle of a [`BusListener`](crate::BusListener) across one wait cycle.
///
/// The listener starts `Idle`, becomes `Armed` while a wait is in
/// progress, and resolves to one of the three terminal states. A
/// satisfied wait (and [`reset`](crate::BusListener::reset)) makes the
/// listener immediately reusable; `TimedOut` and `Mismatched` require a
/// `reset` before new expectations may be pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, hash::Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListenerState {
    /// No expectations declared, no wait in progress. This is the default.
    #[default]
    Idle,
    /// A wait is in progress; the waiter is draining the channel.
    Armed,
    /// The last wait resolved with the received multiset equal to the
    /// expected multiset.
    Satisfied,
    /// The last strict wait timed out with expectations outstanding, or a
    /// flaky wait was tolerated past its deadline.
    TimedOut,
    /// The last strict wait observed an event kind with no outstanding
    /// expectation slot.
    Mismatched,
}

impl ListenerState {
    /// Returns `true` if the last wait resolved successfully.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, ListenerState::Satisfied)
    }

    /// Returns `true` if the listener is sitting on an unacknowledged
    /// failure and needs a [`reset`](crate::BusListener::reset).
    pub fn is_failed(&self) -> bool {
        matches!(self, ListenerState::TimedOut | ListenerState::Mismatched)
    }
}

impl fmt::Display for ListenerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerState::Idle => write!(f, "Idle"),
            ListenerState::Armed => write!(f, "Armed"),
            ListenerState::Satisfied => write!(f, "Satisfied"),
            ListenerState::TimedOut => write!(f, "TimedOut"),
            ListenerState::Mismatched => write!(f, "Mismatched"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(ListenerState::default(), ListenerState::Idle);
    }

    #[test]
    fn failure_states_are_flagged() {
        assert!(ListenerState::TimedOut.is_failed());
        assert!(ListenerState::Mismatched.is_failed());
        assert!(!ListenerState::Idle.is_failed());
        assert!(!ListenerState::Armed.is_failed());
        assert!(!ListenerState::Satisfied.is_failed());
    }

    #[test]
    fn satisfied_is_not_failed() {
        assert!(ListenerState::Satisfied.is_satisfied());
        assert!(!ListenerState::Satisfied.is_failed());
    }
}
