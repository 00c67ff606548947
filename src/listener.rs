use std::fmt;

use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

use crate::{
    EventKind, ListenerConfig, ListenerState, Notification, NotificationSink, StatusAssertion,
    StatusReport,
};

/// Synchronizes a test with the asynchronous events of a billing bus.
///
/// The listener gives a test a synchronous-looking API over an
/// asynchronous side channel: declare which [`EventKind`]s a pending
/// operation should emit, perform the triggering remote call, then await
/// [`assert_listener_status`](Self::assert_listener_status) to block until
/// every declared event has arrived or the deadline elapses.
///
/// Matching is multiset-based: arrival order never matters, but the count
/// of each kind must match exactly. A successful wait clears both queues,
/// so the declare/trigger/await cycle can repeat many times within one
/// test without an explicit [`reset`](Self::reset).
///
/// # Example
///
/// ```ignore
/// let (mut listener, sink) = BusListener::new();
/// callback_server.install(sink); // delivers bus events via sink.notify(...)
///
/// listener.push_expected_events(&[EventKind::AccountCreation]);
/// client.create_account(&input).await?;
/// listener.assert_listener_status().await?;
///
/// listener.push_expected_events(&[EventKind::SubscriptionCreation, EventKind::InvoiceCreation]);
/// client.create_subscription(&plan).await?;
/// listener.assert_listener_status().await?;
/// ```
///
/// # Concurrency
///
/// Delivery tasks hold [`NotificationSink`] clones and only ever enqueue;
/// all matching runs on the waiting task. The wait future borrows the
/// listener mutably, so expectations cannot be pushed while a wait is in
/// progress - the borrow checker rejects it.
pub struct BusListener {
    pub(crate) expected: Vec<EventKind>,
    pub(crate) received: Vec<Notification>,
    history: Vec<Notification>,
    pub(crate) state: ListenerState,
    pub(crate) receiver: UnboundedReceiver<Notification>,
    config: ListenerConfig,
}

impl BusListener {
    /// Create a listener with default configuration, plus the sink the
    /// inbound channel will deliver through.
    ///
    /// The sink is the only handle to the channel: clone it for every
    /// delivery task that needs one. The listener deliberately does not
    /// keep a sender of its own, so dropping the last sink closes the
    /// channel and a pending strict wait can fail fast instead of
    /// running out its deadline.
    pub fn new() -> (Self, NotificationSink) {
        Self::with_config(ListenerConfig::default())
    }

    /// Create a listener with the given configuration.
    pub fn with_config(config: ListenerConfig) -> (Self, NotificationSink) {
        let (tx, rx) = unbounded_channel();
        let listener = Self {
            expected: Vec::new(),
            received: Vec::new(),
            history: Vec::new(),
            state: ListenerState::Idle,
            receiver: rx,
            config,
        };
        (listener, NotificationSink::new(tx))
    }

    /// Returns the listener configuration.
    pub fn config(&self) -> &ListenerConfig {
        &self.config
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> ListenerState {
        self.state
    }

    /// Clears the expectation queue, received log, and history, discards
    /// any notifications still buffered in the channel, and returns the
    /// listener to [`ListenerState::Idle`]. Idempotent.
    ///
    /// Call before each test method, and after a failed wait before
    /// declaring new expectations.
    pub fn reset(&mut self) {
        self.expected.clear();
        self.received.clear();
        self.history.clear();
        self.state = ListenerState::Idle;
        while self.receiver.try_recv().is_ok() {}
    }

    /// Append one expected event kind to the expectation queue.
    ///
    /// # Panics
    ///
    /// Panics if the last wait failed and the listener has not been
    /// [`reset`](Self::reset) - pushing onto a failed listener is a
    /// test-authoring bug, surfaced loudly rather than silently merged
    /// into the next wait.
    pub fn push_expected_event(&mut self, kind: EventKind) {
        assert!(
            !self.state.is_failed(),
            "cannot push {kind} onto a {} listener; call reset() first",
            self.state
        );
        self.expected.push(kind);
    }

    /// Append several expected event kinds at once.
    ///
    /// # Panics
    ///
    /// Same as [`push_expected_event`](Self::push_expected_event).
    pub fn push_expected_events(&mut self, kinds: &[EventKind]) {
        for kind in kinds {
            self.push_expected_event(*kind);
        }
    }

    /// Returns a strict wait on the declared expectations.
    ///
    /// Awaiting the returned [`StatusAssertion`] blocks until the received
    /// multiset equals the expected multiset (success - both queues are
    /// cleared for the next phase), an unexpected kind is drained
    /// ([`Error::UnexpectedEvent`](crate::Error::UnexpectedEvent)), the
    /// deadline elapses ([`Error::Timeout`](crate::Error::Timeout)), or
    /// every sink is dropped with the wait unsatisfiable
    /// ([`Error::ChannelClosed`](crate::Error::ChannelClosed)).
    ///
    /// The deadline defaults to the configured timeout; override per call
    /// with [`within`](StatusAssertion::within).
    pub fn assert_listener_status(&mut self) -> StatusAssertion<'_> {
        let timeout = self.config.default_timeout();
        StatusAssertion::new(self, timeout, false)
    }

    /// Returns a relaxed wait: identical matching, but a timeout (or an
    /// unexpected kind) degrades to a logged warning and the call returns
    /// `Ok(())`.
    ///
    /// Use only at points where event-delivery races are known to be
    /// benign, such as tenant provisioning before the callback channel is
    /// fully registered.
    pub fn flaky_assert_listener_status(&mut self) -> StatusAssertion<'_> {
        let timeout = self.config.default_timeout();
        StatusAssertion::new(self, timeout, true)
    }

    /// The declared expectation queue, in push order.
    pub fn expected(&self) -> &[EventKind] {
        &self.expected
    }

    /// The received log, in arrival order.
    ///
    /// Only notifications already drained by a wait appear here;
    /// deliveries still buffered in the channel are picked up when the
    /// next wait runs.
    pub fn received(&self) -> &[Notification] {
        &self.received
    }

    /// Every notification drained since the last [`reset`](Self::reset),
    /// in arrival order, including those from already-concluded waits.
    ///
    /// Lets a test inspect the object and account identifiers an awaited
    /// event carried after the wait has cleared the per-phase log.
    pub fn history(&self) -> &[Notification] {
        &self.history
    }

    /// Notifications of the given kind from [`history`](Self::history).
    pub fn history_of(&self, kind: EventKind) -> Vec<&Notification> {
        self.history.iter().filter(|n| n.kind() == kind).collect()
    }

    /// A multiset snapshot of the current wait progress.
    pub fn report(&self) -> StatusReport {
        let received: Vec<EventKind> = self.received.iter().map(Notification::kind).collect();
        StatusReport::new(&self.expected, &received)
    }

    /// Clear both queues and settle into the given terminal state. The
    /// drained notifications move into [`history`](Self::history).
    pub(crate) fn conclude(&mut self, state: ListenerState) {
        self.expected.clear();
        self.history.append(&mut self.received);
        self.state = state;
    }

    /// Print the current queues to stdout for debugging.
    pub fn dump(&self) {
        println!(
            "Listener state: {} ({} expected, {} received)",
            self.state,
            self.expected.len(),
            self.received.len()
        );
        for (i, kind) in self.expected.iter().enumerate() {
            println!("  expected {i}: {kind}");
        }
        for (i, notification) in self.received.iter().enumerate() {
            println!("  received {i}: {notification}");
        }
    }
}

impl fmt::Debug for BusListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusListener")
            .field("state", &self.state)
            .field("expected", &self.expected.len())
            .field("received", &self.received.len())
            .finish_non_exhaustive()
    }
}
