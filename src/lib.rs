//! # Eventgate
//!
//! Expected-event synchronization for integration tests of a subscription
//! billing platform.
//!
//! Integration tests drive a running billing server through its HTTP
//! client, but the interesting side effects - invoices generated, payments
//! applied, subscriptions changing phase - surface asynchronously as push
//! notifications on a bus callback channel. Eventgate turns that
//! asynchrony into a synchronous-looking test API: declare the events an
//! operation should emit, perform the triggering call, then block (with a
//! bounded timeout) until every declared event has arrived.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eventgate::{BusListener, EventKind, Meta, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result {
//!     let (mut listener, sink) = BusListener::new();
//!
//!     // Wire `sink` into whatever receives bus callbacks from the system
//!     // under test; each delivery becomes one `notify` call.
//!     tokio::spawn(async move {
//!         // ... on each callback:
//!         sink.notify(EventKind::AccountCreation, Meta::empty());
//!     });
//!
//!     listener.push_expected_event(EventKind::AccountCreation);
//!     // ... perform the account-creation call against the server ...
//!     listener.assert_listener_status().await
//! }
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`BusListener`] | Owns the expectation queue and received log; the declare/trigger/await API |
//! | [`NotificationSink`] | Cloneable inbound entry point for the callback channel |
//! | [`StatusAssertion`] | A deadline-bounded wait, built by the listener (`.within(..)` to override the timeout) |
//! | [`EventKind`] | Closed set of billing bus event tags |
//! | [`Notification`] | One received bus callback: an `EventKind` plus [`Meta`] |
//! | [`Meta`] | Object/account identifiers and capture timestamp |
//! | [`StatusReport`] | Expected/received multisets and their differences, embedded in failures |
//! | [`ListenerState`] | Idle / Armed / Satisfied / TimedOut / Mismatched lifecycle |
//! | [`ListenerConfig`] | Default wait timeout |
//!
//! ## Matching Semantics
//!
//! Matching is multiset-based, not sequence-based: the order events are
//! declared need not equal the order they arrive, because the bus may
//! reorder delivery - but the count of each kind must match exactly. An
//! event expected twice must arrive twice.
//!
//! A strict wait fails on timeout (naming every missing kind) and on the
//! first unexpected kind drained (naming the offender); both failures
//! carry the full [`StatusReport`]. A flaky wait
//! ([`BusListener::flaky_assert_listener_status`]) downgrades both to
//! logged warnings and always returns - the escape hatch for known-racy
//! bootstrap sequences such as tenant provisioning before the callback
//! channel is registered.
//!
//! ## Features
//!
//! - **`serde`** - serialization support for [`EventKind`],
//!   [`Notification`], [`Meta`], [`ListenerState`], and [`ListenerConfig`]

mod config;
mod error;
mod event_kind;
mod listener;
mod meta;
mod notification;
mod report;
mod sink;
mod state;
mod wait;

pub use config::ListenerConfig;
pub use error::Error;
pub use event_kind::EventKind;
pub use listener::BusListener;
pub use meta::Meta;
pub use notification::Notification;
pub use report::StatusReport;
pub use sink::NotificationSink;
pub use state::ListenerState;
pub use wait::StatusAssertion;

/// Convenience alias for `Result<T, eventgate::Error>`.
pub type Result<T = ()> = std::result::Result<T, Error>;
