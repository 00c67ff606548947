use std::{
    fmt,
    future::IntoFuture,
    time::{Duration, Instant},
};

use tracing::{debug, warn};

use crate::{BusListener, Error, ListenerState, Result, StatusReport};

/// A deadline-bounded wait on a listener's declared expectations.
///
/// Created by [`BusListener::assert_listener_status`] and
/// [`BusListener::flaky_assert_listener_status`]; the two share this one
/// implementation and differ only in the flaky flag. Awaiting the
/// assertion drains the notification channel until the received multiset
/// equals the expected multiset, the deadline elapses, or (strict mode)
/// an unexpected kind shows up.
///
/// # Example
///
/// ```ignore
/// listener.push_expected_event(EventKind::InvoiceCreation);
/// client.trigger_invoice_run(&account_id).await?;
/// listener.assert_listener_status().await?;
///
/// // With a custom deadline
/// listener.assert_listener_status()
///     .within(Duration::from_secs(30))
///     .await?;
/// ```
pub struct StatusAssertion<'a> {
    listener: &'a mut BusListener,
    timeout: Duration,
    flaky: bool,
}

impl<'a> StatusAssertion<'a> {
    pub(crate) fn new(listener: &'a mut BusListener, timeout: Duration, flaky: bool) -> Self {
        Self {
            listener,
            timeout,
            flaky,
        }
    }

    /// Override the configured default timeout for this wait only.
    pub fn within(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(self) -> Result {
        let Self {
            listener,
            timeout,
            flaky,
        } = self;

        listener.state = ListenerState::Armed;
        let deadline = Instant::now() + timeout;

        loop {
            // Drain everything already buffered before re-checking, so a
            // burst of deliveries resolves in one pass.
            while let Ok(notification) = listener.receiver.try_recv() {
                debug!(kind = %notification.kind(), "drained notification");
                listener.received.push(notification);
            }

            let report = listener.report();
            if !flaky {
                if let Some(kind) = report.first_unexpected() {
                    listener.state = ListenerState::Mismatched;
                    return Err(Error::UnexpectedEvent { kind, report });
                }
            }
            if report.is_complete() {
                if !report.unexpected().is_empty() {
                    warn!(%report, "flaky wait tolerating unexpected events");
                }
                listener.conclude(ListenerState::Satisfied);
                return Ok(());
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Self::resolve_timeout(listener, timeout, flaky, report);
            }

            match tokio::time::timeout(remaining, listener.receiver.recv()).await {
                Ok(Some(notification)) => {
                    debug!(kind = %notification.kind(), "drained notification");
                    listener.received.push(notification);
                }
                Ok(None) => {
                    // Every sink is gone and the wait is still incomplete;
                    // nothing further can arrive.
                    let report = listener.report();
                    if flaky {
                        warn!(%report, "flaky wait abandoned, channel closed");
                        listener.conclude(ListenerState::Idle);
                        return Ok(());
                    }
                    listener.state = ListenerState::TimedOut;
                    return Err(Error::ChannelClosed { report });
                }
                Err(_) => {
                    let report = listener.report();
                    return Self::resolve_timeout(listener, timeout, flaky, report);
                }
            }
        }
    }

    fn resolve_timeout(
        listener: &mut BusListener,
        timeout: Duration,
        flaky: bool,
        report: StatusReport,
    ) -> Result {
        if flaky {
            warn!(%report, ?timeout, "flaky wait timed out, continuing");
            listener.conclude(ListenerState::Idle);
            return Ok(());
        }
        listener.state = ListenerState::TimedOut;
        Err(Error::Timeout { timeout, report })
    }
}

impl<'a> IntoFuture for StatusAssertion<'a> {
    type Output = Result;
    type IntoFuture = std::pin::Pin<Box<dyn std::future::Future<Output = Self::Output> + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.run())
    }
}

impl fmt::Debug for StatusAssertion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusAssertion")
            .field("listener", &self.listener)
            .field("timeout", &self.timeout)
            .field("flaky", &self.flaky)
            .finish()
    }
}
