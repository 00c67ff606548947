use std::time::Duration;

/// Runtime configuration for a [`BusListener`](crate::BusListener).
///
/// Use the builder pattern to customize, or [`Default`] for the standard
/// settings. The per-call [`within`](crate::StatusAssertion::within)
/// override always wins over the configured default.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use eventgate::ListenerConfig;
///
/// let config = ListenerConfig::default()
///     .with_default_timeout(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListenerConfig {
    /// How long a wait blocks before resolving as timed out when no
    /// per-call override is given.
    /// Default: 10 seconds
    default_timeout: Duration,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        ListenerConfig {
            default_timeout: Duration::from_secs(10),
        }
    }
}

impl ListenerConfig {
    /// Set the default wait timeout.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Returns the default wait timeout.
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_ten_seconds() {
        assert_eq!(
            ListenerConfig::default().default_timeout(),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn builder_overrides_timeout() {
        let config = ListenerConfig::default().with_default_timeout(Duration::from_millis(250));
        assert_eq!(config.default_timeout(), Duration::from_millis(250));
    }
}
