// src/config.rs
// =============================================================================
// Tunables for a link-check batch.
//
// The defaults are deliberately small: a batch can hold thousands of URLs,
// and opening thousands of sockets at once exhausts local resources and
// looks like abuse to the remote hosts.
// =============================================================================

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_MAX_REDIRECTS: usize = 5;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_CONCURRENT_CHECKS: usize = 20;
pub const DEFAULT_USER_AGENT: &str = concat!("metis-linkcheck/", env!("CARGO_PKG_VERSION"));

/// Options recognized by the batch coordinator.
///
/// # Examples
///
/// ```
/// use metis_linkcheck::CheckConfig;
/// use std::time::Duration;
///
/// let config = CheckConfig {
///     max_concurrent_checks: 8,
///     batch_deadline: Some(Duration::from_secs(60)),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Redirect hops followed before giving up (0 = no redirect allowed)
    pub max_redirects: usize,
    /// Limit on establishing the TCP/TLS connection
    pub connect_timeout: Duration,
    /// Limit on one whole request, connect included: a `connect_timeout`
    /// larger than this never fires, `read_timeout` cuts in first
    pub read_timeout: Duration,
    /// Global ceiling on simultaneous checks across the whole batch
    pub max_concurrent_checks: usize,
    /// Optional wall-clock limit for the whole batch
    pub batch_deadline: Option<Duration>,
    pub user_agent: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            max_concurrent_checks: DEFAULT_MAX_CONCURRENT_CHECKS,
            batch_deadline: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CheckConfig {
    /// Builds a config from the millisecond-based options used on the wire
    /// and on the command line.
    pub fn from_millis(
        max_redirects: usize,
        connect_timeout_ms: u64,
        read_timeout_ms: u64,
        max_concurrent_checks: usize,
        batch_deadline_ms: Option<u64>,
    ) -> Self {
        Self {
            max_redirects,
            connect_timeout: Duration::from_millis(connect_timeout_ms),
            read_timeout: Duration::from_millis(read_timeout_ms),
            max_concurrent_checks,
            batch_deadline: batch_deadline_ms.map(Duration::from_millis),
            ..Default::default()
        }
    }

    /// Checks that every option is usable. `max_redirects` needs no check:
    /// any non-negative hop count, zero included, is valid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connect_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout {
                name: "connect_timeout",
            });
        }
        if self.read_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout {
                name: "read_timeout",
            });
        }
        if self.max_concurrent_checks == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.batch_deadline.is_some_and(|d| d.is_zero()) {
            return Err(ConfigError::ZeroDeadline);
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CheckConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.max_concurrent_checks < 100);
        assert_eq!(config.batch_deadline, None);
    }

    #[test]
    fn test_from_millis() {
        let config = CheckConfig::from_millis(0, 1500, 2500, 4, Some(30_000));
        assert_eq!(config.max_redirects, 0);
        assert_eq!(config.connect_timeout, Duration::from_millis(1500));
        assert_eq!(config.read_timeout, Duration::from_millis(2500));
        assert_eq!(config.max_concurrent_checks, 4);
        assert_eq!(config.batch_deadline, Some(Duration::from_secs(30)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_values() {
        let config = CheckConfig::from_millis(5, 0, 1000, 4, None);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroTimeout {
                name: "connect_timeout"
            })
        );

        let config = CheckConfig::from_millis(5, 1000, 0, 4, None);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroTimeout {
                name: "read_timeout"
            })
        );

        let config = CheckConfig::from_millis(5, 1000, 1000, 0, None);
        assert_eq!(config.validate(), Err(ConfigError::ZeroConcurrency));

        let config = CheckConfig::from_millis(5, 1000, 1000, 4, Some(0));
        assert_eq!(config.validate(), Err(ConfigError::ZeroDeadline));

        let config = CheckConfig {
            user_agent: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyUserAgent));
    }
}
