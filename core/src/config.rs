//! Client configuration.

use std::time::Duration;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("httpclient/", env!("CARGO_PKG_VERSION"), " rust/sockets");

/// What to do when form fields cannot be url-encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormEncodingPolicy {
    /// Send the request with an empty body.
    #[default]
    Lenient,
    /// Fail the request with `ClientError::FormEncoding`.
    Strict,
}

/// Settings shared by every request a client makes. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub connect_timeout: Duration,
    /// `None` means a receive blocks until the peer closes.
    pub read_timeout: Option<Duration>,
    pub user_agent: String,
    pub form_encoding: FormEncodingPolicy,
    /// Write the raw response text to stdout before parsing it.
    pub printable: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            form_encoding: FormEncodingPolicy::default(),
            printable: false,
        }
    }
}

impl ClientConfig {
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_form_encoding(mut self, policy: FormEncodingPolicy) -> Self {
        self.form_encoding = policy;
        self
    }

    pub fn with_printable(mut self, printable: bool) -> Self {
        self.printable = printable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_behavior() {
        let config = ClientConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert!(config.read_timeout.is_none());
        assert_eq!(config.form_encoding, FormEncodingPolicy::Lenient);
        assert!(!config.printable);
        assert!(config.user_agent.starts_with("httpclient/"));
    }

    #[test]
    fn builders_override_fields() {
        let config = ClientConfig::default()
            .with_connect_timeout(Duration::from_secs(2))
            .with_read_timeout(Some(Duration::from_secs(3)))
            .with_user_agent("custom/1")
            .with_form_encoding(FormEncodingPolicy::Strict)
            .with_printable(true);
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.read_timeout, Some(Duration::from_secs(3)));
        assert_eq!(config.user_agent, "custom/1");
        assert_eq!(config.form_encoding, FormEncodingPolicy::Strict);
        assert!(config.printable);
    }
}
