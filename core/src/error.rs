//! Error types for the HTTP client core.
//!
//! # Design
//! Every failure is fatal to the single request it belongs to. Connect-phase
//! failures are split by cause (`DnsResolution`, `ConnectTimeout`,
//! `ConnectionRefused`) because callers print different advice for each;
//! anything else the OS reports while connecting lands in `Connect`.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Errors returned by `HttpClient` and the components it drives.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The method is neither `GET` nor `POST`. Raised before any socket is opened.
    #[error("method {method} is not supported")]
    UnsupportedMethod { method: String },

    /// The URL could not be turned into a host, port and path.
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("could not resolve host {host}: {source}")]
    DnsResolution {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("connecting to {host}:{port} timed out after {timeout:?}")]
    ConnectTimeout { host: String, port: u16, timeout: Duration },

    #[error("connection to {host}:{port} refused")]
    ConnectionRefused { host: String, port: u16 },

    #[error("connecting to {host}:{port} failed: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("sending request failed: {source}")]
    Send {
        #[source]
        source: io::Error,
    },

    #[error("receiving response failed: {source}")]
    Receive {
        #[source]
        source: io::Error,
    },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },

    /// Only produced under `FormEncodingPolicy::Strict`.
    #[error("form fields could not be encoded: {reason}")]
    FormEncoding { reason: String },
}

impl ClientError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ClientError::MalformedResponse { reason: reason.into() }
    }

    pub(crate) fn invalid_url(url: &str, reason: impl Into<String>) -> Self {
        ClientError::InvalidUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
