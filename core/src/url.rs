//! Absolute URL → (host, port, path).

use ::http::uri::InvalidUri;
use ::http::Uri;
use tracing::warn;

use crate::error::ClientError;

pub const DEFAULT_PORT: u16 = 80;

/// Where a request goes: derived once from a URL and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub host: String,
    pub port: u16,
    /// Request target sent on the request line. Never empty; includes the query.
    pub path: String,
}

impl ConnectionTarget {
    /// Parse an absolute URL such as `http://example.com:8080/a?b=c`.
    ///
    /// The port comes from the authority when present and defaults to 80. An
    /// empty path becomes `/`. Bracketed IPv6 hosts are rejected since the
    /// host/port split is defined on the first colon of the authority.
    pub fn parse(url: &str) -> Result<Self, ClientError> {
        let uri: Uri = url
            .trim()
            .parse()
            .map_err(|e: InvalidUri| ClientError::invalid_url(url, e.to_string()))?;

        if let Some(scheme) = uri.scheme_str() {
            if !scheme.eq_ignore_ascii_case("http") {
                warn!(scheme, "only plaintext http is spoken, sending anyway");
            }
        }

        let authority = uri
            .authority()
            .ok_or_else(|| ClientError::invalid_url(url, "missing host"))?;
        let host = authority.host();
        if host.is_empty() {
            return Err(ClientError::invalid_url(url, "missing host"));
        }
        if host.starts_with('[') {
            return Err(ClientError::invalid_url(url, "ipv6 hosts are not supported"));
        }

        let host_port = authority
            .as_str()
            .rsplit_once('@')
            .map_or(authority.as_str(), |(_, host_port)| host_port);
        let port = match host_port.split_once(':') {
            Some((_, "")) | None => DEFAULT_PORT,
            Some((_, port)) => port
                .parse::<u16>()
                .map_err(|_| ClientError::invalid_url(url, format!("invalid port {port:?}")))?,
        };

        let path = match uri.path_and_query().map(|pq| pq.as_str()) {
            Some(p) if p.starts_with('/') => p.to_string(),
            Some(p) => format!("/{p}"),
            None => "/".to_string(),
        };

        Ok(ConnectionTarget {
            host: host.to_string(),
            port,
            path,
        })
    }
}
