//! HTTP value types shared by the encoder, decoder and client.
//!
//! # Design
//! Requests and responses are plain owned data. An `OutgoingRequest` only
//! lives long enough to be encoded; an `HttpResponse` is handed back to the
//! caller and never touched by the client again, so repeated or concurrent
//! calls cannot see each other's results.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ClientError;
use crate::url::ConnectionTarget;

/// Ordered form fields, encoded as `application/x-www-form-urlencoded`.
pub type FormFields = Vec<(String, String)>;

/// HTTP method for a request. Only `GET` and `POST` are spoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ClientError;

    /// Method names are case-sensitive, as on the wire.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            other => Err(ClientError::UnsupportedMethod { method: other.to_string() }),
        }
    }
}

/// A request about to be serialized onto a connection.
///
/// The form is anything `serde_urlencoded` accepts at the top level: a slice
/// of pairs, a map, or a struct of scalar fields.
#[derive(Debug)]
pub struct OutgoingRequest<'a, F: ?Sized = [(String, String)]> {
    pub method: HttpMethod,
    pub target: &'a ConnectionTarget,
    pub form: Option<&'a F>,
}

/// A fully parsed response.
///
/// Header names keep the case they arrived in; when a name repeats, the last
/// occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpResponse {
    pub status: u16,
    pub version: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_methods() {
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("POST".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
    }

    #[test]
    fn rejects_other_methods() {
        let err = "PUT".parse::<HttpMethod>().unwrap_err();
        assert!(matches!(err, ClientError::UnsupportedMethod { ref method } if method == "PUT"));
    }

    #[test]
    fn method_names_are_case_sensitive() {
        assert!("get".parse::<HttpMethod>().is_err());
        assert!("Post".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn response_serializes_to_json() {
        let response = HttpResponse {
            status: 404,
            version: "HTTP/1.1".to_string(),
            headers: BTreeMap::from([("Content-Type".to_string(), "text/plain".to_string())]),
            body: "Nope".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["headers"]["Content-Type"], "text/plain");
        assert_eq!(json["body"], "Nope");
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("content-type"), None);
    }
}
