//! Turns the raw bytes of a complete response into an `HttpResponse`.
//!
//! # Design
//! The response is split on CRLF. The first line is the status line, the
//! lines up to the first blank line are headers, and the rest is the body.
//! Each step is a small parse function returning `Result`, so a failure is a
//! `MalformedResponse` carrying the reason and nothing partial escapes.
//!
//! Policies for inputs the protocol leaves loose:
//! - bytes that are not UTF-8 are replaced, never rejected;
//! - a header line without a space is malformed;
//! - with no blank line, every remaining line is a header and the body is empty;
//! - body lines are joined back with `\n`, so a CRLF inside the body becomes LF.
//!
//! No `Content-Length` or chunked handling happens here: the body is whatever
//! the peer sent before closing.

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::ClientError;
use crate::http::HttpResponse;

/// Protocol version and status code from the first response line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub version: String,
    pub status: u16,
}

/// Parse `HTTP/1.1 404 Not Found`. The reason phrase is discarded.
pub fn parse_status_line(line: &str) -> Result<StatusLine, ClientError> {
    let mut tokens = line.split(' ');
    let version = tokens.next().unwrap_or_default();
    let code = tokens
        .next()
        .ok_or_else(|| ClientError::malformed(format!("status line {line:?} has no status code")))?;
    let status = code
        .parse::<u16>()
        .map_err(|_| ClientError::malformed(format!("invalid status code {code:?}")))?;

    Ok(StatusLine {
        version: version.to_string(),
        status,
    })
}

/// Split `Name: value` at the first space; a trailing colon on the name is dropped.
pub fn parse_header_line(line: &str) -> Result<(String, String), ClientError> {
    let (name, value) = line
        .split_once(' ')
        .ok_or_else(|| ClientError::malformed(format!("header line {line:?} has no space")))?;
    Ok((name.trim_end_matches(':').to_string(), value.to_string()))
}

pub fn decode(raw: &[u8]) -> Result<HttpResponse, ClientError> {
    let text = String::from_utf8_lossy(raw);
    let mut lines = text.split("\r\n");

    // split always yields at least one item, possibly empty
    let status_line = parse_status_line(lines.next().unwrap_or_default())?;

    let mut headers = BTreeMap::new();
    for line in lines.by_ref() {
        if line.is_empty() {
            break;
        }
        let (name, value) = parse_header_line(line)?;
        headers.insert(name, value);
    }

    let body = lines.collect::<Vec<_>>().join("\n");
    trace!(status = status_line.status, headers = headers.len(), body = body.len(), "decoded response");

    Ok(HttpResponse {
        status: status_line.status,
        version: status_line.version,
        headers,
        body,
    })
}
