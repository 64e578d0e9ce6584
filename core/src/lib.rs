//! A minimal HTTP/1.1 client written directly against TCP sockets.
//!
//! # Overview
//! Shows exactly which bytes go over the wire for a GET or POST and how the
//! reply is taken apart again: no HTTP library sits between the caller and
//! the socket.
//!
//! # Design
//! - `ConnectionTarget::parse` turns a URL into host, port and path.
//! - `Connection` is a blocking TCP stream that closes when dropped.
//! - `RequestEncoder` writes the request line, fixed headers and an optional
//!   form-urlencoded body.
//! - `decoder::decode` splits the full response into status, headers, body.
//! - `HttpClient` runs one connection per call and returns an owned
//!   `HttpResponse`; it keeps no state between calls.
//!
//! Every request sends `Connection: close`, and the response is read until
//! the server closes the socket. There is no TLS, keep-alive, chunked
//! decoding or redirect handling.

pub mod client;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod http;
pub mod transport;
pub mod url;

pub use client::HttpClient;
pub use config::{ClientConfig, FormEncodingPolicy};
pub use error::ClientError;
pub use crate::http::{FormFields, HttpMethod, HttpResponse};
pub use url::ConnectionTarget;
