//! Stateless GET/POST orchestration over raw sockets.
//!
//! # Design
//! `HttpClient` holds only a `ClientConfig`. Each call parses the URL and
//! encodes the request before opening a fresh connection, writes it, reads
//! until the server closes, releases the socket and only then decodes. The
//! parsed response is returned by value, so one client can be shared across
//! threads.

use std::io::{self, Write};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::decoder;
use crate::encoder::RequestEncoder;
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpResponse, OutgoingRequest};
use crate::transport::Connection;
use crate::url::ConnectionTarget;

#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    config: ClientConfig,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn get(&self, url: &str, form: Option<&[(String, String)]>) -> Result<HttpResponse, ClientError> {
        self.execute(HttpMethod::Get, url, form, self.config.printable)
    }

    pub fn post(&self, url: &str, form: Option<&[(String, String)]>) -> Result<HttpResponse, ClientError> {
        self.execute(HttpMethod::Post, url, form, self.config.printable)
    }

    /// POST any serializable form: a struct of scalar fields, a map, or pairs.
    pub fn post_form<F>(&self, url: &str, form: &F) -> Result<HttpResponse, ClientError>
    where
        F: Serialize + ?Sized,
    {
        self.execute(HttpMethod::Post, url, Some(form), self.config.printable)
    }

    /// Send with a method given by name. Anything but `GET` or `POST` fails
    /// with `UnsupportedMethod` before the URL is even looked at.
    pub fn request(
        &self,
        method: &str,
        url: &str,
        form: Option<&[(String, String)]>,
    ) -> Result<HttpResponse, ClientError> {
        let method: HttpMethod = method.parse()?;
        self.execute(method, url, form, self.config.printable)
    }

    /// Entry point for command line use: `POST` (exact match) posts, any
    /// other name falls back to `GET`. The raw response is always echoed to
    /// stdout.
    pub fn command(
        &self,
        url: &str,
        method_name: &str,
        form: Option<&[(String, String)]>,
    ) -> Result<HttpResponse, ClientError> {
        let method = if method_name == "POST" { HttpMethod::Post } else { HttpMethod::Get };
        self.execute(method, url, form, true)
    }

    fn execute<F>(
        &self,
        method: HttpMethod,
        url: &str,
        form: Option<&F>,
        printable: bool,
    ) -> Result<HttpResponse, ClientError>
    where
        F: Serialize + ?Sized,
    {
        let target = ConnectionTarget::parse(url)?;
        debug!(%method, host = %target.host, port = target.port, path = %target.path, "request");

        let raw = self.exchange(method, &target, form)?;

        if printable {
            echo(&raw);
        }

        decoder::decode(&raw)
    }

    /// One connection, one request, one response. The connection is dropped
    /// on every return path.
    fn exchange<F>(
        &self,
        method: HttpMethod,
        target: &ConnectionTarget,
        form: Option<&F>,
    ) -> Result<Vec<u8>, ClientError>
    where
        F: Serialize + ?Sized,
    {
        let encoder = RequestEncoder::new(self.config.user_agent.as_str(), self.config.form_encoding);
        let bytes = encoder.encode(&OutgoingRequest { method, target, form })?;

        let mut connection = Connection::connect(&target.host, target.port, self.config.connect_timeout)?;
        connection.set_read_timeout(self.config.read_timeout)?;
        connection.send(&bytes)?;

        let raw = connection.receive_all()?;
        connection.close();
        Ok(raw)
    }
}

fn echo(raw: &[u8]) {
    if let Err(e) = write_raw(&mut io::stdout().lock(), raw) {
        warn!(cause = %e, "failed to echo response");
    }
}

fn write_raw(out: &mut impl Write, raw: &[u8]) -> io::Result<()> {
    out.write_all(raw)?;
    out.write_all(b"\n")?;
    out.flush()
}
