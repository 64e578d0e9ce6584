//! Blocking TCP transport.
//!
//! # Design
//! A `Connection` owns its `TcpStream`; dropping it shuts the socket down,
//! so every early return in the client (a failed send, a failed read)
//! releases the socket without extra bookkeeping. Once connected, reads block
//! until the peer closes unless a read timeout was configured.

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, info, trace};

use crate::error::ClientError;

/// Size of each read from the socket.
pub const CHUNK_SIZE: usize = 1024;

/// An open TCP connection to one peer.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
}

impl Connection {
    /// Resolve `host` and connect to the first address that accepts within
    /// `timeout`.
    ///
    /// When every address fails, a timeout on any of them is reported as
    /// `ConnectTimeout`, even if a later address refused.
    pub fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self, ClientError> {
        info!(host = %host, port, "connecting");

        let addrs: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(|source| ClientError::DnsResolution { host: host.to_string(), source })?
            .collect();
        if addrs.is_empty() {
            return Err(ClientError::DnsResolution {
                host: host.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no addresses found"),
            });
        }

        let mut failures = Vec::with_capacity(addrs.len());
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => {
                    debug!(peer = %addr, "connected");
                    return Ok(Connection { stream, peer: addr });
                }
                Err(e) => {
                    debug!(peer = %addr, cause = %e, "connect attempt failed");
                    failures.push(e);
                }
            }
        }

        Err(connect_error(host, port, timeout, failures))
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Bound each read; `None` blocks until the peer closes.
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> Result<(), ClientError> {
        self.stream
            .set_read_timeout(timeout)
            .map_err(|source| ClientError::Receive { source })
    }

    /// Write every byte, blocking until the OS accepts them.
    pub fn send(&mut self, bytes: &[u8]) -> Result<(), ClientError> {
        self.stream.write_all(bytes).map_err(|source| ClientError::Send { source })?;
        self.stream.flush().map_err(|source| ClientError::Send { source })?;
        trace!(bytes = bytes.len(), "sent");
        Ok(())
    }

    /// Read fixed-size chunks until the peer closes the stream.
    pub fn receive_all(&mut self) -> Result<Vec<u8>, ClientError> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    trace!(bytes = n, "received");
                    buffer.extend_from_slice(&chunk[..n]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(ClientError::Receive { source }),
            }
        }
        debug!(total = buffer.len(), "peer closed connection");
        Ok(buffer)
    }

    /// Release the socket now rather than at end of scope.
    pub fn close(self) {
        drop(self);
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

/// Pick one error for a host whose addresses all failed.
fn connect_error(host: &str, port: u16, timeout: Duration, failures: Vec<io::Error>) -> ClientError {
    let host = host.to_string();
    if failures.iter().any(is_timeout) {
        return ClientError::ConnectTimeout { host, port, timeout };
    }
    match failures.into_iter().last() {
        Some(e) if e.kind() == io::ErrorKind::ConnectionRefused => ClientError::ConnectionRefused { host, port },
        Some(source) => ClientError::Connect { host, port, source },
        None => ClientError::Connect {
            host,
            port,
            source: io::Error::from(io::ErrorKind::NotConnected),
        },
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // the peer may already have closed its side
        if let Err(e) = self.stream.shutdown(Shutdown::Both) {
            trace!(cause = %e, "shutdown after close");
        }
        debug!(peer = %self.peer, "connection closed");
    }
}
