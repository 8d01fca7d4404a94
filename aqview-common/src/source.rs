//! Payload sources: where the result payload comes from
//!
//! The two entry points differ only in how the serialized payload is
//! obtained. That difference lives behind the `ResultSource` trait so the
//! rest of the pipeline is written once against the decoded model.

use std::io::Read;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;

use tracing::info;

use crate::error::{Error, Result};
use crate::frame;
use crate::model::AqiResult;

/// Strategy for obtaining one decoded result payload.
///
/// `load` is single-attempt: no retries, no fallback payloads.
pub trait ResultSource {
    fn load(&mut self) -> Result<AqiResult>;
}

/// File-backed source: reads and parses a results file on disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResultSource for FileSource {
    fn load(&mut self) -> Result<AqiResult> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(self.path.clone())
            } else {
                Error::Io(e)
            }
        })?;
        AqiResult::from_json(&text)
    }
}

/// Channel-backed source: receives one null-padded frame from a byte stream
/// and decodes it.
///
/// Generic over `Read` so the framing contract is testable without sockets;
/// the channel binary plugs in the connection accepted by `ChannelEndpoint`.
pub struct ChannelSource<R> {
    reader: R,
    capacity: usize,
}

impl<R: Read> ChannelSource<R> {
    pub fn new(reader: R, capacity: usize) -> Self {
        Self { reader, capacity }
    }
}

impl<R: Read> ResultSource for ChannelSource<R> {
    fn load(&mut self) -> Result<AqiResult> {
        let raw = frame::read_frame(&mut self.reader, self.capacity)?;
        let text = frame::decode(&raw)?;
        AqiResult::from_json(text)
    }
}

/// Receiving end of the two-process rendezvous.
///
/// This process is the designated receiver: it binds a loopback address and
/// blocks in `accept` until the producer peer connects and writes its frame.
/// The wait is unbounded; there is no timeout.
pub struct ChannelEndpoint {
    listener: TcpListener,
}

impl ChannelEndpoint {
    pub fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self { listener })
    }

    /// Address the endpoint is actually bound to (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Block until the producer connects, then wrap the connection as a
    /// `ChannelSource`. This is the pipeline's single suspension point.
    pub fn accept(self, capacity: usize) -> Result<ChannelSource<TcpStream>> {
        info!(
            "Waiting for producer connection on {}",
            self.listener.local_addr()?
        );
        let (stream, peer) = self.listener.accept()?;
        info!("Producer connected from {}", peer);
        Ok(ChannelSource::new(stream, capacity))
    }
}
