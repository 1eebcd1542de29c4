//! Connection boundary for Strata.
//!
//! The translation layer never touches sockets. It expects each message
//! from a [`Connection`] to be one complete packet buffer, already
//! reassembled, decrypted and decompressed by whatever sits below.
//!
//! [`MemoryConnection`] provides an in-process pair for tests and demos.

#![allow(async_fn_in_trait)]

mod error;
mod memory;

pub use error::TransportError;
pub use memory::MemoryConnection;

use std::fmt;

/// Opaque identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// A single connection that carries whole packet buffers.
pub trait Connection: Send + Sync + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sends one packet buffer to the remote peer.
    async fn send(&self, data: &[u8]) -> Result<(), Self::Error>;

    /// Receives the next packet buffer from the remote peer.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Closes the connection. The peer's next `recv` returns `Ok(None)`.
    async fn close(&self) -> Result<(), Self::Error>;

    fn id(&self) -> ConnectionId;
}
