//! # Strata
//!
//! Translation layer for a versioned game protocol.
//!
//! Game logic is written once against the canonical (latest) packet
//! shapes. Each connection negotiates the version its client speaks, and
//! Strata decodes that client's bytes into canonical packets and encodes
//! canonical packets back into bytes the client understands.
//!
//! ```text
//! Connection (bytes) → PacketConn → Session → Protocol → Packet (canonical)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use strata::prelude::*;
//!
//! # async fn run() -> Result<(), StrataError> {
//! let registry = Arc::new(ProtocolRegistry::standard());
//! let (client, _server) = MemoryConnection::pair();
//! let mut conn = PacketConn::new(client, registry, SessionConfig::default());
//! conn.negotiate(503)?;
//! while let Some(packets) = conn.read_packets().await? {
//!     for packet in packets {
//!         println!("{}", packet.name());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod conn;
mod error;

pub use conn::{PacketConn, forward};
pub use error::StrataError;

pub use strata_packet as packet;
pub use strata_protocol as protocol;
pub use strata_session as session;
pub use strata_transport as transport;
pub use strata_wire as wire;

pub mod prelude {
    pub use crate::{PacketConn, StrataError, forward};
    pub use strata_packet::Packet;
    pub use strata_protocol::{Features, Protocol, ProtocolRegistry};
    pub use strata_session::{Session, SessionConfig, SessionError};
    pub use strata_transport::{Connection, ConnectionId, MemoryConnection, TransportError};
    pub use strata_wire::{CURRENT_PROTOCOL, ProtocolVersion};
}
