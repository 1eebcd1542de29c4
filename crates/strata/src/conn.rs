//! A connection that speaks canonical packets.
//!
//! [`PacketConn`] pairs a [`Connection`] with a [`Session`]: bytes coming
//! in are decoded for the negotiated version and converted to canonical
//! packets; canonical packets going out are converted and encoded.

use std::sync::Arc;

use strata_packet::Packet;
use strata_protocol::ProtocolRegistry;
use strata_session::{Session, SessionConfig};
use strata_transport::{Connection, ConnectionId, TransportError};
use strata_wire::ProtocolVersion;

use crate::StrataError;

/// A connection translated to and from canonical packets.
pub struct PacketConn<C> {
    conn: C,
    session: Session,
}

impl<C> PacketConn<C>
where
    C: Connection<Error = TransportError>,
{
    pub fn new(conn: C, registry: Arc<ProtocolRegistry>, config: SessionConfig) -> Self {
        Self {
            conn,
            session: Session::new(registry, config),
        }
    }

    /// Binds the connection to the client's protocol version. Called once,
    /// from the login handshake.
    ///
    /// # Errors
    /// Returns [`StrataError::Session`] if the version is unsupported or a
    /// version was already negotiated.
    pub fn negotiate(&mut self, protocol_id: i32) -> Result<ProtocolVersion, StrataError> {
        let version = self.session.negotiate(protocol_id)?;
        tracing::info!(conn_id = %self.conn.id(), %version, "connection negotiated");
        Ok(version)
    }

    pub fn id(&self) -> ConnectionId {
        self.conn.id()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    /// Receives one packet buffer and returns its canonical packets, in
    /// order. The list may be empty when the packet has no canonical
    /// counterpart.
    ///
    /// Returns `Ok(None)` when the connection is closed.
    ///
    /// # Errors
    /// - [`StrataError::Transport`] if receiving fails
    /// - [`StrataError::Session`] if the buffer cannot be decoded or
    ///   converted
    pub async fn read_packets(&self) -> Result<Option<Vec<Packet>>, StrataError> {
        let Some(buf) = self.conn.recv().await? else {
            return Ok(None);
        };
        Ok(Some(self.session.decode(&buf)?))
    }

    /// Converts and encodes a canonical packet, then sends each resulting
    /// buffer in order.
    ///
    /// # Errors
    /// - [`StrataError::Session`] if the packet cannot be converted or
    ///   encoded; nothing is sent in that case
    /// - [`StrataError::Transport`] if sending fails
    pub async fn write_packet(&self, packet: Packet) -> Result<(), StrataError> {
        for buf in self.session.encode(packet)? {
            self.conn.send(&buf).await?;
        }
        Ok(())
    }

    /// Writes several packets, keeping their order.
    ///
    /// # Errors
    /// Everything is encoded before anything is sent, so a conversion
    /// failure sends nothing. See [`write_packet`](Self::write_packet).
    pub async fn write_packets(
        &self,
        packets: impl IntoIterator<Item = Packet>,
    ) -> Result<(), StrataError> {
        for buf in self.session.encode_batch(packets)? {
            self.conn.send(&buf).await?;
        }
        Ok(())
    }

    pub async fn close(&self) -> Result<(), StrataError> {
        Ok(self.conn.close().await?)
    }
}

/// Reads canonical packets from `from` and writes them to `to` until
/// `from` closes. Returns the number of packets forwarded.
///
/// Malformed packets are logged and skipped. The loop stops on transport
/// failures, protocol violations and unsupported conversions.
///
/// # Errors
/// Returns the first fatal error from either side.
pub async fn forward<A, B>(from: &PacketConn<A>, to: &PacketConn<B>) -> Result<usize, StrataError>
where
    A: Connection<Error = TransportError>,
    B: Connection<Error = TransportError>,
{
    let mut forwarded = 0;
    loop {
        let packets = match from.read_packets().await {
            Ok(Some(packets)) => packets,
            Ok(None) => {
                tracing::debug!(from = %from.id(), forwarded, "source closed");
                return Ok(forwarded);
            }
            Err(e) if !e.is_fatal() => {
                tracing::debug!(from = %from.id(), error = %e, "skipping packet");
                continue;
            }
            Err(e) => return Err(e),
        };

        for packet in packets {
            match to.write_packet(packet).await {
                Ok(()) => forwarded += 1,
                Err(e) if !e.is_fatal() => {
                    tracing::debug!(to = %to.id(), error = %e, "dropping packet");
                }
                Err(e) => return Err(e),
            }
        }
    }
}
