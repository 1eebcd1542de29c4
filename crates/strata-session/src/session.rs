//! The per-connection translation context.
//!
//! A session starts unbound. The login handshake calls
//! [`Session::negotiate`] once with the client's protocol id; from then on
//! every buffer read from the connection goes through [`Session::decode`]
//! and every canonical packet to send goes through [`Session::encode`].
//! The `_with_header` variants carry the split-screen sub-client ids
//! through; the plain ones address the main client.
//!
//! ```text
//!           decode                                   encode
//! bytes ──header──pool──payload──convert_to_latest──→ canonical
//! bytes ←──header+payload──────convert_from_latest←── canonical
//! ```

use std::sync::Arc;

use strata_packet::{Header, Packet, codec};
use strata_protocol::{Protocol, ProtocolRegistry};
use strata_wire::ProtocolVersion;

use crate::{SessionConfig, SessionError};

/// Packet translation state for one connection.
///
/// Owned by the task that drives the connection. The descriptor is set
/// once through `&mut self`; decoding and encoding only need `&self`.
#[derive(Debug)]
pub struct Session {
    registry: Arc<ProtocolRegistry>,
    config: SessionConfig,
    protocol: Option<Arc<dyn Protocol>>,
}

impl Session {
    pub fn new(registry: Arc<ProtocolRegistry>, config: SessionConfig) -> Self {
        Self {
            registry,
            config,
            protocol: None,
        }
    }

    /// Binds the session to `protocol_id`.
    ///
    /// # Errors
    /// - [`SessionError::UnsupportedProtocol`] if the registry has no
    ///   descriptor for the id
    /// - [`SessionError::AlreadyNegotiated`] if called a second time
    pub fn negotiate(&mut self, protocol_id: i32) -> Result<ProtocolVersion, SessionError> {
        if let Some(current) = &self.protocol {
            return Err(SessionError::AlreadyNegotiated {
                protocol: current.id(),
            });
        }
        let protocol = self
            .registry
            .get(protocol_id)
            .ok_or(SessionError::UnsupportedProtocol {
                protocol: protocol_id,
            })?;
        let version = protocol.version();
        tracing::debug!(protocol = version.id, version = version.name, "protocol negotiated");
        self.protocol = Some(protocol);
        Ok(version)
    }

    /// The negotiated descriptor.
    ///
    /// # Errors
    /// Returns [`SessionError::ProtocolNotNegotiated`] before
    /// [`negotiate`](Self::negotiate) succeeds.
    pub fn protocol(&self) -> Result<&dyn Protocol, SessionError> {
        self.protocol
            .as_deref()
            .ok_or(SessionError::ProtocolNotNegotiated)
    }

    pub fn is_negotiated(&self) -> bool {
        self.protocol.is_some()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Decodes one buffer holding exactly one packet of the negotiated
    /// version and converts it to canonical packets, in order.
    ///
    /// # Errors
    /// - [`SessionError::ProtocolNotNegotiated`] before negotiation
    /// - [`SessionError::PacketTooLarge`] if `buf` exceeds the limit
    /// - [`SessionError::TrailingBytes`] if bytes are left and the config
    ///   rejects them
    /// - [`SessionError::Protocol`] for unknown ids, malformed payloads
    ///   and unsupported conversions
    pub fn decode(&self, buf: &[u8]) -> Result<Vec<Packet>, SessionError> {
        Ok(self.decode_with_header(buf)?.1)
    }

    /// Like [`decode`](Self::decode), also returning the header so the
    /// caller can route split-screen sub-clients.
    ///
    /// # Errors
    /// See [`decode`](Self::decode).
    pub fn decode_with_header(&self, buf: &[u8]) -> Result<(Header, Vec<Packet>), SessionError> {
        let protocol = self.protocol()?;
        if buf.len() > self.config.max_packet_size {
            return Err(SessionError::PacketTooLarge {
                len: buf.len(),
                max: self.config.max_packet_size,
            });
        }

        let decoded = codec::decode(buf, protocol.packets(), protocol.id())?;
        let packet = decoded.packet;
        tracing::trace!(
            protocol = protocol.id(),
            id = decoded.header.packet_id,
            packet = packet.name(),
            len = buf.len(),
            sender = decoded.header.sender_sub_client,
            target = decoded.header.target_sub_client,
            "decoded packet"
        );

        if decoded.trailing > 0 {
            if self.config.reject_trailing_bytes {
                return Err(SessionError::TrailingBytes {
                    packet: packet.name(),
                    count: decoded.trailing,
                });
            }
            tracing::warn!(
                protocol = protocol.id(),
                packet = packet.name(),
                count = decoded.trailing,
                "trailing bytes after packet"
            );
        }

        let packets = protocol.convert_to_latest(packet, &self.config.features)?;
        Ok((decoded.header, packets))
    }

    /// Converts a canonical packet to the negotiated version and encodes
    /// each resulting packet into its own buffer, in order.
    ///
    /// An empty result means the packet has no counterpart in this
    /// version and nothing needs to be sent.
    ///
    /// # Errors
    /// - [`SessionError::ProtocolNotNegotiated`] before negotiation
    /// - [`SessionError::Protocol`] if the conversion is unsupported or a
    ///   field does not fit its wire type
    pub fn encode(&self, packet: Packet) -> Result<Vec<Vec<u8>>, SessionError> {
        self.encode_with_header(packet, Header::default())
    }

    /// Like [`encode`](Self::encode), with the sub-client ids taken from
    /// `header`. Its packet id is ignored; each buffer gets the id of the
    /// packet it holds.
    ///
    /// # Errors
    /// See [`encode`](Self::encode).
    pub fn encode_with_header(
        &self,
        packet: Packet,
        header: Header,
    ) -> Result<Vec<Vec<u8>>, SessionError> {
        let protocol = self.protocol()?;
        let converted = protocol.convert_from_latest(packet, &self.config.features)?;
        let mut out = Vec::with_capacity(converted.len());
        for pk in &converted {
            let header = Header {
                packet_id: pk.id(),
                ..header
            };
            let buf = codec::encode(pk, header, protocol.id())?;
            tracing::trace!(
                protocol = protocol.id(),
                id = pk.id(),
                packet = pk.name(),
                len = buf.len(),
                "encoded packet"
            );
            out.push(buf);
        }
        Ok(out)
    }

    /// Encodes several canonical packets. Buffers come out in source
    /// order, each packet's fan-out kept together.
    ///
    /// # Errors
    /// Stops at the first packet that fails; see [`encode`](Self::encode).
    pub fn encode_batch(
        &self,
        packets: impl IntoIterator<Item = Packet>,
    ) -> Result<Vec<Vec<u8>>, SessionError> {
        let mut out = Vec::new();
        for packet in packets {
            out.extend(self.encode(packet)?);
        }
        Ok(out)
    }
}
