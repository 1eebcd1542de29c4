//! Error types for the session layer.

use strata_packet::PacketError;
use strata_protocol::ProtocolError;

/// Errors that can occur while negotiating or translating packets for one
/// connection.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A packet was decoded or encoded before a protocol was negotiated.
    #[error("no protocol negotiated")]
    ProtocolNotNegotiated,

    /// The session already speaks a protocol. Renegotiation is rejected.
    #[error("protocol {protocol} already negotiated")]
    AlreadyNegotiated { protocol: i32 },

    /// The client asked for a version the registry does not hold.
    #[error("unsupported protocol {protocol}")]
    UnsupportedProtocol { protocol: i32 },

    /// A payload decoded cleanly but left bytes unread, and the session
    /// is configured to reject that.
    #[error("{count} trailing bytes after {packet}")]
    TrailingBytes { packet: &'static str, count: usize },

    /// An incoming buffer exceeds `max_packet_size`.
    #[error("packet of {len} bytes exceeds limit of {max}")]
    PacketTooLarge { len: usize, max: usize },

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The config could not be parsed.
    #[cfg(feature = "json")]
    #[error("invalid session config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<PacketError> for SessionError {
    fn from(err: PacketError) -> Self {
        Self::Protocol(ProtocolError::Packet(err))
    }
}

impl SessionError {
    /// Returns `true` if the bytes of a single packet were bad. The
    /// connection may drop that packet and carry on.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::TrailingBytes { .. }
                | Self::PacketTooLarge { .. }
                | Self::Protocol(ProtocolError::Packet(PacketError::Codec(_)))
        )
    }

    /// Returns `true` if the connection should be closed: the peer broke
    /// the protocol, the session was driven out of order, or a conversion
    /// table has no rule for a packet.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ProtocolNotNegotiated
                | Self::AlreadyNegotiated { .. }
                | Self::UnsupportedProtocol { .. }
                | Self::Protocol(
                    ProtocolError::Packet(PacketError::UnknownPacketId { .. })
                        | ProtocolError::UnsupportedConversion { .. }
                )
        )
    }
}
