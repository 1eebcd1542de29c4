//! Error types for the protocol layer.

use strata_packet::PacketError;

/// Errors that can occur while converting packets between a protocol
/// version and the canonical shapes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The packet has no representation on the other side of the
    /// conversion. Never dropped silently: the caller decides what to do.
    #[error("protocol {protocol} cannot convert {packet}: {reason}")]
    UnsupportedConversion {
        protocol: i32,
        packet: &'static str,
        reason: &'static str,
    },

    /// Two descriptors with the same id were registered.
    #[error("protocol {id} registered twice")]
    DuplicateProtocol { id: i32 },

    #[error(transparent)]
    Packet(#[from] PacketError),
}

impl ProtocolError {
    /// Builds an [`UnsupportedConversion`](Self::UnsupportedConversion)
    /// and logs it.
    pub(crate) fn unsupported(protocol: i32, packet: &'static str, reason: &'static str) -> Self {
        tracing::error!(protocol, packet, reason, "unsupported packet conversion");
        Self::UnsupportedConversion {
            protocol,
            packet,
            reason,
        }
    }
}
