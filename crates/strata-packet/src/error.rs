//! Error types for the packet layer.

use strata_wire::CodecError;

/// Errors that can occur while identifying or decoding a packet.
///
/// An unknown id and a malformed payload are kept apart on purpose: the
/// first usually means both ends disagree about the protocol version, the
/// second means the bytes themselves are bad.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PacketError {
    /// The id is not registered in the pool of the negotiated version.
    #[error("unknown packet id {id}")]
    UnknownPacketId { id: u32 },

    /// An id was registered twice in the same pool.
    #[error("packet id {id} registered twice")]
    DuplicatePacketId { id: u32 },

    /// The header or payload could not be read or written.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
