//! Whole-packet encoding and decoding: header plus payload.
//!
//! These two functions are the only places that put a header in front of
//! a payload or take one off. Everything version-specific happens inside
//! the packet's own `Marshal` impl.

use strata_wire::{Reader, Writer};

use crate::{Header, Packet, PacketError, Pool};

/// A packet taken off the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub header: Header,
    pub packet: Packet,
    /// Bytes left in the buffer after the payload was read.
    pub trailing: usize,
}

/// Encodes `packet` with a header for `protocol_id`.
///
/// # Errors
/// Returns [`PacketError::Codec`] if a sequence does not fit its prefix.
pub fn encode(packet: &Packet, header: Header, protocol_id: i32) -> Result<Vec<u8>, PacketError> {
    let mut w = Writer::new(protocol_id);
    header.write(&mut w);
    packet.marshal(&mut w)?;
    Ok(w.into_bytes())
}

/// Decodes one buffer holding exactly one packet.
///
/// # Errors
/// - [`PacketError::UnknownPacketId`] if `pool` has no decoder for the id
/// - [`PacketError::Codec`] if the header or payload is malformed
pub fn decode(buf: &[u8], pool: &Pool, protocol_id: i32) -> Result<Decoded, PacketError> {
    let mut r = Reader::new(buf, protocol_id);
    let header = Header::read(&mut r)?;
    let decoder = pool.lookup(header.packet_id)?;
    let packet = decoder(&mut r)?;
    Ok(Decoded {
        header,
        packet,
        trailing: r.remaining(),
    })
}
