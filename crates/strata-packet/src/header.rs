//! The varuint32 header in front of every packet payload.
//!
//! ```text
//!  bits 13..12       11..10        9..0
//! ┌────────────┬──────────────┬───────────┐
//! │ target sub │  sender sub  │ packet id │
//! └────────────┴──────────────┴───────────┘
//! ```
//!
//! Sub-client ids multiplex split-screen players over one connection.
//! The translation layer only needs the packet id, which
//! [`Header::packet_id_of`] extracts without touching the rest.

use serde::{Deserialize, Serialize};
use strata_wire::{CodecError, Reader, Writer};

const ID_MASK: u32 = 0x3ff;
const SUB_CLIENT_MASK: u32 = 0x3;
const SENDER_SHIFT: u32 = 10;
const TARGET_SHIFT: u32 = 12;

/// A decoded packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Header {
    pub packet_id: u32,
    pub sender_sub_client: u8,
    pub target_sub_client: u8,
}

impl Header {
    /// A header for the main client (both sub-client ids 0).
    pub fn new(packet_id: u32) -> Self {
        Self {
            packet_id,
            ..Self::default()
        }
    }

    /// Extracts the packet id from a raw header value.
    pub const fn packet_id_of(raw: u32) -> u32 {
        raw & ID_MASK
    }

    /// Splits a raw header value into its fields.
    pub const fn from_raw(raw: u32) -> Self {
        Self {
            packet_id: Self::packet_id_of(raw),
            sender_sub_client: ((raw >> SENDER_SHIFT) & SUB_CLIENT_MASK) as u8,
            target_sub_client: ((raw >> TARGET_SHIFT) & SUB_CLIENT_MASK) as u8,
        }
    }

    /// Packs the fields back into a raw header value. Bits outside each
    /// field's width are dropped.
    pub const fn to_raw(&self) -> u32 {
        (self.packet_id & ID_MASK)
            | ((self.sender_sub_client as u32 & SUB_CLIENT_MASK) << SENDER_SHIFT)
            | ((self.target_sub_client as u32 & SUB_CLIENT_MASK) << TARGET_SHIFT)
    }

    pub fn read(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self::from_raw(r.varuint32()?))
    }

    pub fn write(&self, w: &mut Writer) {
        w.varuint32(self.to_raw());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_id_of_ignores_sub_client_bits() {
        let raw = 167 | (1 << 10) | (3 << 12);
        assert_eq!(Header::packet_id_of(raw), 167);
    }

    #[test]
    fn test_from_raw_to_raw() {
        let header = Header {
            packet_id: 12,
            sender_sub_client: 2,
            target_sub_client: 1,
        };
        assert_eq!(Header::from_raw(header.to_raw()), header);
    }

    #[test]
    fn test_main_client_header_of_small_id_is_one_byte() {
        let mut w = Writer::new(strata_wire::CURRENT_PROTOCOL);
        Header::new(12).write(&mut w);
        assert_eq!(w.as_slice(), &[12]);
    }

    #[test]
    fn test_read_truncated_header() {
        let mut r = Reader::new(&[], strata_wire::CURRENT_PROTOCOL);
        assert!(Header::read(&mut r).unwrap_err().is_truncated());
    }
}
