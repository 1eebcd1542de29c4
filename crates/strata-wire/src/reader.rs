//! The decoding half of the binary cursor.
//!
//! A [`Reader`] borrows exactly one packet's payload and walks it front to
//! back. Every method here has a twin in [`Writer`](crate::Writer) that
//! produces the identical byte layout, and the pair is what the packet
//! catalog builds on.
//!
//! Reads never panic: before touching the buffer each method checks how
//! many bytes remain and returns [`CodecError::Truncated`] instead.

use std::collections::BTreeMap;

use bytes::Buf;
use uuid::Uuid;

use crate::types::{BlockPos, MetadataValue, Vec3};
use crate::{CodecError, Marshal};

/// Maximum encoded size of a 32-bit varint.
const MAX_VARINT32_LEN: usize = 5;
/// Maximum encoded size of a 64-bit varint.
const MAX_VARINT64_LEN: usize = 10;

/// Reads wire primitives from a borrowed buffer, tagged with the protocol
/// id the bytes were produced for.
#[derive(Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    len: usize,
    protocol_id: i32,
}

impl<'a> Reader<'a> {
    /// Creates a reader over `buf` for the given protocol id.
    pub fn new(buf: &'a [u8], protocol_id: i32) -> Self {
        Self {
            buf,
            len: buf.len(),
            protocol_id,
        }
    }

    /// The protocol id every version-conditional branch compares against.
    pub fn protocol_id(&self) -> i32 {
        self.protocol_id
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.len - self.buf.len()
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// Returns `true` once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        !self.buf.has_remaining()
    }

    fn need(&self, n: usize) -> Result<(), CodecError> {
        if self.buf.remaining() < n {
            return Err(CodecError::Truncated {
                offset: self.offset(),
                needed: n,
                available: self.buf.remaining(),
            });
        }
        Ok(())
    }

    // -- Fixed width ------------------------------------------------------

    pub fn u8(&mut self) -> Result<u8, CodecError> {
        self.need(1)?;
        Ok(self.buf.get_u8())
    }

    pub fn i8(&mut self) -> Result<i8, CodecError> {
        self.need(1)?;
        Ok(self.buf.get_i8())
    }

    pub fn bool(&mut self) -> Result<bool, CodecError> {
        let offset = self.offset();
        match self.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(CodecError::InvalidBool { offset, value }),
        }
    }

    pub fn u16(&mut self) -> Result<u16, CodecError> {
        self.need(2)?;
        Ok(self.buf.get_u16_le())
    }

    pub fn i16(&mut self) -> Result<i16, CodecError> {
        self.need(2)?;
        Ok(self.buf.get_i16_le())
    }

    pub fn u32(&mut self) -> Result<u32, CodecError> {
        self.need(4)?;
        Ok(self.buf.get_u32_le())
    }

    pub fn i32(&mut self) -> Result<i32, CodecError> {
        self.need(4)?;
        Ok(self.buf.get_i32_le())
    }

    pub fn u64(&mut self) -> Result<u64, CodecError> {
        self.need(8)?;
        Ok(self.buf.get_u64_le())
    }

    pub fn i64(&mut self) -> Result<i64, CodecError> {
        self.need(8)?;
        Ok(self.buf.get_i64_le())
    }

    pub fn f32(&mut self) -> Result<f32, CodecError> {
        self.need(4)?;
        Ok(self.buf.get_f32_le())
    }

    // -- Variable length --------------------------------------------------

    /// Reads an unsigned LEB128 integer of at most 5 bytes.
    ///
    /// The fifth byte may only carry the top 4 bits of a `u32`; anything
    /// else is [`CodecError::MalformedVarint`].
    pub fn varuint32(&mut self) -> Result<u32, CodecError> {
        let start = self.offset();
        let mut value: u32 = 0;
        for i in 0..MAX_VARINT32_LEN {
            let b = self.u8()?;
            if i == MAX_VARINT32_LEN - 1 && b > 0x0f {
                return Err(CodecError::MalformedVarint { offset: start });
            }
            value |= u32::from(b & 0x7f) << (7 * i);
            if b & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(CodecError::MalformedVarint { offset: start })
    }

    /// Reads a zig-zag encoded signed 32-bit varint.
    pub fn varint32(&mut self) -> Result<i32, CodecError> {
        let ux = self.varuint32()?;
        Ok(((ux >> 1) as i32) ^ -((ux & 1) as i32))
    }

    /// Reads an unsigned LEB128 integer of at most 10 bytes.
    pub fn varuint64(&mut self) -> Result<u64, CodecError> {
        let start = self.offset();
        let mut value: u64 = 0;
        for i in 0..MAX_VARINT64_LEN {
            let b = self.u8()?;
            if i == MAX_VARINT64_LEN - 1 && b > 0x01 {
                return Err(CodecError::MalformedVarint { offset: start });
            }
            value |= u64::from(b & 0x7f) << (7 * i);
            if b & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(CodecError::MalformedVarint { offset: start })
    }

    /// Reads a zig-zag encoded signed 64-bit varint.
    pub fn varint64(&mut self) -> Result<i64, CodecError> {
        let ux = self.varuint64()?;
        Ok(((ux >> 1) as i64) ^ -((ux & 1) as i64))
    }

    // -- Length prefixed --------------------------------------------------

    /// Reads a varuint32 length and checks it against what is left.
    fn length(&mut self) -> Result<usize, CodecError> {
        let len = self.varuint32()? as usize;
        self.need(len)?;
        Ok(len)
    }

    /// Reads a varuint32-prefixed byte slice.
    pub fn byte_slice(&mut self) -> Result<Vec<u8>, CodecError> {
        let len = self.length()?;
        let mut out = vec![0; len];
        self.buf.copy_to_slice(&mut out);
        Ok(out)
    }

    /// Reads a varuint32-prefixed UTF-8 string.
    pub fn string(&mut self) -> Result<String, CodecError> {
        let len = self.length()?;
        let offset = self.offset();
        let s = std::str::from_utf8(&self.buf[..len])
            .map_err(|_| CodecError::MalformedString { offset })?
            .to_owned();
        self.buf.advance(len);
        Ok(s)
    }

    /// Reads a sequence of sub-records prefixed with a varuint32 count.
    pub fn slice<T: Marshal>(&mut self) -> Result<Vec<T>, CodecError> {
        let count = self.varuint32()? as usize;
        self.elements(count)
    }

    /// Reads a sequence of sub-records prefixed with a single-byte count.
    pub fn slice_u8_len<T: Marshal>(&mut self) -> Result<Vec<T>, CodecError> {
        let count = usize::from(self.u8()?);
        self.elements(count)
    }

    fn elements<T: Marshal>(&mut self, count: usize) -> Result<Vec<T>, CodecError> {
        // Every sub-record on the wire takes at least one byte, so a count
        // larger than what is left can never be satisfied.
        self.need(count)?;
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(T::unmarshal(self)?);
        }
        Ok(out)
    }

    // -- Composite --------------------------------------------------------

    pub fn vec3(&mut self) -> Result<Vec3, CodecError> {
        Ok(Vec3::new(self.f32()?, self.f32()?, self.f32()?))
    }

    pub fn block_pos(&mut self) -> Result<BlockPos, CodecError> {
        Ok(BlockPos::new(self.varint32()?, self.varint32()?, self.varint32()?))
    }

    /// Reads a UUID stored as two byte-reversed 8-byte halves.
    pub fn uuid(&mut self) -> Result<Uuid, CodecError> {
        let hi = self.u64()?;
        let lo = self.u64()?;
        Ok(Uuid::from_u64_pair(hi, lo))
    }

    /// Reads an entity metadata map.
    pub fn entity_metadata(&mut self) -> Result<BTreeMap<u32, MetadataValue>, CodecError> {
        let count = self.varuint32()? as usize;
        self.need(count)?;
        let mut map = BTreeMap::new();
        for _ in 0..count {
            let key = self.varuint32()?;
            let kind = self.varuint32()?;
            let value = match kind {
                MetadataValue::BYTE => MetadataValue::Byte(self.u8()?),
                MetadataValue::INT16 => MetadataValue::Int16(self.i16()?),
                MetadataValue::INT32 => MetadataValue::Int32(self.varint32()?),
                MetadataValue::FLOAT32 => MetadataValue::Float32(self.f32()?),
                MetadataValue::STRING => MetadataValue::String(self.string()?),
                MetadataValue::BLOCK_POS => MetadataValue::BlockPos(self.block_pos()?),
                MetadataValue::INT64 => MetadataValue::Int64(self.varint64()?),
                MetadataValue::VEC3 => MetadataValue::Vec3(self.vec3()?),
                kind => return Err(CodecError::UnsupportedMetadataType { key, kind }),
            };
            map.insert(key, value);
        }
        Ok(map)
    }
}
