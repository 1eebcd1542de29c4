//! The encoding half of the binary cursor.
//!
//! Mirrors [`Reader`](crate::Reader) method for method. Writing to a
//! growable buffer cannot run out of space, so most methods are
//! infallible; only sequences with a bounded count prefix can fail.

use std::collections::BTreeMap;

use bytes::{BufMut, BytesMut};
use uuid::Uuid;

use crate::types::{BlockPos, MetadataValue, Vec3};
use crate::{CodecError, Marshal};

/// Writes wire primitives into a growable buffer, tagged with the
/// protocol id the bytes are meant for.
#[derive(Debug)]
pub struct Writer {
    buf: BytesMut,
    protocol_id: i32,
}

impl Writer {
    /// Creates an empty writer for the given protocol id.
    pub fn new(protocol_id: i32) -> Self {
        Self {
            buf: BytesMut::new(),
            protocol_id,
        }
    }

    /// The protocol id every version-conditional branch compares against.
    pub fn protocol_id(&self) -> i32 {
        self.protocol_id
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Borrows the bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer and returns the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf.to_vec()
    }

    // -- Fixed width ------------------------------------------------------

    pub fn u8(&mut self, v: u8) {
        self.buf.put_u8(v);
    }

    pub fn i8(&mut self, v: i8) {
        self.buf.put_i8(v);
    }

    pub fn bool(&mut self, v: bool) {
        self.buf.put_u8(u8::from(v));
    }

    pub fn u16(&mut self, v: u16) {
        self.buf.put_u16_le(v);
    }

    pub fn i16(&mut self, v: i16) {
        self.buf.put_i16_le(v);
    }

    pub fn u32(&mut self, v: u32) {
        self.buf.put_u32_le(v);
    }

    pub fn i32(&mut self, v: i32) {
        self.buf.put_i32_le(v);
    }

    pub fn u64(&mut self, v: u64) {
        self.buf.put_u64_le(v);
    }

    pub fn i64(&mut self, v: i64) {
        self.buf.put_i64_le(v);
    }

    pub fn f32(&mut self, v: f32) {
        self.buf.put_f32_le(v);
    }

    // -- Variable length --------------------------------------------------

    pub fn varuint32(&mut self, mut v: u32) {
        while v >= 0x80 {
            self.buf.put_u8(v as u8 | 0x80);
            v >>= 7;
        }
        self.buf.put_u8(v as u8);
    }

    pub fn varint32(&mut self, v: i32) {
        self.varuint32(((v << 1) ^ (v >> 31)) as u32);
    }

    pub fn varuint64(&mut self, mut v: u64) {
        while v >= 0x80 {
            self.buf.put_u8(v as u8 | 0x80);
            v >>= 7;
        }
        self.buf.put_u8(v as u8);
    }

    pub fn varint64(&mut self, v: i64) {
        self.varuint64(((v << 1) ^ (v >> 63)) as u64);
    }

    // -- Length prefixed --------------------------------------------------

    fn length(&mut self, len: usize) -> Result<(), CodecError> {
        let len = u32::try_from(len).map_err(|_| CodecError::LengthOverflow {
            len,
            max: u32::MAX as usize,
        })?;
        self.varuint32(len);
        Ok(())
    }

    /// Writes a varuint32-prefixed byte slice.
    pub fn byte_slice(&mut self, v: &[u8]) -> Result<(), CodecError> {
        self.length(v.len())?;
        self.buf.put_slice(v);
        Ok(())
    }

    /// Writes a varuint32-prefixed UTF-8 string.
    pub fn string(&mut self, v: &str) -> Result<(), CodecError> {
        self.byte_slice(v.as_bytes())
    }

    /// Writes a sequence of sub-records prefixed with a varuint32 count.
    pub fn slice<T: Marshal>(&mut self, items: &[T]) -> Result<(), CodecError> {
        self.length(items.len())?;
        items.iter().try_for_each(|item| item.marshal(self))
    }

    /// Writes a sequence of sub-records prefixed with a single-byte count.
    pub fn slice_u8_len<T: Marshal>(&mut self, items: &[T]) -> Result<(), CodecError> {
        let count = u8::try_from(items.len()).map_err(|_| CodecError::LengthOverflow {
            len: items.len(),
            max: u8::MAX as usize,
        })?;
        self.u8(count);
        items.iter().try_for_each(|item| item.marshal(self))
    }

    // -- Composite --------------------------------------------------------

    pub fn vec3(&mut self, v: Vec3) {
        self.f32(v.x);
        self.f32(v.y);
        self.f32(v.z);
    }

    pub fn block_pos(&mut self, v: BlockPos) {
        self.varint32(v.x);
        self.varint32(v.y);
        self.varint32(v.z);
    }

    /// Writes a UUID as two byte-reversed 8-byte halves.
    pub fn uuid(&mut self, v: Uuid) {
        let (hi, lo) = v.as_u64_pair();
        self.u64(hi);
        self.u64(lo);
    }

    /// Writes an entity metadata map in ascending key order.
    pub fn entity_metadata(
        &mut self,
        map: &BTreeMap<u32, MetadataValue>,
    ) -> Result<(), CodecError> {
        self.length(map.len())?;
        for (&key, value) in map {
            self.varuint32(key);
            self.varuint32(value.kind());
            match value {
                MetadataValue::Byte(v) => self.u8(*v),
                MetadataValue::Int16(v) => self.i16(*v),
                MetadataValue::Int32(v) => self.varint32(*v),
                MetadataValue::Float32(v) => self.f32(*v),
                MetadataValue::String(v) => self.string(v)?,
                MetadataValue::BlockPos(v) => self.block_pos(*v),
                MetadataValue::Int64(v) => self.varint64(*v),
                MetadataValue::Vec3(v) => self.vec3(*v),
            }
        }
        Ok(())
    }
}
