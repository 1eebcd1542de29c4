//! Composite wire types shared by many packets.
//!
//! These are the "sub-records" of the protocol: small structures that
//! show up inside packet payloads (positions, items, entity links,
//! metadata values). Each one that travels in a sequence implements
//! [`Marshal`] so the generic `slice`/`slice_u8_len` helpers can carry it.

use serde::{Deserialize, Serialize};

use crate::{CodecError, Marshal, Reader, Writer};

// ---------------------------------------------------------------------------
// Vectors
// ---------------------------------------------------------------------------

/// Three `f32` components, used for positions and velocities.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// An integer block position. Each axis is a zig-zag varint on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

// ---------------------------------------------------------------------------
// Entity metadata
// ---------------------------------------------------------------------------

/// One value in an entity metadata map.
///
/// The wire carries a type tag before every value; the associated
/// constants are those tags. Tag 5 (NBT compound) has no layout here and
/// is rejected on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetadataValue {
    Byte(u8),
    Int16(i16),
    Int32(i32),
    Float32(f32),
    String(String),
    BlockPos(BlockPos),
    Int64(i64),
    Vec3(Vec3),
}

impl MetadataValue {
    pub const BYTE: u32 = 0;
    pub const INT16: u32 = 1;
    pub const INT32: u32 = 2;
    pub const FLOAT32: u32 = 3;
    pub const STRING: u32 = 4;
    pub const COMPOUND: u32 = 5;
    pub const BLOCK_POS: u32 = 6;
    pub const INT64: u32 = 7;
    pub const VEC3: u32 = 8;

    /// The wire type tag for this value.
    pub fn kind(&self) -> u32 {
        match self {
            Self::Byte(_) => Self::BYTE,
            Self::Int16(_) => Self::INT16,
            Self::Int32(_) => Self::INT32,
            Self::Float32(_) => Self::FLOAT32,
            Self::String(_) => Self::STRING,
            Self::BlockPos(_) => Self::BLOCK_POS,
            Self::Int64(_) => Self::INT64,
            Self::Vec3(_) => Self::VEC3,
        }
    }
}

// ---------------------------------------------------------------------------
// Entity links
// ---------------------------------------------------------------------------

/// A riding relation between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityLink {
    /// Unique id of the entity being ridden.
    pub ridden_entity_unique_id: i64,
    /// Unique id of the rider.
    pub rider_entity_unique_id: i64,
    /// Link type: 0 removes, 1 rider, 2 passenger.
    pub link_type: u8,
    pub immediate: bool,
    pub rider_initiated: bool,
}

impl Marshal for EntityLink {
    fn marshal(&self, w: &mut Writer) -> Result<(), CodecError> {
        w.varint64(self.ridden_entity_unique_id);
        w.varint64(self.rider_entity_unique_id);
        w.u8(self.link_type);
        w.bool(self.immediate);
        w.bool(self.rider_initiated);
        Ok(())
    }

    fn unmarshal(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            ridden_entity_unique_id: r.varint64()?,
            rider_entity_unique_id: r.varint64()?,
            link_type: r.u8()?,
            immediate: r.bool()?,
            rider_initiated: r.bool()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// An item stack as it appears inside an [`ItemInstance`].
///
/// `extra_data` holds the user-data blob (NBT, placement and destroy
/// lists) as opaque bytes; nothing in the translation layer looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemStack {
    /// Runtime network id of the item. 0 is air.
    pub network_id: i32,
    pub count: u16,
    pub metadata_value: u32,
    pub block_runtime_id: i32,
    pub extra_data: Vec<u8>,
}

/// An item stack together with its server-side stack network id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemInstance {
    /// 0 when the stack has no network id.
    pub stack_network_id: i32,
    pub stack: ItemStack,
}

impl ItemInstance {
    /// The empty hand.
    pub fn air() -> Self {
        Self::default()
    }

    pub fn is_air(&self) -> bool {
        self.stack.network_id == 0
    }
}

impl Marshal for ItemInstance {
    /// Air writes only its network id. Otherwise the stack network id is
    /// guarded by a presence flag.
    fn marshal(&self, w: &mut Writer) -> Result<(), CodecError> {
        let stack = &self.stack;
        w.varint32(stack.network_id);
        if self.is_air() {
            return Ok(());
        }
        w.u16(stack.count);
        w.varuint32(stack.metadata_value);
        let has_net_id = self.stack_network_id != 0;
        w.bool(has_net_id);
        if has_net_id {
            w.varint32(self.stack_network_id);
        }
        w.varint32(stack.block_runtime_id);
        w.byte_slice(&stack.extra_data)
    }

    fn unmarshal(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let network_id = r.varint32()?;
        if network_id == 0 {
            return Ok(Self::air());
        }
        let count = r.u16()?;
        let metadata_value = r.varuint32()?;
        let stack_network_id = if r.bool()? { r.varint32()? } else { 0 };
        let block_runtime_id = r.varint32()?;
        let extra_data = r.byte_slice()?;
        Ok(Self {
            stack_network_id,
            stack: ItemStack {
                network_id,
                count,
                metadata_value,
                block_runtime_id,
                extra_data,
            },
        })
    }
}
