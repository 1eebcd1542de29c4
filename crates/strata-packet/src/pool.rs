//! Per-version packet pools: which id means which kind.
//!
//! A pool is built once, when a protocol descriptor is created, and is
//! only read afterwards. The same id may mean different kinds in two
//! pools; nothing here assumes otherwise.

use std::collections::HashMap;
use std::fmt;

use strata_wire::version::ID534;
use strata_wire::{CodecError, Reader};

use crate::catalog::{
    AddPlayer, AdventureSettings, RemoveActor, RemoveVolumeEntity, TickSync, UpdateAbilities,
};
use crate::{Packet, PacketError, PacketPayload, decode_as};

/// Constructs a packet of one kind from its payload.
pub type Decoder = fn(&mut Reader<'_>) -> Result<Packet, CodecError>;

/// Maps packet ids to decoders for one protocol version.
#[derive(Clone, Default)]
pub struct Pool {
    decoders: HashMap<u32, Decoder>,
}

impl Pool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// The pool of the canonical protocol.
    pub fn latest() -> Self {
        Self::for_protocol(strata_wire::CURRENT_PROTOCOL)
    }

    /// The pool for a protocol id.
    ///
    /// Versions from 534 on carry `UpdateAbilities`; older ones carry
    /// `AdventureSettings` and `TickSync` instead.
    pub fn for_protocol(protocol_id: i32) -> Self {
        let entries = entries(protocol_id);
        let count = entries.len();
        let decoders: HashMap<u32, Decoder> = entries.into_iter().collect();
        debug_assert_eq!(decoders.len(), count, "repeated id in pool {protocol_id}");
        Self { decoders }
    }

    /// Registers a decoder under `id`.
    ///
    /// # Errors
    /// Returns [`PacketError::DuplicatePacketId`] if `id` is taken.
    pub fn register(&mut self, id: u32, decoder: Decoder) -> Result<(), PacketError> {
        if self.decoders.contains_key(&id) {
            return Err(PacketError::DuplicatePacketId { id });
        }
        self.decoders.insert(id, decoder);
        Ok(())
    }

    /// Registers kind `T` under its own id.
    pub fn register_packet<T: PacketPayload>(&mut self) -> Result<(), PacketError> {
        self.register(T::ID, decode_as::<T>)
    }

    /// Finds the decoder for `id`.
    ///
    /// # Errors
    /// Returns [`PacketError::UnknownPacketId`] if the id is not
    /// registered. This is a protocol violation by the peer, not a
    /// malformed payload.
    pub fn lookup(&self, id: u32) -> Result<Decoder, PacketError> {
        self.decoders
            .get(&id)
            .copied()
            .ok_or(PacketError::UnknownPacketId { id })
    }

    pub fn contains(&self, id: u32) -> bool {
        self.decoders.contains_key(&id)
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.decoders.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool").field("ids", &self.ids()).finish()
    }
}

/// The kinds each version registers.
fn entries(protocol_id: i32) -> Vec<(u32, Decoder)> {
    let mut entries = vec![
        entry::<AddPlayer>(),
        entry::<RemoveActor>(),
        entry::<RemoveVolumeEntity>(),
    ];
    if protocol_id >= ID534 {
        entries.push(entry::<UpdateAbilities>());
    } else {
        entries.push(entry::<AdventureSettings>());
        entries.push(entry::<TickSync>());
    }
    entries
}

fn entry<T: PacketPayload>() -> (u32, Decoder) {
    (T::ID, decode_as::<T> as Decoder)
}
