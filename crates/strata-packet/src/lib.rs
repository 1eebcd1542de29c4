//! Packet catalog for Strata.
//!
//! - **Kinds** ([`catalog`]): one struct per packet, each reading and
//!   writing itself according to the cursor's protocol id.
//! - **[`Packet`]**: the closed sum type over every kind.
//! - **[`Header`]**: the varuint32 in front of every payload.
//! - **[`Pool`]**: id → decoder, one per protocol version.
//! - **[`codec`]**: header + payload in one call.
//!
//! ```text
//! bytes ──Header::read──→ id ──Pool::lookup──→ decoder ──→ Packet
//! ```

pub mod catalog;
pub mod codec;
mod error;
mod header;
mod packet;
mod pool;

pub use catalog::{
    AddPlayer, AdventureSettings, RemoveActor, RemoveVolumeEntity, TickSync, UpdateAbilities,
};
pub use codec::Decoded;
pub use error::PacketError;
pub use header::Header;
pub use packet::{Packet, PacketPayload, decode_as};
pub use pool::{Decoder, Pool};

/// Wire ids of the catalog's packet kinds.
pub mod ids {
    pub const ADD_PLAYER: u32 = 0x0c;
    pub const REMOVE_ACTOR: u32 = 0x0e;
    pub const TICK_SYNC: u32 = 0x17;
    pub const ADVENTURE_SETTINGS: u32 = 0x37;
    pub const REMOVE_VOLUME_ENTITY: u32 = 0xa7;
    pub const UPDATE_ABILITIES: u32 = 0xbb;
}
