//! The closed set of packet kinds.
//!
//! [`Packet`] is a sum type over every kind in the catalog. Conversion
//! tables match on it exhaustively, so adding a kind makes the compiler
//! point at every table that needs a rule for it.

use serde::{Deserialize, Serialize};
use strata_wire::{CodecError, Marshal, Reader, Writer};

use crate::catalog::{
    AddPlayer, AdventureSettings, RemoveActor, RemoveVolumeEntity, TickSync, UpdateAbilities,
};

/// A packet kind in the catalog.
///
/// `Marshal` provides the version-aware layout; this trait adds the
/// identity the pool and the header need.
pub trait PacketPayload: Marshal + Into<Packet> {
    /// Wire id of this kind.
    const ID: u32;
    /// Human-readable name used in logs and errors.
    const NAME: &'static str;
}

/// Defines the `Packet` enum and its dispatch from a list of kinds.
macro_rules! define_packets {
    ($($kind:ident),+ $(,)?) => {
        /// Any packet in the catalog.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "type", content = "data")]
        pub enum Packet {
            $($kind($kind),)+
        }

        impl Packet {
            /// Wire id of the wrapped kind.
            pub fn id(&self) -> u32 {
                match self {
                    $(Self::$kind(_) => <$kind as PacketPayload>::ID,)+
                }
            }

            /// Name of the wrapped kind.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$kind(_) => <$kind as PacketPayload>::NAME,)+
                }
            }

            /// Writes the payload (without header) in the writer's layout.
            pub fn marshal(&self, w: &mut Writer) -> Result<(), CodecError> {
                match self {
                    $(Self::$kind(pk) => pk.marshal(w),)+
                }
            }
        }

        $(
            impl From<$kind> for Packet {
                fn from(pk: $kind) -> Self {
                    Self::$kind(pk)
                }
            }
        )+
    };
}

define_packets! {
    AddPlayer,
    RemoveActor,
    TickSync,
    AdventureSettings,
    RemoveVolumeEntity,
    UpdateAbilities,
}

/// Decodes a payload as kind `T` and wraps it.
///
/// Instantiations of this function are the constructors stored in a
/// [`Pool`](crate::Pool).
pub fn decode_as<T: PacketPayload>(r: &mut Reader<'_>) -> Result<Packet, CodecError> {
    T::unmarshal(r).map(Into::into)
}
