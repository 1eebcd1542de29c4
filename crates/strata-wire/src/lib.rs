//! Wire layer for Strata.
//!
//! This crate is the binary cursor the whole translation engine is built
//! on:
//!
//! - **Cursor** ([`Reader`], [`Writer`]): position-tracked byte buffers with
//!   typed read/write pairs, each tagged with the protocol id the bytes
//!   belong to.
//! - **Sub-records** ([`Vec3`], [`ItemInstance`], [`EntityLink`],
//!   [`AbilityLayer`], ...): composite values that appear inside packets.
//! - **Versions** ([`ProtocolVersion`], `ID486`..`ID545`): the constants
//!   every conditional field layout compares against.
//! - **Errors** ([`CodecError`]): what can go wrong with one packet's bytes.
//!
//! # The symmetry rule
//!
//! For every `Writer` method there is a `Reader` method that consumes
//! exactly the bytes it produced, for every protocol id. Packets are
//! written as pairs of `marshal`/`unmarshal` functions that call matching
//! methods in the same order under the same version predicates, so the
//! rule carries upward.
//!
//! ```text
//! Packet fields ──marshal──→ Writer ──bytes──→ Reader ──unmarshal──→ Packet fields
//! ```

pub mod abilities;
mod error;
mod reader;
pub mod types;
pub mod version;
mod writer;

pub use abilities::AbilityLayer;
pub use error::CodecError;
pub use reader::Reader;
pub use types::{BlockPos, EntityLink, ItemInstance, ItemStack, MetadataValue, Vec3};
pub use version::{CURRENT_PROTOCOL, CURRENT_VERSION, ProtocolVersion};
pub use writer::Writer;

/// A value that can write itself to a [`Writer`] and read itself back
/// from a [`Reader`].
///
/// Implementations must consult `protocol_id()` the same way on both
/// sides so the layouts match for every version.
pub trait Marshal: Sized {
    /// Writes `self` in the layout of the writer's protocol.
    ///
    /// # Errors
    /// Returns [`CodecError::LengthOverflow`] if a sequence is too long
    /// for its count prefix.
    fn marshal(&self, w: &mut Writer) -> Result<(), CodecError>;

    /// Reads a value in the layout of the reader's protocol.
    ///
    /// # Errors
    /// Returns a [`CodecError`] if the bytes are truncated or malformed.
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self, CodecError>;
}
