//! Protocol descriptors for Strata.
//!
//! - **[`Protocol`]**: one supported version. It names its packet pool and
//!   converts its packets to and from the canonical shapes.
//! - **[`Current`]**: the canonical version; conversions are identity.
//! - **[`Legacy`]**: older versions and their conversion tables.
//! - **[`ProtocolRegistry`]**: every supported descriptor, keyed by id.
//! - **[`Features`]**: per-connection switches the conversions consult.
//!
//! ```text
//! Packet (version V) ──convert_to_latest──→ Vec<Packet> (canonical)
//! ```

mod error;
mod features;
mod legacy;
mod protocol;
mod registry;

pub use error::ProtocolError;
pub use features::Features;
pub use legacy::Legacy;
pub use protocol::{Current, Protocol};
pub use registry::ProtocolRegistry;
