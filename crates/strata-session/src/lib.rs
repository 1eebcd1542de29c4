//! Per-connection packet translation for Strata.
//!
//! A [`Session`] binds one connection to one protocol version and turns
//! its bytes into canonical packets and back.
//!
//! ```text
//! Transport (bytes) → Session (canonical packets) → game logic
//! ```

mod config;
mod error;
mod session;

pub use config::{DEFAULT_MAX_PACKET_SIZE, SessionConfig};
pub use error::SessionError;
pub use session::Session;
