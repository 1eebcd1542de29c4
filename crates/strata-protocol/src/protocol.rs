//! The protocol descriptor trait and the canonical descriptor.
//!
//! A descriptor knows three things about one version: its id and name,
//! which packet kinds its ids map to, and how to turn its packets into the
//! canonical shapes and back.
//!
//! ```text
//!              convert_to_latest
//! version V ──────────────────────→ canonical
//!           ←──────────────────────
//!              convert_from_latest
//! ```
//!
//! Conversions take one packet and return an ordered list. Callers keep
//! that order: a spawn that fans out into two packets must reach the other
//! side in the order it was produced.

use std::fmt;

use strata_packet::{Packet, Pool};
use strata_wire::ProtocolVersion;

use crate::{Features, ProtocolError};

/// One supported protocol version.
///
/// Implementations are immutable after construction and shared between
/// connections behind an `Arc`.
pub trait Protocol: Send + Sync + fmt::Debug {
    /// Id and display name of this version.
    fn version(&self) -> ProtocolVersion;

    /// Numeric protocol id, as sent by the client at login.
    fn id(&self) -> i32 {
        self.version().id
    }

    /// Game version string, such as `"1.18.10"`.
    fn version_string(&self) -> &'static str {
        self.version().name
    }

    /// The packet pool used to decode packets of this version.
    fn packets(&self) -> &Pool;

    /// Converts a packet read from a peer of this version into zero or
    /// more canonical packets.
    ///
    /// # Errors
    /// Returns [`ProtocolError::UnsupportedConversion`] if the packet has
    /// no canonical counterpart and cannot be dropped.
    fn convert_to_latest(
        &self,
        packet: Packet,
        features: &Features,
    ) -> Result<Vec<Packet>, ProtocolError>;

    /// Converts a canonical packet into zero or more packets of this
    /// version.
    ///
    /// # Errors
    /// Returns [`ProtocolError::UnsupportedConversion`] if the packet
    /// cannot be expressed in this version.
    fn convert_from_latest(
        &self,
        packet: Packet,
        features: &Features,
    ) -> Result<Vec<Packet>, ProtocolError>;
}

/// The canonical protocol. Its packets already have the latest shapes, so
/// both conversions return their input unchanged.
#[derive(Debug, Clone)]
pub struct Current {
    pool: Pool,
}

impl Current {
    pub fn new() -> Self {
        Self {
            pool: Pool::latest(),
        }
    }
}

impl Default for Current {
    fn default() -> Self {
        Self::new()
    }
}

impl Protocol for Current {
    fn version(&self) -> ProtocolVersion {
        ProtocolVersion::V1_19_21
    }

    fn packets(&self) -> &Pool {
        &self.pool
    }

    fn convert_to_latest(
        &self,
        packet: Packet,
        _features: &Features,
    ) -> Result<Vec<Packet>, ProtocolError> {
        Ok(vec![packet])
    }

    fn convert_from_latest(
        &self,
        packet: Packet,
        _features: &Features,
    ) -> Result<Vec<Packet>, ProtocolError> {
        Ok(vec![packet])
    }
}
