//! Protocol version constants.
//!
//! Every version-conditional branch in the packet catalog compares the
//! reader's or writer's protocol id against one of these constants, never
//! against [`CURRENT_PROTOCOL`] directly. That keeps a packet's encode and
//! decode paths symmetric for every version, old or new.

use std::fmt;

/// Protocol id for 1.19.21, the canonical version.
pub const ID545: i32 = 545;
/// Protocol id for 1.19.10. Ability layers replace the legacy permission
/// bitfields from this version on.
pub const ID534: i32 = 534;
/// Protocol id for 1.19.0.
pub const ID527: i32 = 527;
/// Protocol id for 1.18.30. Adds the game type to `AddPlayer` and the
/// dimension to `RemoveVolumeEntity`.
pub const ID503: i32 = 503;
/// Protocol id for 1.18.10, the oldest supported version.
pub const ID486: i32 = 486;

/// The canonical protocol id that all game logic speaks.
pub const CURRENT_PROTOCOL: i32 = ID545;
/// Display string for [`CURRENT_PROTOCOL`].
pub const CURRENT_VERSION: &str = "1.19.21";

/// A protocol id paired with the game version it shipped in.
///
/// Ordering follows the numeric id, which is what the conditional codec
/// branches rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolVersion {
    pub id: i32,
    pub name: &'static str,
}

impl ProtocolVersion {
    pub const V1_19_21: Self = Self::new(ID545, CURRENT_VERSION);
    pub const V1_19_10: Self = Self::new(ID534, "1.19.10");
    pub const V1_19_0: Self = Self::new(ID527, "1.19.0");
    pub const V1_18_30: Self = Self::new(ID503, "1.18.30");
    pub const V1_18_10: Self = Self::new(ID486, "1.18.10");

    /// Every supported version, newest first.
    pub const SUPPORTED: [Self; 5] = [
        Self::V1_19_21,
        Self::V1_19_10,
        Self::V1_19_0,
        Self::V1_18_30,
        Self::V1_18_10,
    ];

    pub const fn new(id: i32, name: &'static str) -> Self {
        Self { id, name }
    }

    /// Looks up a supported version by protocol id.
    pub fn from_id(id: i32) -> Option<Self> {
        Self::SUPPORTED.into_iter().find(|v| v.id == id)
    }

    /// Returns `true` for the canonical version.
    pub fn is_current(&self) -> bool {
        self.id == CURRENT_PROTOCOL
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
