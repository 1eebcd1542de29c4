//! Ability layers and their mapping to the legacy permission bitfields.
//!
//! From protocol 534 on, a player's abilities travel as a list of
//! [`AbilityLayer`]s. Older protocols carry the same information as two
//! bitfields ("adventure flags" and "action permissions"). The functions
//! here convert between the two shapes so the conversion tables do not
//! each reinvent the bit mapping.
//!
//! ```text
//! layer bit            legacy bit
//! ─────────────────    ─────────────────────────────────
//! BUILD             ↔  action BUILD
//! MINE              ↔  action MINE
//! DOORS_AND_SWITCHES↔  action DOORS_AND_SWITCHES
//! OPEN_CONTAINERS   ↔  action OPEN_CONTAINERS
//! ATTACK_PLAYERS    ↔  action ATTACK_PLAYERS
//! ATTACK_MOBS       ↔  action ATTACK_MOBS
//! OPERATOR_COMMANDS ↔  action OPERATOR
//! TELEPORT          ↔  action TELEPORT
//! MAY_FLY           ↔  flag ALLOW_FLIGHT
//! FLYING            ↔  flag FLYING
//! NO_CLIP           ↔  flag NO_CLIP
//! WORLD_BUILDER     ↔  flag WORLD_BUILDER
//! MUTED             ↔  flag MUTED
//! !BUILD && !MINE    →  flag WORLD_IMMUTABLE
//! ```
//!
//! Legacy flags with no layer counterpart (no PvM, no MvP, auto jump,
//! show name tags) are dropped when converting to a layer.

use serde::{Deserialize, Serialize};

use crate::{CodecError, Marshal, Reader, Writer};

/// Bit indexes into [`AbilityLayer::abilities`] and [`AbilityLayer::values`].
pub mod ability {
    pub const BUILD: u32 = 0;
    pub const MINE: u32 = 1;
    pub const DOORS_AND_SWITCHES: u32 = 2;
    pub const OPEN_CONTAINERS: u32 = 3;
    pub const ATTACK_PLAYERS: u32 = 4;
    pub const ATTACK_MOBS: u32 = 5;
    pub const OPERATOR_COMMANDS: u32 = 6;
    pub const TELEPORT: u32 = 7;
    pub const INVULNERABLE: u32 = 8;
    pub const FLYING: u32 = 9;
    pub const MAY_FLY: u32 = 10;
    pub const INSTANT_BUILD: u32 = 11;
    pub const LIGHTNING: u32 = 12;
    pub const FLY_SPEED: u32 = 13;
    pub const WALK_SPEED: u32 = 14;
    pub const MUTED: u32 = 15;
    pub const WORLD_BUILDER: u32 = 16;
    pub const NO_CLIP: u32 = 17;
    /// Number of defined abilities.
    pub const COUNT: u32 = 18;
}

/// Legacy adventure settings flags.
pub mod adventure_flag {
    pub const WORLD_IMMUTABLE: u32 = 1 << 0;
    pub const NO_PVM: u32 = 1 << 1;
    pub const NO_MVP: u32 = 1 << 2;
    pub const SHOW_NAME_TAGS: u32 = 1 << 4;
    pub const AUTO_JUMP: u32 = 1 << 5;
    pub const ALLOW_FLIGHT: u32 = 1 << 6;
    pub const NO_CLIP: u32 = 1 << 7;
    pub const WORLD_BUILDER: u32 = 1 << 8;
    pub const FLYING: u32 = 1 << 9;
    pub const MUTED: u32 = 1 << 10;
}

/// Legacy action permission bits.
pub mod action_permission {
    pub const MINE: u32 = 1 << 0;
    pub const DOORS_AND_SWITCHES: u32 = 1 << 1;
    pub const OPEN_CONTAINERS: u32 = 1 << 2;
    pub const ATTACK_PLAYERS: u32 = 1 << 3;
    pub const ATTACK_MOBS: u32 = 1 << 4;
    pub const OPERATOR: u32 = 1 << 5;
    pub const TELEPORT: u32 = 1 << 7;
    pub const BUILD: u32 = 1 << 8;
}

/// Layer types.
pub mod layer_type {
    pub const CACHE: u16 = 0;
    pub const BASE: u16 = 1;
    pub const SPECTATOR: u16 = 2;
    pub const COMMANDS: u16 = 3;
    pub const EDITOR: u16 = 4;
}

/// Mask with every defined ability bit set.
pub const ABILITY_MASK_ALL: u32 = (1 << ability::COUNT) - 1;

/// Default fly speed of a player.
pub const DEFAULT_FLY_SPEED: f32 = 0.05;
/// Default walk speed of a player.
pub const DEFAULT_WALK_SPEED: f32 = 0.1;

const fn bit(index: u32) -> u32 {
    1 << index
}

/// Ability values a plain member starts with: may build, mine, use doors,
/// open containers and attack.
pub const MEMBER_ABILITIES: u32 = bit(ability::BUILD)
    | bit(ability::MINE)
    | bit(ability::DOORS_AND_SWITCHES)
    | bit(ability::OPEN_CONTAINERS)
    | bit(ability::ATTACK_PLAYERS)
    | bit(ability::ATTACK_MOBS);

/// Layer bits that map one-to-one onto action permission bits.
const ACTION_MAP: [(u32, u32); 8] = [
    (ability::BUILD, action_permission::BUILD),
    (ability::MINE, action_permission::MINE),
    (ability::DOORS_AND_SWITCHES, action_permission::DOORS_AND_SWITCHES),
    (ability::OPEN_CONTAINERS, action_permission::OPEN_CONTAINERS),
    (ability::ATTACK_PLAYERS, action_permission::ATTACK_PLAYERS),
    (ability::ATTACK_MOBS, action_permission::ATTACK_MOBS),
    (ability::OPERATOR_COMMANDS, action_permission::OPERATOR),
    (ability::TELEPORT, action_permission::TELEPORT),
];

/// Layer bits that map one-to-one onto adventure flags.
const FLAG_MAP: [(u32, u32); 5] = [
    (ability::MAY_FLY, adventure_flag::ALLOW_FLIGHT),
    (ability::FLYING, adventure_flag::FLYING),
    (ability::NO_CLIP, adventure_flag::NO_CLIP),
    (ability::WORLD_BUILDER, adventure_flag::WORLD_BUILDER),
    (ability::MUTED, adventure_flag::MUTED),
];

/// One layer of player abilities.
///
/// `abilities` says which bits this layer defines; `values` holds the
/// state of those bits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityLayer {
    pub layer_type: u16,
    pub abilities: u32,
    pub values: u32,
    pub fly_speed: f32,
    pub walk_speed: f32,
}

impl AbilityLayer {
    /// The layer synthesized for packets decoded from a protocol that has
    /// no ability layers: a base layer defining every ability, with member
    /// values and default speeds.
    pub const fn legacy_base() -> Self {
        Self {
            layer_type: layer_type::BASE,
            abilities: ABILITY_MASK_ALL,
            values: MEMBER_ABILITIES,
            fly_speed: DEFAULT_FLY_SPEED,
            walk_speed: DEFAULT_WALK_SPEED,
        }
    }

    pub fn is_base(&self) -> bool {
        self.layer_type == layer_type::BASE
    }

    /// Returns `true` if the layer defines `index` and its value is set.
    pub fn has(&self, index: u32) -> bool {
        self.abilities & self.values & bit(index) != 0
    }

    /// Builds a base layer from legacy `(flags, action_permissions)`.
    pub fn from_legacy(flags: u32, action_permissions: u32) -> Self {
        let mut values = 0;
        for (index, legacy) in ACTION_MAP {
            if action_permissions & legacy != 0 {
                values |= bit(index);
            }
        }
        for (index, legacy) in FLAG_MAP {
            if flags & legacy != 0 {
                values |= bit(index);
            }
        }
        Self {
            values,
            ..Self::legacy_base()
        }
    }

    /// Derives legacy `(flags, action_permissions)` from this layer.
    pub fn to_legacy(&self) -> (u32, u32) {
        let mut flags = 0;
        let mut actions = 0;
        for (index, legacy) in ACTION_MAP {
            if self.has(index) {
                actions |= legacy;
            }
        }
        for (index, legacy) in FLAG_MAP {
            if self.has(index) {
                flags |= legacy;
            }
        }
        if !self.has(ability::BUILD) && !self.has(ability::MINE) {
            flags |= adventure_flag::WORLD_IMMUTABLE;
        }
        (flags, actions)
    }
}

impl Default for AbilityLayer {
    fn default() -> Self {
        Self::legacy_base()
    }
}

/// Finds the base layer in a list of layers.
pub fn base_layer(layers: &[AbilityLayer]) -> Option<&AbilityLayer> {
    layers.iter().find(|layer| layer.is_base())
}

impl Marshal for AbilityLayer {
    fn marshal(&self, w: &mut Writer) -> Result<(), CodecError> {
        w.u16(self.layer_type);
        w.u32(self.abilities);
        w.u32(self.values);
        w.f32(self.fly_speed);
        w.f32(self.walk_speed);
        Ok(())
    }

    fn unmarshal(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            layer_type: r.u16()?,
            abilities: r.u32()?,
            values: r.u32()?,
            fly_speed: r.f32()?,
            walk_speed: r.f32()?,
        })
    }
}
