use serde::{Deserialize, Serialize};
use strata_wire::{AbilityLayer, CodecError, Marshal, Reader, Writer};

use crate::{PacketPayload, ids};

/// Sets a player's permission levels and ability layers. Registered from
/// protocol 534.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateAbilities {
    pub entity_unique_id: i64,
    pub player_permissions: u8,
    pub command_permissions: u8,
    pub layers: Vec<AbilityLayer>,
}

impl PacketPayload for UpdateAbilities {
    const ID: u32 = ids::UPDATE_ABILITIES;
    const NAME: &'static str = "UpdateAbilities";
}

impl Marshal for UpdateAbilities {
    fn marshal(&self, w: &mut Writer) -> Result<(), CodecError> {
        w.i64(self.entity_unique_id);
        w.u8(self.player_permissions);
        w.u8(self.command_permissions);
        w.slice_u8_len(&self.layers)
    }

    fn unmarshal(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            entity_unique_id: r.i64()?,
            player_permissions: r.u8()?,
            command_permissions: r.u8()?,
            layers: r.slice_u8_len()?,
        })
    }
}
