use serde::{Deserialize, Serialize};
use strata_wire::{CodecError, Marshal, Reader, Writer};

use crate::{PacketPayload, ids};

/// Legacy player permissions, replaced by
/// [`UpdateAbilities`](super::UpdateAbilities) from protocol 534.
///
/// `flags` and `action_permissions` use the bits in
/// [`strata_wire::abilities::adventure_flag`] and
/// [`strata_wire::abilities::action_permission`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdventureSettings {
    pub flags: u32,
    pub command_permission_level: u32,
    pub action_permissions: u32,
    pub permission_level: u32,
    pub custom_stored_permissions: u32,
    pub player_unique_id: i64,
}

impl PacketPayload for AdventureSettings {
    const ID: u32 = ids::ADVENTURE_SETTINGS;
    const NAME: &'static str = "AdventureSettings";
}

impl Marshal for AdventureSettings {
    fn marshal(&self, w: &mut Writer) -> Result<(), CodecError> {
        w.varuint32(self.flags);
        w.varuint32(self.command_permission_level);
        w.varuint32(self.action_permissions);
        w.varuint32(self.permission_level);
        w.varuint32(self.custom_stored_permissions);
        w.i64(self.player_unique_id);
        Ok(())
    }

    fn unmarshal(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            flags: r.varuint32()?,
            command_permission_level: r.varuint32()?,
            action_permissions: r.varuint32()?,
            permission_level: r.varuint32()?,
            custom_stored_permissions: r.varuint32()?,
            player_unique_id: r.i64()?,
        })
    }
}
