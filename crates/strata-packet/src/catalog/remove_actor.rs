use serde::{Deserialize, Serialize};
use strata_wire::{CodecError, Marshal, Reader, Writer};

use crate::{PacketPayload, ids};

/// Removes an entity from the client's world. Same layout in every
/// supported version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemoveActor {
    pub entity_unique_id: i64,
}

impl PacketPayload for RemoveActor {
    const ID: u32 = ids::REMOVE_ACTOR;
    const NAME: &'static str = "RemoveActor";
}

impl Marshal for RemoveActor {
    fn marshal(&self, w: &mut Writer) -> Result<(), CodecError> {
        w.varint64(self.entity_unique_id);
        Ok(())
    }

    fn unmarshal(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            entity_unique_id: r.varint64()?,
        })
    }
}
