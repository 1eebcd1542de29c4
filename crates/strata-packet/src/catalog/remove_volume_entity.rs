use serde::{Deserialize, Serialize};
use strata_wire::version::ID503;
use strata_wire::{CodecError, Marshal, Reader, Writer};

use crate::{PacketPayload, ids};

/// Dimension assumed for protocols before 503, which do not send one.
pub const DIMENSION_DEFAULT: i32 = 0;

/// Removes a volume entity on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemoveVolumeEntity {
    pub entity_runtime_id: u64,
    /// Only on the wire from 503; [`DIMENSION_DEFAULT`] before that.
    pub dimension: i32,
}

impl PacketPayload for RemoveVolumeEntity {
    const ID: u32 = ids::REMOVE_VOLUME_ENTITY;
    const NAME: &'static str = "RemoveVolumeEntity";
}

impl Marshal for RemoveVolumeEntity {
    fn marshal(&self, w: &mut Writer) -> Result<(), CodecError> {
        w.u64(self.entity_runtime_id);
        if w.protocol_id() >= ID503 {
            w.varint32(self.dimension);
        }
        Ok(())
    }

    fn unmarshal(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let entity_runtime_id = r.u64()?;
        let dimension = if r.protocol_id() >= ID503 {
            r.varint32()?
        } else {
            DIMENSION_DEFAULT
        };
        Ok(Self {
            entity_runtime_id,
            dimension,
        })
    }
}
