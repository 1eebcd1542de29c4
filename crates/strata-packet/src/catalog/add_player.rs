//! The player spawn packet.
//!
//! This is the packet whose layout moved the most across the supported
//! versions:
//!
//! ```text
//!                       < 503      503..534        >= 534
//! duplicate runtime id  varint64   varint64        -
//! game type             -          varint32        varint32
//! permissions           5 x varuint32 + i64 id     i64 id, u8, u8, u8-counted layers
//! ```
//!
//! The canonical struct always exposes the modern shape: runtime id,
//! unique id, both permission levels and a list of ability layers. The
//! legacy flags and action permissions are the base layer folded into two
//! bitfields, so they decode into exactly that one layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strata_wire::abilities::base_layer;
use strata_wire::version::{ID503, ID534};
use strata_wire::{
    AbilityLayer, CodecError, EntityLink, ItemInstance, Marshal, MetadataValue, Reader, Vec3,
    Writer,
};
use uuid::Uuid;

use crate::{PacketPayload, ids};

/// Game type assumed for protocols before 503, which do not send one.
pub const GAME_TYPE_DEFAULT: i32 = 0;

/// Custom stored permissions written to protocols before 534.
const CUSTOM_STORED_PERMISSIONS: u32 = 0;

/// Makes a player entity show up on the client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AddPlayer {
    pub uuid: Uuid,
    pub username: String,
    pub entity_runtime_id: u64,
    /// Only set for some platforms; empty otherwise.
    pub platform_chat_id: String,
    pub position: Vec3,
    pub velocity: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub head_yaw: f32,
    pub held_item: ItemInstance,
    /// Only on the wire from 503; [`GAME_TYPE_DEFAULT`] before that.
    pub game_type: i32,
    pub entity_metadata: BTreeMap<u32, MetadataValue>,
    pub entity_unique_id: i64,
    pub player_permissions: u8,
    pub command_permissions: u8,
    /// Before 534 only the base layer travels, as legacy bitfields;
    /// decoding yields that one layer through [`AbilityLayer::from_legacy`].
    pub layers: Vec<AbilityLayer>,
    pub entity_links: Vec<EntityLink>,
    pub device_id: String,
    pub build_platform: i32,
}

impl PacketPayload for AddPlayer {
    const ID: u32 = ids::ADD_PLAYER;
    const NAME: &'static str = "AddPlayer";
}

impl Marshal for AddPlayer {
    fn marshal(&self, w: &mut Writer) -> Result<(), CodecError> {
        let legacy = w.protocol_id() < ID534;

        w.uuid(self.uuid);
        w.string(&self.username)?;
        if legacy {
            w.varint64(self.entity_runtime_id as i64);
        }
        w.varuint64(self.entity_runtime_id);
        w.string(&self.platform_chat_id)?;
        w.vec3(self.position);
        w.vec3(self.velocity);
        w.f32(self.pitch);
        w.f32(self.yaw);
        w.f32(self.head_yaw);
        self.held_item.marshal(w)?;
        if w.protocol_id() >= ID503 {
            w.varint32(self.game_type);
        }
        w.entity_metadata(&self.entity_metadata)?;

        if legacy {
            let (flags, actions) = base_layer(&self.layers)
                .map(AbilityLayer::to_legacy)
                .unwrap_or((0, 0));
            w.varuint32(flags);
            w.varuint32(u32::from(self.command_permissions));
            w.varuint32(actions);
            w.varuint32(u32::from(self.player_permissions));
            w.varuint32(CUSTOM_STORED_PERMISSIONS);
            w.i64(self.entity_unique_id);
        } else {
            w.i64(self.entity_unique_id);
            w.u8(self.player_permissions);
            w.u8(self.command_permissions);
            w.slice_u8_len(&self.layers)?;
        }

        w.slice(&self.entity_links)?;
        w.string(&self.device_id)?;
        w.i32(self.build_platform);
        Ok(())
    }

    fn unmarshal(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let legacy = r.protocol_id() < ID534;

        let uuid = r.uuid()?;
        let username = r.string()?;
        if legacy {
            // Duplicate of the runtime id.
            r.varint64()?;
        }
        let entity_runtime_id = r.varuint64()?;
        let platform_chat_id = r.string()?;
        let position = r.vec3()?;
        let velocity = r.vec3()?;
        let pitch = r.f32()?;
        let yaw = r.f32()?;
        let head_yaw = r.f32()?;
        let held_item = ItemInstance::unmarshal(r)?;
        let game_type = if r.protocol_id() >= ID503 {
            r.varint32()?
        } else {
            GAME_TYPE_DEFAULT
        };
        let entity_metadata = r.entity_metadata()?;

        let (entity_unique_id, player_permissions, command_permissions, layers) = if legacy {
            let flags = r.varuint32()?;
            let command_permissions = narrow_u8(r)?;
            let action_permissions = r.varuint32()?;
            let player_permissions = narrow_u8(r)?;
            // Always written as 0; nothing maps onto it.
            let _custom_stored = r.varuint32()?;
            let entity_unique_id = r.i64()?;
            (
                entity_unique_id,
                player_permissions,
                command_permissions,
                vec![AbilityLayer::from_legacy(flags, action_permissions)],
            )
        } else {
            (r.i64()?, r.u8()?, r.u8()?, r.slice_u8_len()?)
        };

        Ok(Self {
            uuid,
            username,
            entity_runtime_id,
            platform_chat_id,
            position,
            velocity,
            pitch,
            yaw,
            head_yaw,
            held_item,
            game_type,
            entity_metadata,
            entity_unique_id,
            player_permissions,
            command_permissions,
            layers,
            entity_links: r.slice()?,
            device_id: r.string()?,
            build_platform: r.i32()?,
        })
    }
}

/// Reads a legacy varuint32 permission level that must fit a `u8`.
fn narrow_u8(r: &mut Reader<'_>) -> Result<u8, CodecError> {
    let offset = r.offset();
    let value = r.varuint32()?;
    u8::try_from(value).map_err(|_| CodecError::ValueOutOfRange {
        offset,
        value: u64::from(value),
        max: u64::from(u8::MAX),
    })
}
