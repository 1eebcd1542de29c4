//! Descriptors for the versions before the canonical one.
//!
//! Most packets only changed their layout, which the packet's own
//! `Marshal` impl already handles from the protocol id. What is left here
//! are the kinds that do not exist on both sides:
//!
//! ```text
//! < 534                          canonical
//! AddPlayer          ──→  AddPlayer + UpdateAbilities
//! AdventureSettings  ──→  UpdateAbilities
//! TickSync           ──→  (dropped)
//! AddPlayer + AdventureSettings  ←──  AddPlayer
//! AdventureSettings              ←──  UpdateAbilities
//! ```
//!
//! From 534 on the catalog is the canonical one and both directions are
//! identity.

use strata_packet::{AddPlayer, AdventureSettings, Packet, Pool, UpdateAbilities};
use strata_wire::abilities::base_layer;
use strata_wire::version::ID534;
use strata_wire::{AbilityLayer, ProtocolVersion};

use crate::{Features, Protocol, ProtocolError};

/// Custom stored permissions sent to legacy peers.
const CUSTOM_STORED_PERMISSIONS: u32 = 0;

/// A supported version older than the canonical one.
#[derive(Debug, Clone)]
pub struct Legacy {
    version: ProtocolVersion,
    pool: Pool,
}

impl Legacy {
    pub fn new(version: ProtocolVersion) -> Self {
        Self {
            version,
            pool: Pool::for_protocol(version.id),
        }
    }

    /// Whether this version predates ability layers and still uses
    /// `AdventureSettings`.
    fn predates_layers(&self) -> bool {
        self.version.id < ID534
    }

    fn unsupported(&self, packet: &Packet, reason: &'static str) -> ProtocolError {
        ProtocolError::unsupported(self.version.id, packet.name(), reason)
    }

    /// Canonical abilities for a legacy permissions packet.
    fn abilities_from_settings(
        &self,
        packet: &Packet,
        settings: &AdventureSettings,
    ) -> Result<UpdateAbilities, ProtocolError> {
        let narrow = |level: u32| {
            u8::try_from(level)
                .map_err(|_| self.unsupported(packet, "permission level does not fit a byte"))
        };
        Ok(UpdateAbilities {
            entity_unique_id: settings.player_unique_id,
            player_permissions: narrow(settings.permission_level)?,
            command_permissions: narrow(settings.command_permission_level)?,
            layers: vec![AbilityLayer::from_legacy(
                settings.flags,
                settings.action_permissions,
            )],
        })
    }
}

/// Abilities packet announcing the same permissions as a spawn. A decoded
/// legacy spawn holds its base layer rebuilt from the wire bitfields.
fn abilities_from_spawn(spawn: &AddPlayer) -> UpdateAbilities {
    UpdateAbilities {
        entity_unique_id: spawn.entity_unique_id,
        player_permissions: spawn.player_permissions,
        command_permissions: spawn.command_permissions,
        layers: spawn.layers.clone(),
    }
}

/// Legacy permissions from a base layer and the two permission levels.
fn settings_from(
    base: &AbilityLayer,
    entity_unique_id: i64,
    player_permissions: u8,
    command_permissions: u8,
) -> AdventureSettings {
    let (flags, action_permissions) = base.to_legacy();
    AdventureSettings {
        flags,
        command_permission_level: u32::from(command_permissions),
        action_permissions,
        permission_level: u32::from(player_permissions),
        custom_stored_permissions: CUSTOM_STORED_PERMISSIONS,
        player_unique_id: entity_unique_id,
    }
}

impl Protocol for Legacy {
    fn version(&self) -> ProtocolVersion {
        self.version
    }

    fn packets(&self) -> &Pool {
        &self.pool
    }

    fn convert_to_latest(
        &self,
        packet: Packet,
        _features: &Features,
    ) -> Result<Vec<Packet>, ProtocolError> {
        if !self.predates_layers() {
            return Ok(vec![packet]);
        }
        match packet {
            Packet::AddPlayer(spawn) => {
                let abilities = abilities_from_spawn(&spawn);
                Ok(vec![spawn.into(), abilities.into()])
            }
            Packet::AdventureSettings(ref settings) => {
                Ok(vec![self.abilities_from_settings(&packet, settings)?.into()])
            }
            Packet::TickSync(_) => Ok(Vec::new()),
            Packet::UpdateAbilities(_) => {
                Err(self.unsupported(&packet, "not sent before protocol 534"))
            }
            Packet::RemoveActor(_) | Packet::RemoveVolumeEntity(_) => Ok(vec![packet]),
        }
    }

    fn convert_from_latest(
        &self,
        packet: Packet,
        features: &Features,
    ) -> Result<Vec<Packet>, ProtocolError> {
        if !self.predates_layers() {
            return Ok(vec![packet]);
        }
        match packet {
            Packet::AddPlayer(spawn) => {
                let settings = features.spawn_adventure_settings.then(|| {
                    let base = base_layer(&spawn.layers)
                        .copied()
                        .unwrap_or_else(AbilityLayer::legacy_base);
                    settings_from(
                        &base,
                        spawn.entity_unique_id,
                        spawn.player_permissions,
                        spawn.command_permissions,
                    )
                });
                let mut out = vec![Packet::AddPlayer(spawn)];
                out.extend(settings.map(Packet::from));
                Ok(out)
            }
            Packet::UpdateAbilities(ref abilities) => {
                let Some(base) = base_layer(&abilities.layers) else {
                    return Err(self.unsupported(&packet, "no base ability layer"));
                };
                let settings = settings_from(
                    base,
                    abilities.entity_unique_id,
                    abilities.player_permissions,
                    abilities.command_permissions,
                );
                Ok(vec![settings.into()])
            }
            Packet::AdventureSettings(_) | Packet::TickSync(_) => {
                Err(self.unsupported(&packet, "not a canonical packet"))
            }
            Packet::RemoveActor(_) | Packet::RemoveVolumeEntity(_) => Ok(vec![packet]),
        }
    }
}
