//! Packet kinds shipped with Strata.
//!
//! Each file holds one kind: its canonical struct, its wire id, and a
//! `Marshal` impl whose read and write paths branch on the same version
//! predicates.

mod add_player;
mod adventure_settings;
mod remove_actor;
mod remove_volume_entity;
mod tick_sync;
mod update_abilities;

pub use add_player::{AddPlayer, GAME_TYPE_DEFAULT};
pub use adventure_settings::AdventureSettings;
pub use remove_actor::RemoveActor;
pub use remove_volume_entity::{DIMENSION_DEFAULT, RemoveVolumeEntity};
pub use tick_sync::TickSync;
pub use update_abilities::UpdateAbilities;
