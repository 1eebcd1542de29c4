//! Two sessions of different versions talking through canonical packets.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strata_packet::{AddPlayer, Packet, RemoveVolumeEntity};
use strata_protocol::{Features, ProtocolRegistry};
use strata_session::{Session, SessionConfig};
use strata_wire::version::{ID486, ID503, ID545};
use strata_wire::{AbilityLayer, ProtocolVersion};
use uuid::Uuid;

fn session(protocol_id: i32, config: SessionConfig) -> Session {
    let mut session = Session::new(Arc::new(ProtocolRegistry::standard()), config);
    session.negotiate(protocol_id).unwrap();
    session
}

#[test]
fn test_remove_volume_entity_from_486_peer_defaults_dimension() {
    let peer = session(ID486, SessionConfig::default());
    let packet: Packet = RemoveVolumeEntity {
        entity_runtime_id: 7,
        dimension: 1,
    }
    .into();

    let buffers = peer.encode(packet).unwrap();
    assert_eq!(buffers.len(), 1);
    // Header (two bytes) and the u64 id; no dimension.
    assert_eq!(buffers[0].len(), 10);

    let decoded = peer.decode(&buffers[0]).unwrap();
    assert_eq!(
        decoded,
        vec![Packet::RemoveVolumeEntity(RemoveVolumeEntity {
            entity_runtime_id: 7,
            dimension: 0,
        })]
    );
}

#[test]
fn test_remove_volume_entity_from_545_peer_keeps_dimension() {
    let peer = session(ID545, SessionConfig::default());
    let packet: Packet = RemoveVolumeEntity {
        entity_runtime_id: 7,
        dimension: 1,
    }
    .into();
    let buffers = peer.encode(packet.clone()).unwrap();
    assert_eq!(peer.decode(&buffers[0]).unwrap(), vec![packet]);
}

#[test]
fn test_spawn_relayed_from_legacy_to_current() {
    let mut rng = StdRng::seed_from_u64(21);
    let legacy = session(ID503, SessionConfig::default());
    let current = session(ID545, SessionConfig::default());

    let spawn = AddPlayer {
        uuid: Uuid::from_u128(rng.random()),
        username: "Alex".into(),
        entity_runtime_id: 3,
        entity_unique_id: 3,
        game_type: 1,
        layers: vec![AbilityLayer::legacy_base()],
        ..AddPlayer::default()
    };

    // What the legacy client would have sent, read as canonical packets.
    let mut canonical = Vec::new();
    for buf in legacy.encode(spawn.clone().into()).unwrap() {
        canonical.extend(legacy.decode(&buf).unwrap());
    }
    let names: Vec<&str> = canonical.iter().map(Packet::name).collect();
    assert_eq!(names, vec!["AddPlayer", "UpdateAbilities", "UpdateAbilities"]);

    // Forwarded to a current client, every packet survives as is.
    let buffers = current.encode_batch(canonical.clone()).unwrap();
    assert_eq!(buffers.len(), 3);
    let mut forwarded = Vec::new();
    for buf in &buffers {
        forwarded.extend(current.decode(buf).unwrap());
    }
    assert_eq!(forwarded, canonical);
    assert_eq!(forwarded[0], Packet::AddPlayer(spawn));
}

#[test]
fn test_spawn_without_adventure_settings_feature() {
    let config = SessionConfig {
        features: Features {
            spawn_adventure_settings: false,
        },
        ..SessionConfig::default()
    };
    let legacy = session(ID503, config);
    let buffers = legacy.encode(AddPlayer::default().into()).unwrap();
    assert_eq!(buffers.len(), 1);
}

#[test]
fn test_every_supported_version_negotiates() {
    for version in ProtocolVersion::SUPPORTED {
        let mut session = Session::new(
            Arc::new(ProtocolRegistry::standard()),
            SessionConfig::default(),
        );
        assert_eq!(session.negotiate(version.id).unwrap(), version);
    }
}
