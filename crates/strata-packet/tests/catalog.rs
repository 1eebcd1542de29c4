//! Integration tests for the packet catalog across protocol versions.
//!
//! Every kind is encoded and decoded under every version whose pool
//! registers it. Inputs are built per version so that fields a version
//! cannot carry already hold their documented defaults.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strata_packet::catalog::{DIMENSION_DEFAULT, GAME_TYPE_DEFAULT};
use strata_packet::{
    AddPlayer, AdventureSettings, Header, Packet, PacketError, Pool, RemoveActor,
    RemoveVolumeEntity, TickSync, UpdateAbilities, codec, ids,
};
use strata_wire::abilities::{ability, action_permission, adventure_flag, layer_type};
use strata_wire::version::{ID486, ID503, ID527, ID534, ID545};
use strata_wire::{
    AbilityLayer, CodecError, EntityLink, ItemInstance, ItemStack, Marshal, MetadataValue,
    ProtocolVersion, Vec3, Writer,
};
use uuid::Uuid;

// =========================================================================
// Helpers
// =========================================================================

fn all_versions() -> impl Iterator<Item = i32> {
    ProtocolVersion::SUPPORTED.into_iter().map(|v| v.id)
}

fn round_trip(packet: &Packet, protocol: i32) -> Packet {
    let pool = Pool::for_protocol(protocol);
    let bytes = codec::encode(packet, Header::new(packet.id()), protocol).expect("encode");
    let decoded = codec::decode(&bytes, &pool, protocol).expect("decode");
    assert_eq!(decoded.trailing, 0, "{} left bytes behind", packet.name());
    assert_eq!(decoded.header.packet_id, packet.id());
    decoded.packet
}

fn random_layer(rng: &mut StdRng) -> AbilityLayer {
    AbilityLayer {
        layer_type: rng.random_range(0..=4),
        abilities: rng.random(),
        values: rng.random(),
        fly_speed: rng.random(),
        walk_speed: rng.random(),
    }
}

/// Builds an `AddPlayer` whose every field is representable in `protocol`.
fn random_add_player(rng: &mut StdRng, protocol: i32) -> AddPlayer {
    let mut metadata = BTreeMap::new();
    metadata.insert(0, MetadataValue::Int64(rng.random()));
    metadata.insert(4, MetadataValue::String("§aSteve".into()));
    metadata.insert(38, MetadataValue::Float32(rng.random()));

    let layers = if protocol >= ID534 {
        (0..rng.random_range(0..4)).map(|_| random_layer(rng)).collect()
    } else {
        vec![AbilityLayer::legacy_base()]
    };

    AddPlayer {
        uuid: Uuid::from_u128(rng.random()),
        username: "Steve".into(),
        entity_runtime_id: rng.random_range(0..(1 << 40)),
        platform_chat_id: String::new(),
        position: Vec3::new(rng.random(), 64.0, rng.random()),
        velocity: Vec3::default(),
        pitch: rng.random(),
        yaw: rng.random(),
        head_yaw: rng.random(),
        held_item: ItemInstance {
            stack_network_id: rng.random_range(0..1000),
            stack: ItemStack {
                network_id: 318,
                count: 1,
                metadata_value: 0,
                block_runtime_id: 0,
                extra_data: vec![1, 2, 3],
            },
        },
        game_type: if protocol >= ID503 {
            rng.random_range(0..6)
        } else {
            GAME_TYPE_DEFAULT
        },
        entity_metadata: metadata,
        entity_unique_id: rng.random(),
        player_permissions: rng.random_range(0..4),
        command_permissions: rng.random_range(0..5),
        layers,
        entity_links: vec![EntityLink {
            ridden_entity_unique_id: rng.random(),
            rider_entity_unique_id: rng.random(),
            link_type: 1,
            immediate: rng.random(),
            rider_initiated: rng.random(),
        }],
        device_id: "device-1".into(),
        build_platform: 7,
    }
}

/// One instance of every kind registered in `protocol`'s pool.
fn sample_packets(rng: &mut StdRng, protocol: i32) -> Vec<Packet> {
    let mut packets = vec![
        random_add_player(rng, protocol).into(),
        RemoveActor {
            entity_unique_id: rng.random(),
        }
        .into(),
        RemoveVolumeEntity {
            entity_runtime_id: rng.random(),
            dimension: if protocol >= ID503 { 2 } else { DIMENSION_DEFAULT },
        }
        .into(),
    ];
    if protocol >= ID534 {
        packets.push(
            UpdateAbilities {
                entity_unique_id: rng.random(),
                player_permissions: 2,
                command_permissions: 1,
                layers: vec![AbilityLayer::legacy_base(), random_layer(rng)],
            }
            .into(),
        );
    } else {
        packets.push(
            AdventureSettings {
                flags: rng.random(),
                command_permission_level: 1,
                action_permissions: rng.random(),
                permission_level: 2,
                custom_stored_permissions: 0,
                player_unique_id: rng.random(),
            }
            .into(),
        );
        packets.push(
            TickSync {
                client_request_timestamp: rng.random(),
                server_reception_timestamp: rng.random(),
            }
            .into(),
        );
    }
    packets
}

// =========================================================================
// Round trip
// =========================================================================

#[test]
fn test_every_kind_round_trips_under_every_version() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for protocol in all_versions() {
        for _ in 0..20 {
            for packet in sample_packets(&mut rng, protocol) {
                let decoded = round_trip(&packet, protocol);
                assert_eq!(decoded, packet, "{} under {protocol}", packet.name());
            }
        }
    }
}

#[test]
fn test_sample_packets_cover_each_pool() {
    let mut rng = StdRng::seed_from_u64(1);
    for protocol in all_versions() {
        let mut ids: Vec<u32> = sample_packets(&mut rng, protocol)
            .iter()
            .map(Packet::id)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, Pool::for_protocol(protocol).ids());
    }
}

// =========================================================================
// AddPlayer version threshold
// =========================================================================

#[test]
fn test_add_player_pre_534_keeps_only_the_base_layer() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut packet = random_add_player(&mut rng, ID534);
    let spectator = AbilityLayer {
        layer_type: layer_type::SPECTATOR,
        ..random_layer(&mut rng)
    };
    packet.layers = vec![spectator, AbilityLayer::legacy_base()];

    let Packet::AddPlayer(decoded) = round_trip(&packet.clone().into(), ID503) else {
        panic!("expected AddPlayer");
    };
    assert_eq!(decoded.layers, vec![AbilityLayer::legacy_base()]);
    // Everything the legacy layout carries survives.
    assert_eq!(decoded.entity_runtime_id, packet.entity_runtime_id);
    assert_eq!(decoded.entity_unique_id, packet.entity_unique_id);
    assert_eq!(decoded.player_permissions, packet.player_permissions);
    assert_eq!(decoded.command_permissions, packet.command_permissions);
}

#[test]
fn test_add_player_pre_534_decodes_legacy_bits_into_base_layer() {
    let flags = adventure_flag::ALLOW_FLIGHT | adventure_flag::FLYING;
    let actions = action_permission::OPERATOR | action_permission::BUILD | action_permission::MINE;
    let mut rng = StdRng::seed_from_u64(6);
    let mut packet = random_add_player(&mut rng, ID503);
    packet.layers = vec![AbilityLayer::from_legacy(flags, actions)];

    let Packet::AddPlayer(decoded) = round_trip(&packet.clone().into(), ID503) else {
        panic!("expected AddPlayer");
    };
    assert_eq!(decoded, packet);
    let base = &decoded.layers[0];
    assert!(base.has(ability::FLYING));
    assert!(base.has(ability::MAY_FLY));
    assert!(base.has(ability::OPERATOR_COMMANDS));
    assert!(!base.has(ability::ATTACK_MOBS));
}

#[test]
fn test_add_player_pre_534_without_base_layer_decodes_empty_base() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut packet = random_add_player(&mut rng, ID503);
    packet.layers.clear();

    let Packet::AddPlayer(decoded) = round_trip(&packet.into(), ID503) else {
        panic!("expected AddPlayer");
    };
    assert_eq!(decoded.layers, vec![AbilityLayer::from_legacy(0, 0)]);
}

#[test]
fn test_add_player_534_preserves_multi_entry_layers() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut packet = random_add_player(&mut rng, ID534);
    packet.layers = vec![
        AbilityLayer::legacy_base(),
        AbilityLayer {
            layer_type: layer_type::SPECTATOR,
            abilities: 0b1010,
            values: 0b1000,
            fly_speed: 0.2,
            walk_speed: 0.3,
        },
        random_layer(&mut rng),
    ];

    let decoded = round_trip(&packet.clone().into(), ID534);
    assert_eq!(decoded, Packet::AddPlayer(packet));
}

#[test]
fn test_add_player_legacy_layout_is_longer() {
    // Five varuint32 bitfields and the duplicate id outweigh three bytes
    // of permissions and an empty layer count.
    let mut rng = StdRng::seed_from_u64(4);
    let mut packet = random_add_player(&mut rng, ID534);
    packet.layers.clear();
    let packet: Packet = packet.into();
    let legacy = codec::encode(&packet, Header::new(packet.id()), ID527).unwrap();
    let modern = codec::encode(&packet, Header::new(packet.id()), ID534).unwrap();
    assert!(legacy.len() > modern.len());
}

#[test]
fn test_add_player_pre_503_drops_game_type() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut packet = random_add_player(&mut rng, ID503);
    packet.game_type = 3;
    let Packet::AddPlayer(decoded) = round_trip(&packet.into(), ID486) else {
        panic!("expected AddPlayer");
    };
    assert_eq!(decoded.game_type, GAME_TYPE_DEFAULT);
}

#[test]
fn test_add_player_legacy_permission_level_above_byte_is_out_of_range() {
    let mut w = Writer::new(ID503);
    Header::new(ids::ADD_PLAYER).write(&mut w);
    w.uuid(Uuid::nil());
    w.string("Steve").unwrap();
    w.varint64(1);
    w.varuint64(1);
    w.string("").unwrap();
    w.vec3(Vec3::default());
    w.vec3(Vec3::default());
    w.f32(0.0);
    w.f32(0.0);
    w.f32(0.0);
    ItemInstance::air().marshal(&mut w).unwrap();
    w.varint32(0);
    w.entity_metadata(&BTreeMap::new()).unwrap();
    w.varuint32(0);
    // Command permission level does not fit a byte.
    w.varuint32(300);
    w.varuint32(0);
    w.varuint32(0);
    w.varuint32(0);
    w.i64(1);
    w.varuint32(0);
    w.string("").unwrap();
    w.i32(0);
    let bytes = w.into_bytes();

    let err = codec::decode(&bytes, &Pool::for_protocol(ID503), ID503).unwrap_err();
    assert!(
        matches!(
            err,
            PacketError::Codec(CodecError::ValueOutOfRange {
                value: 300,
                max: 255,
                ..
            })
        ),
        "got {err:?}"
    );
}

// =========================================================================
// RemoveVolumeEntity scenario
// =========================================================================

#[test]
fn test_remove_volume_entity_486_omits_dimension() {
    let packet: Packet = RemoveVolumeEntity {
        entity_runtime_id: 7,
        dimension: 1,
    }
    .into();

    let bytes = codec::encode(&packet, Header::new(packet.id()), ID486).unwrap();
    // varuint32 header 167 = [0xa7, 0x01], then the u64 id, nothing else.
    assert_eq!(bytes, vec![0xa7, 0x01, 7, 0, 0, 0, 0, 0, 0, 0]);

    let decoded = codec::decode(&bytes, &Pool::for_protocol(ID486), ID486).unwrap();
    assert_eq!(
        decoded.packet,
        Packet::RemoveVolumeEntity(RemoveVolumeEntity {
            entity_runtime_id: 7,
            dimension: DIMENSION_DEFAULT,
        })
    );
}

#[test]
fn test_remove_volume_entity_545_carries_dimension() {
    let packet: Packet = RemoveVolumeEntity {
        entity_runtime_id: 7,
        dimension: 1,
    }
    .into();

    let bytes = codec::encode(&packet, Header::new(packet.id()), ID545).unwrap();
    // ... plus zig-zag varint32 1 = 0x02.
    assert_eq!(bytes, vec![0xa7, 0x01, 7, 0, 0, 0, 0, 0, 0, 0, 0x02]);
    assert_eq!(round_trip(&packet, ID545), packet);
}

// =========================================================================
// Failure modes
// =========================================================================

#[test]
fn test_unknown_id_is_rejected_not_misdecoded() {
    let packet: Packet = UpdateAbilities::default().into();
    let bytes = codec::encode(&packet, Header::new(packet.id()), ID534).unwrap();

    let err = codec::decode(&bytes, &Pool::for_protocol(ID503), ID503).unwrap_err();
    assert_eq!(
        err,
        PacketError::UnknownPacketId {
            id: ids::UPDATE_ABILITIES
        }
    );
}

#[test]
fn test_truncation_at_every_offset_is_truncated() {
    let mut rng = StdRng::seed_from_u64(7);
    for protocol in all_versions() {
        let pool = Pool::for_protocol(protocol);
        for packet in sample_packets(&mut rng, protocol) {
            let bytes = codec::encode(&packet, Header::new(packet.id()), protocol).unwrap();
            for cut in 0..bytes.len() {
                let err = codec::decode(&bytes[..cut], &pool, protocol).unwrap_err();
                assert!(
                    matches!(err, PacketError::Codec(ref e) if e.is_truncated()),
                    "{} under {protocol} cut at {cut}: {err:?}",
                    packet.name()
                );
            }
        }
    }
}

#[test]
fn test_trailing_bytes_are_reported() {
    let packet: Packet = RemoveActor {
        entity_unique_id: -5,
    }
    .into();
    let mut bytes = codec::encode(&packet, Header::new(packet.id()), ID545).unwrap();
    bytes.extend_from_slice(&[0xff, 0xff]);

    let decoded = codec::decode(&bytes, &Pool::latest(), ID545).unwrap();
    assert_eq!(decoded.packet, packet);
    assert_eq!(decoded.trailing, 2);
}

#[test]
fn test_too_many_layers_fail_to_encode() {
    let packet: Packet = UpdateAbilities {
        layers: vec![AbilityLayer::legacy_base(); 256],
        ..UpdateAbilities::default()
    }
    .into();
    let err = codec::encode(&packet, Header::new(packet.id()), ID545).unwrap_err();
    assert_eq!(
        err,
        PacketError::Codec(CodecError::LengthOverflow { len: 256, max: 255 })
    );
}

#[test]
fn test_sub_client_header_round_trips() {
    let packet: Packet = RemoveActor {
        entity_unique_id: 1,
    }
    .into();
    let header = Header {
        packet_id: packet.id(),
        sender_sub_client: 1,
        target_sub_client: 2,
    };
    let bytes = codec::encode(&packet, header, ID545).unwrap();
    let decoded = codec::decode(&bytes, &Pool::latest(), ID545).unwrap();
    assert_eq!(decoded.header, header);
}

// =========================================================================
// Debug dumps
// =========================================================================

#[test]
fn test_packet_dumps_as_tagged_json() {
    let packet: Packet = RemoveVolumeEntity {
        entity_runtime_id: 7,
        dimension: 1,
    }
    .into();
    let json = serde_json::to_value(&packet).unwrap();
    assert_eq!(json["type"], "RemoveVolumeEntity");
    assert_eq!(json["data"]["entity_runtime_id"], 7);

    let back: Packet = serde_json::from_value(json).unwrap();
    assert_eq!(back, packet);
}
