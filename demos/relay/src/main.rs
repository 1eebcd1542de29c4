//! Relays a legacy (1.18.30) client to a current (1.19.21) client over
//! in-memory connections and prints every canonical packet that arrives.
//!
//! ```text
//! cargo run -p strata-relay [session-config.json]
//! RUST_LOG=strata_session=trace cargo run -p strata-relay
//! ```

use std::sync::Arc;

use strata::packet::{AddPlayer, RemoveActor, RemoveVolumeEntity};
use strata::prelude::*;
use strata::wire::version::ID503;
use strata::wire::{AbilityLayer, Vec3};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SessionConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SessionConfig::default(),
    };
    let registry = Arc::new(ProtocolRegistry::standard());
    tracing::info!(versions = ?registry.versions(), "protocols loaded");

    let conn = |c| PacketConn::new(c, Arc::clone(&registry), config.clone());
    let (legacy_end, inbound_end) = MemoryConnection::pair();
    let (outbound_end, current_end) = MemoryConnection::pair();
    let mut legacy = conn(legacy_end);
    let mut inbound = conn(inbound_end);
    let mut outbound = conn(outbound_end);
    let mut current = conn(current_end);

    legacy.negotiate(ID503)?;
    inbound.negotiate(ID503)?;
    outbound.negotiate(CURRENT_PROTOCOL)?;
    current.negotiate(CURRENT_PROTOCOL)?;

    let relay = tokio::spawn(async move {
        let forwarded = forward(&inbound, &outbound).await?;
        outbound.close().await?;
        Ok::<_, StrataError>(forwarded)
    });

    legacy
        .write_packets([
            AddPlayer {
                uuid: Uuid::new_v4(),
                username: "Steve".into(),
                entity_runtime_id: 1,
                entity_unique_id: 1,
                position: Vec3::new(0.5, 64.0, 0.5),
                game_type: 1,
                layers: vec![AbilityLayer::legacy_base()],
                ..AddPlayer::default()
            }
            .into(),
            RemoveVolumeEntity {
                entity_runtime_id: 12,
                dimension: 0,
            }
            .into(),
            RemoveActor {
                entity_unique_id: 1,
            }
            .into(),
        ])
        .await?;
    legacy.close().await?;

    while let Some(packets) = current.read_packets().await? {
        for packet in packets {
            println!("{}", serde_json::to_string(&packet)?);
        }
    }

    let forwarded = relay.await??;
    tracing::info!(forwarded, "relay finished");
    Ok(())
}
