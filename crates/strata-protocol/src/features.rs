//! Per-connection feature flags consulted by conversions.

use serde::{Deserialize, Serialize};

/// Optional behaviour switched on or off per connection.
///
/// Missing fields fall back to their defaults when deserialized, so a
/// config file only needs to name the flags it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    /// Follow every `AddPlayer` sent to a pre-534 peer with an
    /// `AdventureSettings` derived from the spawn's base layer. Without
    /// it those peers see the player with no permissions until the next
    /// abilities update.
    pub spawn_adventure_settings: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            spawn_adventure_settings: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spawns_adventure_settings() {
        assert!(Features::default().spawn_adventure_settings);
    }

    #[test]
    fn test_deserialize_empty_object_uses_defaults() {
        let features: Features = serde_json::from_str("{}").unwrap();
        assert_eq!(features, Features::default());
    }

    #[test]
    fn test_deserialize_overrides_flag() {
        let features: Features =
            serde_json::from_str(r#"{"spawn_adventure_settings": false}"#).unwrap();
        assert!(!features.spawn_adventure_settings);
    }
}
