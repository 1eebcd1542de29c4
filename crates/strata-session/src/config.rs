//! Session configuration.

use serde::{Deserialize, Serialize};
use strata_protocol::Features;

/// Largest incoming packet accepted by default: 2 MiB.
pub const DEFAULT_MAX_PACKET_SIZE: usize = 2 * 1024 * 1024;

/// Configuration for one connection's session.
///
/// Every field has a default, so a JSON config only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Incoming buffers longer than this are rejected before decoding.
    pub max_packet_size: usize,

    /// Reject a packet whose payload leaves bytes unread. When `false`
    /// the packet is kept and a warning is logged.
    pub reject_trailing_bytes: bool,

    /// Switches consulted by packet conversions.
    pub features: Features,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_packet_size: DEFAULT_MAX_PACKET_SIZE,
            reject_trailing_bytes: false,
            features: Features::default(),
        }
    }
}

#[cfg(feature = "json")]
impl SessionConfig {
    /// Parses a config from JSON.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`](crate::SessionError::Config) if the
    /// JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, crate::SessionError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = SessionConfig::default();
        assert_eq!(config.max_packet_size, 2 * 1024 * 1024);
        assert!(!config.reject_trailing_bytes);
        assert!(config.features.spawn_adventure_settings);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_from_json_partial_keeps_defaults() {
        let config = SessionConfig::from_json(
            r#"{"reject_trailing_bytes": true, "features": {"spawn_adventure_settings": false}}"#,
        )
        .unwrap();
        assert!(config.reject_trailing_bytes);
        assert!(!config.features.spawn_adventure_settings);
        assert_eq!(config.max_packet_size, DEFAULT_MAX_PACKET_SIZE);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_from_json_wrong_type_is_error() {
        let err = SessionConfig::from_json(r#"{"max_packet_size": "big"}"#).unwrap_err();
        assert!(matches!(err, crate::SessionError::Config(_)));
    }
}
