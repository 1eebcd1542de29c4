//! Unified error type for Strata.

use strata_session::SessionError;
use strata_transport::TransportError;

/// Top-level error that wraps the errors a connection can hit.
#[derive(Debug, thiserror::Error)]
pub enum StrataError {
    /// The connection failed to send or receive.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Negotiation, decoding, encoding or conversion failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl StrataError {
    /// Returns `true` if the connection should be dropped.
    ///
    /// Transport failures always end the connection. Session errors end it
    /// only when the peer broke the protocol itself.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Session(err) => err.is_fatal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use strata_packet::PacketError;
    use strata_transport::ConnectionId;
    use strata_wire::CodecError;

    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err: StrataError = TransportError::ConnectionClosed(ConnectionId::new(3)).into();
        assert!(matches!(err, StrataError::Transport(_)));
        assert!(err.to_string().contains("conn-3"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_from_session_error() {
        let err: StrataError = SessionError::ProtocolNotNegotiated.into();
        assert!(matches!(err, StrataError::Session(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_malformed_packet_is_not_fatal() {
        let err: StrataError = SessionError::from(PacketError::Codec(CodecError::Truncated {
            offset: 1,
            needed: 8,
            available: 2,
        }))
        .into();
        assert!(!err.is_fatal());
    }
}
