/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection was closed by either side.
    #[error("connection {0} closed")]
    ConnectionClosed(crate::ConnectionId),
}
