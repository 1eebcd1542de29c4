//! Error types for the wire layer.
//!
//! Every variant describes a problem with ONE packet's bytes. A reader
//! borrows a single buffer, so an error here never leaves state behind
//! that could affect the next buffer: the caller drops the packet and
//! decides (usually at the transport layer) whether the connection
//! survives.

/// Errors produced while reading or writing wire primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The buffer ended before a field was complete, or a declared
    /// length (string, byte slice, sequence count) is larger than what
    /// is left in the buffer.
    #[error("truncated at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A variable-length integer kept its continuation bit set past the
    /// maximum width, or carried bits that do not fit its target type.
    #[error("malformed varint at offset {offset}")]
    MalformedVarint { offset: usize },

    /// A well-formed integer whose value is larger than the field allows.
    #[error("value {value} at offset {offset} exceeds maximum {max}")]
    ValueOutOfRange { offset: usize, value: u64, max: u64 },

    /// A length-prefixed string was not valid UTF-8.
    #[error("malformed string at offset {offset}")]
    MalformedString { offset: usize },

    /// A boolean byte was neither 0 nor 1.
    #[error("invalid bool {value:#04x} at offset {offset}")]
    InvalidBool { offset: usize, value: u8 },

    /// An entity metadata entry uses a value type we have no layout for.
    #[error("unsupported metadata type {kind} for key {key}")]
    UnsupportedMetadataType { key: u32, kind: u32 },

    /// Encode side: a sequence is longer than its count prefix can hold.
    #[error("length {len} exceeds prefix maximum {max}")]
    LengthOverflow { len: usize, max: usize },
}

impl CodecError {
    /// Returns `true` for errors caused by the buffer ending early.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}
