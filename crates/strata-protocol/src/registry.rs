//! The set of protocol versions a server accepts.

use std::fmt;
use std::sync::Arc;

use strata_wire::ProtocolVersion;

use crate::{Current, Legacy, Protocol, ProtocolError};

/// Supported protocol descriptors, newest first.
///
/// Built once at startup and shared by every connection. The canonical
/// descriptor is always present and always first.
#[derive(Clone)]
pub struct ProtocolRegistry {
    protocols: Vec<Arc<dyn Protocol>>,
}

impl ProtocolRegistry {
    /// A registry holding only the canonical descriptor.
    pub fn new() -> Self {
        Self {
            protocols: vec![Arc::new(Current::new())],
        }
    }

    /// Every version Strata ships with.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for version in ProtocolVersion::SUPPORTED {
            if !registry.contains(version.id) {
                registry.protocols.push(Arc::new(Legacy::new(version)));
            }
        }
        registry.sort();
        registry
    }

    /// Adds a descriptor.
    ///
    /// # Errors
    /// Returns [`ProtocolError::DuplicateProtocol`] if a descriptor with
    /// the same id is already registered.
    pub fn register(&mut self, protocol: Arc<dyn Protocol>) -> Result<(), ProtocolError> {
        let id = protocol.id();
        if self.contains(id) {
            return Err(ProtocolError::DuplicateProtocol { id });
        }
        self.protocols.push(protocol);
        self.sort();
        Ok(())
    }

    /// The descriptor for `id`, if supported.
    pub fn get(&self, id: i32) -> Option<Arc<dyn Protocol>> {
        self.protocols.iter().find(|p| p.id() == id).cloned()
    }

    /// The canonical descriptor.
    pub fn latest(&self) -> Arc<dyn Protocol> {
        match self.get(strata_wire::CURRENT_PROTOCOL) {
            Some(current) => current,
            None => Arc::new(Current::new()),
        }
    }

    pub fn contains(&self, id: i32) -> bool {
        self.protocols.iter().any(|p| p.id() == id)
    }

    /// Supported versions, newest first.
    pub fn versions(&self) -> Vec<ProtocolVersion> {
        self.protocols.iter().map(|p| p.version()).collect()
    }

    fn sort(&mut self) {
        self.protocols.sort_by_key(|p| std::cmp::Reverse(p.id()));
    }
}

impl Default for ProtocolRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for ProtocolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolRegistry")
            .field("versions", &self.versions())
            .finish()
    }
}
