//! Adapter registry.
//!
//! The registry maps adapter type identifiers to live adapter instances.
//! It is populated once at startup with one instance per installed
//! frontend kind and shared behind `Arc` clones from then on; resolving
//! never constructs anything.

use std::collections::HashMap;
use std::sync::Arc;

use ondecore::Station;
use tracing::debug;

use crate::adapter::FrontendAdapter;
use crate::error::{FrontendError, Result};
use crate::types::FrontendType;

/// Immutable lookup table from adapter identifiers to instances.
pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn FrontendAdapter>>,
}

impl AdapterRegistry {
    pub fn builder() -> AdapterRegistryBuilder {
        AdapterRegistryBuilder::default()
    }

    /// Resolves an adapter by its type identifier.
    pub fn resolve(&self, identifier: &str) -> Result<Arc<dyn FrontendAdapter>> {
        self.adapters
            .get(identifier)
            .cloned()
            .ok_or_else(|| FrontendError::UnknownAdapter(identifier.to_string()))
    }

    /// Resolves the adapter configured for `station`.
    pub fn resolve_for(&self, station: &Station) -> Result<Arc<dyn FrontendAdapter>> {
        self.resolve(&station.frontend_type)
    }

    /// Identifiers with a registered adapter, in no particular order.
    pub fn registered(&self) -> impl Iterator<Item = &str> {
        self.adapters.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut identifiers: Vec<_> = self.adapters.keys().collect();
        identifiers.sort();
        f.debug_struct("AdapterRegistry")
            .field("adapters", &identifiers)
            .finish()
    }
}

/// Builder collecting adapter registrations.
#[derive(Default)]
pub struct AdapterRegistryBuilder {
    adapters: HashMap<String, Arc<dyn FrontendAdapter>>,
}

impl AdapterRegistryBuilder {
    /// Registers `adapter` under `kind`. A later registration for the same
    /// kind replaces the earlier one.
    pub fn register(mut self, kind: FrontendType, adapter: Arc<dyn FrontendAdapter>) -> Self {
        debug!(kind = %kind, "registering frontend adapter");
        self.adapters.insert(kind.as_str().to_string(), adapter);
        self
    }

    pub fn build(self) -> AdapterRegistry {
        AdapterRegistry {
            adapters: self.adapters,
        }
    }
}
