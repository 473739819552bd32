// src/registry.rs

use crate::client::SearchClient;
use crate::error::Result;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Owns one client handle per endpoint identity for the life of the process.
///
/// Entries are inserted once and never replaced or removed. Create a single
/// registry at startup and hand an `Arc` of it to every probe.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: DashMap<String, Arc<dyn SearchClient>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `identity`, creating it with `make` if absent.
    ///
    /// `make` runs while the entry's shard is locked, so concurrent callers for
    /// the same identity build at most one handle. It must not block on I/O.
    pub fn get_or_insert_with<F>(&self, identity: &str, make: F) -> Result<Arc<dyn SearchClient>>
    where
        F: FnOnce() -> Result<Arc<dyn SearchClient>>,
    {
        match self.connections.entry(identity.to_string()) {
            Entry::Occupied(entry) => {
                debug!(endpoint = %identity, "Reusing registered search client");
                Ok(Arc::clone(entry.get()))
            }
            Entry::Vacant(entry) => {
                let client = make()?;
                entry.insert(Arc::clone(&client));
                debug!(endpoint = %identity, "Registered new search client");
                Ok(client)
            }
        }
    }

    /// Clones the handle out so no shard lock outlives the call.
    pub fn get(&self, identity: &str) -> Option<Arc<dyn SearchClient>> {
        self.connections
            .get(identity)
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.connections.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut identities: Vec<String> = self
            .connections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        identities.sort();
        f.debug_struct("ConnectionRegistry")
            .field("endpoints", &identities)
            .finish()
    }
}
