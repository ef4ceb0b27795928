//! Per-client local storage
//!
//! Every browser talking to the dashboard owns an isolated key-value
//! namespace, identified by the client cookie. Backends store
//! `(client, key) -> value`; [`ClientScope`] narrows a backend to one
//! client so the core stores can run over it.

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryClientStorage;
pub use sqlite::SqliteClientStorage;

use helmet_core::KeyValueStorage;
use serde::{Deserialize, Serialize};

/// Result type for store operations
pub type StoreResult<T> = helmet_core::Result<T>;

/// Identifies one browser's storage namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trait for client-partitioned key-value storage
pub trait ClientStorage: Send + Sync {
    /// Read `key` in the client's namespace
    fn get_item(&self, client: &ClientId, key: &str) -> StoreResult<Option<String>>;

    /// Write `key` in the client's namespace, replacing any previous value
    fn set_item(&self, client: &ClientId, key: &str, value: &str) -> StoreResult<()>;

    /// Delete `key` from the client's namespace
    fn remove_item(&self, client: &ClientId, key: &str) -> StoreResult<()>;

    /// Narrow this storage to one client
    fn scope<'a>(&'a self, client: &'a ClientId) -> ClientScope<'a, Self>
    where
        Self: Sized,
    {
        ClientScope {
            storage: self,
            client,
        }
    }
}

/// One client's view of a [`ClientStorage`]
pub struct ClientScope<'a, S> {
    storage: &'a S,
    client: &'a ClientId,
}

impl<S: ClientStorage> KeyValueStorage for ClientScope<'_, S> {
    fn get_item(&self, key: &str) -> helmet_core::Result<Option<String>> {
        self.storage.get_item(self.client, key)
    }

    fn set_item(&self, key: &str, value: &str) -> helmet_core::Result<()> {
        self.storage.set_item(self.client, key, value)
    }

    fn remove_item(&self, key: &str) -> helmet_core::Result<()> {
        self.storage.remove_item(self.client, key)
    }
}
