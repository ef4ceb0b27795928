//! In-memory storage implementation

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use helmet_core::Error;

use super::{ClientId, ClientStorage, StoreResult};

/// In-memory client storage; contents are lost on restart
pub struct InMemoryClientStorage {
    items: RwLock<HashMap<(ClientId, String), String>>,
}

impl InMemoryClientStorage {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }

    /// Number of distinct clients holding at least one key
    pub fn client_count(&self) -> usize {
        let items = match self.items.read() {
            Ok(items) => items,
            Err(_) => return 0,
        };
        items
            .keys()
            .map(|(client, _)| client)
            .collect::<HashSet<_>>()
            .len()
    }
}

impl Default for InMemoryClientStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> Error {
    Error::Storage(e.to_string())
}

impl ClientStorage for InMemoryClientStorage {
    fn get_item(&self, client: &ClientId, key: &str) -> StoreResult<Option<String>> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.get(&(client.clone(), key.to_string())).cloned())
    }

    fn set_item(&self, client: &ClientId, key: &str, value: &str) -> StoreResult<()> {
        self.items
            .write()
            .map_err(poisoned)?
            .insert((client.clone(), key.to_string()), value.to_string());
        Ok(())
    }

    fn remove_item(&self, client: &ClientId, key: &str) -> StoreResult<()> {
        self.items
            .write()
            .map_err(poisoned)?
            .remove(&(client.clone(), key.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helmet_core::KeyValueStorage;

    #[test]
    fn test_clients_are_isolated() {
        let store = InMemoryClientStorage::new();
        let a = ClientId("a".into());
        let b = ClientId("b".into());

        store.set_item(&a, "k", "from-a").unwrap();
        assert!(store.get_item(&b, "k").unwrap().is_none());

        store.set_item(&b, "k", "from-b").unwrap();
        assert_eq!(store.get_item(&a, "k").unwrap().as_deref(), Some("from-a"));
        assert_eq!(store.client_count(), 2);

        store.remove_item(&a, "k").unwrap();
        assert!(store.get_item(&a, "k").unwrap().is_none());
        assert_eq!(store.get_item(&b, "k").unwrap().as_deref(), Some("from-b"));
    }

    #[test]
    fn test_scope_reads_through() {
        let store = InMemoryClientStorage::new();
        let client = ClientId("c".into());

        let scope = store.scope(&client);
        scope.set_item("k", "v").unwrap();
        assert_eq!(store.get_item(&client, "k").unwrap().as_deref(), Some("v"));
    }
}
