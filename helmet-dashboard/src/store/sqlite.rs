//! SQLite-based storage implementation

use std::sync::Mutex;

use chrono::Utc;
use helmet_core::Error;
use rusqlite::{params, Connection, OptionalExtension};

use super::{ClientId, ClientStorage, StoreResult};

/// Schema steps in order; each runs once, on databases older than its version
const MIGRATIONS: &[(i32, &str)] = &[(
    1,
    r#"
    CREATE TABLE local_storage (
        client_id TEXT NOT NULL,
        key TEXT NOT NULL,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        PRIMARY KEY (client_id, key)
    );
    "#,
)];

fn internal(e: rusqlite::Error) -> Error {
    Error::Storage(e.to_string())
}

/// SQLite-backed client storage, survives restarts
pub struct SqliteClientStorage {
    conn: Mutex<Connection>,
}

impl SqliteClientStorage {
    /// Open or create a SQLite database at the given path
    pub fn open(path: &str) -> StoreResult<Self> {
        let conn = Connection::open(path).map_err(internal)?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(internal)?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> StoreResult<Self> {
        Self::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn migrate(conn: &mut Connection) -> StoreResult<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY)",
        )
        .map_err(internal)?;
        let current = Self::read_version(conn)?;

        for (version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
            tracing::info!(from = current, to = version, "Migrating client storage");
            let tx = conn.transaction().map_err(internal)?;
            tx.execute_batch(sql).map_err(internal)?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![version],
            )
            .map_err(internal)?;
            tx.commit().map_err(internal)?;
        }

        Ok(())
    }

    fn read_version(conn: &Connection) -> StoreResult<i32> {
        conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .map_err(internal)
    }

    /// Highest migration applied to this database
    pub fn schema_version(&self) -> StoreResult<i32> {
        Self::read_version(&*self.lock()?)
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| Error::Storage(e.to_string()))
    }
}

impl ClientStorage for SqliteClientStorage {
    fn get_item(&self, client: &ClientId, key: &str) -> StoreResult<Option<String>> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT value FROM local_storage WHERE client_id = ?1 AND key = ?2",
            params![client.as_str(), key],
            |row| row.get(0),
        )
        .optional()
        .map_err(internal)
    }

    fn set_item(&self, client: &ClientId, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO local_storage (client_id, key, value, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(client_id, key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![client.as_str(), key, value, Utc::now().to_rfc3339()],
        )
        .map_err(internal)?;
        Ok(())
    }

    fn remove_item(&self, client: &ClientId, key: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM local_storage WHERE client_id = ?1 AND key = ?2",
            params![client.as_str(), key],
        )
        .map_err(internal)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrite_remove() {
        let store = SqliteClientStorage::open_in_memory().unwrap();
        let client = ClientId("c1".into());

        assert!(store.get_item(&client, "k").unwrap().is_none());
        store.set_item(&client, "k", "v1").unwrap();
        store.set_item(&client, "k", "v2").unwrap();
        assert_eq!(store.get_item(&client, "k").unwrap().as_deref(), Some("v2"));

        store.remove_item(&client, "k").unwrap();
        store.remove_item(&client, "k").unwrap();
        assert!(store.get_item(&client, "k").unwrap().is_none());
    }

    #[test]
    fn test_fresh_database_is_current() {
        let store = SqliteClientStorage::open_in_memory().unwrap();
        let latest = MIGRATIONS.last().map(|(v, _)| *v).unwrap();
        assert_eq!(store.schema_version().unwrap(), latest);
    }

    #[test]
    fn test_clients_are_isolated() {
        let store = SqliteClientStorage::open_in_memory().unwrap();
        store.set_item(&ClientId("a".into()), "k", "a").unwrap();
        assert!(store.get_item(&ClientId("b".into()), "k").unwrap().is_none());
    }
}
