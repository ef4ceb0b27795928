//! Local record store: the driver roster persisted under a single key

use crate::models::{DriverStatus, Record};
use crate::storage::KeyValueStorage;
use crate::{Error, Result};

/// Storage key holding the roster (and registered credentials)
pub const DRIVERS_KEY: &str = "smartHelmetDrivers";

/// The roster, read and written whole on every operation
pub struct RecordStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> RecordStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Whether anything has been persisted under the roster key yet
    pub fn exists(&self) -> Result<bool> {
        Ok(self.storage.get_item(DRIVERS_KEY)?.is_some())
    }

    /// Load the roster; a missing or unparseable value yields an empty list
    pub fn load(&self) -> Result<Vec<Record>> {
        let Some(raw) = self.storage.get_item(DRIVERS_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(error = %e, key = DRIVERS_KEY, "Failed to parse drivers");
                Ok(Vec::new())
            }
        }
    }

    /// Load the roster, persisting `defaults` first if nothing is stored yet
    pub fn load_or_seed(&self, defaults: impl FnOnce() -> Vec<Record>) -> Result<Vec<Record>> {
        if self.exists()? {
            return self.load();
        }
        let records = defaults();
        tracing::debug!(count = records.len(), "Seeding driver roster");
        self.save(&records)?;
        Ok(records)
    }

    /// Overwrite the stored roster
    pub fn save(&self, records: &[Record]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.storage.set_item(DRIVERS_KEY, &raw)?;
        tracing::debug!(count = records.len(), "Saved drivers");
        Ok(())
    }

    /// Find a record by id
    pub fn find(&self, id: &str) -> Result<Option<Record>> {
        Ok(self.load()?.into_iter().find(|r| r.id == id))
    }

    /// Append a record; fails with `DuplicateId` if the id is taken
    pub fn insert(&self, record: Record) -> Result<()> {
        let mut records = self.load()?;
        if records.iter().any(|r| r.id == record.id) {
            return Err(Error::DuplicateId { id: record.id });
        }
        check_login_email(&records, &record, None)?;
        records.push(record);
        self.save(&records)
    }

    /// Replace the record currently stored as `original_id`, keeping its position
    ///
    /// The new id may differ from `original_id` but must not collide with
    /// any other record. A credential record must also keep an email no
    /// other credential uses.
    pub fn replace(&self, original_id: &str, record: Record) -> Result<()> {
        let mut records = self.load()?;
        if records
            .iter()
            .any(|r| r.id == record.id && r.id != original_id)
        {
            return Err(Error::DuplicateId { id: record.id });
        }
        check_login_email(&records, &record, Some(original_id))?;

        let slot = records
            .iter_mut()
            .find(|r| r.id == original_id)
            .ok_or_else(|| Error::RecordNotFound {
                id: original_id.to_string(),
            })?;
        *slot = record;
        self.save(&records)
    }

    /// Remove the record with `id`; a missing id leaves the roster unchanged
    pub fn remove(&self, id: &str) -> Result<()> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            tracing::debug!(id, "Remove of unknown driver ignored");
            return Ok(());
        }
        self.save(&records)
    }
}

/// Login emails are unique among credential records, ignoring case
pub(crate) fn check_login_email(
    records: &[Record],
    record: &Record,
    skip_id: Option<&str>,
) -> Result<()> {
    if !record.is_credential() {
        return Ok(());
    }

    let email = record.email.to_lowercase();
    let taken = records.iter().any(|r| {
        Some(r.id.as_str()) != skip_id && r.is_credential() && r.email.to_lowercase() == email
    });
    if taken {
        return Err(Error::EmailAlreadyRegistered {
            email: record.email.clone(),
        });
    }
    Ok(())
}

/// Status selector on the roster page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(DriverStatus),
}

impl StatusFilter {
    /// Parse the query value; empty or unknown values mean `All`
    pub fn from_query(s: Option<&str>) -> Self {
        s.and_then(DriverStatus::from_str)
            .map(StatusFilter::Only)
            .unwrap_or_default()
    }
}

/// Search box plus status selector
#[derive(Debug, Clone, Default)]
pub struct RosterFilter {
    pub search: String,
    pub status: StatusFilter,
}

impl RosterFilter {
    pub fn matches(&self, record: &Record) -> bool {
        let needle = self.search.to_lowercase();
        let search_match = record.name.to_lowercase().contains(&needle)
            || record.id.to_lowercase().contains(&needle);
        let status_match = match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => record.status == status,
        };
        search_match && status_match
    }

    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
