//! Dashboard application state

use helmet_core::{RecordStore, SessionStore};

use crate::config::Config;
use crate::error::DashboardError;
use crate::store::{ClientId, ClientScope, ClientStorage};
use crate::views::Views;

/// Shared state handed to every handler
pub struct AppState<S> {
    pub storage: S,
    pub config: Config,
    pub views: Views,
}

impl<S: ClientStorage> AppState<S> {
    pub fn new(storage: S, config: Config) -> Result<Self, DashboardError> {
        Ok(Self {
            storage,
            config,
            views: Views::new()?,
        })
    }

    /// The roster as seen by `client`
    pub fn records<'a>(&'a self, client: &'a ClientId) -> RecordStore<ClientScope<'a, S>> {
        RecordStore::new(self.storage.scope(client))
    }

    /// `client`'s session, already loaded from storage
    pub fn session<'a>(
        &'a self,
        client: &'a ClientId,
    ) -> Result<SessionStore<ClientScope<'a, S>>, DashboardError> {
        Ok(SessionStore::load(self.storage.scope(client))?)
    }
}
