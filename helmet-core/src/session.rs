//! Session store: the single "who is logged in" slot

use serde::Serialize;

use crate::models::AuthUser;
use crate::storage::KeyValueStorage;
use crate::{Error, Result};

/// Storage key holding the logged-in user
pub const AUTH_USER_KEY: &str = "smartHelmetAuthUser";

/// Path of the login page
pub const LOGIN_PATH: &str = "/login";

/// State of the session slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "user", rename_all = "snake_case")]
pub enum SessionStatus {
    /// Persisted state has not been read yet
    Loading,
    /// Nobody is logged in
    Absent,
    /// Logged in as the given user
    Active(AuthUser),
}

impl SessionStatus {
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            SessionStatus::Active(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionStatus::Loading)
    }
}

/// Where the caller should send the user next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Redirect(&'static str),
}

/// The current session, backed by one storage namespace
pub struct SessionStore<S> {
    storage: S,
    status: SessionStatus,
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Create a store in the `Loading` state; call [`init`](Self::init) to read it
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            status: SessionStatus::Loading,
        }
    }

    /// Create and immediately load a store
    pub fn load(storage: S) -> Result<Self> {
        let mut store = Self::new(storage);
        store.init()?;
        Ok(store)
    }

    /// Read the persisted session, discarding it if it is corrupt
    pub fn init(&mut self) -> Result<&SessionStatus> {
        let user = match self.storage.get_item(AUTH_USER_KEY)? {
            None => None,
            Some(raw) => match serde_json::from_str::<AuthUser>(&raw) {
                Ok(user) if user.is_complete() => Some(user),
                Ok(_) => {
                    tracing::warn!("Stored session is incomplete, discarding");
                    self.storage.remove_item(AUTH_USER_KEY)?;
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Error loading auth user, discarding");
                    self.storage.remove_item(AUTH_USER_KEY)?;
                    None
                }
            },
        };

        self.status = match user {
            Some(user) => SessionStatus::Active(user),
            None => SessionStatus::Absent,
        };
        Ok(&self.status)
    }

    pub fn current(&self) -> &SessionStatus {
        &self.status
    }

    /// Persist `user` as the logged-in identity
    pub fn login(&mut self, user: AuthUser) -> Result<()> {
        if !user.is_complete() {
            tracing::warn!("Rejected login with incomplete user data");
            return Err(Error::InvalidSession);
        }

        let raw = serde_json::to_string(&user)?;
        self.storage.set_item(AUTH_USER_KEY, &raw)?;
        tracing::info!(name = %user.name, "User logged in");
        self.status = SessionStatus::Active(user);
        Ok(())
    }

    /// Clear the session and tell the caller to go to the login page
    pub fn logout(&mut self) -> Result<Navigation> {
        self.storage.remove_item(AUTH_USER_KEY)?;
        self.status = SessionStatus::Absent;
        tracing::info!("User logged out");
        Ok(Navigation::Redirect(LOGIN_PATH))
    }
}
