//! Smart Helmet core library
//!
//! The pieces of the dashboard that hold state:
//! - the driver roster, persisted whole under one storage key
//! - the session slot recording who is logged in
//! - the route guard deciding which pages a visitor may see
//!
//! All of it runs over a [`KeyValueStorage`], the equivalent of a browser's
//! local storage.

pub mod alerts;
pub mod analysis;
pub mod auth;
pub mod error;
pub mod guard;
pub mod models;
pub mod records;
pub mod session;
pub mod storage;

pub use auth::{authenticate, register, Registration};
pub use error::Error;
pub use guard::{GuardDecision, PageGroup};
pub use models::{AuthUser, BloodType, DriverStatus, Record};
pub use records::{RecordStore, RosterFilter, StatusFilter};
pub use session::{Navigation, SessionStatus, SessionStore};
pub use storage::{KeyValueStorage, MemoryStorage};

/// Result type for helmet-core operations
pub type Result<T> = std::result::Result<T, Error>;
