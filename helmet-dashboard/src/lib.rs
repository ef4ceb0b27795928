//! Smart Helmet Dashboard
//!
//! Server-rendered administration dashboard for the Smart Helmet
//! monitoring product: login and registration, the driver roster, the
//! alerts feed and the analysis overview.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;
pub mod views;

pub use config::Config;
pub use error::DashboardError;
pub use state::AppState;
pub use store::{ClientId, ClientStorage, InMemoryClientStorage, SqliteClientStorage};
