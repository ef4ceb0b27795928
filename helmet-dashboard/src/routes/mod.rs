//! HTTP routes for the dashboard

mod auth;
mod dashboard;
mod drivers;
mod pages;
mod session;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_cookies::CookieManagerLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::store::ClientStorage;

pub use session::CLIENT_COOKIE;

/// Create the router with all routes
pub fn create_router<S>(state: Arc<AppState<S>>) -> Router
where
    S: ClientStorage + 'static,
{
    let static_dir = state.config.static_dir.clone();

    Router::new()
        // Pages
        .route("/", get(pages::landing))
        .route("/login", get(pages::login))
        .route("/register", get(pages::register))
        .route("/analysis", get(pages::analysis))
        .route("/alerts", get(pages::alerts))
        .route("/drivers", get(pages::drivers))
        .route("/drivers/{id}", get(pages::driver_detail))
        // JSON API
        .route("/api/session", get(session::get_session_context))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route("/api/register", post(auth::register))
        .route(
            "/api/drivers",
            get(drivers::list_drivers).post(drivers::create_driver),
        )
        .route(
            "/api/drivers/{id}",
            get(drivers::get_driver)
                .put(drivers::update_driver)
                .delete(drivers::delete_driver),
        )
        .route("/api/alerts", get(dashboard::list_alerts))
        .route("/api/analysis", get(dashboard::get_analysis))
        .nest_service("/images", ServeDir::new(static_dir))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
