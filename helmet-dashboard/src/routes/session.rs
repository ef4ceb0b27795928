//! Client identity cookie and session context endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use helmet_core::{AuthUser, SessionStatus};
use serde::Serialize;
use tower_cookies::{Cookie, Cookies};

use crate::error::DashboardError;
use crate::state::AppState;
use crate::store::{ClientId, ClientScope, ClientStorage};

pub const CLIENT_COOKIE: &str = "helmet_client";

#[derive(Serialize)]
pub struct SessionContext {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,
}

/// GET /api/session
pub async fn get_session_context<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
) -> Result<Json<SessionContext>, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    let session = state.session(&client)?;
    let user = session.current().user().cloned();

    Ok(Json(SessionContext {
        authenticated: user.is_some(),
        user,
    }))
}

/// Identify the calling browser, issuing a new client cookie if it has none
pub fn client_id(cookies: &Cookies) -> ClientId {
    if let Some(cookie) = cookies.get(CLIENT_COOKIE) {
        if !cookie.value().is_empty() {
            return ClientId(cookie.value().to_string());
        }
    }

    let client = ClientId::generate();
    tracing::debug!(client = client.as_str(), "Issuing client cookie");
    let cookie = Cookie::build((CLIENT_COOKIE, client.0.clone()))
        .path("/")
        .http_only(true)
        .build();
    cookies.add(cookie);
    client
}

/// The logged-in user, or `NotAuthenticated` for protected API calls
pub fn require_user<S: ClientStorage>(
    session: &helmet_core::SessionStore<ClientScope<'_, S>>,
) -> Result<AuthUser, DashboardError> {
    match session.current() {
        SessionStatus::Active(user) => Ok(user.clone()),
        _ => Err(DashboardError::NotAuthenticated),
    }
}
