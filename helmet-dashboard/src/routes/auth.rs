//! Login, logout and registration endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use helmet_core::guard::LANDING_PATH;
use helmet_core::session::LOGIN_PATH;
use helmet_core::{AuthUser, Navigation, Registration};
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;

use super::session::client_id;
use crate::error::DashboardError;
use crate::state::AppState;
use crate::store::ClientStorage;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: AuthUser,
    pub redirect: &'static str,
}

/// POST /api/login
pub async fn login<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    let records = state.records(&client);
    let mut session = state.session(&client)?;

    let user = helmet_core::authenticate(&records, &mut session, &req.email, &req.password)?;

    Ok(Json(LoginResponse {
        success: true,
        user,
        redirect: LANDING_PATH,
    }))
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub redirect: &'static str,
}

/// POST /api/logout
pub async fn logout<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
) -> Result<Json<LogoutResponse>, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    let mut session = state.session(&client)?;

    let Navigation::Redirect(redirect) = session.logout()?;

    Ok(Json(LogoutResponse {
        success: true,
        redirect,
    }))
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub id: String,
    pub redirect: &'static str,
}

/// POST /api/register
///
/// The form is checked up front; a valid form then waits out the
/// configured delay before it is written.
pub async fn register<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
    Json(form): Json<Registration>,
) -> Result<Json<RegisterResponse>, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    form.validate()?;
    tokio::time::sleep(state.config.registration_delay()).await;

    let records = state.records(&client);
    let record = helmet_core::register(&records, form, chrono::Utc::now())?;

    Ok(Json(RegisterResponse {
        success: true,
        id: record.id,
        redirect: LOGIN_PATH,
    }))
}
