//! Server-rendered pages
//!
//! Every page runs the route guard against the caller's session before
//! anything is rendered.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use helmet_core::alerts::Severity;
use helmet_core::guard::{self, GuardDecision, PageGroup};
use helmet_core::models::default_drivers;
use helmet_core::{BloodType, SessionStatus};
use minijinja::context;
use tower_cookies::Cookies;

use super::dashboard::{filtered_alerts, AlertQuery, AnalysisResponse, RangeQuery};
use super::drivers::{DriverView, RosterQuery};
use super::session::client_id;
use crate::error::DashboardError;
use crate::state::AppState;
use crate::store::ClientStorage;
use crate::views::Views;

/// Apply the guard for `group`, rendering with `render` only when allowed
fn guarded<F>(
    views: &Views,
    group: PageGroup,
    status: &SessionStatus,
    render: F,
) -> Result<Response, DashboardError>
where
    F: FnOnce() -> Result<Html<String>, DashboardError>,
{
    match guard::evaluate(group, status) {
        GuardDecision::Render => Ok(render()?.into_response()),
        GuardDecision::Redirect(to) => {
            tracing::debug!(?group, to, "Guard redirect");
            Ok(Redirect::to(to).into_response())
        }
        GuardDecision::Placeholder(message) => Ok(views.placeholder(message)?.into_response()),
    }
}

fn blood_type_names() -> Vec<&'static str> {
    BloodType::ALL.iter().map(|t| t.as_str()).collect()
}

/// GET /
pub async fn landing<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
) -> Result<Response, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    let session = state.session(&client)?;
    guarded(&state.views, PageGroup::Public, session.current(), || {
        state.views.render("landing.html", context! {})
    })
}

/// GET /login
pub async fn login<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
) -> Result<Response, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    let session = state.session(&client)?;
    guarded(&state.views, PageGroup::PublicOnly, session.current(), || {
        state.views.render("login.html", context! {})
    })
}

/// GET /register
pub async fn register<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
) -> Result<Response, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    let session = state.session(&client)?;
    let blood_types = blood_type_names();
    guarded(&state.views, PageGroup::PublicOnly, session.current(), || {
        state.views.render("register.html", context! { blood_types })
    })
}

/// GET /analysis
pub async fn analysis<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
    Query(range): Query<RangeQuery>,
) -> Result<Response, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    let session = state.session(&client)?;
    let status = session.current();
    guarded(&state.views, PageGroup::Protected, status, || {
        let data = AnalysisResponse::for_range(&range);
        state.views.render(
            "analysis.html",
            context! {
                user => status.user(),
                samples => data.samples,
                total => data.total,
                severity => data.severity,
                start => range.start.map(|d| d.to_string()),
                end => range.end.map(|d| d.to_string()),
            },
        )
    })
}

/// GET /alerts
pub async fn alerts<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
    Query(query): Query<AlertQuery>,
) -> Result<Response, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    let session = state.session(&client)?;
    let status = session.current();
    guarded(&state.views, PageGroup::Protected, status, || {
        let severities: Vec<_> = Severity::ALL.iter().map(|s| s.as_str()).collect();
        state.views.render(
            "alerts.html",
            context! {
                user => status.user(),
                alerts => filtered_alerts(&query),
                search => &query.search,
                severity => query.severity.as_deref().unwrap_or("All"),
                severities,
            },
        )
    })
}

/// GET /drivers
pub async fn drivers<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
    Query(query): Query<RosterQuery>,
) -> Result<Response, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    let session = state.session(&client)?;
    let status = session.current();
    guarded(&state.views, PageGroup::Protected, status, || {
        let records = state.records(&client).load_or_seed(default_drivers)?;
        let drivers: Vec<_> = query
            .filter()
            .apply(&records)
            .into_iter()
            .map(DriverView::from)
            .collect();
        state.views.render(
            "drivers.html",
            context! {
                user => status.user(),
                drivers,
                search => &query.search,
                status => query.status.as_deref().unwrap_or("All"),
                blood_types => blood_type_names(),
            },
        )
    })
}

/// GET /drivers/{id}
pub async fn driver_detail<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
    Path(id): Path<String>,
) -> Result<Response, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    let session = state.session(&client)?;
    let status = session.current();
    guarded(&state.views, PageGroup::Protected, status, || {
        let driver = state.records(&client).find(&id)?;
        state.views.render(
            "driver_detail.html",
            context! {
                user => status.user(),
                driver => driver.as_ref().map(DriverView::from),
            },
        )
    })
}
