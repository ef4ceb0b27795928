//! Driver roster endpoints

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use helmet_core::models::{default_drivers, REQUIRED_DRIVER_FIELDS};
use helmet_core::{BloodType, DriverStatus, Record, RosterFilter, StatusFilter};
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;

use super::session::{client_id, require_user};
use crate::error::DashboardError;
use crate::state::AppState;
use crate::store::ClientStorage;

/// A driver as shown to the browser (never includes the password)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub age: u32,
    pub blood_type: BloodType,
    pub status: DriverStatus,
    pub image_url: String,
    pub registered: bool,
}

impl From<&Record> for DriverView {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            phone_number: record.phone_number.clone(),
            age: record.age,
            blood_type: record.blood_type,
            status: record.status,
            image_url: record.image_url().to_string(),
            registered: record.is_credential(),
        }
    }
}

/// The add/edit driver form
///
/// Every field may arrive blank so that a half-filled form gets the
/// required-fields message instead of a decoding error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverForm {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub age: Option<i64>,
    pub blood_type: String,
    pub status: DriverStatus,
    pub image_url: Option<String>,
}

impl DriverForm {
    fn into_record(self, password: Option<String>) -> Result<Record, DashboardError> {
        let (Some(age), Some(blood_type)) = (self.age, BloodType::from_str(&self.blood_type))
        else {
            return Err(helmet_core::Error::Validation(REQUIRED_DRIVER_FIELDS.into()).into());
        };

        let record = Record {
            id: self.id.trim().to_string(),
            name: self.name,
            email: self.email.trim().to_string(),
            password,
            phone_number: self.phone_number,
            // Negative ages fail validation like zero does
            age: u32::try_from(age).unwrap_or(0),
            blood_type,
            status: self.status,
            image_url: self
                .image_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        };
        record.validate()?;
        Ok(record)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RosterQuery {
    #[serde(default)]
    pub search: String,
    pub status: Option<String>,
}

impl RosterQuery {
    pub fn filter(&self) -> RosterFilter {
        RosterFilter {
            search: self.search.clone(),
            status: StatusFilter::from_query(self.status.as_deref()),
        }
    }
}

#[derive(Serialize)]
pub struct DriverListResponse {
    pub drivers: Vec<DriverView>,
}

#[derive(Serialize)]
pub struct DriverResponse {
    pub success: bool,
    pub driver: DriverView,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// GET /api/drivers
pub async fn list_drivers<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
    Query(query): Query<RosterQuery>,
) -> Result<Json<DriverListResponse>, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    require_user(&state.session(&client)?)?;

    let records = state.records(&client).load_or_seed(default_drivers)?;
    let drivers = query
        .filter()
        .apply(&records)
        .into_iter()
        .map(DriverView::from)
        .collect();

    Ok(Json(DriverListResponse { drivers }))
}

/// GET /api/drivers/{id}
pub async fn get_driver<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
    Path(id): Path<String>,
) -> Result<Json<DriverResponse>, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    require_user(&state.session(&client)?)?;

    let record = state
        .records(&client)
        .find(&id)?
        .ok_or(helmet_core::Error::RecordNotFound { id })?;

    Ok(Json(DriverResponse {
        success: true,
        driver: DriverView::from(&record),
    }))
}

/// POST /api/drivers
pub async fn create_driver<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
    Json(form): Json<DriverForm>,
) -> Result<Json<DriverResponse>, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    require_user(&state.session(&client)?)?;

    let records = state.records(&client);
    records.load_or_seed(default_drivers)?;

    let record = form.into_record(None)?;
    records.insert(record.clone())?;
    tracing::info!(id = %record.id, "Driver added");

    Ok(Json(DriverResponse {
        success: true,
        driver: DriverView::from(&record),
    }))
}

/// PUT /api/drivers/{id}
///
/// A registered driver keeps their password across edits.
pub async fn update_driver<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
    Path(original_id): Path<String>,
    Json(form): Json<DriverForm>,
) -> Result<Json<DriverResponse>, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    require_user(&state.session(&client)?)?;

    let records = state.records(&client);
    let existing = records
        .load_or_seed(default_drivers)?
        .into_iter()
        .find(|r| r.id == original_id)
        .ok_or_else(|| helmet_core::Error::RecordNotFound {
            id: original_id.clone(),
        })?;

    let record = form.into_record(existing.password)?;
    records.replace(&original_id, record.clone())?;
    tracing::info!(original = %original_id, id = %record.id, "Driver updated");

    Ok(Json(DriverResponse {
        success: true,
        driver: DriverView::from(&record),
    }))
}

/// DELETE /api/drivers/{id}
pub async fn delete_driver<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    require_user(&state.session(&client)?)?;

    let records = state.records(&client);
    records.load_or_seed(default_drivers)?;
    records.remove(&id)?;
    tracing::info!(id = %id, "Driver removed");

    Ok(Json(DeleteResponse { success: true }))
}
