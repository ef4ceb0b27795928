//! Alerts and analysis endpoints

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use helmet_core::alerts::{self, Alert, AlertFilter, Severity};
use helmet_core::analysis::{self, DailySample, SeveritySlice};
use serde::{Deserialize, Deserializer, Serialize};
use tower_cookies::Cookies;

use super::session::{client_id, require_user};
use crate::error::DashboardError;
use crate::state::AppState;
use crate::store::ClientStorage;

#[derive(Debug, Default, Deserialize)]
pub struct AlertQuery {
    #[serde(default)]
    pub search: String,
    pub severity: Option<String>,
}

impl AlertQuery {
    pub fn filter(&self) -> AlertFilter {
        AlertFilter {
            search: self.search.clone(),
            severity: self.severity.as_deref().and_then(Severity::from_str),
        }
    }
}

#[derive(Serialize)]
pub struct AlertListResponse {
    pub alerts: Vec<Alert>,
}

/// GET /api/alerts
pub async fn list_alerts<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
    Query(query): Query<AlertQuery>,
) -> Result<Json<AlertListResponse>, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    require_user(&state.session(&client)?)?;

    Ok(Json(AlertListResponse {
        alerts: filtered_alerts(&query),
    }))
}

pub fn filtered_alerts(query: &AlertQuery) -> Vec<Alert> {
    let all = alerts::mock_alerts();
    query.filter().apply(&all).into_iter().cloned().collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end: Option<NaiveDate>,
}

/// Date inputs submit an empty string when cleared
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Serialize)]
pub struct AnalysisResponse {
    pub samples: Vec<DailySample>,
    pub total: u32,
    pub severity: Vec<SeveritySlice>,
}

impl AnalysisResponse {
    pub fn for_range(range: &RangeQuery) -> Self {
        let samples = analysis::filter_by_range(&analysis::daily_samples(), range.start, range.end);
        Self {
            total: samples.iter().map(|s| s.uv).sum(),
            samples,
            severity: analysis::severity_distribution(),
        }
    }
}

/// GET /api/analysis
pub async fn get_analysis<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
    Query(range): Query<RangeQuery>,
) -> Result<Json<AnalysisResponse>, DashboardError>
where
    S: ClientStorage,
{
    let client = client_id(&cookies);
    require_user(&state.session(&client)?)?;

    Ok(Json(AnalysisResponse::for_range(&range)))
}
