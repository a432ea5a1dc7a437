use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use crate::gazetteer::GazetteerStats;
use crate::locate::{Prediction, StreetCrossing};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── GET /api/locate ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LocateQuery {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LocateResponse {
    pub prediction: Prediction,
    pub streets: BTreeSet<String>,
    pub stations: BTreeSet<String>,
    /// Map link for the first predicted point.
    pub link: Option<String>,
}

pub(super) async fn locate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocateQuery>,
) -> Result<Json<LocateResponse>, ApiError> {
    let start = Instant::now();

    let text = params.text.as_deref().unwrap_or("").trim();
    if text.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'text' parameter"));
    }

    let located = state.locator.explain(text);
    let link = located.prediction.first_point().map(|p| p.map_link());

    tracing::info!(
        chars = text.chars().count(),
        streets = located.streets.len(),
        stations = located.stations.len(),
        found = !located.prediction.is_none(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/locate"
    );

    Ok(Json(LocateResponse {
        prediction: located.prediction,
        streets: located.streets,
        stations: located.stations,
        link,
    }))
}

// ─── GET /api/intersect ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct IntersectQuery {
    pub street1: Option<String>,
    pub street2: Option<String>,
}

pub(super) async fn intersect(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IntersectQuery>,
) -> Result<Json<StreetCrossing>, ApiError> {
    let street1 = params.street1.as_deref().unwrap_or("").trim();
    let street2 = params.street2.as_deref().unwrap_or("").trim();
    if street1.is_empty() || street2.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Provide 'street1' and 'street2' parameters"));
    }

    let crossing = state.locator.intersect(street1, street2);
    tracing::info!(street1, street2, points = crossing.points.len(), "GET /api/intersect");
    Ok(Json(crossing))
}

// ─── GET /api/gazetteer ──────────────────────────────────────────

pub(super) async fn gazetteer(State(state): State<Arc<AppState>>) -> Json<GazetteerStats> {
    Json(state.locator.gazetteer().stats())
}
