use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, FixedOffset};
use fdm_core::{parse_offset_date_time, FlightSearchRequest, FlightSearchResponse};
use serde::Deserialize;
use tracing::debug;

use crate::state::AppState;

/// Raw query string; timestamps are parsed by hand so a bad one is a bare 400.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub airline: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
}

impl SearchParams {
    pub fn into_request(self) -> Result<FlightSearchRequest, chrono::ParseError> {
        Ok(FlightSearchRequest {
            airline: self.airline,
            from: self.from,
            to: self.to,
            departure_time: parse_timestamp(self.departure_time.as_deref())?,
            arrival_time: parse_timestamp(self.arrival_time.as_deref())?,
        })
    }
}

fn parse_timestamp(raw: Option<&str>) -> Result<Option<DateTime<FixedOffset>>, chrono::ParseError> {
    raw.map(parse_offset_date_time).transpose()
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/flights/search", get(search_flights))
}

/// GET /flights/search
async fn search_flights(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<FlightSearchResponse>, StatusCode> {
    let request = params.into_request().map_err(|e| {
        debug!("Rejecting search with malformed date-time: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    Ok(Json(state.search.find_flights(&request).await))
}
