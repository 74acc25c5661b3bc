use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use fdm_core::{validation::validate_flight, Flight};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flights", post(create_flight).get(list_flights))
        .route(
            "/flights/{id}",
            get(get_flight).put(update_flight).delete(delete_flight),
        )
}

/// POST /flights
async fn create_flight(
    State(state): State<AppState>,
    payload: Result<Json<Flight>, JsonRejection>,
) -> Result<Json<Flight>, AppError> {
    let Json(flight) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    validate_flight(&flight)?;

    let saved = state.flights.create(flight).await?;
    Ok(Json(saved))
}

/// GET /flights
async fn list_flights(State(state): State<AppState>) -> Result<Json<Vec<Flight>>, AppError> {
    Ok(Json(state.flights.list().await?))
}

/// GET /flights/{id}
async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    match state.flights.get(id).await? {
        Some(flight) => Ok(Json(flight).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// PUT /flights/{id}
async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<Flight>, JsonRejection>,
) -> Result<Json<Flight>, AppError> {
    let Json(flight) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    validate_flight(&flight)?;

    let updated = state.flights.update(id, flight).await?;
    Ok(Json(updated))
}

/// DELETE /flights/{id}
async fn delete_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.flights.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
