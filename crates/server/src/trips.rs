//! Trip API endpoints

use api_types::trip::{TripCreated, TripLock, TripNew, TripResponse, TripUpdate};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user, views};

/// Handle requests for creating a new trip
pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TripNew>,
) -> Result<(StatusCode, Json<TripCreated>), ServerError> {
    let draft = engine::TripDraft {
        name: payload.name,
        description: payload.description,
        start_date: payload.start_date,
        end_date: payload.end_date,
        status: payload.status.map(views::map_status_in),
        cover_image: payload.cover_image,
    };
    let id = state.engine.create_trip(draft, &user::actor(&user)).await?;
    Ok((StatusCode::CREATED, Json(TripCreated { id })))
}

/// Handle requests for reading a trip with its nested structure
pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<TripResponse>, ServerError> {
    let view = state.engine.trip(trip_id, &user::actor(&user)).await?;
    Ok(Json(views::trip_response(view)))
}

/// Handle requests for patching trip core fields
pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<TripUpdate>,
) -> Result<StatusCode, ServerError> {
    let patch = engine::TripPatch {
        name: payload.name,
        description: payload.description,
        start_date: payload.start_date,
        end_date: payload.end_date,
        status: payload.status.map(views::map_status_in),
        cover_image: payload.cover_image,
    };
    state
        .engine
        .update_trip(trip_id, patch, &user::actor(&user))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle requests for deleting a trip (cascades to everything it owns)
pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_trip(trip_id, &user::actor(&user)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle admin lock/unlock requests
pub async fn set_lock(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<TripLock>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .set_locked(trip_id, payload.locked, &user::actor(&user))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
