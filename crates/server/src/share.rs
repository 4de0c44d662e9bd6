//! Share-link API endpoints

use api_types::share::{ShareNew, ShareView, ShareVisibility, SharedTripResponse};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user, views};

/// Handle requests for issuing the share link (one per trip; 409 when one
/// already exists)
pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<ShareNew>,
) -> Result<(StatusCode, Json<ShareView>), ServerError> {
    let settings = engine::ShareSettings {
        is_public: payload.is_public,
        can_copy: payload.can_copy,
        expires_at: payload.expires_at.map(|at| at.with_timezone(&Utc)),
    };
    let share = state
        .engine
        .create_share_link(trip_id, settings, &user::actor(&user))
        .await?;
    Ok((StatusCode::CREATED, Json(views::share_view(share))))
}

/// Handle owner-only visibility toggles
pub async fn update_visibility(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<ShareVisibility>,
) -> Result<Json<ShareView>, ServerError> {
    let share = state
        .engine
        .update_share_visibility(trip_id, payload.is_public, &user::actor(&user))
        .await?;
    Ok(Json(views::share_view(share)))
}

/// Handle requests for revoking the share link
pub async fn revoke(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .revoke_share_link(trip_id, &user::actor(&user))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle unauthenticated share-link lookups (read-only projection)
pub async fn shared(
    State(state): State<ServerState>,
    Path(share_id): Path<String>,
) -> Result<Json<SharedTripResponse>, ServerError> {
    let projection = state.engine.shared_trip(&share_id).await?;
    Ok(Json(views::shared_trip_response(projection)))
}
