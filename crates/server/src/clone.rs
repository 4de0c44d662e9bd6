//! Trip cloning API endpoints

use api_types::clone::CloneCreated;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

/// Handle admin template duplication (structure only, same owner)
pub async fn duplicate_template(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<(StatusCode, Json<CloneCreated>), ServerError> {
    let id = state
        .engine
        .duplicate_template(trip_id, &user::actor(&user))
        .await?;
    Ok((StatusCode::CREATED, Json(CloneCreated { id })))
}

/// Handle copy-from-share (full deep copy under the requester)
pub async fn copy_shared(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(share_id): Path<String>,
) -> Result<(StatusCode, Json<CloneCreated>), ServerError> {
    let id = state
        .engine
        .copy_shared(&share_id, &user::actor(&user))
        .await?;
    Ok((StatusCode::CREATED, Json(CloneCreated { id })))
}
