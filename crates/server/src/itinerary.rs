//! Itinerary API endpoint

use api_types::itinerary::ItineraryUpdate;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user, views};

/// Handle whole-itinerary replacement.
///
/// The full stop set travels in one request; the engine validates and
/// rewrites it atomically, so a 4xx leaves the previous itinerary intact.
pub async fn replace(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<ItineraryUpdate>,
) -> Result<StatusCode, ServerError> {
    let drafts = payload
        .stops
        .into_iter()
        .map(views::stop_draft_in)
        .collect();
    state
        .engine
        .replace_itinerary(trip_id, drafts, &user::actor(&user))
        .await?;
    Ok(StatusCode::OK)
}
