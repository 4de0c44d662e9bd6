//! Budget API endpoint

use api_types::budget::BudgetResponse;
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user, views};

/// Handle requests for the estimated-vs-actual budget view
pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<BudgetResponse>, ServerError> {
    let budget = state.engine.budget(trip_id, &user::actor(&user)).await?;
    Ok(Json(views::budget_response(budget)))
}
