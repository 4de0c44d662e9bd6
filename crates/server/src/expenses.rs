//! Expense API endpoints

use api_types::expense::{ExpenseNew, ExpenseView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user, views};

/// Handle requests for logging an actual expense
pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let currency = payload
        .currency
        .as_deref()
        .map(engine::Currency::try_from)
        .transpose()?;
    let draft = engine::ExpenseDraft {
        category: views::map_category_in(payload.category),
        amount: engine::Money::new(payload.amount_minor),
        currency,
        description: payload.description,
        spent_on: payload.spent_on,
    };
    let expense = state
        .engine
        .add_expense(trip_id, draft, &user::actor(&user))
        .await?;
    Ok((StatusCode::CREATED, Json(views::expense_view(expense))))
}

/// Handle requests for removing a logged expense
pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path((trip_id, expense_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .remove_expense(trip_id, expense_id, &user::actor(&user))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
