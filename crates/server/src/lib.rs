use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod budget;
mod clone;
mod expenses;
mod itinerary;
mod server;
mod share;
mod trips;
mod user;
mod views;

pub mod types {
    pub mod trip {
        pub use api_types::trip::{TripCreated, TripLock, TripNew, TripResponse, TripUpdate};
    }

    pub mod itinerary {
        pub use api_types::itinerary::{ActivityNew, ItineraryUpdate, StopNew, StopView};
    }

    pub mod budget {
        pub use api_types::budget::{ActualView, BudgetResponse, EstimateView};
    }

    pub mod expense {
        pub use api_types::expense::{ExpenseNew, ExpenseView};
    }

    pub mod share {
        pub use api_types::share::{ShareNew, ShareView, ShareVisibility, SharedTripResponse};
    }

    pub mod clone {
        pub use api_types::clone::CloneCreated;
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

/// Error body; `field` and `stop` are populated for validation failures so
/// the client can point at the offending input.
#[derive(Serialize)]
struct Error {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<usize>,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Validation(_) => StatusCode::BAD_REQUEST,
        EngineError::LockedTrip(_) | EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Conflict(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_for_engine_error(err: EngineError) -> Error {
    match err {
        EngineError::Validation(validation) => Error {
            error: validation.message.clone(),
            field: Some(validation.field),
            stop: validation.stop,
        },
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            Error {
                error: "internal server error".to_string(),
                field: None,
                stop: None,
            }
        }
        other => Error {
            error: other.to_string(),
            field: None,
            stop: None,
        },
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), body_for_engine_error(err)),
            ServerError::Generic(err) => (
                StatusCode::BAD_REQUEST,
                Error {
                    error: err,
                    field: None,
                    stop: None,
                },
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
