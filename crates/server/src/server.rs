use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{DatabaseConnection, EntityTrait};

use std::sync::Arc;

use crate::{budget, clone, expenses, itinerary, share, trips, user};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
}

/// Basic-auth middleware.
///
/// Resolves the credentials to a `users` row and stores it as a request
/// extension; handlers turn it into an [`engine::Actor`]. Session issuance
/// and password hashing live outside this service.
async fn auth(
    auth_header: TypedHeader<Authorization<Basic>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user = user::Entity::find_by_id(auth_header.username().to_string())
        .one(&state.db)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let user = match user {
        Some(user) if user.password == auth_header.password() => user,
        _ => return Err(StatusCode::UNAUTHORIZED),
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    let authed = Router::new()
        .route("/trips", post(trips::create))
        .route(
            "/trips/{trip_id}",
            get(trips::get).patch(trips::update).delete(trips::delete),
        )
        .route("/trips/{trip_id}/itinerary", put(itinerary::replace))
        .route("/trips/{trip_id}/budget", get(budget::get))
        .route("/trips/{trip_id}/expenses", post(expenses::create))
        .route(
            "/trips/{trip_id}/expenses/{expense_id}",
            axum::routing::delete(expenses::remove),
        )
        .route(
            "/trips/{trip_id}/share",
            post(share::create)
                .patch(share::update_visibility)
                .delete(share::revoke),
        )
        .route("/trips/{trip_id}/lock", post(trips::set_lock))
        .route("/trips/{trip_id}/duplicate", post(clone::duplicate_template))
        .route("/shared/{share_id}/copy", post(clone::copy_shared))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    // Share-link lookup is the one unauthenticated path into trip data; it
    // serves a read-only projection.
    let public = Router::new().route("/shared/{share_id}", get(share::shared));

    authed.merge(public).with_state(state)
}

pub async fn run(engine: Engine, db: DatabaseConnection) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, db, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        db,
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, db, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
