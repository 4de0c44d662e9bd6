//! HTTP contract tests: the router is driven directly, no socket involved.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine as _;
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, Statement};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use migration::MigratorTrait;
use server::{ServerState, router};

struct TestApp {
    app: Router,
    paris: Uuid,
    rome: Uuid,
}

async fn setup() -> TestApp {
    // A shared-cache in-memory database so the connection pool's members all
    // see the same tables; `min_connections(1)` keeps at least one connection
    // open so the in-memory database survives between operations, and allowing
    // more than one connection lets a catalog lookup run alongside an open
    // transaction without deadlocking on connection acquisition.
    let mut opt = ConnectOptions::new("sqlite::memory:?cache=shared");
    opt.max_connections(8).min_connections(1);
    let db = Database::connect(opt).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();

    for (username, is_admin) in [("alice", false), ("bob", false), ("root", true)] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password, is_admin) VALUES (?, ?, ?)",
            vec![username.into(), "password".into(), is_admin.into()],
        ))
        .await
        .unwrap();
    }

    let paris = Uuid::new_v4();
    let rome = Uuid::new_v4();
    for (id, name, country, cost_index) in
        [(paris, "Paris", "France", 5000i64), (rome, "Rome", "Italy", 3000)]
    {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO cities (id, name, country, cost_index_minor) VALUES (?, ?, ?, ?)",
            vec![
                id.to_string().into(),
                name.into(),
                country.into(),
                cost_index.into(),
            ],
        ))
        .await
        .unwrap();
    }

    let engine = engine::Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    let state = ServerState {
        engine: Arc::new(engine),
        db,
    };

    TestApp {
        app: router(state),
        paris,
        rome,
    }
}

fn basic_auth(username: &str) -> String {
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(format!("{username}:password"))
    )
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        // Most responses are JSON, but framework-level extractor rejections
        // (e.g. a missing auth header) come back as plain text; fall back to
        // exposing that body as a JSON string rather than panicking.
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

fn request(method: &str, uri: &str, user: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(header::AUTHORIZATION, basic_auth(user));
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn create_trip(test: &TestApp, user: &str) -> String {
    let (status, body) = send(
        &test.app,
        request(
            "POST",
            "/trips",
            Some(user),
            Some(json!({
                "name": "Grand Tour",
                "description": "Ten days, two countries",
                "start_date": "2026-06-01",
                "end_date": "2026-06-11",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

fn itinerary_body(paris: Uuid, rome: Uuid) -> Value {
    json!({
        "stops": [
            {
                "city_id": paris,
                "start_date": "2026-06-01",
                "end_date": "2026-06-04",
                "activities": [
                    { "name": "Seine walk", "kind": "sightseeing", "cost_minor": 2000 }
                ]
            },
            {
                "city_id": rome,
                "start_date": "2026-06-04",
                "end_date": "2026-06-08",
                "activities": []
            }
        ]
    })
}

#[tokio::test]
async fn missing_credentials_are_rejected() {
    let test = setup().await;
    let (status, _) = send(&test.app, request("POST", "/trips", None, Some(json!({})))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn itinerary_and_budget_round_trip() {
    let test = setup().await;
    let trip_id = create_trip(&test, "alice").await;

    let (status, _) = send(
        &test.app,
        request(
            "PUT",
            &format!("/trips/{trip_id}/itinerary"),
            Some("alice"),
            Some(itinerary_body(test.paris, test.rome)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &test.app,
        request(
            "GET",
            &format!("/trips/{trip_id}/budget"),
            Some("alice"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // 3 days x 50.00 + 4 days x 30.00 living, 20.00 activities.
    assert_eq!(body["estimated"]["living_cost_minor"], 27_000);
    assert_eq!(body["estimated"]["activity_cost_minor"], 2000);
    assert_eq!(body["estimated"]["total_minor"], 29_000);
    assert_eq!(body["actual"]["total_minor"], 0);
    assert_eq!(body["variance_minor"], -29_000);

    let (status, body) = send(
        &test.app,
        request("GET", &format!("/trips/{trip_id}"), Some("alice"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let positions: Vec<i64> = body["stops"]
        .as_array()
        .unwrap()
        .iter()
        .map(|stop| stop["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, vec![1, 2]);
}

#[tokio::test]
async fn duplicate_city_yields_field_level_error() {
    let test = setup().await;
    let trip_id = create_trip(&test, "alice").await;

    let body = json!({
        "stops": [
            { "city_id": test.paris, "start_date": "2026-06-01", "end_date": "2026-06-04" },
            { "city_id": test.paris, "start_date": "2026-06-04", "end_date": "2026-06-08" }
        ]
    });
    let (status, body) = send(
        &test.app,
        request(
            "PUT",
            &format!("/trips/{trip_id}/itinerary"),
            Some("alice"),
            Some(body),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "city_id");
    assert_eq!(body["stop"], 1);
}

#[tokio::test]
async fn expense_amount_must_be_positive() {
    let test = setup().await;
    let trip_id = create_trip(&test, "alice").await;

    let (status, body) = send(
        &test.app,
        request(
            "POST",
            &format!("/trips/{trip_id}/expenses"),
            Some("alice"),
            Some(json!({
                "category": "meals",
                "amount_minor": 0,
                "spent_on": "2026-06-02"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "amount");

    let (status, body) = send(
        &test.app,
        request(
            "POST",
            &format!("/trips/{trip_id}/expenses"),
            Some("alice"),
            Some(json!({
                "category": "meals",
                "amount_minor": 1050,
                "spent_on": "2026-06-02"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["category"], "meals");
    assert_eq!(body["currency"], "EUR");

    let (_, body) = send(
        &test.app,
        request(
            "GET",
            &format!("/trips/{trip_id}/budget"),
            Some("alice"),
            None,
        ),
    )
    .await;
    assert_eq!(body["actual"]["by_category"]["meals"], 1050);
}

#[tokio::test]
async fn share_link_lifecycle_over_http() {
    let test = setup().await;
    let trip_id = create_trip(&test, "alice").await;

    let (status, body) = send(
        &test.app,
        request(
            "POST",
            &format!("/trips/{trip_id}/share"),
            Some("alice"),
            Some(json!({ "is_public": true, "can_copy": true })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let share_id = body["share_id"].as_str().unwrap().to_string();

    // One link per trip.
    let (status, _) = send(
        &test.app,
        request(
            "POST",
            &format!("/trips/{trip_id}/share"),
            Some("alice"),
            Some(json!({ "is_public": true, "can_copy": false })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Anonymous projection, no credentials.
    let (status, body) = send(&test.app, request("GET", &format!("/shared/{share_id}"), None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Grand Tour");
    assert!(body.get("admin_notes").is_none());
    assert!(body.get("owner").is_none());

    // Copy under bob's account.
    let (status, body) = send(
        &test.app,
        request(
            "POST",
            &format!("/shared/{share_id}/copy"),
            Some("bob"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let clone_id = body["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &test.app,
        request("GET", &format!("/trips/{clone_id}"), Some("bob"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["owner"], "bob");
    assert_eq!(body["name"], "Grand Tour (Copy)");
    assert_eq!(body["share"], Value::Null);

    // Revoke: the link dies immediately.
    let (status, _) = send(
        &test.app,
        request("DELETE", &format!("/trips/{trip_id}/share"), Some("alice"), None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&test.app, request("GET", &format!("/shared/{share_id}"), None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn template_duplication_requires_admin() {
    let test = setup().await;
    let trip_id = create_trip(&test, "alice").await;

    let (status, _) = send(
        &test.app,
        request(
            "POST",
            &format!("/trips/{trip_id}/duplicate"),
            Some("alice"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &test.app,
        request(
            "POST",
            &format!("/trips/{trip_id}/duplicate"),
            Some("root"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let clone_id = body["id"].as_str().unwrap().to_string();

    // Admin notes carry provenance and stay admin-only.
    let (_, body) = send(
        &test.app,
        request("GET", &format!("/trips/{clone_id}"), Some("root"), None),
    )
    .await;
    assert_eq!(
        body["admin_notes"],
        format!("Duplicated from trip {trip_id}")
    );
    let (_, body) = send(
        &test.app,
        request("GET", &format!("/trips/{clone_id}"), Some("alice"), None),
    )
    .await;
    assert_eq!(body["admin_notes"], Value::Null);
}

#[tokio::test]
async fn strangers_get_403_and_ghosts_get_404() {
    let test = setup().await;
    let trip_id = create_trip(&test, "alice").await;

    let (status, _) = send(
        &test.app,
        request("GET", &format!("/trips/{trip_id}"), Some("bob"), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let ghost = Uuid::new_v4();
    let (status, _) = send(
        &test.app,
        request("GET", &format!("/trips/{ghost}"), Some("alice"), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
