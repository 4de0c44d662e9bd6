//! Shared fixtures: in-memory database, seeded users and catalog rows.

use chrono::NaiveDate;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use uuid::Uuid;

use engine::{
    ActivityDraft, ActivityKind, Actor, Engine, Money, StopDraft, TripDraft, TripStatus,
};
use migration::MigratorTrait;

pub struct TestData {
    pub engine: Engine,
    pub db: DatabaseConnection,
    /// cost index 50.00/day
    pub paris: Uuid,
    /// cost index 30.00/day
    pub rome: Uuid,
    /// cost index 0 - valid, not an error
    pub berlin: Uuid,
    /// attraction in Paris, default cost 17.00
    pub louvre: Uuid,
}

pub async fn setup() -> TestData {
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
    let berlin = Uuid::new_v4();
    for (id, name, country, cost_index) in [
        (paris, "Paris", "France", 5000i64),
        (rome, "Rome", "Italy", 3000),
        (berlin, "Berlin", "Germany", 0),
    ] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO cities (id, name, country, cost_index_minor) VALUES (?, ?, ?, ?)",
            vec![id.to_string().into(), name.into(), country.into(), cost_index.into()],
        ))
        .await
        .unwrap();
    }

    let louvre = Uuid::new_v4();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO attractions (id, city_id, name, cost_minor, kind) VALUES (?, ?, ?, ?, ?)",
        vec![
            louvre.to_string().into(),
            paris.to_string().into(),
            "Louvre".into(),
            1700i64.into(),
            "museum".into(),
        ],
    ))
    .await
    .unwrap();

    let engine = Engine::builder().database(db.clone()).build().await.unwrap();

    TestData {
        engine,
        db,
        paris,
        rome,
        berlin,
        louvre,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn alice() -> Actor {
    Actor::user("alice")
}

pub fn bob() -> Actor {
    Actor::user("bob")
}

pub fn root() -> Actor {
    Actor::admin("root")
}

/// A trip spanning the first ten days of June 2026.
pub async fn june_trip(engine: &Engine, actor: &Actor) -> Uuid {
    engine
        .create_trip(
            TripDraft {
                name: "Grand Tour".to_string(),
                description: Some("Three countries in ten days".to_string()),
                start_date: date(2026, 6, 1),
                end_date: date(2026, 6, 11),
                status: Some(TripStatus::Planning),
                cover_image: None,
            },
            actor,
        )
        .await
        .unwrap()
}

pub fn stop(city_id: Uuid, start: NaiveDate, end: NaiveDate) -> StopDraft {
    StopDraft {
        city_id,
        start_date: start,
        end_date: end,
        notes: None,
        activities: Vec::new(),
    }
}

pub fn activity(name: &str, cost_minor: Option<i64>) -> ActivityDraft {
    ActivityDraft {
        attraction_id: None,
        name: name.to_string(),
        kind: ActivityKind::Sightseeing,
        cost: cost_minor.map(Money::new),
        duration_min: None,
        scheduled_at: None,
        notes: None,
    }
}
