mod common;

use chrono::{Duration, Utc};
use common::*;
use sea_orm::{ConnectionTrait, Statement};
use engine::{
    EngineError, ExpenseCategory, ExpenseDraft, Money, ShareSettings, TripStatus,
};

async fn seeded_trip(data: &common::TestData) -> uuid::Uuid {
    let trip_id = june_trip(&data.engine, &alice()).await;

    let mut paris = stop(data.paris, date(2026, 6, 1), date(2026, 6, 4));
    let mut louvre_visit = activity("Louvre", Some(1700));
    louvre_visit.attraction_id = Some(data.louvre);
    paris.activities.push(louvre_visit);

    let mut rome = stop(data.rome, date(2026, 6, 4), date(2026, 6, 8));
    rome.activities.push(activity("Colosseum", Some(1800)));

    data.engine
        .replace_itinerary(trip_id, vec![paris, rome], &alice())
        .await
        .unwrap();

    data.engine
        .add_expense(
            trip_id,
            ExpenseDraft {
                category: ExpenseCategory::Transport,
                amount: Money::new(12_000),
                currency: None,
                description: Some("Flights".to_string()),
                spent_on: date(2026, 6, 1),
            },
            &alice(),
        )
        .await
        .unwrap();

    trip_id
}

#[tokio::test]
async fn template_duplication_is_admin_only() {
    let data = setup().await;
    let trip_id = seeded_trip(&data).await;

    let err = data
        .engine
        .duplicate_template(trip_id, &alice())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}

#[tokio::test]
async fn template_copies_structure_but_not_expenses() {
    let data = setup().await;
    let trip_id = seeded_trip(&data).await;

    let clone_id = data
        .engine
        .duplicate_template(trip_id, &root())
        .await
        .unwrap();
    assert_ne!(clone_id, trip_id);

    let clone = data.engine.trip(clone_id, &root()).await.unwrap();
    assert_eq!(clone.trip.name, "[Template] Grand Tour");
    assert_eq!(clone.trip.owner, "alice");
    assert_eq!(clone.trip.status, TripStatus::Planning);
    assert_eq!(clone.trip.start_date, date(2026, 6, 1));
    assert!(!clone.trip.is_locked);
    assert!(clone.share.is_none());
    assert_eq!(
        clone.trip.admin_notes,
        Some(format!("Duplicated from trip {trip_id}"))
    );

    assert_eq!(clone.stops.len(), 2);
    assert_eq!(clone.stops[0].activities.len(), 1);
    assert_eq!(clone.stops[0].activities[0].attraction_id, Some(data.louvre));
    assert!(clone.expenses.is_empty());

    // Round-trip: the clone estimates exactly like the source.
    let source_estimate = data.engine.estimate(trip_id, &root()).await.unwrap();
    let clone_estimate = data.engine.estimate(clone_id, &root()).await.unwrap();
    assert_eq!(source_estimate, clone_estimate);
}

#[tokio::test]
async fn share_copy_carries_expenses_and_resets_provenance() {
    let data = setup().await;
    let trip_id = seeded_trip(&data).await;

    let share = data
        .engine
        .create_share_link(
            trip_id,
            ShareSettings {
                is_public: true,
                can_copy: true,
                expires_at: None,
            },
            &alice(),
        )
        .await
        .unwrap();

    let clone_id = data
        .engine
        .copy_shared(&share.share_id, &bob())
        .await
        .unwrap();

    let clone = data.engine.trip(clone_id, &bob()).await.unwrap();
    assert_eq!(clone.trip.name, "Grand Tour (Copy)");
    assert_eq!(clone.trip.owner, "bob");
    assert_eq!(clone.trip.status, TripStatus::Planning);
    assert!(!clone.trip.is_locked);
    assert_eq!(clone.trip.admin_notes, None);
    assert!(clone.share.is_none());

    assert_eq!(clone.stops.len(), 2);
    assert_eq!(clone.expenses.len(), 1);
    assert_eq!(clone.expenses[0].amount, Money::new(12_000));

    let source_estimate = data.engine.estimate(trip_id, &alice()).await.unwrap();
    let clone_estimate = data.engine.estimate(clone_id, &bob()).await.unwrap();
    assert_eq!(source_estimate, clone_estimate);
}

#[tokio::test]
async fn owners_cannot_copy_their_own_share() {
    let data = setup().await;
    let trip_id = seeded_trip(&data).await;

    let share = data
        .engine
        .create_share_link(
            trip_id,
            ShareSettings {
                is_public: true,
                can_copy: true,
                expires_at: None,
            },
            &alice(),
        )
        .await
        .unwrap();

    let err = data
        .engine
        .copy_shared(&share.share_id, &alice())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}

#[tokio::test]
async fn copy_requires_the_can_copy_flag() {
    let data = setup().await;
    let trip_id = seeded_trip(&data).await;

    let share = data
        .engine
        .create_share_link(
            trip_id,
            ShareSettings {
                is_public: true,
                can_copy: false,
                expires_at: None,
            },
            &alice(),
        )
        .await
        .unwrap();

    let err = data
        .engine
        .copy_shared(&share.share_id, &bob())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}

#[tokio::test]
async fn second_share_link_conflicts_and_the_first_survives() {
    let data = setup().await;
    let trip_id = seeded_trip(&data).await;

    let share = data
        .engine
        .create_share_link(
            trip_id,
            ShareSettings {
                is_public: true,
                can_copy: true,
                expires_at: None,
            },
            &alice(),
        )
        .await
        .unwrap();

    let err = data
        .engine
        .create_share_link(trip_id, ShareSettings::default(), &alice())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Conflict(_)));

    // The original link still resolves.
    let projection = data.engine.shared_trip(&share.share_id).await.unwrap();
    assert_eq!(projection.name, "Grand Tour");
}

#[tokio::test]
async fn share_management_is_owner_only() {
    let data = setup().await;
    let trip_id = seeded_trip(&data).await;

    for actor in [bob(), root()] {
        let err = data
            .engine
            .create_share_link(trip_id, ShareSettings::default(), &actor)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Forbidden(_)));
    }
}

#[tokio::test]
async fn revoked_and_non_public_links_stop_resolving() {
    let data = setup().await;
    let trip_id = seeded_trip(&data).await;

    let share = data
        .engine
        .create_share_link(
            trip_id,
            ShareSettings {
                is_public: false,
                can_copy: true,
                expires_at: None,
            },
            &alice(),
        )
        .await
        .unwrap();

    // Not public yet: the token exists but does not resolve.
    let err = data.engine.shared_trip(&share.share_id).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));

    let updated = data
        .engine
        .update_share_visibility(trip_id, true, &alice())
        .await
        .unwrap();
    assert_eq!(updated.share_id, share.share_id);
    data.engine.shared_trip(&share.share_id).await.unwrap();

    data.engine
        .revoke_share_link(trip_id, &alice())
        .await
        .unwrap();
    let err = data.engine.shared_trip(&share.share_id).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
    let err = data
        .engine
        .copy_shared(&share.share_id, &bob())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[tokio::test]
async fn expired_links_stop_resolving() {
    let data = setup().await;
    let trip_id = seeded_trip(&data).await;

    let share = data
        .engine
        .create_share_link(
            trip_id,
            ShareSettings {
                is_public: true,
                can_copy: true,
                expires_at: Some(Utc::now() - Duration::hours(1)),
            },
            &alice(),
        )
        .await
        .unwrap();

    let err = data.engine.shared_trip(&share.share_id).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[tokio::test]
async fn shared_projection_never_carries_admin_fields() {
    let data = setup().await;
    let trip_id = seeded_trip(&data).await;

    data.engine
        .create_share_link(
            trip_id,
            ShareSettings {
                is_public: true,
                can_copy: false,
                expires_at: None,
            },
            &alice(),
        )
        .await
        .unwrap();

    let view = data.engine.trip(trip_id, &alice()).await.unwrap();
    let share_id = view.share.unwrap().share_id;

    let projection = data.engine.shared_trip(&share_id).await.unwrap();
    assert_eq!(projection.name, "Grand Tour");
    assert!(!projection.can_copy);
    assert_eq!(projection.stops.len(), 2);
    // The projection type itself has no owner, lock or admin-notes fields;
    // what it serializes is everything a third party may see.
    let json = serde_json::to_value(&projection).unwrap();
    assert!(json.get("admin_notes").is_none());
    assert!(json.get("owner").is_none());
    assert!(json.get("is_locked").is_none());
}

#[tokio::test]
async fn clone_renumbers_a_corrupted_source_densely() {
    let data = setup().await;
    let trip_id = seeded_trip(&data).await;

    // Corrupt the source ordering: 1, 2 becomes 3, 7.
    let backend = data.db.get_database_backend();
    data.db
        .execute(Statement::from_sql_and_values(
            backend,
            "UPDATE stops SET position = position * 2 + 1 WHERE trip_id = ?",
            vec![trip_id.to_string().into()],
        ))
        .await
        .unwrap();

    let clone_id = data
        .engine
        .duplicate_template(trip_id, &root())
        .await
        .unwrap();
    let clone = data.engine.trip(clone_id, &root()).await.unwrap();
    let positions: Vec<i32> = clone.stops.iter().map(|s| s.stop.position).collect();
    assert_eq!(positions, vec![1, 2]);
    // Relative order is preserved.
    assert_eq!(clone.stops[0].stop.city_id, data.paris);
    assert_eq!(clone.stops[1].stop.city_id, data.rome);
}
