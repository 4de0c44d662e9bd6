//! Request/response contracts exposed by the HTTP layer.
//!
//! Transport-agnostic: plain serde structs, no axum types. Monetary fields
//! are integer minor units (`*_minor`); currency codes travel as plain
//! strings and are validated by the engine.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod trip {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TripStatus {
        #[default]
        Planning,
        Upcoming,
        Ongoing,
        Past,
    }

    /// Request body for creating a trip.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripNew {
        pub name: String,
        pub description: Option<String>,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub status: Option<TripStatus>,
        pub cover_image: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripCreated {
        pub id: Uuid,
    }

    /// Request body for patching trip core fields. Omitted fields are left
    /// unchanged.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TripUpdate {
        pub name: Option<String>,
        pub description: Option<String>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        pub status: Option<TripStatus>,
        pub cover_image: Option<String>,
    }

    /// Admin-only lock toggle.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripLock {
        pub locked: bool,
    }

    /// Full trip view for the owner or an admin.
    ///
    /// `admin_notes` is only populated for admin callers.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripResponse {
        pub id: Uuid,
        pub name: String,
        pub description: Option<String>,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub status: TripStatus,
        pub cover_image: Option<String>,
        pub owner: String,
        pub is_locked: bool,
        pub admin_notes: Option<String>,
        pub stops: Vec<super::itinerary::StopView>,
        pub expenses: Vec<super::expense::ExpenseView>,
        pub share: Option<super::share::ShareView>,
    }
}

pub mod itinerary {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ActivityKind {
        Sightseeing,
        Museum,
        Outdoor,
        Food,
        Entertainment,
        Shopping,
        Transit,
        #[default]
        Other,
    }

    /// Request body for the whole-itinerary replace.
    ///
    /// Stop order is taken from array order; any `position` the client tracks
    /// locally is not part of the contract.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItineraryUpdate {
        pub stops: Vec<StopNew>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StopNew {
        pub city_id: Uuid,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub notes: Option<String>,
        #[serde(default)]
        pub activities: Vec<ActivityNew>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ActivityNew {
        pub attraction_id: Option<Uuid>,
        pub name: String,
        #[serde(default)]
        pub kind: ActivityKind,
        pub cost_minor: Option<i64>,
        pub duration_min: Option<i32>,
        pub scheduled_at: Option<DateTime<FixedOffset>>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StopView {
        pub id: Uuid,
        pub city_id: Uuid,
        /// 1-based, dense within the trip.
        pub position: i32,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub notes: Option<String>,
        pub activities: Vec<ActivityView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ActivityView {
        pub id: Uuid,
        pub attraction_id: Option<Uuid>,
        pub name: String,
        pub kind: ActivityKind,
        pub cost_minor: Option<i64>,
        pub duration_min: Option<i32>,
        pub scheduled_at: Option<DateTime<FixedOffset>>,
        pub notes: Option<String>,
    }
}

pub mod budget {
    use super::*;
    use std::collections::BTreeMap;

    /// Estimated vs. actual spend for a trip.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetResponse {
        pub estimated: EstimateView,
        pub actual: ActualView,
        /// `actual.total_minor - estimated.total_minor`.
        pub variance_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EstimateView {
        pub activity_cost_minor: i64,
        pub living_cost_minor: i64,
        pub total_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ActualView {
        /// Categories with no logged expense are omitted.
        pub by_category: BTreeMap<String, i64>,
        pub total_minor: i64,
        pub avg_per_day_minor: i64,
    }
}

pub mod expense {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ExpenseCategory {
        Transport,
        Accommodation,
        Activities,
        Meals,
        Other,
    }

    /// Request body for logging an expense.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub category: ExpenseCategory,
        pub amount_minor: i64,
        /// 3-letter code; defaults to EUR.
        pub currency: Option<String>,
        pub description: Option<String>,
        pub spent_on: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub category: ExpenseCategory,
        pub amount_minor: i64,
        pub currency: String,
        pub description: Option<String>,
        pub spent_on: NaiveDate,
    }
}

pub mod share {
    use super::*;

    /// Request body for issuing a share link.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ShareNew {
        #[serde(default)]
        pub is_public: bool,
        #[serde(default)]
        pub can_copy: bool,
        pub expires_at: Option<DateTime<FixedOffset>>,
    }

    /// Owner-only visibility toggle; the token itself never changes.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareVisibility {
        pub is_public: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareView {
        pub share_id: String,
        pub is_public: bool,
        pub can_copy: bool,
        pub expires_at: Option<DateTime<FixedOffset>>,
    }

    /// Read-only projection served to share-link viewers. Carries no admin
    /// notes, owner or lock state.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SharedTripResponse {
        pub name: String,
        pub description: Option<String>,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub status: super::trip::TripStatus,
        pub cover_image: Option<String>,
        pub can_copy: bool,
        pub stops: Vec<super::itinerary::StopView>,
    }
}

pub mod clone {
    use super::*;

    /// Response for both clone modes (admin template duplication and
    /// share copy).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CloneCreated {
        pub id: Uuid,
    }
}
