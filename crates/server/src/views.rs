//! Mappings between engine types and the wire contracts in `api_types`.

use api_types::{budget as api_budget, expense as api_expense, itinerary as api_itinerary,
    share as api_share, trip as api_trip};
use chrono::Utc;

pub fn map_status(status: engine::TripStatus) -> api_trip::TripStatus {
    match status {
        engine::TripStatus::Planning => api_trip::TripStatus::Planning,
        engine::TripStatus::Upcoming => api_trip::TripStatus::Upcoming,
        engine::TripStatus::Ongoing => api_trip::TripStatus::Ongoing,
        engine::TripStatus::Past => api_trip::TripStatus::Past,
    }
}

pub fn map_status_in(status: api_trip::TripStatus) -> engine::TripStatus {
    match status {
        api_trip::TripStatus::Planning => engine::TripStatus::Planning,
        api_trip::TripStatus::Upcoming => engine::TripStatus::Upcoming,
        api_trip::TripStatus::Ongoing => engine::TripStatus::Ongoing,
        api_trip::TripStatus::Past => engine::TripStatus::Past,
    }
}

pub fn map_kind(kind: engine::ActivityKind) -> api_itinerary::ActivityKind {
    match kind {
        engine::ActivityKind::Sightseeing => api_itinerary::ActivityKind::Sightseeing,
        engine::ActivityKind::Museum => api_itinerary::ActivityKind::Museum,
        engine::ActivityKind::Outdoor => api_itinerary::ActivityKind::Outdoor,
        engine::ActivityKind::Food => api_itinerary::ActivityKind::Food,
        engine::ActivityKind::Entertainment => api_itinerary::ActivityKind::Entertainment,
        engine::ActivityKind::Shopping => api_itinerary::ActivityKind::Shopping,
        engine::ActivityKind::Transit => api_itinerary::ActivityKind::Transit,
        engine::ActivityKind::Other => api_itinerary::ActivityKind::Other,
    }
}

pub fn map_kind_in(kind: api_itinerary::ActivityKind) -> engine::ActivityKind {
    match kind {
        api_itinerary::ActivityKind::Sightseeing => engine::ActivityKind::Sightseeing,
        api_itinerary::ActivityKind::Museum => engine::ActivityKind::Museum,
        api_itinerary::ActivityKind::Outdoor => engine::ActivityKind::Outdoor,
        api_itinerary::ActivityKind::Food => engine::ActivityKind::Food,
        api_itinerary::ActivityKind::Entertainment => engine::ActivityKind::Entertainment,
        api_itinerary::ActivityKind::Shopping => engine::ActivityKind::Shopping,
        api_itinerary::ActivityKind::Transit => engine::ActivityKind::Transit,
        api_itinerary::ActivityKind::Other => engine::ActivityKind::Other,
    }
}

pub fn map_category(category: engine::ExpenseCategory) -> api_expense::ExpenseCategory {
    match category {
        engine::ExpenseCategory::Transport => api_expense::ExpenseCategory::Transport,
        engine::ExpenseCategory::Accommodation => api_expense::ExpenseCategory::Accommodation,
        engine::ExpenseCategory::Activities => api_expense::ExpenseCategory::Activities,
        engine::ExpenseCategory::Meals => api_expense::ExpenseCategory::Meals,
        engine::ExpenseCategory::Other => api_expense::ExpenseCategory::Other,
    }
}

pub fn map_category_in(category: api_expense::ExpenseCategory) -> engine::ExpenseCategory {
    match category {
        api_expense::ExpenseCategory::Transport => engine::ExpenseCategory::Transport,
        api_expense::ExpenseCategory::Accommodation => engine::ExpenseCategory::Accommodation,
        api_expense::ExpenseCategory::Activities => engine::ExpenseCategory::Activities,
        api_expense::ExpenseCategory::Meals => engine::ExpenseCategory::Meals,
        api_expense::ExpenseCategory::Other => engine::ExpenseCategory::Other,
    }
}

pub fn activity_view(activity: engine::Activity) -> api_itinerary::ActivityView {
    api_itinerary::ActivityView {
        id: activity.id,
        attraction_id: activity.attraction_id,
        name: activity.name,
        kind: map_kind(activity.kind),
        cost_minor: activity.cost.map(engine::Money::minor),
        duration_min: activity.duration_min,
        scheduled_at: activity.scheduled_at.map(|at| at.fixed_offset()),
        notes: activity.notes,
    }
}

pub fn stop_view(view: engine::StopView) -> api_itinerary::StopView {
    api_itinerary::StopView {
        id: view.stop.id,
        city_id: view.stop.city_id,
        position: view.stop.position,
        start_date: view.stop.start_date,
        end_date: view.stop.end_date,
        notes: view.stop.notes,
        activities: view.activities.into_iter().map(activity_view).collect(),
    }
}

pub fn expense_view(expense: engine::Expense) -> api_expense::ExpenseView {
    api_expense::ExpenseView {
        id: expense.id,
        category: map_category(expense.category),
        amount_minor: expense.amount.minor(),
        currency: expense.currency.code().to_string(),
        description: expense.description,
        spent_on: expense.spent_on,
    }
}

pub fn share_view(share: engine::SharedTrip) -> api_share::ShareView {
    api_share::ShareView {
        share_id: share.share_id,
        is_public: share.is_public,
        can_copy: share.can_copy,
        expires_at: share.expires_at.map(|at| at.fixed_offset()),
    }
}

pub fn trip_response(view: engine::TripView) -> api_trip::TripResponse {
    api_trip::TripResponse {
        id: view.trip.id,
        name: view.trip.name,
        description: view.trip.description,
        start_date: view.trip.start_date,
        end_date: view.trip.end_date,
        status: map_status(view.trip.status),
        cover_image: view.trip.cover_image,
        owner: view.trip.owner,
        is_locked: view.trip.is_locked,
        admin_notes: view.trip.admin_notes,
        stops: view.stops.into_iter().map(stop_view).collect(),
        expenses: view.expenses.into_iter().map(expense_view).collect(),
        share: view.share.map(share_view),
    }
}

pub fn budget_response(budget: engine::BudgetView) -> api_budget::BudgetResponse {
    api_budget::BudgetResponse {
        estimated: api_budget::EstimateView {
            activity_cost_minor: budget.estimated.activity_cost.minor(),
            living_cost_minor: budget.estimated.living_cost.minor(),
            total_minor: budget.estimated.total.minor(),
        },
        actual: api_budget::ActualView {
            by_category: budget
                .actual
                .by_category
                .into_iter()
                .map(|(category, amount)| (category.as_str().to_string(), amount.minor()))
                .collect(),
            total_minor: budget.actual.total.minor(),
            avg_per_day_minor: budget.actual.avg_per_day.minor(),
        },
        variance_minor: budget.variance.minor(),
    }
}

pub fn shared_trip_response(
    projection: engine::SharedTripProjection,
) -> api_share::SharedTripResponse {
    api_share::SharedTripResponse {
        name: projection.name,
        description: projection.description,
        start_date: projection.start_date,
        end_date: projection.end_date,
        status: map_status(projection.status),
        cover_image: projection.cover_image,
        can_copy: projection.can_copy,
        stops: projection.stops.into_iter().map(stop_view).collect(),
    }
}

pub fn stop_draft_in(stop: api_itinerary::StopNew) -> engine::StopDraft {
    engine::StopDraft {
        city_id: stop.city_id,
        start_date: stop.start_date,
        end_date: stop.end_date,
        notes: stop.notes,
        activities: stop
            .activities
            .into_iter()
            .map(|activity| engine::ActivityDraft {
                attraction_id: activity.attraction_id,
                name: activity.name,
                kind: map_kind_in(activity.kind),
                cost: activity.cost_minor.map(engine::Money::new),
                duration_min: activity.duration_min,
                scheduled_at: activity.scheduled_at.map(|at| at.with_timezone(&Utc)),
                notes: activity.notes,
            })
            .collect(),
    }
}
