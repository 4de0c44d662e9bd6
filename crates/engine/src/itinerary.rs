//! Itinerary drafts and the pure re-sequencing helpers.
//!
//! The editing flow works on a whole itinerary at a time: the caller submits
//! the full stop list and the engine rewrites it atomically. `position`
//! values are therefore never taken from input; they are recomputed from
//! array order on every write. The move/remove helpers below are the
//! deterministic array transforms backing the edit flow; they know nothing
//! about storage.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Money, activity::ActivityKind, stop::Stop};

/// Caller-supplied stop, before validation and position assignment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopDraft {
    pub city_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
    pub activities: Vec<ActivityDraft>,
}

/// Caller-supplied activity within a stop draft.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDraft {
    /// Catalog reference; `None` marks a custom activity.
    pub attraction_id: Option<Uuid>,
    pub name: String,
    pub kind: ActivityKind,
    pub cost: Option<Money>,
    pub duration_min: Option<i32>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Direction for [`move_stop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Swaps the stop at `index` with its neighbor in `direction`, then
/// renumbers positions 1..N. A move off either end is a no-op; returns
/// whether anything changed.
pub fn move_stop(stops: &mut [Stop], index: usize, direction: MoveDirection) -> bool {
    let neighbor = match direction {
        MoveDirection::Up => {
            if index == 0 || index >= stops.len() {
                return false;
            }
            index - 1
        }
        MoveDirection::Down => {
            if index + 1 >= stops.len() {
                return false;
            }
            index + 1
        }
    };
    stops.swap(index, neighbor);
    renumber(stops);
    true
}

/// Removes the stop at `index` and renumbers the remainder 1..N with no
/// gaps. Returns the removed stop, or `None` for an out-of-range index.
pub fn remove_stop(stops: &mut Vec<Stop>, index: usize) -> Option<Stop> {
    if index >= stops.len() {
        return None;
    }
    let removed = stops.remove(index);
    renumber(stops);
    Some(removed)
}

/// Reassigns positions to exactly 1..N in array order.
pub fn renumber(stops: &mut [Stop]) {
    for (index, stop) in stops.iter_mut().enumerate() {
        stop.position = index as i32 + 1;
    }
}
