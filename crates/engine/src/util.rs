//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{Currency, EngineError, ResultEngine};

/// Parse a UUID from storage or caller input and return a labeled error on
/// failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| EngineError::validation(label.to_string(), format!("invalid {label} id")))
}

/// Parse a currency code stored in the DB into a strongly typed `Currency`.
pub(crate) fn model_currency(value: &str) -> ResultEngine<Currency> {
    Currency::try_from(value)
}

/// Day span of a half-open `[start, end)` calendar range.
///
/// A stop from the 1st to the 4th spans 3 days (3 nights of living cost).
/// Inverted ranges clamp to 0 rather than going negative; they are rejected
/// by validation before they ever reach an aggregation.
pub(crate) fn duration_in_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_span_is_half_open() {
        assert_eq!(duration_in_days(date(2026, 5, 1), date(2026, 5, 4)), 3);
        assert_eq!(duration_in_days(date(2026, 5, 1), date(2026, 5, 1)), 0);
        assert_eq!(duration_in_days(date(2026, 5, 4), date(2026, 5, 1)), 0);
    }
}
