//! Itinerary & budget engine.
//!
//! A trip owns an ordered list of city stops, each with planned activities;
//! a ledger of manually logged expenses tracks actual spend next to the
//! catalog-derived estimate. The engine keeps the stop sequence consistent,
//! clones trips (admin templates and cross-user share copies), manages the
//! one share link a trip may have, and emits audit facts for privileged
//! mutations. Persistence runs through sea-orm; every mutating operation is
//! a single DB transaction.

pub use activity::{Activity, ActivityKind};
pub use audit::{AuditAction, AuditFact, AuditRecorder, TracingAuditRecorder};
pub use budget::{BudgetView, CostEstimate, ExpenseSummary};
pub use catalog::{Attraction, CatalogReader, City, DbCatalog};
pub use currency::Currency;
pub use error::{EngineError, ValidationError};
pub use expense::{Expense, ExpenseCategory, ExpenseDraft};
pub use itinerary::{ActivityDraft, MoveDirection, StopDraft, move_stop, remove_stop};
pub use money::Money;
pub use ops::{Actor, Engine, EngineBuilder};
pub use share::{ShareSettings, SharedTrip, SharedTripProjection};
pub use stop::Stop;
pub use trip::{StopView, Trip, TripDraft, TripPatch, TripStatus, TripView};

mod activity;
mod audit;
mod budget;
mod catalog;
mod currency;
mod error;
mod expense;
mod itinerary;
mod money;
mod ops;
mod share;
mod stop;
mod trip;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
