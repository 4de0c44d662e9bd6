use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    EngineError, ResultEngine,
    audit::{AuditFact, AuditRecorder, TracingAuditRecorder},
    catalog::{CatalogReader, DbCatalog},
};

mod access;
mod budget;
mod clone;
mod expenses;
mod itinerary;
mod share;
mod trips;

pub use access::Actor;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// The itinerary & budget engine.
///
/// All operations are request-scoped: every mutation runs in a single DB
/// transaction and either all row effects land or none do. Concurrent
/// whole-itinerary replacements on the same trip are last-writer-wins; the
/// engine deliberately carries no version token.
pub struct Engine {
    database: DatabaseConnection,
    catalog: Arc<dyn CatalogReader>,
    audit: Arc<dyn AuditRecorder>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub(crate) fn catalog(&self) -> &dyn CatalogReader {
        self.catalog.as_ref()
    }

    /// Hand a fact to the audit sink. Best-effort: a sink failure is logged
    /// and the surrounding mutation stands.
    pub(crate) fn record_audit(&self, fact: AuditFact) {
        if let Err(err) = self.audit.record(fact) {
            tracing::warn!("failed to record audit fact: {err}");
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::validation(
            "name",
            format!("{label} name must not be empty"),
        ));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    catalog: Option<Arc<dyn CatalogReader>>,
    audit: Option<Arc<dyn AuditRecorder>>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Override the catalog source. Defaults to the `cities`/`attractions`
    /// tables of the engine database.
    pub fn catalog(mut self, catalog: Arc<dyn CatalogReader>) -> EngineBuilder {
        self.catalog = Some(catalog);
        self
    }

    /// Override the audit sink. Defaults to the log stream.
    pub fn audit(mut self, audit: Arc<dyn AuditRecorder>) -> EngineBuilder {
        self.audit = Some(audit);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(DbCatalog::new(self.database.clone())));
        let audit = self.audit.unwrap_or_else(|| Arc::new(TracingAuditRecorder));
        Ok(Engine {
            database: self.database,
            catalog,
            audit,
        })
    }
}
