//! Record store client contract.
//!
//! All durable data lives in a hosted table-oriented store consumed through
//! a generic interface: insert/update/select/delete by table name and
//! exact-match filter. The store is a black box: it assigns row ids and
//! creation stamps, and every call is network-bound and independently
//! fallible, so callers treat each one as a distinct suspension point.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Tables consumed by the application. The field set of each is fixed;
/// schema migration is the hosted service's concern, not ours.
pub const MEDICAL_RECORDS: &str = "medical_records";
pub const HEALTH_TIMELINE: &str = "health_timeline";
pub const CARE_REMINDERS: &str = "care_reminders";

/// An opaque store row: column name → JSON value.
pub type Row = serde_json::Map<String, Value>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Network/service failure. Displays the service-provided message
    /// verbatim so it can be surfaced to the user unchanged.
    #[error("{0}")]
    Service(String),

    #[error("no such table: {0}")]
    UnknownTable(String),

    #[error("row decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}

/// Exact-match equality predicate over row columns.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.clauses.push((column.to_string(), value.into()));
        self
    }

    /// Single-row filter by the store-assigned row identifier.
    pub fn by_id(id: uuid::Uuid) -> Self {
        Self::new().eq("id", id.to_string())
    }

    /// All rows owned by a user.
    pub fn owner(user_id: uuid::Uuid) -> Self {
        Self::new().eq("user_id", user_id.to_string())
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.clauses
            .iter()
            .all(|(column, value)| row.get(column) == Some(value))
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Sort directive for `select`.
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub column: String,
    pub ascending: bool,
}

impl OrderBy {
    pub fn desc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            ascending: false,
        }
    }

    pub fn asc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            ascending: true,
        }
    }
}

/// The call contract against the hosted table store.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Insert rows; returns them with service-assigned `id` and
    /// `created_at` columns populated.
    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>, StoreError>;

    /// Merge `patch` columns into every row matching `filter`.
    async fn update(&self, table: &str, patch: Row, filter: &Filter) -> Result<(), StoreError>;

    /// Fetch rows matching `filter`, optionally sorted.
    async fn select(
        &self,
        table: &str,
        filter: &Filter,
        order: Option<OrderBy>,
    ) -> Result<Vec<Row>, StoreError>;

    /// Delete every row matching `filter`.
    async fn delete(&self, table: &str, filter: &Filter) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn filter_matches_all_clauses() {
        let filter = Filter::new().eq("user_id", "u1").eq("is_processed", true);
        let hit = row(&[
            ("user_id", json!("u1")),
            ("is_processed", json!(true)),
            ("extra", json!(1)),
        ]);
        let miss = row(&[("user_id", json!("u1")), ("is_processed", json!(false))]);
        assert!(filter.matches(&hit));
        assert!(!filter.matches(&miss));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = Filter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&row(&[("anything", json!("x"))])));
    }

    #[test]
    fn by_id_uses_string_form() {
        let id = uuid::Uuid::new_v4();
        let filter = Filter::by_id(id);
        let hit = row(&[("id", json!(id.to_string()))]);
        assert!(filter.matches(&hit));
    }

    #[test]
    fn service_error_displays_message_verbatim() {
        let err = StoreError::Service("connection reset by peer".into());
        assert_eq!(err.to_string(), "connection reset by peer");
    }

    #[test]
    fn order_by_constructors() {
        let desc = OrderBy::desc("upload_date");
        assert_eq!(desc.column, "upload_date");
        assert!(!desc.ascending);
        let asc = OrderBy::asc("event_date");
        assert!(asc.ascending);
    }
}
