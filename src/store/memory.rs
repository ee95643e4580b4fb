//! In-memory table store.
//!
//! Stands in for the hosted service in demo runs and tests: same call
//! contract, same id/created_at stamping behavior. Tests can inject a
//! one-shot failure with a chosen message to simulate a network error.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Filter, OrderBy, Row, StoreError, TableStore};
use super::{CARE_REMINDERS, HEALTH_TIMELINE, MEDICAL_RECORDS};

/// One-shot injected failure: fails the call `skip` calls from now.
struct PlannedFailure {
    skip: usize,
    message: String,
}

pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
    planned_failure: Mutex<Option<PlannedFailure>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let mut tables = HashMap::new();
        for table in [MEDICAL_RECORDS, HEALTH_TIMELINE, CARE_REMINDERS] {
            tables.insert(table.to_string(), Vec::new());
        }
        Self {
            tables: RwLock::new(tables),
            planned_failure: Mutex::new(None),
        }
    }

    /// Make the next store call fail with `message` (simulated outage).
    pub fn fail_next(&self, message: &str) {
        self.fail_after(0, message);
    }

    /// Let `skip` calls succeed, then fail one with `message`.
    pub fn fail_after(&self, skip: usize, message: &str) {
        if let Ok(mut slot) = self.planned_failure.lock() {
            *slot = Some(PlannedFailure {
                skip,
                message: message.to_string(),
            });
        }
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        let Ok(mut slot) = self.planned_failure.lock() else {
            return Ok(());
        };
        match slot.take() {
            Some(plan) if plan.skip == 0 => Err(StoreError::Service(plan.message)),
            Some(mut plan) => {
                plan.skip -= 1;
                *slot = Some(plan);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Column ordering for `select`: nulls last, then by type-appropriate
/// comparison. RFC 3339 timestamps compare correctly as strings.
fn compare_column(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) | (Some(Value::Null), Some(Value::Null)) => Ordering::Equal,
        (None, Some(_)) | (Some(Value::Null), Some(_)) => Ordering::Greater,
        (Some(_), None) | (Some(_), Some(Value::Null)) => Ordering::Less,
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>, StoreError> {
        self.check_failure()?;
        let mut tables = self.tables.write().await;
        let entries = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;

        let mut stored = Vec::with_capacity(rows.len());
        for mut row in rows {
            row.entry("id".to_string())
                .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
            row.entry("created_at".to_string())
                .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));
            entries.push(row.clone());
            stored.push(row);
        }
        Ok(stored)
    }

    async fn update(&self, table: &str, patch: Row, filter: &Filter) -> Result<(), StoreError> {
        self.check_failure()?;
        let mut tables = self.tables.write().await;
        let entries = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;

        for row in entries.iter_mut().filter(|row| filter.matches(row)) {
            for (column, value) in &patch {
                row.insert(column.clone(), value.clone());
            }
        }
        Ok(())
    }

    async fn select(
        &self,
        table: &str,
        filter: &Filter,
        order: Option<OrderBy>,
    ) -> Result<Vec<Row>, StoreError> {
        self.check_failure()?;
        let tables = self.tables.read().await;
        let entries = tables
            .get(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;

        let mut rows: Vec<Row> = entries
            .iter()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect();

        if let Some(order) = order {
            rows.sort_by(|a, b| {
                let ord = compare_column(a.get(&order.column), b.get(&order.column));
                if order.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        Ok(rows)
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<(), StoreError> {
        self.check_failure()?;
        let mut tables = self.tables.write().await;
        let entries = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;
        entries.retain(|row| !filter.matches(row));
        Ok(())
    }
}
