//! Health-timeline operations against the table store.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::TimelineEvent;
use crate::store::{Filter, OrderBy, Row, StoreError, TableStore, HEALTH_TIMELINE};

fn decode(row: Row) -> Result<TimelineEvent, StoreError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

/// Append a dated event. Events are write-once; there is no edit or
/// delete path for the timeline.
pub async fn record_event(
    store: &dyn TableStore,
    owner: Uuid,
    event_date: DateTime<Utc>,
    event_type: &str,
    title: &str,
    description: Option<&str>,
    record_id: Option<Uuid>,
) -> Result<TimelineEvent, StoreError> {
    let row = json!({
        "user_id": owner,
        "event_date": event_date,
        "event_type": event_type,
        "title": title,
        "description": description,
        "record_id": record_id,
    });
    let row = match row {
        Value::Object(map) => map,
        _ => Row::new(),
    };

    let stored = store.insert(HEALTH_TIMELINE, vec![row]).await?;
    let row = stored
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::Service("insert returned no rows".into()))?;
    decode(row)
}

/// All events for a user, most recent first.
pub async fn list_for_owner(
    store: &dyn TableStore,
    owner: Uuid,
) -> Result<Vec<TimelineEvent>, StoreError> {
    let rows = store
        .select(
            HEALTH_TIMELINE,
            &Filter::owner(owner),
            Some(OrderBy::desc("event_date")),
        )
        .await?;
    rows.into_iter().map(decode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn when(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn record_event_round_trips() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let record_id = Uuid::new_v4();

        let event = record_event(
            &store,
            owner,
            when(1),
            "Diagnosis",
            "Diabetes Diagnosis",
            Some("HbA1c level: 7.2%, prescribed Metformin 500mg"),
            Some(record_id),
        )
        .await
        .unwrap();

        assert_eq!(event.user_id, owner);
        assert_eq!(event.event_type, "Diagnosis");
        assert_eq!(event.record_id, Some(record_id));
        assert!(event
            .description
            .as_deref()
            .unwrap()
            .contains("Metformin"));
    }

    #[tokio::test]
    async fn list_orders_most_recent_first() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        record_event(&store, owner, when(1), "Diagnosis", "First", None, None)
            .await
            .unwrap();
        record_event(&store, owner, when(5), "Diagnosis", "Second", None, None)
            .await
            .unwrap();

        let events = list_for_owner(&store, owner).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "Second");
        assert_eq!(events[1].title, "First");
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        record_event(&store, alice, when(1), "Diagnosis", "Alice", None, None)
            .await
            .unwrap();
        record_event(&store, bob, when(1), "Diagnosis", "Bob", None, None)
            .await
            .unwrap();

        let events = list_for_owner(&store, alice).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Alice");
    }
}
