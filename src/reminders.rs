//! Care-reminder operations against the table store.

use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::Reminder;
use crate::store::{Filter, OrderBy, Row, StoreError, TableStore, CARE_REMINDERS};

/// A reminder not yet handed to the store (no id assigned).
#[derive(Debug, Clone)]
pub struct NewReminder {
    pub reminder_type: String,
    pub title: String,
    pub description: Option<String>,
    pub reminder_time: Option<String>,
}

fn decode(row: Row) -> Result<Reminder, StoreError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

/// Insert a batch of reminders in a single store call.
pub async fn add_batch(
    store: &dyn TableStore,
    owner: Uuid,
    entries: Vec<NewReminder>,
) -> Result<Vec<Reminder>, StoreError> {
    let rows: Vec<Row> = entries
        .into_iter()
        .map(|entry| {
            let row = json!({
                "user_id": owner,
                "reminder_type": entry.reminder_type,
                "title": entry.title,
                "description": entry.description,
                "reminder_time": entry.reminder_time,
                "is_active": true,
            });
            match row {
                Value::Object(map) => map,
                _ => Row::new(),
            }
        })
        .collect();

    let stored = store.insert(CARE_REMINDERS, rows).await?;
    stored.into_iter().map(decode).collect()
}

/// Reminders for a user, newest first, with the built-in demo reminders
/// appended. A store failure degrades to the demo reminders alone rather
/// than an error page.
pub async fn list_for_owner(store: &dyn TableStore, owner: Uuid) -> Vec<Reminder> {
    let stored = store
        .select(
            CARE_REMINDERS,
            &Filter::owner(owner),
            Some(OrderBy::desc("created_at")),
        )
        .await;

    let mut reminders = match stored {
        Ok(rows) => rows.into_iter().filter_map(|row| decode(row).ok()).collect(),
        Err(err) => {
            tracing::warn!(%owner, error = %err, "loading reminders failed");
            Vec::new()
        }
    };
    reminders.extend(demo_reminders(owner));
    reminders
}

/// Fixed sentinel ids for the built-in demo reminders.
const DEMO_FOLLOW_UP_ID: Uuid = Uuid::from_u128(1);
const DEMO_REFILL_ID: Uuid = Uuid::from_u128(2);

/// The two demo reminders every account sees alongside its own.
pub fn demo_reminders(owner: Uuid) -> Vec<Reminder> {
    vec![
        Reminder {
            id: DEMO_FOLLOW_UP_ID,
            user_id: owner,
            reminder_type: "Follow-up".into(),
            title: "Doctor Follow-up Visit".into(),
            description: Some("Visit Dr. Kumar for diabetes check-up".into()),
            reminder_time: Some("March 15, 2026".into()),
            is_active: true,
        },
        Reminder {
            id: DEMO_REFILL_ID,
            user_id: owner,
            reminder_type: "Refill".into(),
            title: "Medicine Refill Alert".into(),
            description: Some("Refill Metformin prescription".into()),
            reminder_time: Some("In 7 days".into()),
            is_active: true,
        },
    ]
}
