use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row in the `health_timeline` table. Events are written once when a
/// record finishes processing and are never edited afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_date: DateTime<Utc>,
    /// Free-form category, e.g. "Diagnosis".
    pub event_type: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Back-reference to the record this event was derived from.
    #[serde(default)]
    pub record_id: Option<Uuid>,
}
