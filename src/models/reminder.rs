use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row in the `care_reminders` table: a scheduled care action such as a
/// medicine dose or a follow-up visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Free-form category, e.g. "Medicine", "Follow-up", "Refill".
    pub reminder_type: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Display time, e.g. "8:00 AM". Presentation text, not a timestamp.
    #[serde(default)]
    pub reminder_time: Option<String>,
    pub is_active: bool,
}
