use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::RecordKind;

/// A row in the `medical_records` table: one uploaded document plus the
/// fields filled in by the extraction pipeline once it has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub file_type: RecordKind,
    pub record_type: String,
    pub upload_date: DateTime<Utc>,
    pub is_processed: bool,
    #[serde(default)]
    pub disease: Option<String>,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(default)]
    pub hospital: Option<String>,
    #[serde(default)]
    pub medicine: Option<String>,
    #[serde(default)]
    pub lab_value: Option<String>,
}
