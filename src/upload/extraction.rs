//! Simulated extraction results.
//!
//! The pipeline performs no real OCR: every completed upload yields the
//! same demo extraction payload, one diagnosis timeline entry, and a
//! fixed morning/evening medicine schedule.

use serde_json::json;

use crate::reminders::NewReminder;
use crate::store::Row;

pub const DISEASE: &str = "Type 2 Diabetes";
pub const DOCTOR: &str = "Dr. Kumar";
pub const HOSPITAL: &str = "City Care Clinic";
pub const MEDICINE: &str = "Metformin 500mg";
pub const LAB_VALUE: &str = "HbA1c 7.2%";

pub const DIAGNOSIS_EVENT_TYPE: &str = "Diagnosis";
pub const DIAGNOSIS_TITLE: &str = "Diabetes Diagnosis";
pub const DIAGNOSIS_DESCRIPTION: &str = "HbA1c level: 7.2%, prescribed Metformin 500mg";

/// Column patch applied to the record when processing completes.
pub fn record_patch() -> Row {
    let patch = json!({
        "disease": DISEASE,
        "doctor": DOCTOR,
        "hospital": HOSPITAL,
        "medicine": MEDICINE,
        "lab_value": LAB_VALUE,
        "is_processed": true,
    });
    match patch {
        serde_json::Value::Object(map) => map,
        _ => Row::new(),
    }
}

/// The two medicine reminders scheduled on completion.
pub fn medicine_reminders() -> Vec<NewReminder> {
    vec![
        NewReminder {
            reminder_type: "Medicine".into(),
            title: "Take Metformin".into(),
            description: Some("Morning dose - 500mg".into()),
            reminder_time: Some("8:00 AM".into()),
        },
        NewReminder {
            reminder_type: "Medicine".into(),
            title: "Take Metformin".into(),
            description: Some("Evening dose - 500mg".into()),
            reminder_time: Some("8:00 PM".into()),
        },
    ]
}
