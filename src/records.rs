//! Medical-record operations against the table store.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::{MedicalRecord, RecordKind};
use crate::store::{Filter, OrderBy, Row, StoreError, TableStore, MEDICAL_RECORDS};

/// Record type assigned to every upload in the current product scope.
pub const LAB_REPORT: &str = "Lab Report";

fn as_object(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}

fn decode(row: Row) -> Result<MedicalRecord, StoreError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

/// Create the unprocessed record row for a fresh upload.
pub async fn create_pending(
    store: &dyn TableStore,
    owner: Uuid,
    file_name: &str,
    kind: RecordKind,
    uploaded_at: DateTime<Utc>,
) -> Result<MedicalRecord, StoreError> {
    let row = as_object(json!({
        "user_id": owner,
        "file_name": file_name,
        "file_type": kind,
        "record_type": LAB_REPORT,
        "upload_date": uploaded_at,
        "is_processed": false,
        "disease": null,
        "doctor": null,
        "hospital": null,
        "medicine": null,
        "lab_value": null,
    }));

    let stored = store.insert(MEDICAL_RECORDS, vec![row]).await?;
    let row = stored
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::Service("insert returned no rows".into()))?;
    decode(row)
}

/// Merge the extraction result into a record. The patch is a plain column
/// map so the caller controls exactly which fields change.
pub async fn apply_extraction(
    store: &dyn TableStore,
    record_id: Uuid,
    patch: Row,
) -> Result<(), StoreError> {
    store
        .update(MEDICAL_RECORDS, patch, &Filter::by_id(record_id))
        .await
}

/// All records owned by a user, newest upload first.
pub async fn list_for_owner(
    store: &dyn TableStore,
    owner: Uuid,
) -> Result<Vec<MedicalRecord>, StoreError> {
    let rows = store
        .select(
            MEDICAL_RECORDS,
            &Filter::owner(owner),
            Some(OrderBy::desc("upload_date")),
        )
        .await?;
    rows.into_iter().map(decode).collect()
}

/// Single-row fetch, scoped to the owner so one user can never read
/// another user's record by id.
pub async fn fetch(
    store: &dyn TableStore,
    owner: Uuid,
    record_id: Uuid,
) -> Result<Option<MedicalRecord>, StoreError> {
    let filter = Filter::owner(owner).eq("id", record_id.to_string());
    let rows = store.select(MEDICAL_RECORDS, &filter, None).await?;
    rows.into_iter().next().map(decode).transpose()
}

pub async fn remove(store: &dyn TableStore, record_id: Uuid) -> Result<(), StoreError> {
    store
        .delete(MEDICAL_RECORDS, &Filter::by_id(record_id))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn owner() -> Uuid {
        Uuid::new_v4()
    }

    fn when() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn create_pending_round_trips() {
        let store = MemoryStore::new();
        let user = owner();
        let record =
            create_pending(&store, user, "pdf_report_123.pdf", RecordKind::Pdf, when())
                .await
                .unwrap();

        assert_eq!(record.user_id, user);
        assert_eq!(record.file_name, "pdf_report_123.pdf");
        assert_eq!(record.file_type, RecordKind::Pdf);
        assert_eq!(record.record_type, LAB_REPORT);
        assert!(!record.is_processed);
        assert!(record.disease.is_none());
    }

    #[tokio::test]
    async fn list_orders_newest_first() {
        let store = MemoryStore::new();
        let user = owner();
        let older = when();
        let newer = older + chrono::Duration::days(1);
        create_pending(&store, user, "old.pdf", RecordKind::Pdf, older)
            .await
            .unwrap();
        create_pending(&store, user, "new.jpg", RecordKind::Photo, newer)
            .await
            .unwrap();

        let records = list_for_owner(&store, user).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].file_name, "new.jpg");
        assert_eq!(records[1].file_name, "old.pdf");
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner() {
        let store = MemoryStore::new();
        let alice = owner();
        let bob = owner();
        create_pending(&store, alice, "a.pdf", RecordKind::Pdf, when())
            .await
            .unwrap();
        create_pending(&store, bob, "b.pdf", RecordKind::Pdf, when())
            .await
            .unwrap();

        let records = list_for_owner(&store, alice).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file_name, "a.pdf");
    }

    #[tokio::test]
    async fn apply_extraction_marks_processed() {
        let store = MemoryStore::new();
        let user = owner();
        let record = create_pending(&store, user, "a.pdf", RecordKind::Pdf, when())
            .await
            .unwrap();

        let mut patch = Row::new();
        patch.insert("is_processed".into(), json!(true));
        patch.insert("disease".into(), json!("Type 2 Diabetes"));
        apply_extraction(&store, record.id, patch).await.unwrap();

        let updated = fetch(&store, user, record.id).await.unwrap().unwrap();
        assert!(updated.is_processed);
        assert_eq!(updated.disease.as_deref(), Some("Type 2 Diabetes"));
    }

    #[tokio::test]
    async fn fetch_unknown_id_is_none() {
        let store = MemoryStore::new();
        assert!(fetch(&store, owner(), Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_deletes_only_that_record() {
        let store = MemoryStore::new();
        let alice = owner();
        let bob = owner();
        let target = create_pending(&store, alice, "a.pdf", RecordKind::Pdf, when())
            .await
            .unwrap();
        create_pending(&store, bob, "b.pdf", RecordKind::Pdf, when())
            .await
            .unwrap();

        remove(&store, target.id).await.unwrap();

        assert!(list_for_owner(&store, alice).await.unwrap().is_empty());
        assert_eq!(list_for_owner(&store, bob).await.unwrap().len(), 1);
    }
}
