//! The upload state machine.
//!
//! Lifecycle of a single record submission:
//! `Idle → Uploading → Processing(stage 0..5) → Complete`, with a
//! user-initiated reset from `Complete` back to `Idle`.
//!
//! Creating the record row is the blocking step; a store failure there
//! returns the machine to `Idle` with the store message surfaced. The
//! stage sequence itself is timer-driven through the injected clock and
//! does no real extraction work. The three completion writes (record
//! patch, timeline entry, reminder pair) are not transactional: failures
//! after the record patch are logged and reported as warnings on the
//! outcome, and a failed record patch skips the derived inserts so
//! derived rows never exist for an unprocessed record.
//!
//! One machine governs one submission flow. Two independent machines
//! (e.g. two browser tabs) can upload concurrently with no deduplication.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::clock::Clock;
use crate::models::RecordKind;
use crate::records;
use crate::reminders;
use crate::session::Session;
use crate::store::TableStore;
use crate::timeline;

use super::extraction;
use super::stages::ProcessingStage;

/// Dwell time per processing stage.
pub const STAGE_DWELL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum UploadPhase {
    Idle,
    Uploading,
    Processing { stage: ProcessingStage },
    Complete,
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("an upload is already in progress")]
    AlreadyInFlight,
    /// Store failure while creating the record. Displays the
    /// store-provided message unchanged.
    #[error("{0}")]
    Store(String),
}

/// Result of a completed submission.
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub record_id: Uuid,
    /// Stages entered, in order.
    pub stages: Vec<ProcessingStage>,
    /// Completion writes that failed, in user-facing terms.
    pub warnings: Vec<String>,
}

/// Point-in-time view of the machine for the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct UploadSnapshot {
    #[serde(flatten)]
    pub phase: UploadPhase,
    /// The whole checklist, for rendering.
    pub steps: Vec<&'static str>,
    /// How many stages have been entered so far.
    pub completed_steps: usize,
    pub record_id: Option<Uuid>,
    pub warnings: Vec<String>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct UploadMachine {
    store: Arc<dyn TableStore>,
    clock: Arc<dyn Clock>,
    phase: Mutex<UploadPhase>,
    visited: Mutex<Vec<ProcessingStage>>,
    record_id: Mutex<Option<Uuid>>,
    outcome: Mutex<Option<UploadOutcome>>,
}

impl UploadMachine {
    pub fn new(store: Arc<dyn TableStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            phase: Mutex::new(UploadPhase::Idle),
            visited: Mutex::new(Vec::new()),
            record_id: Mutex::new(None),
            outcome: Mutex::new(None),
        }
    }

    pub fn phase(&self) -> UploadPhase {
        *lock(&self.phase)
    }

    pub fn snapshot(&self) -> UploadSnapshot {
        UploadSnapshot {
            phase: self.phase(),
            steps: ProcessingStage::all().iter().map(|s| s.label()).collect(),
            completed_steps: lock(&self.visited).len(),
            record_id: *lock(&self.record_id),
            warnings: lock(&self.outcome)
                .as_ref()
                .map(|o| o.warnings.clone())
                .unwrap_or_default(),
        }
    }

    /// Start a submission: create the record row and enter the first
    /// processing stage. Rejected unless the machine is `Idle`.
    pub async fn begin(
        &self,
        session: &Session,
        kind: RecordKind,
    ) -> Result<Uuid, UploadError> {
        {
            let mut phase = lock(&self.phase);
            if *phase != UploadPhase::Idle {
                return Err(UploadError::AlreadyInFlight);
            }
            *phase = UploadPhase::Uploading;
        }

        let now = self.clock.now();
        let file_name = format!(
            "{}_report_{}.{}",
            kind.as_str(),
            now.timestamp_millis(),
            kind.extension()
        );

        match records::create_pending(
            self.store.as_ref(),
            session.user_id,
            &file_name,
            kind,
            now,
        )
        .await
        {
            Ok(record) => {
                *lock(&self.record_id) = Some(record.id);
                self.enter_stage(ProcessingStage::Uploading);
                tracing::info!(record_id = %record.id, file_name = %file_name, "upload started");
                Ok(record.id)
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(error = %message, "record creation failed, returning to idle");
                *lock(&self.phase) = UploadPhase::Idle;
                Err(UploadError::Store(message))
            }
        }
    }

    /// Drive the stage sequence and the completion writes. Call after a
    /// successful `begin`.
    pub async fn process(&self, session: &Session, record_id: Uuid) -> UploadOutcome {
        // Dwell on the first stage, entered by `begin`.
        self.clock.sleep(STAGE_DWELL).await;
        for stage in &ProcessingStage::all()[1..] {
            self.enter_stage(*stage);
            self.clock.sleep(STAGE_DWELL).await;
        }

        let warnings = self.finalize(session, record_id).await;
        *lock(&self.phase) = UploadPhase::Complete;

        let outcome = UploadOutcome {
            record_id,
            stages: lock(&self.visited).clone(),
            warnings,
        };
        *lock(&self.outcome) = Some(outcome.clone());
        tracing::info!(
            %record_id,
            warnings = outcome.warnings.len(),
            "upload processing finished"
        );
        outcome
    }

    /// The whole flow: `begin` then `process`.
    pub async fn run(
        &self,
        session: &Session,
        kind: RecordKind,
    ) -> Result<UploadOutcome, UploadError> {
        let record_id = self.begin(session, kind).await?;
        Ok(self.process(session, record_id).await)
    }

    /// User-initiated return to `Idle` ("Upload Another"). Only valid
    /// from `Complete`; prior rows are untouched.
    pub fn reset(&self) -> bool {
        {
            let mut phase = lock(&self.phase);
            if *phase != UploadPhase::Complete {
                return false;
            }
            *phase = UploadPhase::Idle;
        }
        lock(&self.visited).clear();
        *lock(&self.record_id) = None;
        *lock(&self.outcome) = None;
        true
    }

    fn enter_stage(&self, stage: ProcessingStage) {
        *lock(&self.phase) = UploadPhase::Processing { stage };
        lock(&self.visited).push(stage);
    }

    /// The three completion writes, in sequence. Failures are logged and
    /// returned as warnings; a failed record patch skips the derived
    /// inserts so derived rows never exist for an unprocessed record.
    async fn finalize(&self, session: &Session, record_id: Uuid) -> Vec<String> {
        let mut warnings = Vec::new();
        let store = self.store.as_ref();

        if let Err(err) =
            records::apply_extraction(store, record_id, extraction::record_patch()).await
        {
            tracing::warn!(
                %record_id,
                error = %err,
                "marking record processed failed, skipping derived writes"
            );
            warnings.push(format!("record could not be marked processed: {err}"));
            return warnings;
        }

        if let Err(err) = timeline::record_event(
            store,
            session.user_id,
            self.clock.now(),
            extraction::DIAGNOSIS_EVENT_TYPE,
            extraction::DIAGNOSIS_TITLE,
            Some(extraction::DIAGNOSIS_DESCRIPTION),
            Some(record_id),
        )
        .await
        {
            tracing::warn!(%record_id, error = %err, "timeline entry write failed");
            warnings.push(format!("timeline entry was not saved: {err}"));
        }

        if let Err(err) =
            reminders::add_batch(store, session.user_id, extraction::medicine_reminders()).await
        {
            tracing::warn!(%record_id, error = %err, "care reminder write failed");
            warnings.push(format!("care reminders were not saved: {err}"));
        }

        warnings
    }
}
