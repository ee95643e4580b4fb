//! The fixed stage sequence of the simulated extraction pipeline.

use serde::{Deserialize, Serialize};

/// One step of the processing checklist shown during an upload. The
/// sequence is fixed and every stage is visited exactly once, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStage {
    Uploading,
    Scanning,
    ReadingReport,
    ExtractingMedicalData,
    StructuringTimeline,
    Completed,
}

impl ProcessingStage {
    /// Display label, as shown on the processing checklist.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Uploading => "Uploading",
            Self::Scanning => "Scanning",
            Self::ReadingReport => "Reading Report",
            Self::ExtractingMedicalData => "Extracting Medical Data",
            Self::StructuringTimeline => "Structuring Timeline",
            Self::Completed => "Completed",
        }
    }

    pub fn all() -> &'static [ProcessingStage] {
        &[
            Self::Uploading,
            Self::Scanning,
            Self::ReadingReport,
            Self::ExtractingMedicalData,
            Self::StructuringTimeline,
            Self::Completed,
        ]
    }

    /// Position within the fixed sequence (0-based).
    pub fn index(&self) -> usize {
        Self::all()
            .iter()
            .position(|stage| stage == self)
            .unwrap_or(0)
    }
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
