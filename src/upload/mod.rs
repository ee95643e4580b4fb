//! Record upload: state machine, stage sequence, and the simulated
//! extraction results written on completion.

pub mod extraction;
pub mod machine;
pub mod stages;

pub use machine::{
    UploadError, UploadMachine, UploadOutcome, UploadPhase, UploadSnapshot, STAGE_DWELL,
};
pub use stages::ProcessingStage;
