//! Harness-level operational errors.
//!
//! Case-level failures are never errors; they are recorded as failed cases
//! and the run keeps going. This type covers the boundary where the harness
//! itself cannot proceed: bad configuration, unusable scratch space,
//! unwritable artifacts.

use std::path::PathBuf;

use thiserror::Error;

/// Operational error for the harness binary and run setup.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A candidate path was given on the command line but does not exist.
    #[error("candidate library not found at {path}")]
    CandidateMissing { path: PathBuf },

    /// Scratch directory or artifact I/O failed.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// Report or log serialization failed.
    #[error("serialization failure: {0}")]
    Json(#[from] serde_json::Error),

    /// The fault-isolation engine could not run a probe at all.
    #[error(transparent)]
    Isolate(#[from] asmcheck_isolate::IsolateError),
}
