//! Run configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::HarnessError;

/// Default deadline for one fork-isolated probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Explicit configuration threaded through the runner; there is no ambient
/// global state.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Candidate library artifact path, when the caller has one. Checked for
    /// existence, then recorded for reporting; linking happens out of band.
    pub candidate_path: Option<PathBuf>,
    /// Print every case as it finishes rather than only group summaries.
    pub verbose: bool,
    /// Directory under which the per-run scratch directory is created.
    pub scratch_dir: PathBuf,
    /// Deadline for each fork-isolated probe.
    pub probe_timeout: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            candidate_path: None,
            verbose: false,
            scratch_dir: std::env::temp_dir(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl HarnessConfig {
    /// Validates caller-supplied paths before a run starts.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if let Some(path) = &self.candidate_path
            && !path.exists()
        {
            return Err(HarnessError::CandidateMissing { path: path.clone() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(HarnessConfig::default().validate().is_ok());
    }

    #[test]
    fn missing_candidate_path_is_rejected() {
        let config = HarnessConfig {
            candidate_path: Some(PathBuf::from("/nonexistent/libasm.a")),
            ..HarnessConfig::default()
        };
        match config.validate() {
            Err(HarnessError::CandidateMissing { path }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/libasm.a"));
            }
            other => panic!("expected CandidateMissing, got {other:?}"),
        }
    }
}
