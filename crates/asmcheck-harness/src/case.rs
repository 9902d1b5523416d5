//! Test case and outcome types.

use crate::runner::RunContext;

/// What kind of failure a case recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Candidate and reference disagreed on a value, buffer, or errno.
    Mismatch,
    /// Candidate and reference disagreed on whether an input crashes.
    CrashParity,
    /// The harness could not establish the conditions for the check
    /// (fork failure, scratch file failure). Visibly distinct from the
    /// candidate being wrong.
    Infrastructure,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mismatch => write!(f, "mismatch"),
            Self::CrashParity => write!(f, "crash parity"),
            Self::Infrastructure => write!(f, "infrastructure"),
        }
    }
}

/// Pass/fail verdict for one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStatus {
    Passed,
    Failed(FailureKind),
}

/// Result of running one case: the verdict, an optional human-readable
/// detail, and an optional flagged anomaly (e.g. a probe timeout that was
/// treated as "did not crash").
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub status: CaseStatus,
    pub detail: Option<String>,
    pub anomaly: Option<String>,
}

impl CaseOutcome {
    #[must_use]
    pub fn pass() -> Self {
        Self {
            status: CaseStatus::Passed,
            detail: None,
            anomaly: None,
        }
    }

    /// Pass with a detail string; probe cases describe which branch was
    /// observed even on success.
    #[must_use]
    pub fn pass_with_detail(detail: impl Into<String>) -> Self {
        Self {
            status: CaseStatus::Passed,
            detail: Some(detail.into()),
            anomaly: None,
        }
    }

    #[must_use]
    pub fn mismatch(detail: impl Into<String>) -> Self {
        Self {
            status: CaseStatus::Failed(FailureKind::Mismatch),
            detail: Some(detail.into()),
            anomaly: None,
        }
    }

    #[must_use]
    pub fn crash_parity(detail: impl Into<String>) -> Self {
        Self {
            status: CaseStatus::Failed(FailureKind::CrashParity),
            detail: Some(detail.into()),
            anomaly: None,
        }
    }

    #[must_use]
    pub fn infrastructure(detail: impl Into<String>) -> Self {
        Self {
            status: CaseStatus::Failed(FailureKind::Infrastructure),
            detail: Some(detail.into()),
            anomaly: None,
        }
    }

    /// Infrastructure failure from an I/O error with its context.
    #[must_use]
    pub fn infra_io(context: &str, err: &std::io::Error) -> Self {
        Self::infrastructure(format!("({context}: {err})"))
    }

    /// Attaches a flagged anomaly without changing the verdict.
    #[must_use]
    pub fn with_anomaly(mut self, anomaly: impl Into<String>) -> Self {
        self.anomaly = Some(anomaly.into());
        self
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == CaseStatus::Passed
    }

    /// The failure kind, if the case failed.
    #[must_use]
    pub fn failure(&self) -> Option<FailureKind> {
        match self.status {
            CaseStatus::Passed => None,
            CaseStatus::Failed(kind) => Some(kind),
        }
    }
}

/// One named scenario: a closure that drives candidate and reference through
/// the same operation and applies an equivalence rule.
pub struct TestCase {
    pub name: &'static str,
    run: Box<dyn Fn(&RunContext) -> CaseOutcome>,
}

impl TestCase {
    #[must_use]
    pub fn new(name: &'static str, run: impl Fn(&RunContext) -> CaseOutcome + 'static) -> Self {
        Self {
            name,
            run: Box::new(run),
        }
    }

    /// Runs the case against the given context.
    #[must_use]
    pub fn run(&self, ctx: &RunContext) -> CaseOutcome {
        (self.run)(ctx)
    }
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish()
    }
}
