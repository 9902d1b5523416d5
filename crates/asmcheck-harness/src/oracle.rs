//! Crash-parity oracle.
//!
//! Runs an undefined-behavior probe through the candidate and the reference
//! in separate forked children and decides whether their terminations agree.
//! Three rule families exist, matching the behavior contract per group:
//!
//! - [`ParityRule::BothMustSegv`]: pass only when both sides die of SEGV.
//!   Surviving a NULL input the reference faults on is a failure even when
//!   both sides survive.
//! - [`ParityRule::SegvParity`]: the did-it-SEGV flags must be equal;
//!   both-graceful passes.
//! - [`ParityRule::CrashParity`]: the coarse crashed flags (any fatal
//!   signal) must be equal.
//!
//! A timed-out child is killed, reaped, and treated as "did not crash"; the
//! caller attaches the flagged anomaly. A fork failure is an infrastructure
//! failure, never a silent skip.

use std::time::Duration;

use asmcheck_isolate::{ExecutionOutcome, run_isolated};

use crate::case::CaseOutcome;

/// How strictly the two terminations must agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParityRule {
    BothMustSegv,
    SegvParity,
    CrashParity,
}

/// The two observed terminations for one probe input.
#[derive(Debug, Clone)]
pub struct ProbePair {
    pub candidate: ExecutionOutcome,
    pub reference: ExecutionOutcome,
}

impl ProbePair {
    /// Applies a parity rule to the pair.
    #[must_use]
    pub fn agrees(&self, rule: ParityRule) -> bool {
        match rule {
            ParityRule::BothMustSegv => {
                self.candidate.segfaulted() && self.reference.segfaulted()
            }
            ParityRule::SegvParity => self.candidate.segfaulted() == self.reference.segfaulted(),
            ParityRule::CrashParity => self.candidate.crashed() == self.reference.crashed(),
        }
    }

    /// A flagged anomaly naming any side whose probe hit the deadline.
    #[must_use]
    pub fn timeout_anomaly(&self, timeout: Duration) -> Option<String> {
        let side = match (self.candidate.timed_out(), self.reference.timed_out()) {
            (true, true) => "both probes",
            (true, false) => "candidate probe",
            (false, true) => "reference probe",
            (false, false) => return None,
        };
        Some(format!(
            "{side} timed out after {}s; treated as not crashed",
            timeout.as_secs()
        ))
    }
}

/// Runs the candidate and reference closures in separate forked children.
///
/// Returns the ready-made infrastructure failure when isolation cannot be
/// established for either side.
pub fn run_pair(
    timeout: Duration,
    candidate: impl FnOnce(),
    reference: impl FnOnce(),
) -> Result<ProbePair, CaseOutcome> {
    let candidate = match run_isolated(timeout, candidate) {
        Ok(outcome) => outcome,
        Err(err) => {
            return Err(CaseOutcome::infrastructure(format!(
                "(isolation failed for candidate probe: {err})"
            )));
        }
    };
    let reference = match run_isolated(timeout, reference) {
        Ok(outcome) => outcome,
        Err(err) => {
            return Err(CaseOutcome::infrastructure(format!(
                "(isolation failed for reference probe: {err})"
            )));
        }
    };
    Ok(ProbePair {
        candidate,
        reference,
    })
}

/// Runs only the candidate closure in a forked child, for probes whose
/// reference behavior is computed in-process.
pub fn run_candidate(
    timeout: Duration,
    probe: impl FnOnce(),
) -> Result<(ExecutionOutcome, Option<String>), CaseOutcome> {
    match run_isolated(timeout, probe) {
        Ok(outcome) => {
            let anomaly = outcome.timed_out().then(|| {
                format!(
                    "candidate probe timed out after {}s; treated as not crashed",
                    timeout.as_secs()
                )
            });
            Ok((outcome, anomaly))
        }
        Err(err) => Err(CaseOutcome::infrastructure(format!(
            "(isolation failed for candidate probe: {err})"
        ))),
    }
}

/// The four-branch detail used by coarse NULL probes: which side, if any,
/// faulted. `safe_text` describes the both-survived branch for this probe
/// (e.g. "both return 0 safely").
#[must_use]
pub fn null_probe_detail(subject: &str, pair: &ProbePair, safe_text: &str) -> String {
    match (pair.candidate.crashed(), pair.reference.crashed()) {
        (true, true) => format!("({subject}: both segfault as expected)"),
        (false, false) => format!("({subject}: {safe_text})"),
        (true, false) => format!("({subject}: candidate segfaults but reference survives)"),
        (false, true) => format!("({subject}: candidate survives but reference segfaults)"),
    }
}

/// Failure detail for a [`ParityRule::BothMustSegv`] probe, `None` when the
/// probe passed. Surviving an input libc faults on is itself a failure.
#[must_use]
pub fn segv_expectation_detail(subject: &str, pair: &ProbePair) -> Option<String> {
    match (pair.candidate.segfaulted(), pair.reference.segfaulted()) {
        (true, true) => None,
        (false, true) => Some(format!("(candidate did not segfault on {subject})")),
        (true, false) => Some("(candidate segfaulted but libc did not)".to_string()),
        (false, false) => Some(format!("(both handled {subject} gracefully)")),
    }
}

/// Failure detail for a [`ParityRule::SegvParity`] probe, `None` when the
/// SEGV flags agree (including both-graceful).
#[must_use]
pub fn segv_parity_detail(subject: &str, pair: &ProbePair) -> Option<String> {
    match (pair.candidate.segfaulted(), pair.reference.segfaulted()) {
        (false, true) => Some(format!("(candidate did not segfault on {subject})")),
        (true, false) => Some("(candidate segfaulted but libc did not)".to_string()),
        _ => None,
    }
}

/// Attaches any timeout anomaly from the pair to an already-decided outcome.
#[must_use]
pub fn finish(pair: &ProbePair, timeout: Duration, outcome: CaseOutcome) -> CaseOutcome {
    match pair.timeout_anomaly(timeout) {
        Some(anomaly) => outcome.with_anomaly(anomaly),
        None => outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asmcheck_isolate::SignalKind;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn exited(code: i32) -> ExecutionOutcome {
        ExecutionOutcome::ExitedNormally { exit_code: code }
    }

    fn segv() -> ExecutionOutcome {
        ExecutionOutcome::KilledBySignal {
            kind: SignalKind::Segv,
        }
    }

    fn aborted() -> ExecutionOutcome {
        ExecutionOutcome::KilledBySignal {
            kind: SignalKind::Abort,
        }
    }

    #[test]
    fn both_must_segv_rejects_graceful_pair() {
        let pair = ProbePair {
            candidate: exited(0),
            reference: exited(0),
        };
        assert!(!pair.agrees(ParityRule::BothMustSegv));
        assert!(pair.agrees(ParityRule::SegvParity));
        assert!(pair.agrees(ParityRule::CrashParity));
    }

    #[test]
    fn both_must_segv_requires_segv_on_both_sides() {
        let pair = ProbePair {
            candidate: segv(),
            reference: segv(),
        };
        assert!(pair.agrees(ParityRule::BothMustSegv));

        let pair = ProbePair {
            candidate: exited(0),
            reference: segv(),
        };
        assert!(!pair.agrees(ParityRule::BothMustSegv));
        assert!(!pair.agrees(ParityRule::SegvParity));
    }

    #[test]
    fn crash_parity_counts_any_fatal_signal() {
        let pair = ProbePair {
            candidate: aborted(),
            reference: segv(),
        };
        assert!(pair.agrees(ParityRule::CrashParity));
        assert!(!pair.agrees(ParityRule::SegvParity));
    }

    #[test]
    fn timeout_counts_as_not_crashed() {
        let pair = ProbePair {
            candidate: ExecutionOutcome::TimedOut,
            reference: exited(0),
        };
        assert!(pair.agrees(ParityRule::CrashParity));
        let anomaly = pair.timeout_anomaly(TIMEOUT).unwrap();
        assert!(anomaly.contains("candidate probe"));
    }

    #[test]
    fn run_pair_observes_real_fault() {
        let pair = run_pair(
            TIMEOUT,
            || unsafe {
                let ptr: *mut u8 = std::ptr::null_mut();
                std::ptr::write_volatile(ptr, 1);
            },
            || {},
        )
        .unwrap();
        assert!(pair.candidate.segfaulted());
        assert!(!pair.reference.crashed());
        assert!(!pair.agrees(ParityRule::SegvParity));
    }

    #[test]
    fn strict_detail_flags_survivors() {
        let graceful = ProbePair {
            candidate: exited(0),
            reference: exited(0),
        };
        assert_eq!(
            segv_expectation_detail("NULL src", &graceful).as_deref(),
            Some("(both handled NULL src gracefully)")
        );
        let ok = ProbePair {
            candidate: segv(),
            reference: segv(),
        };
        assert!(segv_expectation_detail("NULL src", &ok).is_none());

        assert!(segv_parity_detail("NULL buffer", &graceful).is_none());
        let split = ProbePair {
            candidate: exited(0),
            reference: segv(),
        };
        assert_eq!(
            segv_parity_detail("NULL buffer", &split).as_deref(),
            Some("(candidate did not segfault on NULL buffer)")
        );
    }

    #[test]
    fn null_probe_detail_names_branches() {
        let both = ProbePair {
            candidate: segv(),
            reference: segv(),
        };
        assert_eq!(
            null_probe_detail("NULL string", &both, "both return 0 safely"),
            "(NULL string: both segfault as expected)"
        );
        let neither = ProbePair {
            candidate: exited(0),
            reference: exited(0),
        };
        assert_eq!(
            null_probe_detail("NULL string", &neither, "both return 0 safely"),
            "(NULL string: both return 0 safely)"
        );
    }
}
