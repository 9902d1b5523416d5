//! Differential conformance harness for libasm candidates.
//!
//! This crate provides:
//! - Scenario tables: fixed, ordered case lists for each function under test
//! - Differential executor: candidate vs reference under a declared
//!   equivalence rule (exact, sign-class, distinct-copy, errno+return)
//! - Crash-parity oracle: fork-isolated undefined-behavior probes whose
//!   fault signals must agree between candidate and reference
//! - Stats and scoring: mandatory percentage plus gated bonus contribution
//! - Report generation: human-readable + machine-readable conformance reports
//! - Structured logging: JSONL event stream with schema validation

pub mod case;
pub mod config;
pub mod differential;
pub mod error;
pub mod groups;
pub mod log;
pub mod oracle;
pub mod report;
pub mod runner;
pub mod scratch;
pub mod stats;
pub mod suite;

pub use case::{CaseOutcome, CaseStatus, FailureKind, TestCase};
pub use config::HarnessConfig;
pub use error::HarnessError;
pub use report::ConformanceReport;
pub use runner::{ConsoleSink, ProgressSink, RunContext, SuiteSummary, run_suite};
pub use stats::{ScoreBoard, Stats};
