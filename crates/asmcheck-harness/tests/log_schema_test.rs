//! Integration test: JSONL log stream
//!
//! Validates that:
//! 1. A full suite run through the log sink produces one schema-valid line
//!    per event, with monotonically sequenced trace ids.
//! 2. The event stream has the expected shape: group_started before its
//!    cases, one case_finished per case, one suite_finished at the end.
//! 3. Skipped groups appear as group_skipped with a skip outcome.
//!
//! Run: cargo test -p asmcheck-harness --test log_schema_test

use std::path::PathBuf;
use std::sync::Mutex;

use asmcheck_abi::sample;
use asmcheck_harness::log::{LogEmitter, validate_log_file};
use asmcheck_harness::{HarnessConfig, run_suite};

// Suite runs redirect file descriptors and fork probe children, both of which
// are process-global. Runs inside this test binary must not overlap.
static RUN_LOCK: Mutex<()> = Mutex::new(());

fn temp_log_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("asmcheck_{tag}_{}.jsonl", std::process::id()))
}

fn parse_lines(path: &PathBuf) -> Vec<serde_json::Value> {
    let content = std::fs::read_to_string(path).unwrap();
    content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn selftest_run_emits_schema_valid_jsonl() {
    let path = temp_log_path("selftest_log");
    let summary = {
        let _guard = RUN_LOCK.lock().unwrap();
        let mut emitter = LogEmitter::to_file(&path, "run-schema").unwrap();
        run_suite(
            &HarnessConfig::default(),
            sample::well_behaved(),
            &mut emitter,
        )
        .expect("suite should run")
    };

    let (line_count, errors) = validate_log_file(&path).unwrap();
    assert!(errors.is_empty(), "schema violations: {errors:?}");

    // One group_started per group, one case_finished per case, one
    // suite_finished.
    let total_cases: usize = summary.groups.iter().map(|g| g.cases.len()).sum();
    assert_eq!(line_count, summary.groups.len() + total_cases + 1);

    let lines = parse_lines(&path);
    assert_eq!(lines[0]["event"], "group_started");
    assert_eq!(lines[0]["function"], "ft_strlen");
    assert_eq!(lines[0]["class"], "mandatory");

    let last = lines.last().unwrap();
    assert_eq!(last["event"], "suite_finished");
    assert_eq!(last["exit_code"], 0);
    assert_eq!(last["details"]["final_score"], 125);
    assert_eq!(last["details"]["bonus_excluded"], false);

    std::fs::remove_file(&path).ok();
}

#[test]
fn trace_ids_sequence_monotonically() {
    let path = temp_log_path("trace_log");
    {
        let _guard = RUN_LOCK.lock().unwrap();
        let mut emitter = LogEmitter::to_file(&path, "run-trace").unwrap();
        run_suite(
            &HarnessConfig::default(),
            sample::well_behaved(),
            &mut emitter,
        )
        .expect("suite should run");
    }

    let lines = parse_lines(&path);
    for (i, line) in lines.iter().enumerate() {
        let trace = line["trace_id"].as_str().unwrap();
        assert!(
            trace.starts_with("asmcheck::run-trace::"),
            "line {i} trace_id {trace:?}"
        );
    }
    let seqs: Vec<&str> = lines
        .iter()
        .map(|l| l["trace_id"].as_str().unwrap().rsplit("::").next().unwrap())
        .collect();
    let mut sorted = seqs.clone();
    sorted.sort_unstable();
    assert_eq!(seqs, sorted, "trace ids out of order");

    std::fs::remove_file(&path).ok();
}

#[test]
fn case_events_carry_function_case_and_outcome() {
    let path = temp_log_path("case_log");
    {
        let _guard = RUN_LOCK.lock().unwrap();
        let mut emitter = LogEmitter::to_file(&path, "run-cases").unwrap();
        run_suite(
            &HarnessConfig::default(),
            sample::well_behaved(),
            &mut emitter,
        )
        .expect("suite should run");
    }

    let lines = parse_lines(&path);
    let case_lines: Vec<&serde_json::Value> = lines
        .iter()
        .filter(|l| l["event"] == "case_finished")
        .collect();
    assert!(!case_lines.is_empty());
    for line in case_lines {
        assert!(line["function"].as_str().unwrap().starts_with("ft_"));
        assert!(!line["case"].as_str().unwrap().is_empty());
        assert_eq!(line["outcome"], "pass");
        assert_eq!(line["level"], "info");
    }

    std::fs::remove_file(&path).ok();
}

#[test]
fn stubbed_run_logs_skips() {
    let path = temp_log_path("skip_log");
    {
        let _guard = RUN_LOCK.lock().unwrap();
        let mut emitter = LogEmitter::to_file(&path, "run-skips").unwrap();
        run_suite(
            &HarnessConfig::default(),
            sample::weak_stubbed(),
            &mut emitter,
        )
        .expect("suite should run");
    }

    let (line_count, errors) = validate_log_file(&path).unwrap();
    assert!(errors.is_empty(), "schema violations: {errors:?}");
    // Eleven skips plus the suite_finished line.
    assert_eq!(line_count, 12);

    let lines = parse_lines(&path);
    let skips: Vec<&serde_json::Value> = lines
        .iter()
        .filter(|l| l["event"] == "group_skipped")
        .collect();
    assert_eq!(skips.len(), 11);
    for line in skips {
        assert_eq!(line["outcome"], "skip");
        assert_eq!(line["level"], "warn");
        assert_eq!(line["detail"], "not found");
    }

    std::fs::remove_file(&path).ok();
}
