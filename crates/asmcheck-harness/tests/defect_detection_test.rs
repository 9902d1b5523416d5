//! Integration test: defect detection
//!
//! Validates that each equivalence rule catches the defect it exists for,
//! using the deliberately broken built-in candidate:
//! 1. Exact equality flags the off-by-one strlen.
//! 2. Crash parity flags NULL-tolerant strcpy/strcmp while still accepting
//!    the magnitude-clamped strcmp on value cases.
//! 3. The joint errno-and-return rule flags the error-swallowing write.
//! 4. The distinct-copy rule flags the corrupted strdup content.
//! 5. The multi-sign atoi_base bug and the inverted list_sort comparison are
//!    caught, and the bonus share is excluded from the score.
//!
//! Run: cargo test -p asmcheck-harness --test defect_detection_test

use std::sync::OnceLock;

use asmcheck_abi::registry::Function;
use asmcheck_abi::sample;
use asmcheck_harness::runner::{CaseRecord, GroupRun, SilentSink, SuiteSummary};
use asmcheck_harness::{CaseStatus, FailureKind, HarnessConfig, run_suite};

// Suite runs redirect file descriptors and fork probe children, both of which
// are process-global. This binary runs the suite once and shares the summary;
// every test blocks on the same initialization.
static DEFECTIVE_RUN: OnceLock<SuiteSummary> = OnceLock::new();

fn defective_run() -> &'static SuiteSummary {
    DEFECTIVE_RUN.get_or_init(|| {
        run_suite(&HarnessConfig::default(), sample::defective(), &mut SilentSink)
            .expect("suite should run")
    })
}

fn group(summary: &SuiteSummary, function: Function) -> &GroupRun {
    summary
        .groups
        .iter()
        .find(|g| g.function == function)
        .unwrap_or_else(|| panic!("no group for {}", function.symbol()))
}

fn case<'a>(group: &'a GroupRun, name: &str) -> &'a CaseRecord {
    group
        .cases
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("{} has no case named {name:?}", group.function.symbol()))
}

fn assert_passed(group: &GroupRun, name: &str) {
    let record = case(group, name);
    assert!(
        matches!(record.status, CaseStatus::Passed),
        "{} / {name} should pass, got {:?} {:?}",
        group.function.symbol(),
        record.status,
        record.detail
    );
}

fn assert_failed(group: &GroupRun, name: &str, kind: FailureKind, detail_fragment: &str) {
    let record = case(group, name);
    assert_eq!(
        record.status,
        CaseStatus::Failed(kind),
        "{} / {name}: {:?}",
        group.function.symbol(),
        record.detail
    );
    let detail = record.detail.as_deref().unwrap_or("");
    assert!(
        detail.contains(detail_fragment),
        "{} / {name}: detail {detail:?} missing {detail_fragment:?}",
        group.function.symbol()
    );
}

#[test]
fn defective_candidate_fails_the_suite() {
    let summary = defective_run();

    assert!(!summary.all_passed());
    assert_eq!(summary.exit_code(), 1);
    assert!(summary.scoreboard.mandatory.failed > 0);
    assert!(!summary.scoreboard.mandatory_perfect());
    assert!(summary.final_score() < 100, "score {}", summary.final_score());
}

#[test]
fn off_by_one_strlen_fails_exact_equality() {
    let strlen = group(defective_run(), Function::Strlen);

    assert!(strlen.available);
    assert_passed(strlen, "Empty string");
    assert_failed(
        strlen,
        "Simple string",
        FailureKind::Mismatch,
        "expected 5, got 4",
    );
    assert_failed(
        strlen,
        "Single character",
        FailureKind::Mismatch,
        "expected 1, got 0",
    );
}

#[test]
fn null_tolerant_strcpy_fails_crash_parity() {
    let strcpy = group(defective_run(), Function::Strcpy);

    // Value cases delegate to the real copy and pass.
    assert_passed(strcpy, "Simple copy");
    assert_passed(strcpy, "Long string");
    // The overflow probe crashes on both sides, which is agreement.
    assert_passed(strcpy, "Buffer overflow (behavior must match libc)");

    for name in [
        "NULL src pointer (must segfault like libc)",
        "NULL dst pointer (must segfault like libc)",
        "Both pointers NULL (must segfault like libc)",
    ] {
        assert_failed(strcpy, name, FailureKind::CrashParity, "did not segfault");
    }
}

#[test]
fn clamped_strcmp_passes_values_but_fails_null_parity() {
    let strcmp = group(defective_run(), Function::Strcmp);

    // Sign-class equivalence accepts -1/0/1 in place of byte differences.
    assert_passed(strcmp, "Identical strings");
    assert_passed(strcmp, "First string greater");
    assert_passed(strcmp, "Second string greater");

    for name in [
        "NULL first string (must segfault like libc)",
        "NULL second string (must segfault like libc)",
        "Both strings NULL (must segfault like libc)",
    ] {
        assert_failed(strcmp, name, FailureKind::CrashParity, "did not segfault");
    }
}

#[test]
fn error_swallowing_write_fails_errno_rule() {
    let write = group(defective_run(), Function::Write);

    assert_passed(write, "Write to stdout");
    assert_passed(write, "Write to file");
    // Claims a full write with errno cleared where libc reports EBADF.
    assert_failed(
        write,
        "Invalid file descriptor (-1)",
        FailureKind::Mismatch,
        "errno",
    );
    assert_failed(
        write,
        "Write to closed file descriptor",
        FailureKind::Mismatch,
        "errno",
    );
    // write(2) reports EFAULT for a NULL buffer instead of faulting, on both
    // sides, so the parity probe still agrees.
    assert_passed(write, "NULL buffer (must segfault like libc)");
}

#[test]
fn untouched_read_passes_everything() {
    let read = group(defective_run(), Function::Read);

    assert!(read.available);
    assert!(
        read.stats.all_passed(),
        "read failures: {:?}",
        read.cases
            .iter()
            .filter(|c| !matches!(c.status, CaseStatus::Passed))
            .map(|c| (&c.name, &c.detail))
            .collect::<Vec<_>>()
    );
}

#[test]
fn corrupted_strdup_fails_distinct_copy() {
    let strdup = group(defective_run(), Function::Strdup);

    // First byte is incremented, so "Hello" comes back as "Iello".
    assert_failed(
        strdup,
        "Simple string",
        FailureKind::Mismatch,
        "got \"Iello\"",
    );
    // No first byte to corrupt.
    assert_passed(strdup, "Empty string");
    // Still a fresh allocation, so the aliasing and writability checks pass.
    assert_passed(strdup, "Can modify duplicated string");
    assert_failed(
        strdup,
        "Memory leak stress test",
        FailureKind::Mismatch,
        "corrupted copy",
    );
    // libc strdup faults on NULL before the corruption runs.
    assert_passed(strdup, "NULL pointer (must segfault like libc)");
}

#[test]
fn multi_sign_atoi_base_fails_exactly_once() {
    let atoi = group(defective_run(), Function::AtoiBase);

    assert_failed(
        atoi,
        "Multiple signs: --42 = 0",
        FailureKind::Mismatch,
        "expected 0, got 42",
    );
    assert_eq!(
        atoi.stats.failed, 1,
        "only the multi-sign case should fail: {:?}",
        atoi.cases
            .iter()
            .filter(|c| !matches!(c.status, CaseStatus::Passed))
            .map(|c| (&c.name, &c.detail))
            .collect::<Vec<_>>()
    );
}

#[test]
fn inverted_list_sort_fails_value_cases() {
    let sort = group(defective_run(), Function::ListSort);

    assert_passed(sort, "NULL begin_list parameter");
    assert_passed(sort, "NULL comparison function");
    assert_passed(sort, "Empty list");
    assert_passed(sort, "Single element");

    assert_failed(
        sort,
        "Reverse sorted list",
        FailureKind::Mismatch,
        "expected [1, 2, 3, 4], got [4, 3, 2, 1]",
    );
    assert!(
        sort.stats.failed >= 6,
        "inverted sort should fail most value cases, failed {}",
        sort.stats.failed
    );
}

#[test]
fn intact_list_groups_pass_and_bonus_is_excluded() {
    let summary = defective_run();

    for function in [Function::ListPushFront, Function::ListSize, Function::ListRemoveIf] {
        let g = group(summary, function);
        assert!(g.available);
        assert!(g.stats.all_passed(), "{} has failures", function.symbol());
    }

    // Bonus cases ran and some failed, but mandatory is imperfect, so the
    // whole share is excluded and the failures still drive the exit code.
    assert!(summary.scoreboard.bonus.total > 0);
    assert!(summary.scoreboard.bonus.failed > 0);
    assert!(summary.scoreboard.bonus_excluded());
    assert_eq!(summary.scoreboard.bonus_contribution(), 0);
}
