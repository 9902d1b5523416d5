//! Integration test: scoring policy end to end
//!
//! Validates score propagation from recorded cases through the scoreboard
//! for partially linked candidates:
//! 1. Bonus failures with a perfect mandatory share shrink the contribution
//!    without zeroing it, and still fail the run.
//! 2. Mandatory failures zero the bonus share entirely.
//! 3. A candidate with no bonus symbols caps at 100 and exits zero.
//! 4. The mandatory percentage follows the per-group pass counts.
//!
//! Run: cargo test -p asmcheck-harness --test score_policy_test

use std::sync::Mutex;

use asmcheck_abi::registry::{CandidateLib, Function};
use asmcheck_abi::sample;
use asmcheck_harness::runner::SilentSink;
use asmcheck_harness::{HarnessConfig, SuiteSummary, run_suite};

// Suite runs redirect file descriptors and fork probe children, both of which
// are process-global. Runs inside this test binary must not overlap.
static RUN_LOCK: Mutex<()> = Mutex::new(());

fn run_silent(lib: CandidateLib) -> SuiteSummary {
    let _guard = RUN_LOCK.lock().unwrap();
    run_suite(&HarnessConfig::default(), lib, &mut SilentSink).expect("suite should run")
}

/// The defective candidate with every broken mandatory symbol unlinked.
/// What remains of the mandatory share (read) passes, so only the bonus
/// defects are scored.
fn bonus_defects_only() -> CandidateLib {
    sample::defective()
        .without(Function::Strlen)
        .without(Function::Strcpy)
        .without(Function::Strcmp)
        .without(Function::Write)
        .without(Function::Strdup)
}

#[test]
fn bonus_failures_shrink_contribution_and_fail_the_run() {
    let summary = run_silent(bonus_defects_only());
    let board = &summary.scoreboard;

    assert!(board.mandatory.total > 0);
    assert!(board.mandatory_perfect());
    assert!(board.bonus.failed > 0);
    assert!(!board.bonus_excluded());

    let contribution = board.bonus_contribution();
    assert!(
        contribution > 0 && contribution < 25,
        "partial bonus share, got {contribution}"
    );
    assert_eq!(summary.final_score(), 100 + contribution);
    assert_eq!(summary.exit_code(), 1, "bonus failures still fail the run");
}

#[test]
fn mandatory_failures_zero_the_bonus_share() {
    let summary = run_silent(sample::defective());
    let board = &summary.scoreboard;

    assert!(board.mandatory.failed > 0);
    // The intact list groups passed their cases, yet contribute nothing.
    assert!(board.bonus.passed > 0);
    assert!(board.bonus_excluded());
    assert_eq!(board.bonus_contribution(), 0);
    assert_eq!(summary.final_score(), board.mandatory_percentage());
}

#[test]
fn candidate_without_bonus_symbols_caps_at_100() {
    let lib = sample::well_behaved()
        .without(Function::AtoiBase)
        .without(Function::ListPushFront)
        .without(Function::ListSize)
        .without(Function::ListSort)
        .without(Function::ListRemoveIf);
    let summary = run_silent(lib);

    assert_eq!(summary.scoreboard.bonus.total, 0);
    assert!(!summary.scoreboard.bonus_excluded());
    assert_eq!(summary.scoreboard.bonus_contribution(), 0);
    assert_eq!(summary.final_score(), 100);
    assert_eq!(summary.exit_code(), 0);
}

#[test]
fn mandatory_percentage_follows_group_pass_counts() {
    // Only the off-by-one strlen is linked. Its empty-string case is the one
    // case the defect cannot shift.
    let lib = CandidateLib {
        strlen: sample::defective().strlen,
        ..CandidateLib::default()
    };
    let summary = run_silent(lib);

    let strlen = summary
        .groups
        .iter()
        .find(|g| g.function == Function::Strlen)
        .expect("strlen group present");
    assert!(strlen.available);
    assert_eq!(strlen.stats.passed, 1, "only the empty string measures 0");

    let board = &summary.scoreboard;
    assert_eq!(board.mandatory.total, strlen.stats.total);
    let expected = (100 * board.mandatory.passed as u32) / board.mandatory.total as u32;
    assert_eq!(board.mandatory_percentage(), expected);
    assert_eq!(summary.final_score(), expected);
    assert_eq!(summary.exit_code(), 1);
}
