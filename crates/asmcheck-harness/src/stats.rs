//! Pass/fail accounting and the scoring policy.

use serde::{Deserialize, Serialize};

use asmcheck_abi::registry::FunctionClass;

use crate::case::CaseOutcome;

/// Monotonic pass/fail counters. `total == passed + failed` always holds;
/// each case is recorded exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl Stats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one case verdict.
    pub fn record(&mut self, passed: bool) {
        self.total += 1;
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.total == self.passed + self.failed
    }
}

/// Score accounting across the mandatory and bonus shares.
///
/// Bonus results count toward the final score only when every scored
/// mandatory case passed; otherwise they are recorded but excluded, and the
/// exclusion is visible in the report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreBoard {
    pub mandatory: Stats,
    pub bonus: Stats,
}

impl ScoreBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one case outcome under its function class.
    pub fn record(&mut self, class: FunctionClass, outcome: &CaseOutcome) {
        match class {
            FunctionClass::Mandatory => self.mandatory.record(outcome.passed()),
            FunctionClass::Bonus => self.bonus.record(outcome.passed()),
        }
    }

    /// True when every scored mandatory case passed (vacuously true when no
    /// mandatory case was scored).
    #[must_use]
    pub fn mandatory_perfect(&self) -> bool {
        self.mandatory.failed == 0
    }

    /// `floor(100 * passed / total)` over scored mandatory cases; 100 when
    /// nothing mandatory was scored.
    #[must_use]
    pub fn mandatory_percentage(&self) -> u32 {
        if self.mandatory.total == 0 {
            return 100;
        }
        (100 * self.mandatory.passed / self.mandatory.total) as u32
    }

    /// `floor(25 * passed / total)` over scored bonus cases when eligible;
    /// 0 when no bonus case was scored or the bonus is excluded.
    #[must_use]
    pub fn bonus_contribution(&self) -> u32 {
        if !self.mandatory_perfect() || self.bonus.total == 0 {
            return 0;
        }
        (25 * self.bonus.passed / self.bonus.total) as u32
    }

    /// True when bonus cases were scored but do not count because a
    /// mandatory case failed.
    #[must_use]
    pub fn bonus_excluded(&self) -> bool {
        self.bonus.total > 0 && !self.mandatory_perfect()
    }

    /// Final score out of 125.
    #[must_use]
    pub fn final_score(&self) -> u32 {
        self.mandatory_percentage() + self.bonus_contribution()
    }

    /// True when at least one scored case failed, in either share.
    #[must_use]
    pub fn any_failure(&self) -> bool {
        self.mandatory.failed > 0 || self.bonus.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(m_passed: usize, m_failed: usize, b_passed: usize, b_failed: usize) -> ScoreBoard {
        let mut sb = ScoreBoard::new();
        for _ in 0..m_passed {
            sb.record(FunctionClass::Mandatory, &CaseOutcome::pass());
        }
        for _ in 0..m_failed {
            sb.record(FunctionClass::Mandatory, &CaseOutcome::mismatch("x"));
        }
        for _ in 0..b_passed {
            sb.record(FunctionClass::Bonus, &CaseOutcome::pass());
        }
        for _ in 0..b_failed {
            sb.record(FunctionClass::Bonus, &CaseOutcome::mismatch("x"));
        }
        sb
    }

    #[test]
    fn stats_invariant_holds_under_recording() {
        let mut stats = Stats::new();
        for i in 0..17 {
            stats.record(i % 3 != 0);
            assert!(stats.is_consistent());
        }
        assert_eq!(stats.total, 17);
    }

    #[test]
    fn perfect_run_scores_125() {
        let sb = board(10, 0, 8, 0);
        assert_eq!(sb.mandatory_percentage(), 100);
        assert_eq!(sb.bonus_contribution(), 25);
        assert_eq!(sb.final_score(), 125);
        assert!(!sb.bonus_excluded());
    }

    #[test]
    fn bonus_is_excluded_when_mandatory_fails() {
        let sb = board(9, 1, 8, 0);
        assert_eq!(sb.mandatory_percentage(), 90);
        assert_eq!(sb.bonus_contribution(), 0);
        assert!(sb.bonus_excluded());
        assert_eq!(sb.final_score(), 90);
    }

    #[test]
    fn bonus_contribution_floors() {
        // 7 of 8 bonus passed: floor(25 * 7 / 8) = 21
        let sb = board(5, 0, 7, 1);
        assert_eq!(sb.bonus_contribution(), 21);
        assert_eq!(sb.final_score(), 121);
    }

    #[test]
    fn vacuous_mandatory_scores_100() {
        let sb = board(0, 0, 4, 0);
        assert_eq!(sb.mandatory_percentage(), 100);
        assert_eq!(sb.bonus_contribution(), 25);
    }

    #[test]
    fn no_bonus_scored_contributes_zero() {
        let sb = board(10, 0, 0, 0);
        assert_eq!(sb.bonus_contribution(), 0);
        assert_eq!(sb.final_score(), 100);
    }

    #[test]
    fn any_failure_reflects_both_shares() {
        assert!(!board(3, 0, 3, 0).any_failure());
        assert!(board(3, 1, 3, 0).any_failure());
        assert!(board(3, 0, 3, 1).any_failure());
    }
}
