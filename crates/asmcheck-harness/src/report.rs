//! Report generation for conformance results.

use serde::{Deserialize, Serialize};

use crate::case::CaseStatus;
use crate::log::now_utc;
use crate::runner::SuiteSummary;
use crate::stats::Stats;

/// One case row in a group report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    pub name: String,
    /// `PASS`, or `FAIL [kind]` matching the console rendering.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<String>,
}

/// One function group in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupReport {
    /// Symbol under test (e.g. `ft_strlen`).
    pub function: String,
    pub class: String,
    pub available: bool,
    pub stats: Stats,
    pub cases: Vec<CaseReport>,
}

/// A full conformance report for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub title: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    pub final_score: u32,
    pub mandatory: Stats,
    pub mandatory_percentage: u32,
    pub bonus: Stats,
    pub bonus_contribution: u32,
    pub bonus_excluded: bool,
    pub groups: Vec<GroupReport>,
}

impl ConformanceReport {
    /// Build a report from a finished run.
    #[must_use]
    pub fn from_summary(title: &str, summary: &SuiteSummary) -> Self {
        let board = &summary.scoreboard;
        let groups = summary
            .groups
            .iter()
            .map(|group| GroupReport {
                function: group.function.symbol().to_string(),
                class: group.class.to_string(),
                available: group.available,
                stats: group.stats,
                cases: group
                    .cases
                    .iter()
                    .map(|case| CaseReport {
                        name: case.name.clone(),
                        status: match case.status {
                            CaseStatus::Passed => "PASS".to_string(),
                            CaseStatus::Failed(kind) => format!("FAIL [{kind}]"),
                        },
                        detail: case.detail.clone(),
                        anomaly: case.anomaly.clone(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            title: title.to_string(),
            timestamp: now_utc(),
            final_score: summary.final_score(),
            mandatory: board.mandatory,
            mandatory_percentage: board.mandatory_percentage(),
            bonus: board.bonus,
            bonus_contribution: board.bonus_contribution(),
            bonus_excluded: board.bonus_excluded(),
            groups,
        }
    }

    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Timestamp: {}\n", self.timestamp));
        out.push_str(&format!("- Final score: {}/125\n", self.final_score));
        out.push_str(&format!(
            "- Mandatory: {}/{} passed ({}%)\n",
            self.mandatory.passed, self.mandatory.total, self.mandatory_percentage
        ));
        if self.bonus_excluded {
            out.push_str(&format!(
                "- Bonus: {}/{} passed (excluded: mandatory must be perfect)\n\n",
                self.bonus.passed, self.bonus.total
            ));
        } else {
            out.push_str(&format!(
                "- Bonus: {}/{} passed (+{})\n\n",
                self.bonus.passed, self.bonus.total, self.bonus_contribution
            ));
        }

        for group in &self.groups {
            out.push_str(&format!("## {} [{}]\n\n", group.function, group.class));
            if !group.available {
                out.push_str("not found\n\n");
                continue;
            }
            out.push_str("| Case | Status | Detail |\n");
            out.push_str("|------|--------|--------|\n");
            for case in &group.cases {
                out.push_str(&format!(
                    "| {} | {} | {} |\n",
                    case.name,
                    case.status,
                    case.detail.as_deref().unwrap_or("")
                ));
            }
            for case in &group.cases {
                if let Some(anomaly) = &case.anomaly {
                    out.push_str(&format!("\nnote ({}): {anomaly}\n", case.name));
                }
            }
            out.push('\n');
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::FailureKind;
    use crate::runner::{CaseRecord, GroupRun};
    use crate::stats::ScoreBoard;
    use asmcheck_abi::registry::{Function, FunctionClass};

    fn summary_with_one_failure() -> SuiteSummary {
        let mut stats = Stats::new();
        stats.record(true);
        stats.record(false);
        let mut scoreboard = ScoreBoard::new();
        scoreboard.record(FunctionClass::Mandatory, &crate::case::CaseOutcome::pass());
        scoreboard.record(
            FunctionClass::Mandatory,
            &crate::case::CaseOutcome::mismatch("(empty string: expected 0, got 4)"),
        );
        SuiteSummary {
            groups: vec![
                GroupRun {
                    function: Function::Strlen,
                    class: FunctionClass::Mandatory,
                    available: true,
                    stats,
                    cases: vec![
                        CaseRecord {
                            name: "Simple string".to_string(),
                            status: CaseStatus::Passed,
                            detail: None,
                            anomaly: None,
                        },
                        CaseRecord {
                            name: "Empty string".to_string(),
                            status: CaseStatus::Failed(FailureKind::Mismatch),
                            detail: Some("(empty string: expected 0, got 4)".to_string()),
                            anomaly: None,
                        },
                    ],
                },
                GroupRun {
                    function: Function::ListSort,
                    class: FunctionClass::Bonus,
                    available: false,
                    stats: Stats::new(),
                    cases: Vec::new(),
                },
            ],
            scoreboard,
        }
    }

    #[test]
    fn report_carries_scores_and_groups() {
        let report = ConformanceReport::from_summary("libasm conformance", &summary_with_one_failure());
        assert_eq!(report.final_score, 50);
        assert_eq!(report.mandatory_percentage, 50);
        assert!(!report.bonus_excluded);
        assert_eq!(report.groups.len(), 2);
        assert_eq!(report.groups[0].function, "ft_strlen");
        assert_eq!(report.groups[0].cases[1].status, "FAIL [mismatch]");
        assert!(!report.groups[1].available);
    }

    #[test]
    fn markdown_renders_tables_and_skips() {
        let report = ConformanceReport::from_summary("libasm conformance", &summary_with_one_failure());
        let md = report.to_markdown();
        assert!(md.starts_with("# libasm conformance\n"));
        assert!(md.contains("- Final score: 50/125\n"));
        assert!(md.contains("## ft_strlen [mandatory]"));
        assert!(md.contains("| Empty string | FAIL [mismatch] | (empty string: expected 0, got 4) |"));
        assert!(md.contains("## ft_list_sort [bonus]\n\nnot found\n"));
    }

    #[test]
    fn json_roundtrips() {
        let report = ConformanceReport::from_summary("libasm conformance", &summary_with_one_failure());
        let json = report.to_json();
        let restored: ConformanceReport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.final_score, report.final_score);
        assert_eq!(restored.groups.len(), 2);
    }
}
