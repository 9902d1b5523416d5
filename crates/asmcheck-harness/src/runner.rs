//! Sequential suite driver.
//!
//! Groups run in the fixed suite order; a group whose function is absent is
//! skipped with zero cases recorded. Progress flows through a sink trait so
//! rendering stays out of the execution path.

use asmcheck_abi::registry::{CandidateLib, Function, FunctionClass};

use crate::case::{CaseOutcome, CaseStatus};
use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::scratch::Scratch;
use crate::stats::{ScoreBoard, Stats};
use crate::suite;

/// Everything a case needs at run time: the registry, the configuration,
/// and the per-run scratch directory.
pub struct RunContext {
    pub lib: CandidateLib,
    pub config: HarnessConfig,
    pub scratch: Scratch,
}

impl RunContext {
    /// Validates the configuration and creates the scratch directory.
    pub fn new(lib: CandidateLib, config: HarnessConfig) -> Result<Self, HarnessError> {
        config.validate()?;
        let scratch = Scratch::create(&config.scratch_dir)?;
        Ok(Self {
            lib,
            config,
            scratch,
        })
    }
}

// ---------------------------------------------------------------------------
// Progress sinks
// ---------------------------------------------------------------------------

/// Observer callbacks, decoupled from rendering.
pub trait ProgressSink {
    fn group_started(&mut self, _function: Function, _class: FunctionClass) {}
    fn group_skipped(&mut self, _function: Function) {}
    fn case_finished(&mut self, _function: Function, _name: &str, _outcome: &CaseOutcome) {}
    fn suite_finished(&mut self, _summary: &SuiteSummary) {}
}

/// Sink that records nothing.
pub struct SilentSink;

impl ProgressSink for SilentSink {}

/// Plain-text progress on stderr.
pub struct ConsoleSink {
    pub verbose: bool,
}

impl ProgressSink for ConsoleSink {
    fn group_started(&mut self, function: Function, class: FunctionClass) {
        eprintln!("== {} [{class}] ==", function.symbol());
    }

    fn group_skipped(&mut self, function: Function) {
        eprintln!("== {} ==", function.symbol());
        eprintln!("  not found");
    }

    fn case_finished(&mut self, _function: Function, name: &str, outcome: &CaseOutcome) {
        if let Some(kind) = outcome.failure() {
            let detail = outcome.detail.as_deref().unwrap_or("");
            eprintln!("  FAIL [{kind}] {name} {detail}");
        } else if self.verbose {
            let detail = outcome.detail.as_deref().unwrap_or("");
            eprintln!("  PASS {name} {detail}");
        }
        if let Some(anomaly) = &outcome.anomaly {
            eprintln!("  note: {anomaly}");
        }
    }

    fn suite_finished(&mut self, summary: &SuiteSummary) {
        let sb = &summary.scoreboard;
        eprintln!(
            "mandatory: {}/{} passed ({}%)",
            sb.mandatory.passed,
            sb.mandatory.total,
            sb.mandatory_percentage()
        );
        if sb.bonus.total > 0 {
            if sb.bonus_excluded() {
                eprintln!(
                    "bonus: {}/{} passed (excluded: mandatory must be perfect)",
                    sb.bonus.passed, sb.bonus.total
                );
            } else {
                eprintln!(
                    "bonus: {}/{} passed (+{})",
                    sb.bonus.passed,
                    sb.bonus.total,
                    sb.bonus_contribution()
                );
            }
        }
        eprintln!("final score: {}/125", sb.final_score());
    }
}

/// Forwards every event to each wrapped sink in order.
pub struct FanoutSink<'a> {
    pub sinks: Vec<&'a mut dyn ProgressSink>,
}

impl ProgressSink for FanoutSink<'_> {
    fn group_started(&mut self, function: Function, class: FunctionClass) {
        for sink in &mut self.sinks {
            sink.group_started(function, class);
        }
    }

    fn group_skipped(&mut self, function: Function) {
        for sink in &mut self.sinks {
            sink.group_skipped(function);
        }
    }

    fn case_finished(&mut self, function: Function, name: &str, outcome: &CaseOutcome) {
        for sink in &mut self.sinks {
            sink.case_finished(function, name, outcome);
        }
    }

    fn suite_finished(&mut self, summary: &SuiteSummary) {
        for sink in &mut self.sinks {
            sink.suite_finished(summary);
        }
    }
}

// ---------------------------------------------------------------------------
// Run results
// ---------------------------------------------------------------------------

/// One recorded case.
#[derive(Debug, Clone)]
pub struct CaseRecord {
    pub name: String,
    pub status: CaseStatus,
    pub detail: Option<String>,
    pub anomaly: Option<String>,
}

/// One group's results.
#[derive(Debug, Clone)]
pub struct GroupRun {
    pub function: Function,
    pub class: FunctionClass,
    pub available: bool,
    pub stats: Stats,
    pub cases: Vec<CaseRecord>,
}

/// Results for one full suite run.
#[derive(Debug, Clone)]
pub struct SuiteSummary {
    pub groups: Vec<GroupRun>,
    pub scoreboard: ScoreBoard,
}

impl SuiteSummary {
    /// Non-zero exactly when at least one scored case failed. Skipped groups
    /// never affect it.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(self.scoreboard.any_failure())
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        !self.scoreboard.any_failure()
    }

    #[must_use]
    pub fn final_score(&self) -> u32 {
        self.scoreboard.final_score()
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Runs the standard suite against a candidate registry.
pub fn run_suite(
    config: &HarnessConfig,
    lib: CandidateLib,
    sink: &mut dyn ProgressSink,
) -> Result<SuiteSummary, HarnessError> {
    let ctx = RunContext::new(lib, config.clone())?;
    let mut scoreboard = ScoreBoard::new();
    let mut groups = Vec::new();

    for group in suite::standard() {
        let function = group.function;
        let class = function.class();

        let available = match (group.probe)(&ctx) {
            Ok(found) => found,
            Err(err) => {
                sink.group_started(function, class);
                let outcome =
                    CaseOutcome::infrastructure(format!("(availability probe failed: {err})"));
                sink.case_finished(function, "availability probe", &outcome);
                let mut stats = Stats::new();
                stats.record(false);
                scoreboard.record(class, &outcome);
                groups.push(GroupRun {
                    function,
                    class,
                    available: false,
                    stats,
                    cases: vec![CaseRecord {
                        name: "availability probe".to_string(),
                        status: outcome.status,
                        detail: outcome.detail,
                        anomaly: outcome.anomaly,
                    }],
                });
                continue;
            }
        };

        if !available {
            sink.group_skipped(function);
            groups.push(GroupRun {
                function,
                class,
                available: false,
                stats: Stats::new(),
                cases: Vec::new(),
            });
            continue;
        }

        sink.group_started(function, class);
        let mut stats = Stats::new();
        let mut records = Vec::new();
        for case in (group.build)(&ctx.lib) {
            let outcome = case.run(&ctx);
            stats.record(outcome.passed());
            scoreboard.record(class, &outcome);
            sink.case_finished(function, case.name, &outcome);
            records.push(CaseRecord {
                name: case.name.to_string(),
                status: outcome.status,
                detail: outcome.detail,
                anomaly: outcome.anomaly,
            });
        }
        groups.push(GroupRun {
            function,
            class,
            available: true,
            stats,
            cases: records,
        });
    }

    let summary = SuiteSummary {
        groups,
        scoreboard,
    };
    sink.suite_finished(&summary);
    Ok(summary)
}
