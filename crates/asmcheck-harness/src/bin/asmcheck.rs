//! CLI entrypoint for the libasm conformance harness.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use asmcheck_abi::registry::CandidateLib;
use asmcheck_abi::sample;
use asmcheck_harness::log::{ArtifactIndex, LogEmitter, sha256_hex};
use asmcheck_harness::runner::FanoutSink;
use asmcheck_harness::{ConformanceReport, ConsoleSink, HarnessConfig, run_suite};

/// Conformance tooling for libasm candidates.
#[derive(Debug, Parser)]
#[command(name = "asmcheck")]
#[command(about = "Differential conformance harness for libasm candidates")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct RunOpts {
    /// Candidate library artifact path (recorded in the report; linking
    /// happens at build time).
    #[arg(long)]
    candidate_path: Option<PathBuf>,
    /// Print passing cases too, not only failures.
    #[arg(short, long)]
    verbose: bool,
    /// Directory under which the per-run scratch directory is created.
    #[arg(long)]
    scratch: Option<PathBuf>,
    /// Deadline in seconds for each fork-isolated probe.
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,
    /// Output report path (markdown; a JSON twin and an artifact index are
    /// written next to it).
    #[arg(long)]
    report: Option<PathBuf>,
    /// JSONL log output path.
    #[arg(long)]
    log: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the suite against the reference-backed built-in candidate.
    /// Every group must pass with a final score of 125.
    Selftest {
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Run the suite against the deliberately broken built-in candidate,
    /// demonstrating what each equivalence rule catches.
    Defects {
        #[command(flatten)]
        opts: RunOpts,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Selftest { opts } => run(
            sample::well_behaved(),
            "libasm conformance (selftest)",
            opts,
        ),
        Command::Defects { opts } => run(
            sample::defective(),
            "libasm conformance (defect detection)",
            opts,
        ),
    }
}

fn run(lib: CandidateLib, title: &str, opts: RunOpts) -> Result<(), Box<dyn std::error::Error>> {
    let RunOpts {
        candidate_path,
        verbose,
        scratch,
        timeout_secs,
        report,
        log,
    } = opts;

    let config = HarnessConfig {
        candidate_path,
        verbose,
        scratch_dir: scratch.unwrap_or_else(std::env::temp_dir),
        probe_timeout: Duration::from_secs(timeout_secs),
    };

    let run_id = format!("run-{}", std::process::id());
    let mut console = ConsoleSink { verbose };
    let summary = match &log {
        Some(log_path) => {
            let mut emitter = LogEmitter::to_file(log_path, &run_id)?;
            let mut fanout = FanoutSink {
                sinks: vec![&mut console, &mut emitter],
            };
            run_suite(&config, lib, &mut fanout)?
        }
        None => run_suite(&config, lib, &mut console)?,
    };

    if let Some(report_path) = &report {
        let doc = ConformanceReport::from_summary(title, &summary);
        let markdown = doc.to_markdown();
        let json = doc.to_json();
        std::fs::write(report_path, &markdown)?;
        let json_path = report_path.with_extension("json");
        std::fs::write(&json_path, &json)?;

        let mut index = ArtifactIndex::new(&run_id);
        index.add(
            report_path.display().to_string(),
            "report_md",
            sha256_hex(markdown.as_bytes()),
        );
        index.add(
            json_path.display().to_string(),
            "report_json",
            sha256_hex(json.as_bytes()),
        );
        if let Some(log_path) = &log {
            let log_bytes = std::fs::read(log_path)?;
            index.add(
                log_path.display().to_string(),
                "log_jsonl",
                sha256_hex(&log_bytes),
            );
        }
        let index_path = report_path.with_extension("artifacts.json");
        std::fs::write(&index_path, index.to_json()?)?;
        eprintln!(
            "Report written to {} (JSON twin and artifact index alongside)",
            report_path.display()
        );
    }

    if summary.exit_code() != 0 {
        return Err("conformance suite failed".into());
    }
    Ok(())
}
