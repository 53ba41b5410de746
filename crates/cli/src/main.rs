// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fleet` — thin glue binary: load configuration, wire the Orchestrator,
//! print a run summary, and translate failures into process exit codes
//! (spec §7: "non-zero process exit code; a summary report on standard
//! error naming the failing stage").

mod config;
mod exit_error;
mod report;

use clap::Parser;
use exit_error::ExitError;
use fleet_core::{Clock, SystemClock};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// Run the configured agent fleet against a host repository.
#[derive(Parser)]
#[command(name = "fleet", version, about)]
struct Cli {
    /// Host repository to analyze and solve tasks against.
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Path to the analyzer prompt file (spec §4.4, "Analyzer Prompt
    /// File") passed to the analyzer container.
    #[arg(long)]
    analyzer_prompt: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("fleet: {err}");
        std::process::exit(err.code);
    }
}

async fn run() -> Result<(), ExitError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let repo_root = cli
        .repo
        .canonicalize()
        .map_err(|e| ExitError::new(1, format!("invalid repo path {}: {e}", cli.repo.display())))?;

    let config = config::load(&repo_root)
        .map_err(|e| ExitError::new(2, format!("failed to load configuration: {e}")))?;
    config.validate().map_err(|e| ExitError::new(2, format!("invalid configuration: {e}")))?;

    let analyzer_prompt = std::fs::read(&cli.analyzer_prompt).map_err(|e| {
        ExitError::new(1, format!("failed to read {}: {e}", cli.analyzer_prompt.display()))
    })?;

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("received interrupt, cancelling in-flight tasks");
            ctrl_c_cancel.cancel();
        }
    });

    let clock = SystemClock;
    let report_clock = clock.clone();
    let outcome =
        fleet_engine::run_orchestrator(config, repo_root, analyzer_prompt, cancel, clock).await;

    // A run report is written on every exit path, including an aborted run,
    // so the failing stage can still be diagnosed from disk.
    let results = match &outcome {
        Ok(outcome) => &outcome.results,
        Err(_) => &Vec::new(),
    };
    let report_path = report::write_run_report(results, report_clock.epoch_ms())
        .map_err(|e| ExitError::new(1, format!("failed to write run report: {e}")))?;

    let outcome = outcome.map_err(|e| {
        ExitError::new(3, format!("run failed: {e}; see {}", report_path.display()))
    })?;

    print_summary(&outcome, &report_path);

    if outcome.commit_summary.failed > 0 {
        return Err(ExitError::new(
            4,
            format!(
                "{} of {} task(s) failed to commit; see {}",
                outcome.commit_summary.failed,
                outcome.commit_summary.total,
                report_path.display()
            ),
        ));
    }

    Ok(())
}

fn print_summary(outcome: &fleet_engine::RunOutcome, report_path: &std::path::Path) {
    println!(
        "{} task(s) solved, {} committed, {} failed",
        outcome.results.len(),
        outcome.commit_summary.successful,
        outcome.commit_summary.failed
    );
    for record in &outcome.commit_summary.records {
        match (&record.branch, &record.error) {
            (Some(branch), _) => println!("  {} -> {branch}", record.id),
            (None, Some(error)) => println!("  {} failed: {error}", record.id),
            (None, None) => println!("  {} (no changes)", record.id),
        }
    }
    println!("run report written to {}", report_path.display());
}
