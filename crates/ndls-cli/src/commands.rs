//! Command implementations: direct query and spreadsheet update.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use ndls_client::{Checker, NdlsClient};
use ndls_model::StandardRecord;
use ndls_sheet::{UpdateSummary, update_sheet};

use crate::cli::Cli;

/// Query the numbers given on the command line, in order.
pub fn run_query(cli: &Cli) -> Result<Vec<StandardRecord>> {
    let checker = build_checker(cli)?;
    let progress = progress_bar(cli.standards.len() as u64);
    let records = checker.query_batch_with(&cli.standards, |_, record| {
        progress.set_message(format!(
            "{} => {}",
            record.standard_no,
            record.status.label()
        ));
        progress.inc(1);
    });
    progress.finish_and_clear();
    info!(total = records.len(), "query complete");
    Ok(records)
}

/// Update the table at `input`, returning the summary and the path the
/// result was written to.
pub fn run_update(cli: &Cli, input: &Path) -> Result<(UpdateSummary, PathBuf)> {
    let output = cli.output.clone().unwrap_or_else(|| input.to_path_buf());
    let checker = build_checker(cli)?;
    let progress = progress_bar(0);
    let summary = update_sheet(&checker, input, &output, |_, total, record| {
        progress.set_length(total as u64);
        progress.set_message(format!(
            "{} => {}",
            record.standard_no,
            record.status.label()
        ));
        progress.inc(1);
    })
    .with_context(|| format!("update {}", input.display()))?;
    progress.finish_and_clear();
    Ok((summary, output))
}

/// Nonzero-exit policy: `--max-errors N` tolerates up to N failures;
/// without it a run fails only when every query failed.
pub fn exceeds_error_tolerance(failed: usize, queried: usize, max_errors: Option<usize>) -> bool {
    match max_errors {
        Some(limit) => failed > limit,
        None => queried > 0 && failed == queried,
    }
}

fn build_checker(cli: &Cli) -> Result<Checker<NdlsClient>> {
    let client = NdlsClient::new().context("create http client")?;
    let delay = if cli.delay.is_finite() {
        cli.delay.clamp(0.0, 3600.0)
    } else {
        0.5
    };
    Ok(Checker::with_delay(client, Duration::from_secs_f64(delay)))
}

fn progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::with_template("[{pos}/{len}] {wide_bar:.cyan/blue} {msg}") {
        bar.set_style(style);
    }
    bar
}
