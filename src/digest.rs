//! High-level pipeline: window → fetch → aggregate → adjust → render →
//! publish.
//!
//! This module provides the top-level orchestration for one digest run:
//!   - Resolves the local-calendar-day contribution window
//!   - Fetches the raw dataset across the [`ContributionFetcher`] boundary
//!   - Aggregates, adjusts for self-contribution and renders the report
//!   - Writes the dated summary file and optionally splices the persistent
//!     document
//!
//! # Responsibilities
//! - Fail-fast orchestration: a fetch or configuration failure aborts before
//!   any file is written
//! - Emits tracing events tagged with a per-run id for traceability
//! - Single-threaded and sequential; each run is independent
//!
//! # Callable From
//! - Used by the CLI and by integration tests (with a mock fetcher)

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{error, info};
use uuid::Uuid;

use crate::adjust::adjust;
use crate::aggregate::aggregate;
use crate::config::Config;
use crate::error::Result;
use crate::github::ContributionFetcher;
use crate::render::{render, AggregateReport, RenderOptions};
use crate::{publish, window};

/// What one successful run produced.
#[derive(Debug)]
pub struct DigestOutcome {
    pub date: NaiveDate,
    pub summary_path: PathBuf,
    pub spliced: bool,
    pub lines: Vec<String>,
}

pub async fn run_digest<F>(
    config: &Config,
    fetcher: &F,
    now: DateTime<Utc>,
) -> Result<DigestOutcome>
where
    F: ContributionFetcher,
{
    let run_id = Uuid::new_v4();

    let window = window::resolve(&config.timezone, now)?;
    info!(
        run_id = %run_id,
        date = %window.date(),
        timezone = %window.timezone,
        "[DIGEST] Resolved contribution window"
    );

    info!(
        run_id = %run_id,
        login = %config.login,
        from = %window.start_iso(),
        to = %window.end_iso(),
        "[DIGEST] Fetching GitHub contribution data"
    );
    let raw = match fetcher
        .fetch(&config.login, &window.start_iso(), &window.end_iso())
        .await
    {
        Ok(raw) => {
            info!(run_id = %run_id, "[DIGEST] GitHub data fetched successfully");
            raw
        }
        Err(e) => {
            error!(run_id = %run_id, error = %e, "[DIGEST][ERROR] Fetch failed, no summary written");
            return Err(e);
        }
    };

    let aggregated = aggregate(&raw, &window.date_key());
    let (total_commits, repo_tally) = adjust(
        aggregated.total_commits,
        aggregated.repo_tally,
        config.summary_repo.as_deref(),
    );
    info!(
        run_id = %run_id,
        commits = total_commits,
        prs = aggregated.total_prs,
        issues = aggregated.total_issues,
        reviews = aggregated.total_reviews,
        repos = repo_tally.len(),
        new_repos = aggregated.new_repos.len(),
        "[DIGEST] Aggregation complete"
    );

    let report = AggregateReport {
        date: window.date(),
        timezone: window.timezone,
        total_commits,
        total_prs: aggregated.total_prs,
        total_issues: aggregated.total_issues,
        total_reviews: aggregated.total_reviews,
        repo_tally,
        new_repos: aggregated.new_repos,
    };

    let run_at = now.with_timezone(&window.timezone);
    let lines = render(
        &report,
        &config.login,
        Some(run_at),
        RenderOptions {
            include_new_repos: config.include_new_repos,
        },
    );
    let content = format!("{}\n", lines.join("\n"));

    let summary_path = publish::write_summary(&config.out_dir, report.date, &run_at, &content)?;
    info!(run_id = %run_id, path = %summary_path.display(), "[DIGEST] Summary written");

    let spliced = match &config.splice_target {
        Some(target) => publish::splice_into_file(target, &content)?,
        None => false,
    };
    if spliced {
        info!(run_id = %run_id, "[DIGEST] Latest summary spliced into persistent document");
    }

    Ok(DigestOutcome {
        date: report.date,
        summary_path,
        spliced,
        lines,
    })
}
