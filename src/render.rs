//! Turns the adjusted aggregate into the ordered markdown lines of the daily
//! summary.
//!
//! Output is deterministic for identical input: the per-repository section is
//! sorted by descending commit count with a stable sort, so ties keep the
//! tally's input order.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use crate::aggregate::{NewRepository, RepoTally};

/// The fully computed, immutable summary value consumed by the renderer.
///
/// `total_commits` is the adjusted count and `repo_tally` already excludes
/// the reporting repository and all zero-valued entries.
#[derive(Debug, Clone)]
pub struct AggregateReport {
    pub date: NaiveDate,
    pub timezone: Tz,
    pub total_commits: u64,
    pub total_prs: u64,
    pub total_issues: u64,
    pub total_reviews: u64,
    pub repo_tally: RepoTally,
    pub new_repos: Vec<NewRepository>,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Whether the "Repositories created" section is rendered. One historical
    /// report variant omitted it, so it stays configurable.
    pub include_new_repos: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_new_repos: true,
        }
    }
}

/// Renders the report as an ordered sequence of markdown lines.
///
/// The run-timestamp line is emitted only when `run_at` is supplied, which
/// keeps rendering reproducible in tests.
pub fn render(
    report: &AggregateReport,
    username: &str,
    run_at: Option<DateTime<Tz>>,
    options: RenderOptions,
) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "# Daily GitHub Summary - {} ({})",
        report.date.format("%Y-%m-%d"),
        report.timezone.name()
    ));
    if let Some(run_at) = run_at {
        lines.push(format!(
            "**Run at:** {}",
            run_at.format("%Y-%m-%d %H:%M:%S %Z")
        ));
    }
    lines.push(String::new());
    lines.push(format!("Today, {username} did:"));
    lines.push(String::new());

    let new_repos: &[NewRepository] = if options.include_new_repos {
        &report.new_repos
    } else {
        &[]
    };
    let real_total =
        report.total_commits + report.total_prs + report.total_issues + report.total_reviews;

    if real_total == 0 && new_repos.is_empty() {
        lines.push("- Nothing was done.".to_string());
        return lines;
    }

    if !new_repos.is_empty() {
        lines.push(format!("- Repositories created: **{}**", new_repos.len()));
        for repo in new_repos {
            lines.push(format!("    - [{}]({})", repo.name, repo.url));
        }
    }
    lines.push(format!(
        "- Commits (excluding this repo): **{}**",
        report.total_commits
    ));
    lines.push(format!(
        "- Pull requests opened: **{}**",
        report.total_prs
    ));
    lines.push(format!("- Issues opened: **{}**", report.total_issues));
    lines.push(format!("- Reviews: **{}**", report.total_reviews));
    lines.push(String::new());
    lines.push("### Commits by repo".to_string());

    if report.repo_tally.is_empty() {
        lines.push("- (No commits outside this repo.)".to_string());
    } else {
        let mut entries: Vec<(String, u64)> = report.repo_tally.entries().to_vec();
        // sort_by is stable: ties keep the tally's input order.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        for (repo, count) in entries {
            let noun = if count == 1 { "commit" } else { "commits" };
            lines.push(format!("- {repo}: {count} {noun}"));
        }
    }

    lines
}
