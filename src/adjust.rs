//! Corrects the aggregate for self-contribution inflation: commits made to
//! the repository hosting this tool are subtracted from the total and dropped
//! from the per-repository breakdown.

use crate::aggregate::RepoTally;

/// Subtracts the reporting repository's commits from `total_commits` (floored
/// at zero) and removes it, along with all zero-valued entries, from the
/// tally.
///
/// The floor guards against a stale total computed under different retention
/// limits than the per-repository breakdown. With no reporting repository
/// configured, the tally is only filtered for zero-valued entries.
pub fn adjust(
    total_commits: u64,
    mut tally: RepoTally,
    reporting_repo: Option<&str>,
) -> (u64, RepoTally) {
    let own_commits = reporting_repo.map(|repo| tally.get(repo)).unwrap_or(0);
    let adjusted_total = total_commits.saturating_sub(own_commits);

    if let Some(repo) = reporting_repo {
        tally.remove(repo);
    }
    tally.retain_positive();

    (adjusted_total, tally)
}
