//! Normalizes the raw contribution dataset into per-category totals, a
//! per-repository commit tally and flattened detail records.
//!
//! This is a pure transform: no network, no filesystem, no clock. Missing or
//! unnamed entries in the raw dataset degrade to skipped rows or absent
//! fields, never to a failure.

use serde::Serialize;
use tracing::debug;

use crate::github::RawContributionSet;

/// Review bodies are truncated to this many characters before storage.
pub const MAX_REVIEW_BODY_CHARS: usize = 200;

/// Per-repository commit counts, in input (arrival) order.
///
/// Input order is preserved so the renderer's descending stable sort has a
/// defined tie order. Duplicate keys merge by summation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepoTally {
    entries: Vec<(String, u64)>,
}

impl RepoTally {
    pub fn add(&mut self, repo: &str, count: u64) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| name == repo) {
            entry.1 += count;
        } else {
            self.entries.push((repo.to_string(), count));
        }
    }

    pub fn get(&self, repo: &str) -> u64 {
        self.entries
            .iter()
            .find(|(name, _)| name == repo)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn remove(&mut self, repo: &str) {
        self.entries.retain(|(name, _)| name != repo);
    }

    pub fn retain_positive(&mut self) {
        self.entries.retain(|(_, count)| *count > 0);
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// One flattened pull-request, issue or review event.
///
/// For reviews the label is the trimmed, truncated body; rendering does not
/// surface it today, but the truncation contract holds for any consumer that
/// does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityDetail {
    pub label: Option<String>,
    pub url: Option<String>,
    pub occurred_at: Option<String>,
}

/// One commit contribution event, attributed to its repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitEvent {
    pub repo: String,
    pub occurred_at: String,
}

/// A repository created strictly within the window (forks excluded).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRepository {
    pub name: String,
    pub url: String,
}

/// The normalized aggregate of one raw dataset.
#[derive(Debug, Clone, Default)]
pub struct Aggregated {
    pub total_commits: u64,
    pub total_prs: u64,
    pub total_issues: u64,
    pub total_reviews: u64,
    pub repo_tally: RepoTally,
    pub commit_events: Vec<CommitEvent>,
    pub pull_requests: Vec<ActivityDetail>,
    pub issues: Vec<ActivityDetail>,
    pub reviews: Vec<ActivityDetail>,
    pub new_repos: Vec<NewRepository>,
}

/// Aggregates `raw` for the window whose local date is `window_date`
/// (`YYYY-MM-DD`).
///
/// Category totals come from the dataset's summary counters, never recomputed
/// from the detail lists: the counters stay authoritative when a detail list
/// was truncated by the page-size limit.
pub fn aggregate(raw: &RawContributionSet, window_date: &str) -> Aggregated {
    let cc = &raw.contributions_collection;

    let mut repo_tally = RepoTally::default();
    let mut commit_events = Vec::new();
    for item in &cc.commit_contributions_by_repository {
        let Some(repo) = item
            .repository
            .as_ref()
            .and_then(|r| r.name_with_owner.as_deref())
        else {
            // Unnamed entries cannot be attributed to a repository.
            debug!("Skipping commit contribution entry without a repository name");
            continue;
        };
        let Some(contributions) = item.contributions.as_ref() else {
            repo_tally.add(repo, 0);
            continue;
        };
        repo_tally.add(repo, contributions.total_count);
        for node in &contributions.nodes {
            if let Some(occurred_at) = &node.occurred_at {
                commit_events.push(CommitEvent {
                    repo: repo.to_string(),
                    occurred_at: occurred_at.clone(),
                });
            }
        }
    }

    let pull_requests = cc
        .pull_request_contributions
        .as_ref()
        .map(|page| {
            page.nodes
                .iter()
                .map(|node| {
                    let pr = node.pull_request.as_ref();
                    ActivityDetail {
                        label: pr.and_then(|p| p.title.clone()),
                        url: pr.and_then(|p| p.url.clone()),
                        occurred_at: node.occurred_at.clone(),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let issues = cc
        .issue_contributions
        .as_ref()
        .map(|page| {
            page.nodes
                .iter()
                .map(|node| {
                    let issue = node.issue.as_ref();
                    ActivityDetail {
                        label: issue.and_then(|i| i.title.clone()),
                        url: issue.and_then(|i| i.url.clone()),
                        occurred_at: node.occurred_at.clone(),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let reviews = cc
        .pull_request_review_contributions
        .as_ref()
        .map(|page| {
            page.nodes
                .iter()
                .map(|node| {
                    let review = node.pull_request_review.as_ref();
                    ActivityDetail {
                        label: review
                            .and_then(|r| r.body.as_deref())
                            .map(truncate_review_body),
                        url: review.and_then(|r| r.url.clone()),
                        occurred_at: node.occurred_at.clone(),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    // The input arrives in descending creation-date order; keep it.
    let mut new_repos = Vec::new();
    for node in &raw.repositories.nodes {
        if node.is_fork.unwrap_or(false) {
            continue;
        }
        let (Some(name), Some(url), Some(created_at)) = (
            node.name_with_owner.as_ref(),
            node.url.as_ref(),
            node.created_at.as_ref(),
        ) else {
            continue;
        };
        if created_at.get(..10) == Some(window_date) {
            new_repos.push(NewRepository {
                name: name.clone(),
                url: url.clone(),
            });
        }
    }

    Aggregated {
        total_commits: cc.total_commit_contributions,
        total_prs: cc.total_pull_request_contributions,
        total_issues: cc.total_issue_contributions,
        total_reviews: cc.total_pull_request_review_contributions,
        repo_tally,
        commit_events,
        pull_requests,
        issues,
        reviews,
        new_repos,
    }
}

fn truncate_review_body(body: &str) -> String {
    body.trim().chars().take(MAX_REVIEW_BODY_CHARS).collect()
}
