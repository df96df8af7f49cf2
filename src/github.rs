//! GitHub GraphQL fetch boundary.
//!
//! This module defines the [`ContributionFetcher`] trait the pipeline depends
//! on, the typed shape of the raw dataset it returns, and the production
//! [`GraphQlFetcher`] backed by reqwest.
//!
//! - The trait is async and mockable (`mockall`), so the whole pipeline is
//!   testable without network access.
//! - The raw dataset is a typed optional-field record: everything that can be
//!   absent on the wire is an `Option` or a defaulted collection, and callers
//!   handle absence with explicit branches.
//! - One bounded page per category (`first: 100` / `maxRepositories: 100`);
//!   the summary counters remain authoritative when a detail list is
//!   truncated by that page size.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, info};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::{DigestError, Result};

pub const GITHUB_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

const USER_AGENT: &str = "daily-github-summary-bot";

const CONTRIBUTIONS_QUERY: &str = r#"
query($login:String!, $from:DateTime!, $to:DateTime!) {
  user(login:$login) {
    contributionsCollection(from:$from, to:$to) {
      totalCommitContributions
      totalPullRequestContributions
      totalIssueContributions
      totalPullRequestReviewContributions
      commitContributionsByRepository(maxRepositories: 100) {
        repository { nameWithOwner }
        contributions(first: 100) {
          totalCount
          nodes { occurredAt }
        }
      }
      pullRequestContributions(first:100) {
        totalCount
        nodes { occurredAt pullRequest { title url createdAt } }
      }
      issueContributions(first:100) {
        totalCount
        nodes { occurredAt issue { title url createdAt } }
      }
      pullRequestReviewContributions(first:100) {
        totalCount
        nodes { occurredAt pullRequestReview { body url submittedAt } }
      }
    }
    repositories(first: 100, orderBy: {field: CREATED_AT, direction: DESC}) {
      nodes {
        nameWithOwner
        createdAt
        url
        isFork
      }
    }
  }
}
"#;

/// The raw, time-boxed contribution dataset for one account: the
/// `contributionsCollection` for the window plus the most recently created
/// repositories (used for new-repository detection).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContributionSet {
    #[serde(default)]
    pub contributions_collection: ContributionsCollection,
    #[serde(default)]
    pub repositories: RepositoryConnection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    #[serde(default)]
    pub total_commit_contributions: u64,
    #[serde(default)]
    pub total_pull_request_contributions: u64,
    #[serde(default)]
    pub total_issue_contributions: u64,
    #[serde(default)]
    pub total_pull_request_review_contributions: u64,
    #[serde(default)]
    pub commit_contributions_by_repository: Vec<CommitsByRepository>,
    #[serde(default)]
    pub pull_request_contributions: Option<PullRequestContributions>,
    #[serde(default)]
    pub issue_contributions: Option<IssueContributions>,
    #[serde(default)]
    pub pull_request_review_contributions: Option<ReviewContributions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitsByRepository {
    #[serde(default)]
    pub repository: Option<RepositoryRef>,
    #[serde(default)]
    pub contributions: Option<CommitContributions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRef {
    #[serde(default)]
    pub name_with_owner: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitContributions {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub nodes: Vec<CommitNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitNode {
    #[serde(default)]
    pub occurred_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestContributions {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub nodes: Vec<PullRequestNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestNode {
    #[serde(default)]
    pub occurred_at: Option<String>,
    #[serde(default)]
    pub pull_request: Option<PullRequestRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestRef {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueContributions {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub nodes: Vec<IssueNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueNode {
    #[serde(default)]
    pub occurred_at: Option<String>,
    #[serde(default)]
    pub issue: Option<IssueRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRef {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewContributions {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub nodes: Vec<ReviewNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewNode {
    #[serde(default)]
    pub occurred_at: Option<String>,
    #[serde(default)]
    pub pull_request_review: Option<ReviewRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRef {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryConnection {
    #[serde(default)]
    pub nodes: Vec<RepositoryNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    #[serde(default)]
    pub name_with_owner: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_fork: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    #[serde(default)]
    data: Option<GraphQlData>,
    #[serde(default)]
    errors: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlData {
    #[serde(default)]
    user: Option<RawContributionSet>,
}

/// Trait for fetching the time-boxed contribution dataset of one account.
///
/// One synchronous-from-the-caller's-view call per run; `from`/`to` are
/// ISO-8601 instants delimiting the half-open contribution window. The trait
/// is implemented by the real GraphQL client and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ContributionFetcher: Send + Sync {
    async fn fetch(&self, login: &str, from: &str, to: &str) -> Result<RawContributionSet>;
}

/// Production fetcher: one POST against the GitHub GraphQL API.
pub struct GraphQlFetcher {
    client: reqwest::Client,
    token: String,
    endpoint: String,
}

impl GraphQlFetcher {
    pub fn new(token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.to_string(),
            endpoint: GITHUB_GRAPHQL_ENDPOINT.to_string(),
        }
    }
}

#[async_trait]
impl ContributionFetcher for GraphQlFetcher {
    async fn fetch(&self, login: &str, from: &str, to: &str) -> Result<RawContributionSet> {
        let request = serde_json::json!({
            "query": CONTRIBUTIONS_QUERY,
            "variables": { "login": login, "from": from, "to": to },
        });

        info!(login = %login, from = %from, to = %to, "Querying GitHub GraphQL API");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .json(&request)
            .send()
            .await
            .map_err(|e| DigestError::RemoteQuery(format!("transport failure: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to decode response body>"));
            error!(status = %status, "GitHub API returned an error status");
            return Err(DigestError::RemoteQuery(format!(
                "GitHub API returned {status}: {body}"
            )));
        }

        let envelope: GraphQlEnvelope = response.json().await.map_err(|e| {
            DigestError::RemoteQuery(format!("failed to decode GraphQL response: {e}"))
        })?;

        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                let payload = serde_json::to_string(&errors)
                    .unwrap_or_else(|_| format!("{errors:?}"));
                error!(errors = %payload, "GitHub GraphQL query returned errors");
                return Err(DigestError::RemoteQuery(payload));
            }
        }

        envelope
            .data
            .and_then(|data| data.user)
            .ok_or_else(|| {
                DigestError::RemoteQuery(format!("no contribution data returned for {login}"))
            })
    }
}
