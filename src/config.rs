//! Process configuration, read once at startup into an explicit [`Config`]
//! that is passed by reference into every component. No other module reads
//! the environment.

use std::env;
use std::path::PathBuf;

use tracing::{error, info};

use crate::error::{DigestError, Result};

pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";
pub const DEFAULT_OUT_DIR: &str = "summaries";

#[derive(Debug, Clone)]
pub struct Config {
    /// Account whose activity is summarised.
    pub login: String,
    /// Bearer token for the GraphQL API.
    pub token: String,
    /// Full name (`owner/name`) of the repository hosting this tool; its own
    /// commits are excluded from the report. `None` when unset.
    pub summary_repo: Option<String>,
    /// IANA timezone identifier defining "today".
    pub timezone: String,
    /// Directory the dated summary files are written to.
    pub out_dir: PathBuf,
    /// Persistent document the latest summary is spliced into, when set.
    pub splice_target: Option<PathBuf>,
    /// Whether the "Repositories created" section is rendered.
    pub include_new_repos: bool,
}

/// Merges the process environment (`GH_USERNAME`, `GH_TOKEN`/`GITHUB_TOKEN`,
/// `SUMMARY_REPO`, `TZ_NAME`) with the CLI-provided settings into a fully
/// explicit `Config`.
pub fn load_config(
    out_dir: PathBuf,
    splice_target: Option<PathBuf>,
    include_new_repos: bool,
) -> Result<Config> {
    let login = match env::var("GH_USERNAME") {
        Ok(login) if !login.is_empty() => login,
        _ => {
            error!("GH_USERNAME environment variable not set");
            return Err(DigestError::Configuration(
                "GH_USERNAME environment variable not set".into(),
            ));
        }
    };

    let token = env::var("GH_TOKEN")
        .ok()
        .filter(|token| !token.is_empty())
        .or_else(|| env::var("GITHUB_TOKEN").ok().filter(|token| !token.is_empty()));
    let Some(token) = token else {
        error!("Neither GH_TOKEN nor GITHUB_TOKEN is set in the environment");
        return Err(DigestError::Configuration(
            "neither GH_TOKEN nor GITHUB_TOKEN environment variable is set".into(),
        ));
    };

    let summary_repo = env::var("SUMMARY_REPO").ok().filter(|repo| !repo.is_empty());
    let timezone = env::var("TZ_NAME")
        .ok()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());

    info!(
        login = %login,
        summary_repo = ?summary_repo,
        timezone = %timezone,
        out_dir = %out_dir.display(),
        splice_target = ?splice_target,
        include_new_repos,
        "Config loaded and merged successfully"
    );

    Ok(Config {
        login,
        token,
        summary_repo,
        timezone,
        out_dir,
        splice_target,
        include_new_repos,
    })
}
