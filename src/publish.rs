//! Persists the rendered summary: one uniquely named dated file per run, plus
//! an optional splice into a persistent document between sentinel markers.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use tracing::{debug, info};

use crate::error::Result;

pub const START_MARKER: &str = "<!-- summary-bot-latest-start -->";
pub const END_MARKER: &str = "<!-- summary-bot-latest-end -->";

/// Writes `content` to `<out_dir>/<date>-<HHMMSS>.md`, creating the directory
/// when needed, and returns the written path.
///
/// Two runs within the same second would collide on the filename; a monotonic
/// `-N` suffix resolves the collision instead of overwriting.
pub fn write_summary(
    out_dir: &Path,
    date: NaiveDate,
    run_at: &DateTime<Tz>,
    content: &str,
) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)?;

    let stem = format!("{}-{}", date.format("%Y-%m-%d"), run_at.format("%H%M%S"));
    let mut path = out_dir.join(format!("{stem}.md"));
    let mut attempt = 1u32;
    while path.exists() {
        path = out_dir.join(format!("{stem}-{attempt}.md"));
        attempt += 1;
    }

    fs::write(&path, content)?;
    info!(path = %path.display(), bytes = content.len(), "Summary file written");
    Ok(path)
}

/// Replaces the text between the first occurrence of each sentinel marker
/// with `report`, preserving everything outside byte-for-byte.
///
/// Returns `None` when either sentinel is absent; the document must then be
/// left untouched.
pub fn splice(document: &str, report: &str) -> Option<String> {
    let start = document.find(START_MARKER)?;
    let end = document.find(END_MARKER)?;

    let before = &document[..start];
    let after = &document[end + END_MARKER.len()..];
    let body = report.trim_end_matches('\n');

    Some(format!(
        "{before}{START_MARKER}\n{body}\n\n{END_MARKER}{after}"
    ))
}

/// Splices `report` into the document at `path`, if the document exists and
/// carries both sentinel markers. Returns whether the document was rewritten.
pub fn splice_into_file(path: &Path, report: &str) -> Result<bool> {
    if !path.exists() {
        debug!(path = %path.display(), "No persistent document to splice into");
        return Ok(false);
    }

    let document = fs::read_to_string(path)?;
    match splice(&document, report) {
        Some(updated) => {
            fs::write(path, updated)?;
            info!(path = %path.display(), "Latest summary spliced into document");
            Ok(true)
        }
        None => {
            debug!(path = %path.display(), "Sentinel markers absent, document left untouched");
            Ok(false)
        }
    }
}
