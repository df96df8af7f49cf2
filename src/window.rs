//! Resolves the local-calendar-day contribution window for a run.
//!
//! "Today" is defined by the configured IANA timezone: the window starts at
//! local midnight of the reference instant's local date and ends at the next
//! local midnight. On DST transition days this covers 23 or 25 real hours,
//! which keeps the window aligned with the remote API's date semantics.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{DigestError, Result};

/// Half-open interval `[start, end)` covering one local calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub timezone: Tz,
}

impl ContributionWindow {
    /// The local calendar date this window covers.
    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// The window date as `YYYY-MM-DD`, the key new-repository creation
    /// timestamps are matched against.
    pub fn date_key(&self) -> String {
        self.date().format("%Y-%m-%d").to_string()
    }

    pub fn start_iso(&self) -> String {
        self.start.to_rfc3339()
    }

    pub fn end_iso(&self) -> String {
        self.end.to_rfc3339()
    }
}

/// Computes the contribution window for `reference` in the named timezone.
///
/// Fails with a configuration error when the timezone identifier is not a
/// known IANA name.
pub fn resolve(tz_name: &str, reference: DateTime<Utc>) -> Result<ContributionWindow> {
    let timezone: Tz = tz_name.parse().map_err(|_| {
        DigestError::Configuration(format!("unrecognized timezone identifier: {tz_name}"))
    })?;

    let day = reference.with_timezone(&timezone).date_naive();
    let next_day = day.succ_opt().ok_or_else(|| {
        DigestError::Configuration(format!("cannot compute the day after {day}"))
    })?;

    let start = local_midnight(timezone, day)?;
    let end = local_midnight(timezone, next_day)?;

    Ok(ContributionWindow {
        start,
        end,
        timezone,
    })
}

fn local_midnight(timezone: Tz, day: NaiveDate) -> Result<DateTime<Tz>> {
    let midnight = day.and_time(NaiveTime::MIN);
    match timezone.from_local_datetime(&midnight) {
        LocalResult::Single(instant) => Ok(instant),
        // Clocks rolled back across midnight: take the earlier offset.
        LocalResult::Ambiguous(earlier, _) => Ok(earlier),
        // Midnight fell inside a DST gap; the day starts at the first valid
        // local time after it.
        LocalResult::None => timezone
            .from_local_datetime(&(midnight + chrono::Duration::hours(1)))
            .earliest()
            .ok_or_else(|| {
                DigestError::Configuration(format!(
                    "no valid local midnight for {day} in {timezone}"
                ))
            }),
    }
}
