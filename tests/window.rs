use chrono::{TimeZone, Timelike, Utc};
use gh_daily_summary::error::DigestError;
use gh_daily_summary::window::resolve;

#[test]
fn window_covers_one_local_calendar_day() {
    let reference = Utc.with_ymd_and_hms(2024, 5, 1, 17, 30, 0).unwrap();
    let window = resolve("America/Los_Angeles", reference).expect("window should resolve");

    assert_eq!(window.date_key(), "2024-05-01");
    assert_eq!(window.start.hour(), 0);
    assert_eq!(window.start.minute(), 0);
    assert_eq!((window.end - window.start).num_hours(), 24);
    assert_eq!(window.start_iso(), "2024-05-01T00:00:00-07:00");
    assert_eq!(window.end_iso(), "2024-05-02T00:00:00-07:00");
}

#[test]
fn local_date_wins_over_utc_date() {
    // 03:00 UTC on May 2nd is still the evening of May 1st in Los Angeles.
    let reference = Utc.with_ymd_and_hms(2024, 5, 2, 3, 0, 0).unwrap();
    let window = resolve("America/Los_Angeles", reference).expect("window should resolve");

    assert_eq!(window.date_key(), "2024-05-01");
}

#[test]
fn spring_forward_day_spans_23_hours() {
    // DST starts 2024-03-10 in America/Los_Angeles; the window still runs
    // midnight to next midnight.
    let reference = Utc.with_ymd_and_hms(2024, 3, 10, 20, 0, 0).unwrap();
    let window = resolve("America/Los_Angeles", reference).expect("window should resolve");

    assert_eq!(window.date_key(), "2024-03-10");
    assert_eq!((window.end - window.start).num_hours(), 23);
}

#[test]
fn fall_back_day_spans_25_hours() {
    let reference = Utc.with_ymd_and_hms(2024, 11, 3, 20, 0, 0).unwrap();
    let window = resolve("America/Los_Angeles", reference).expect("window should resolve");

    assert_eq!(window.date_key(), "2024-11-03");
    assert_eq!((window.end - window.start).num_hours(), 25);
}

#[test]
fn unknown_timezone_is_a_configuration_error() {
    let reference = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let err = resolve("Not/AZone", reference).unwrap_err();

    match err {
        DigestError::Configuration(message) => {
            assert!(
                message.contains("Not/AZone"),
                "error should name the identifier, got: {message}"
            );
        }
        other => panic!("expected a configuration error, got: {other:?}"),
    }
}
