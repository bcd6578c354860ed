//! Tests for search-period parsing and validation.

use chrono::{TimeZone, Utc};
use slot_engine::period::{validate_period, SearchPeriod};
use slot_engine::ValidationError;

#[test]
fn parses_valid_period() {
    let period = validate_period("2019-04-23T10:00:00Z/2019-04-23T11:00:00Z").unwrap();
    assert_eq!(
        period.start(),
        Utc.with_ymd_and_hms(2019, 4, 23, 10, 0, 0).unwrap()
    );
    assert_eq!(
        period.end(),
        Utc.with_ymd_and_hms(2019, 4, 23, 11, 0, 0).unwrap()
    );
    assert_eq!(period.duration_minutes(), 60);
}

#[test]
fn offsets_are_normalized_to_utc() {
    let period = validate_period("2019-04-23T12:00:00+02:00/2019-04-23T11:00:00Z").unwrap();
    assert_eq!(
        period.start(),
        Utc.with_ymd_and_hms(2019, 4, 23, 10, 0, 0).unwrap()
    );
}

#[test]
fn invalid_periods_are_rejected() {
    let invalid = [
        "Invalid",
        "2019-04-23T10:00:00Z",
        "2019-04-23/2019-04-24T10:00:00Z",
        "2019-04-23T10:00:00Z/2019-04-23T10:00:00Z",
        "2019-04-23T11:00:00Z/2019-04-23T10:00:00Z",
        "2019-04-23T10:00:00Z/",
        "/2019-04-23T10:00:00Z",
        "",
        "2019-04-23T10:00:00Z/2019-04-23T11:00:00Z/2019-04-23T12:00:00Z",
    ];

    for raw in invalid {
        let err = validate_period(raw).unwrap_err();
        assert_eq!(err, ValidationError::InvalidPeriod, "period {raw:?}");
        assert_eq!(err.to_string(), "Invalid Period to Search");
    }
}

#[test]
fn from_str_matches_validate_period() {
    let raw = "2019-04-23T10:00:00Z/2019-04-23T11:00:00Z";
    let parsed: SearchPeriod = raw.parse().unwrap();
    assert_eq!(parsed, validate_period(raw).unwrap());
    assert!("nope".parse::<SearchPeriod>().is_err());
}

#[test]
fn display_round_trips() {
    let raw = "2019-04-23T10:00:00Z/2019-04-23T11:00:00Z";
    let period: SearchPeriod = raw.parse().unwrap();
    assert_eq!(period.to_string(), raw);
}

#[test]
fn new_requires_strictly_increasing_bounds() {
    let t = Utc.with_ymd_and_hms(2019, 4, 23, 10, 0, 0).unwrap();
    assert_eq!(
        SearchPeriod::new(t, t).unwrap_err(),
        ValidationError::InvalidPeriod
    );
    assert!(SearchPeriod::new(t, t + chrono::Duration::seconds(1)).is_ok());
}
