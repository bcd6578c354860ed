//! Tests for gap derivation, the period filter, and slot tiling.

use chrono::{DateTime, TimeZone, Utc};
use slot_engine::freebusy::{find_free_gaps, is_in_period, tile_gap, tile_gaps, Gap};
use slot_engine::model::Appointment;
use slot_engine::period::SearchPeriod;
use slot_engine::request::SlotDuration;

const CALENDAR: &str = "48cadf26-975e-11e5-b9c2-c8e0eb18c1e9";

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2019, 4, 23, hour, min, 0).unwrap()
}

fn appointment(start: (u32, u32), end: (u32, u32)) -> Appointment {
    Appointment::new(CALENDAR, at(start.0, start.1), at(end.0, end.1))
}

fn period(start: (u32, u32), end: (u32, u32)) -> SearchPeriod {
    SearchPeriod::new(at(start.0, start.1), at(end.0, end.1)).unwrap()
}

fn gap(start: (u32, u32), end: (u32, u32)) -> Gap {
    Gap {
        start: at(start.0, start.1),
        end: at(end.0, end.1),
        duration_minutes: (at(end.0, end.1) - at(start.0, start.1)).num_minutes(),
    }
}

fn minutes(m: i64) -> SlotDuration {
    SlotDuration::from_minutes(m).unwrap()
}

// ── is_in_period ────────────────────────────────────────────────────────────

#[test]
fn contained_appointment_is_in_period() {
    assert!(is_in_period(
        &appointment((12, 15), (12, 30)),
        &period((12, 0), (13, 0))
    ));
}

#[test]
fn appointment_overlapping_start_is_in_period() {
    assert!(is_in_period(
        &appointment((12, 15), (12, 30)),
        &period((12, 20), (13, 20))
    ));
}

#[test]
fn appointment_overlapping_end_is_in_period() {
    assert!(is_in_period(
        &appointment((12, 50), (13, 30)),
        &period((12, 0), (13, 0))
    ));
}

#[test]
fn appointment_covering_whole_period_is_in_period() {
    assert!(is_in_period(
        &appointment((11, 0), (14, 0)),
        &period((12, 0), (13, 0))
    ));
}

#[test]
fn appointment_equal_to_period_is_in_period() {
    assert!(is_in_period(
        &appointment((12, 15), (12, 30)),
        &period((12, 15), (12, 30))
    ));
}

#[test]
fn appointment_ending_at_period_start_is_not_in_period() {
    assert!(!is_in_period(
        &appointment((11, 0), (12, 0)),
        &period((12, 0), (13, 0))
    ));
}

#[test]
fn appointment_starting_at_period_end_is_not_in_period() {
    assert!(!is_in_period(
        &appointment((13, 0), (13, 30)),
        &period((12, 0), (13, 0))
    ));
}

#[test]
fn zero_length_appointment_at_period_start_is_in_period() {
    assert!(is_in_period(
        &appointment((12, 0), (12, 0)),
        &period((12, 0), (13, 0))
    ));
}

#[test]
fn disjoint_appointments_are_not_in_period() {
    let p = period((12, 0), (13, 0));
    assert!(!is_in_period(&appointment((9, 0), (10, 0)), &p));
    assert!(!is_in_period(&appointment((14, 0), (15, 0)), &p));
}

// ── find_free_gaps ──────────────────────────────────────────────────────────

#[test]
fn no_appointments_leaves_whole_period_free() {
    let gaps = find_free_gaps(&[], &period((10, 0), (11, 0)));
    assert_eq!(gaps, vec![gap((10, 0), (11, 0))]);
}

#[test]
fn single_appointment_splits_period() {
    let gaps = find_free_gaps(&[appointment((12, 15), (12, 30))], &period((12, 0), (13, 0)));
    assert_eq!(gaps, vec![gap((12, 0), (12, 15)), gap((12, 30), (13, 0))]);
    assert_eq!(gaps[0].duration_minutes, 15);
    assert_eq!(gaps[1].duration_minutes, 30);
}

#[test]
fn appointment_overlapping_start_moves_cursor() {
    let gaps = find_free_gaps(&[appointment((12, 15), (12, 30))], &period((12, 20), (13, 20)));
    assert_eq!(gaps, vec![gap((12, 30), (13, 20))]);
}

#[test]
fn appointment_filling_period_leaves_no_gap() {
    let gaps = find_free_gaps(&[appointment((12, 15), (12, 30))], &period((12, 15), (12, 30)));
    assert!(gaps.is_empty());
}

#[test]
fn overlapping_appointments_collapse() {
    // 10:00-11:30 and 11:00-12:00 → busy 10:00-12:00.
    let appointments = vec![appointment((10, 0), (11, 30)), appointment((11, 0), (12, 0))];
    let gaps = find_free_gaps(&appointments, &period((8, 0), (17, 0)));
    assert_eq!(gaps, vec![gap((8, 0), (10, 0)), gap((12, 0), (17, 0))]);
}

#[test]
fn contained_appointment_never_moves_cursor_backwards() {
    // 10:00-12:00 swallows 10:30-11:00; cursor must stay at 12:00.
    let appointments = vec![appointment((10, 0), (12, 0)), appointment((10, 30), (11, 0))];
    let gaps = find_free_gaps(&appointments, &period((9, 0), (13, 0)));
    assert_eq!(gaps, vec![gap((9, 0), (10, 0)), gap((12, 0), (13, 0))]);
}

#[test]
fn unsorted_appointments_are_sorted_first() {
    let appointments = vec![
        appointment((15, 0), (16, 0)),
        appointment((9, 0), (10, 0)),
        appointment((12, 0), (13, 0)),
    ];
    let gaps = find_free_gaps(&appointments, &period((8, 0), (17, 0)));
    assert_eq!(
        gaps,
        vec![
            gap((8, 0), (9, 0)),
            gap((10, 0), (12, 0)),
            gap((13, 0), (15, 0)),
            gap((16, 0), (17, 0)),
        ]
    );
}

#[test]
fn back_to_back_appointments_leave_no_gap_between() {
    let appointments = vec![appointment((10, 0), (11, 0)), appointment((11, 0), (12, 0))];
    let gaps = find_free_gaps(&appointments, &period((10, 0), (12, 0)));
    assert!(gaps.is_empty());
}

#[test]
fn appointments_past_period_end_never_yield_inverted_gap() {
    // Cursor ends at 12:30, past the 12:00 period end, before the 12:45 start.
    let appointments = vec![appointment((10, 0), (12, 30)), appointment((12, 45), (13, 0))];
    let gaps = find_free_gaps(&appointments, &period((9, 0), (12, 0)));
    assert_eq!(gaps, vec![gap((9, 0), (10, 0))]);
}

#[test]
fn inverted_appointment_yields_only_positive_gaps() {
    let appointments = vec![appointment((10, 0), (11, 45)), appointment((11, 30), (10, 10))];
    let gaps = find_free_gaps(&appointments, &period((10, 0), (12, 0)));
    assert_eq!(gaps, vec![gap((11, 45), (12, 0))]);
    assert!(gaps.iter().all(|g| g.start < g.end));
}

// ── tile_gap ────────────────────────────────────────────────────────────────

#[test]
fn tiling_hour_into_quarters() {
    let slots = tile_gap(&gap((10, 0), (11, 0)), minutes(15));
    let starts: Vec<_> = slots.iter().map(|s| s.start_time).collect();
    assert_eq!(starts, vec![at(10, 0), at(10, 15), at(10, 30), at(10, 45)]);
    assert_eq!(slots[3].end_time, at(11, 0));
}

#[test]
fn slot_ending_on_gap_boundary_is_kept() {
    let slots = tile_gap(&gap((12, 0), (12, 15)), minutes(15));
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start_time, at(12, 0));
    assert_eq!(slots[0].end_time, at(12, 15));
}

#[test]
fn remainder_shorter_than_duration_is_dropped() {
    let slots = tile_gap(&gap((12, 30), (13, 20)), minutes(15));
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[2].end_time, at(13, 15));
}

#[test]
fn gap_shorter_than_duration_yields_nothing() {
    assert!(tile_gap(&gap((12, 0), (12, 10)), minutes(15)).is_empty());
}

#[test]
fn tile_gaps_concatenates_in_order() {
    let gaps = vec![gap((12, 0), (12, 15)), gap((12, 30), (13, 0))];
    let slots = tile_gaps(&gaps, minutes(15));
    let starts: Vec<_> = slots.iter().map(|s| s.start_time).collect();
    assert_eq!(starts, vec![at(12, 0), at(12, 30), at(12, 45)]);
}
