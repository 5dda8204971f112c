//! Session tests - countdown, scoring and the Active/Ended state machine

use tui_apples::core::{RoundResult, Session, SessionState};
use tui_apples::types::{CoreError, EndReason};

#[test]
fn test_new_session_is_active_with_full_clock() {
    let s = Session::new(60).unwrap();
    assert_eq!(s.state(), SessionState::Active);
    assert_eq!(s.score(), 0);
    assert_eq!(s.time_remaining(), 60);
    assert!(s.result().is_none());
}

#[test]
fn test_zero_duration_rejected() {
    assert!(matches!(
        Session::new(0),
        Err(CoreError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_time_strictly_decreases_then_ends_once() {
    let mut s = Session::new(60).unwrap();
    let mut ended = Vec::new();

    for i in 1..=60u32 {
        let before = s.time_remaining();
        if let Some(r) = s.tick() {
            ended.push((i, r));
        }
        assert_eq!(s.time_remaining(), before - 1);
    }

    assert_eq!(s.time_remaining(), 0);
    assert_eq!(s.state(), SessionState::Ended(EndReason::TimeUp));
    assert_eq!(
        ended,
        vec![(
            60,
            RoundResult {
                score: 0,
                reason: EndReason::TimeUp,
                duration_secs: 60
            }
        )]
    );

    // 61st tick is a no-op.
    assert_eq!(s.tick(), None);
    assert_eq!(s.time_remaining(), 0);
}

#[test]
fn test_score_frozen_after_end() {
    let mut s = Session::new(2).unwrap();
    assert!(s.on_match(3));
    s.tick();
    s.tick();
    assert!(!s.is_active());
    assert!(!s.on_match(5));
    assert_eq!(s.score(), 3);
    assert_eq!(s.take_result().map(|r| r.score), Some(3));
}

#[test]
fn test_abort_cancels_clock_before_any_late_tick() {
    let mut s = Session::new(60).unwrap();
    s.advance(900);
    let r = s.abort().unwrap();

    assert_eq!(r.reason, EndReason::Aborted);
    assert!(!r.is_rankable());
    assert!(s.clock().is_cancelled());

    // Time that was already pending, and any new time, changes nothing.
    assert_eq!(s.advance(5_000), None);
    assert_eq!(s.time_remaining(), 60);
    assert_eq!(s.abort(), None);
}

#[test]
fn test_advance_drains_whole_seconds() {
    let mut s = Session::new(10).unwrap();
    assert_eq!(s.advance(999), None);
    assert_eq!(s.time_remaining(), 10);
    s.advance(1);
    assert_eq!(s.time_remaining(), 9);
    s.advance(2_500);
    assert_eq!(s.time_remaining(), 7);
    assert_eq!(s.clock().pending_ms(), 500);
}

#[test]
fn test_advance_stops_at_end() {
    let mut s = Session::new(3).unwrap();
    let r = s.advance(10_000).unwrap();
    assert_eq!(r.reason, EndReason::TimeUp);
    assert!(r.is_rankable());
    assert_eq!(s.time_remaining(), 0);
}

#[test]
fn test_result_acknowledged_once() {
    let mut s = Session::new(1).unwrap();
    s.tick();
    assert!(s.result().is_some());
    assert!(s.take_result().is_some());
    assert!(s.take_result().is_none());
    // State is still Ended after acknowledgement.
    assert_eq!(s.end_reason(), Some(EndReason::TimeUp));
}
