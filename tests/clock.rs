use std::time::{Duration, Instant};

use matchday_terminal::clock::MatchClock;

#[test]
fn pause_and_resume_preserve_elapsed_time() {
    let t0 = Instant::now();
    let mut clock = MatchClock::new(45, 2);

    clock.start_pause(t0);
    assert!(clock.is_running());

    let t1 = t0 + Duration::from_secs(65);
    clock.tick(t1);
    clock.start_pause(t1);
    assert!(!clock.is_running());
    assert_eq!(clock.elapsed_seconds(), 65);

    // Ten paused seconds must not count.
    let t2 = t1 + Duration::from_secs(10);
    clock.tick(t2);
    assert_eq!(clock.elapsed_seconds(), 65);

    clock.start_pause(t2);
    let t3 = t2 + Duration::from_secs(5);
    clock.tick(t3);
    assert_eq!(clock.elapsed_seconds(), 70);
}

#[test]
fn tick_is_a_noop_while_idle() {
    let t0 = Instant::now();
    let mut clock = MatchClock::new(45, 2);
    clock.tick(t0 + Duration::from_secs(600));
    assert_eq!(clock.elapsed_seconds(), 0);
}

#[test]
fn finish_half_stops_and_zeroes_without_changing_half() {
    let t0 = Instant::now();
    let mut clock = MatchClock::new(45, 2);
    clock.next_half();
    clock.start_pause(t0);
    clock.tick(t0 + Duration::from_secs(300));

    clock.finish_half();
    assert!(!clock.is_running());
    assert_eq!(clock.elapsed_seconds(), 0);
    assert_eq!(clock.current_half(), 2);
}

#[test]
fn half_navigation_clamps_at_boundaries() {
    let mut clock = MatchClock::new(45, 2);
    assert_eq!(clock.current_half(), 1);

    clock.prev_half();
    assert_eq!(clock.current_half(), 1);

    clock.next_half();
    assert_eq!(clock.current_half(), 2);

    clock.next_half();
    assert_eq!(clock.current_half(), 2);

    clock.prev_half();
    assert_eq!(clock.current_half(), 1);
}

#[test]
fn half_navigation_resets_the_clock() {
    let t0 = Instant::now();
    let mut clock = MatchClock::new(45, 2);
    clock.start_pause(t0);
    clock.tick(t0 + Duration::from_secs(120));

    clock.next_half();
    assert!(!clock.is_running());
    assert_eq!(clock.elapsed_seconds(), 0);
}

#[test]
fn default_minute_is_one_based_and_capped_at_half_length() {
    let t0 = Instant::now();
    let mut clock = MatchClock::new(45, 2);
    assert_eq!(clock.default_minute(), 1);

    clock.start_pause(t0);
    clock.tick(t0 + Duration::from_secs(30));
    assert_eq!(clock.default_minute(), 1);

    clock.tick(t0 + Duration::from_secs(12 * 60 + 30));
    assert_eq!(clock.default_minute(), 13);

    // Fifty elapsed minutes report as the final nominal minute.
    clock.tick(t0 + Duration::from_secs(50 * 60));
    assert_eq!(clock.default_minute(), 45);
}

#[test]
fn configure_clamps_current_half_into_new_range() {
    let mut clock = MatchClock::new(45, 4);
    clock.next_half();
    clock.next_half();
    assert_eq!(clock.current_half(), 3);

    clock.configure(25, 2);
    assert_eq!(clock.current_half(), 2);
    assert_eq!(clock.half_minutes(), 25);
    assert_eq!(clock.halves(), 2);
}

#[test]
fn display_formats_minutes_and_seconds() {
    let t0 = Instant::now();
    let mut clock = MatchClock::new(45, 2);
    clock.start_pause(t0);
    clock.tick(t0 + Duration::from_secs(7 * 60 + 5));
    assert_eq!(clock.display(), "07:05");
}
