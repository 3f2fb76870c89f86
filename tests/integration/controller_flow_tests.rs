//! End-to-end control cycle scenarios over mock hardware.
//!
//! Each test drives `LivewellService` the way `main()` does — explicit
//! timestamps, mock ports — and asserts on the full actuator/event history.

use livewell::app::events::AppEvent;
use livewell::app::service::LivewellService;
use livewell::config::SystemConfig;
use livewell::fsm::context::AerationPhase;
use livewell::fsm::OperatingState;
use livewell::sensors::level_switch::LevelReading::{Empty, Full};

use crate::mock_hw::{MockHardware, RecordingSink};

fn service() -> LivewellService {
    LivewellService::new(&SystemConfig::default())
}

/// Boot with the tank full at `now`: the controller lands in an active
/// aeration burst.
fn boot_full(hw: &mut MockHardware, sink: &mut RecordingSink, now: u32) -> LivewellService {
    let mut svc = service();
    hw.raw_level = Full;
    svc.start(now, hw, sink);
    assert_eq!(svc.state(), OperatingState::Aerate);
    assert_eq!(svc.phase(), AerationPhase::DurationActive);
    svc
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_with_empty_tank_starts_filling() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    hw.raw_level = Empty;

    let mut svc = service();
    svc.start(0, &mut hw, &mut sink);

    assert_eq!(svc.state(), OperatingState::RaiseLevel);
    assert!(hw.fill_on());
    assert!(!hw.drain_on());
    // Boot decision ran the full three-sample/two-wait protocol.
    assert_eq!(hw.level_reads, 3);
    assert_eq!(hw.waits, vec![5, 5]);
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::Started(OperatingState::RaiseLevel))
    ));
}

#[test]
fn boot_with_full_tank_starts_aerating() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    let svc = boot_full(&mut hw, &mut sink, 0);

    // First read was Full: short-circuit, no settle waits.
    assert_eq!(hw.level_reads, 1);
    assert!(hw.waits.is_empty());
    assert!(hw.fill_on());
    assert!(hw.drain_on());
    assert!(!svc.is_draining());
}

// ── Fill → rest → burst → top-up ──────────────────────────────

#[test]
fn fill_complete_enters_rest_period() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    hw.raw_level = Empty;

    let mut svc = service();
    svc.start(0, &mut hw, &mut sink);

    hw.raw_level = Full;
    svc.tick(1_000, &mut hw, &mut sink);

    assert_eq!(svc.state(), OperatingState::Aerate);
    assert_eq!(svc.phase(), AerationPhase::IntervalWait);
    assert!(!hw.fill_on());
    assert!(!hw.drain_on());
    assert_eq!(
        sink.state_changes(),
        vec![("RaiseLevel".into(), "Aerate".into())]
    );
}

#[test]
fn rest_period_elapsing_starts_the_burst() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    hw.raw_level = Empty;

    let mut svc = service();
    svc.start(0, &mut hw, &mut sink);
    hw.raw_level = Full;
    svc.tick(1_000, &mut hw, &mut sink); // → Aerate / IntervalWait

    let interval = svc.timing().cycle_interval_ms;

    // Exactly at the boundary: still resting (strict comparison).
    svc.tick(1_000 + interval, &mut hw, &mut sink);
    assert_eq!(svc.phase(), AerationPhase::IntervalWait);
    assert!(!hw.fill_on() && !hw.drain_on());

    svc.tick(1_000 + interval + 1, &mut hw, &mut sink);
    assert_eq!(svc.state(), OperatingState::Aerate);
    assert_eq!(svc.phase(), AerationPhase::DurationActive);
    assert!(hw.fill_on() && hw.drain_on());
}

#[test]
fn burst_elapsing_tops_the_tank_up_then_rests_again() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    let mut svc = boot_full(&mut hw, &mut sink, 0);

    let duration = svc.timing().cycle_duration_ms;
    svc.tick(duration + 1, &mut hw, &mut sink);
    assert_eq!(svc.state(), OperatingState::RaiseLevelBeforeAllStop);
    assert!(hw.fill_on());
    assert!(!hw.drain_on());

    // Float comes up: back to resting, interval clock restarted.
    svc.tick(duration + 500, &mut hw, &mut sink);
    assert_eq!(svc.state(), OperatingState::Aerate);
    assert_eq!(svc.phase(), AerationPhase::IntervalWait);
    assert!(!hw.fill_on() && !hw.drain_on());
}

// ── Level drop under aerate ───────────────────────────────────

#[test]
fn level_drop_during_burst_runs_a_timed_drain_then_refills() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    let mut svc = boot_full(&mut hw, &mut sink, 0);

    hw.raw_level = Empty;
    svc.tick(10, &mut hw, &mut sink);
    assert_eq!(svc.state(), OperatingState::LowerLevel);
    assert!(hw.fill_on() && hw.drain_on());

    let drain = svc.timing().drain_duration_ms;

    // Drain window not yet elapsed (strict comparison).
    svc.tick(10 + drain, &mut hw, &mut sink);
    assert_eq!(svc.state(), OperatingState::LowerLevel);

    svc.tick(10 + drain + 1, &mut hw, &mut sink);
    assert_eq!(svc.state(), OperatingState::RaiseLevelInDuration);
    assert!(hw.fill_on() && !hw.drain_on());

    // Float recovers: the burst resumes where it left off.
    hw.raw_level = Full;
    svc.tick(10 + drain + 100, &mut hw, &mut sink);
    assert_eq!(svc.state(), OperatingState::Aerate);
    assert_eq!(svc.phase(), AerationPhase::DurationActive);
    assert!(hw.fill_on() && hw.drain_on());
}

#[test]
fn sloshing_does_not_trigger_the_drain() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    let mut svc = boot_full(&mut hw, &mut sink, 0);

    // Mirror read sees Empty, debounce reads Empty then Full: one slosh,
    // verdict stays Full, no transition.
    hw.script_levels(&[Empty, Empty, Full]);
    svc.tick(10, &mut hw, &mut sink);

    assert_eq!(svc.state(), OperatingState::Aerate);
    assert_eq!(svc.phase(), AerationPhase::DurationActive);
    assert_eq!(hw.waits.len(), 1);
}

// ── Drain override ────────────────────────────────────────────

#[test]
fn drain_override_forces_drain_only_and_freezes_the_controller() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    let mut svc = boot_full(&mut hw, &mut sink, 0);
    let reads_after_boot = hw.level_reads;
    let drain_before = svc.timing().drain_duration_ms;

    hw.pots[2] = 3; // below the threshold of 6
    svc.tick(10, &mut hw, &mut sink);

    assert!(svc.is_draining());
    assert!(!hw.fill_on());
    assert!(hw.drain_on());
    // State and bookkeeping frozen; drain duration keeps its dialled value.
    assert_eq!(svc.state(), OperatingState::Aerate);
    assert_eq!(svc.timing().drain_duration_ms, drain_before);
    // Only the raw lamp mirror read ran — no debounce while frozen.
    assert_eq!(hw.level_reads, reads_after_boot + 1);
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::DrainOverrideEngaged)
    ));
}

#[test]
fn drain_override_clear_parks_in_all_stop_exactly_once() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    let mut svc = boot_full(&mut hw, &mut sink, 0);

    hw.pots[2] = 3;
    svc.tick(10, &mut hw, &mut sink);
    assert!(svc.is_draining());

    hw.pots[2] = 100;
    svc.tick(20, &mut hw, &mut sink);
    assert!(!svc.is_draining());
    assert_eq!(svc.state(), OperatingState::AllStop);
    assert!(!hw.fill_on() && !hw.drain_on());
    // Drain duration recomputes on the clearing pass: (100·9211 + 499849)/1000.
    assert_eq!(svc.timing().drain_duration_ms, 1_420);

    let overrides_so_far = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::DrainOverrideCleared))
        .count();
    assert_eq!(overrides_so_far, 1);

    // Further cycles stay parked with no new override edges.
    svc.tick(30, &mut hw, &mut sink);
    assert_eq!(svc.state(), OperatingState::AllStop);
    let overrides_after = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::DrainOverrideCleared))
        .count();
    assert_eq!(overrides_after, 1);
}

#[test]
fn override_engaged_at_power_up_wins_over_the_boot_state() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    hw.raw_level = Full;
    hw.pots[2] = 0;

    let mut svc = service();
    svc.start(0, &mut hw, &mut sink);

    assert!(svc.is_draining());
    assert!(!hw.fill_on());
    assert!(hw.drain_on());

    // Still frozen on the next cycle.
    svc.tick(10, &mut hw, &mut sink);
    assert!(!hw.fill_on());
    assert!(hw.drain_on());
}

#[test]
fn override_preempts_states_other_than_aerate_too() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    let mut svc = boot_full(&mut hw, &mut sink, 0);

    // Get into LowerLevel first.
    hw.raw_level = Empty;
    svc.tick(10, &mut hw, &mut sink);
    assert_eq!(svc.state(), OperatingState::LowerLevel);

    hw.pots[2] = 0;
    svc.tick(20, &mut hw, &mut sink);
    assert!(svc.is_draining());
    assert!(!hw.fill_on());
    assert!(hw.drain_on());
    assert_eq!(svc.state(), OperatingState::LowerLevel, "state frozen");
}

// ── Wraparound ────────────────────────────────────────────────

#[test]
fn burst_completes_across_tick_counter_wraparound() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    // Boot just before the counter wraps: t_aerate ≈ u32::MAX.
    let mut svc = boot_full(&mut hw, &mut sink, 0xFFFF_FFF0);

    let duration = svc.timing().cycle_duration_ms;

    // Shortly after the wrap the burst is still young.
    svc.tick(16, &mut hw, &mut sink);
    assert_eq!(svc.state(), OperatingState::Aerate);

    // True elapsed time = duration + 0x10 even though now < t_aerate.
    svc.tick(duration, &mut hw, &mut sink);
    assert_eq!(svc.state(), OperatingState::RaiseLevelBeforeAllStop);
}

// ── Lamps ─────────────────────────────────────────────────────

#[test]
fn level_lamp_mirrors_the_raw_reading_every_cycle() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    let mut svc = boot_full(&mut hw, &mut sink, 0);

    hw.raw_level = Empty;
    svc.tick(10, &mut hw, &mut sink);
    assert_eq!(hw.level_indicator_on(), Some(true));

    hw.raw_level = Full;
    svc.tick(20, &mut hw, &mut sink);
    assert_eq!(hw.level_indicator_on(), Some(false));
}
