//! Millisecond time base, one-shot countdown, and heartbeat divider.
//!
//! The hardware tick timer calls [`tick`] exactly once per millisecond (see
//! [`crate::drivers::hw_timer`]). Everything here is an atomic with a strict
//! single-writer discipline: the tick context writes, the control task reads.
//!
//! The counter is deliberately `u32`: it wraps after ~49.7 days of continuous
//! runtime, and every consumer must treat that as defined behaviour by going
//! through [`elapsed_ms`] rather than comparing raw timestamps.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Heartbeat LED half-period in ticks (~100 ms on / ~100 ms off).
pub const HEARTBEAT_HALF_PERIOD_TICKS: u32 = 100;

static TICK_MS: AtomicU32 = AtomicU32::new(0);
static COUNTDOWN: AtomicU32 = AtomicU32::new(0);
static HEARTBEAT_CNT: AtomicU32 = AtomicU32::new(0);
static HEARTBEAT_ON: AtomicBool = AtomicBool::new(false);

/// Advance the time base by one millisecond tick.
///
/// Called from the periodic timer callback only — never from the control
/// task. Decrements an armed countdown by exactly one, and returns
/// `Some(level)` when the heartbeat output toggles so the caller can drive
/// the status LED from the same context.
pub fn tick() -> Option<bool> {
    // fetch_add on u32 wraps at 2^32 — the documented counter behaviour.
    TICK_MS.fetch_add(1, Ordering::Release);

    let remaining = COUNTDOWN.load(Ordering::Relaxed);
    if remaining != 0 {
        COUNTDOWN.store(remaining - 1, Ordering::Release);
    }

    let cnt = HEARTBEAT_CNT.load(Ordering::Relaxed) + 1;
    if cnt >= HEARTBEAT_HALF_PERIOD_TICKS {
        HEARTBEAT_CNT.store(0, Ordering::Relaxed);
        let level = !HEARTBEAT_ON.load(Ordering::Relaxed);
        HEARTBEAT_ON.store(level, Ordering::Relaxed);
        Some(level)
    } else {
        HEARTBEAT_CNT.store(cnt, Ordering::Relaxed);
        None
    }
}

/// Milliseconds since boot. Monotonic, wraps silently at `u32::MAX`.
pub fn now_ms() -> u32 {
    TICK_MS.load(Ordering::Acquire)
}

/// Arm the one-shot countdown with `ticks` milliseconds.
///
/// A previously armed countdown is simply replaced; there is only one
/// consumer (the level debounce waits) so no arbitration is needed.
pub fn arm_countdown(ticks: u32) {
    COUNTDOWN.store(ticks, Ordering::Release);
}

/// True once an armed countdown has been decremented to zero.
pub fn countdown_expired() -> bool {
    COUNTDOWN.load(Ordering::Acquire) == 0
}

/// Wraparound-safe elapsed time between two tick counter readings.
///
/// For `now = 0x0000_0010` and `since = 0xFFFF_FFF0` this yields `0x20`,
/// not an underflow — unsigned wrapping subtraction is the contract every
/// elapsed-time comparison in the controller relies on.
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}
