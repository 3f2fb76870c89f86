//! Three-sample level debounce.
//!
//! Water sloshing in the tank makes the float switch chatter, so a single
//! reading is never trusted for a state change. The protocol, preserved
//! exactly from the proven hardware behaviour:
//!
//! 1. Read the switch. Anything but Empty settles the verdict: **Full**.
//! 2. Wait the settle time, re-read. A Full read settles the verdict.
//! 3. Wait again, read a third time. The verdict is **Empty** only if all
//!    three reads agreed on Empty.
//!
//! The same rule runs in two contexts: once at boot to pick the initial
//! state, and once per control cycle so the state machine can detect a
//! genuine level drop while aerating (pump-out exceeds pump-in because the
//! drain tube bore is larger than the fill tube bore).
//!
//! Blocking is bounded at two settle waits (~10 ticks) and goes through
//! [`DelayPort`], not a busy loop.

use crate::app::ports::{DelayPort, SensorPort};
use crate::sensors::level_switch::LevelReading;

pub struct LevelDebouncer {
    settle_ticks: u32,
}

impl LevelDebouncer {
    pub fn new(settle_ticks: u32) -> Self {
        Self { settle_ticks }
    }

    /// Run the three-sample/two-wait protocol and return the stable verdict.
    pub fn read(&self, hw: &mut (impl SensorPort + DelayPort)) -> LevelReading {
        for _ in 0..2 {
            if hw.read_level_raw() == LevelReading::Full {
                return LevelReading::Full;
            }
            hw.wait_ticks(self.settle_ticks);
        }
        hw.read_level_raw()
    }
}
