//! Hardware adapter — binds the sensor, actuator, and delay ports to the
//! concrete drivers.
//!
//! This is the only type that knows both sides of the port boundary: the
//! service sees three traits, the drivers see GPIO and ADC helpers. The
//! delay implementation is the suspend-with-timeout primitive the level
//! debounce relies on: arm the time base countdown, then yield until it
//! expires. The tick timer decrements the countdown once per millisecond.

use crate::app::ports::{ActuatorPort, DelayPort, SensorPort};
use crate::drivers::leds::LevelLed;
use crate::drivers::relay::PumpRelays;
use crate::pins;
use crate::sensors::level_switch::{LevelReading, LevelSwitch};
use crate::sensors::pots::{PotBank, PotChannel};

pub struct HardwareAdapter {
    level: LevelSwitch,
    pots: PotBank,
    relays: PumpRelays,
    level_led: LevelLed,
}

impl HardwareAdapter {
    pub fn new() -> Self {
        Self {
            level: LevelSwitch::new(pins::FLOAT_SWITCH_GPIO),
            pots: PotBank::new([
                pins::POT_CYCLE_INTERVAL_GPIO,
                pins::POT_CYCLE_DURATION_GPIO,
                pins::POT_DRAIN_DURATION_GPIO,
            ]),
            relays: PumpRelays::new(),
            level_led: LevelLed::new(),
        }
    }

    /// Current relay posture (for logging and tests).
    pub fn relay_state(&self) -> (bool, bool) {
        (self.relays.fill_on(), self.relays.drain_on())
    }
}

impl SensorPort for HardwareAdapter {
    fn read_level_raw(&mut self) -> LevelReading {
        self.level.read_raw()
    }

    fn read_pots_raw(&mut self) -> [u16; PotChannel::COUNT] {
        self.pots.read_raw()
    }
}

impl ActuatorPort for HardwareAdapter {
    fn set_fill(&mut self, on: bool) {
        self.relays.set_fill(on);
    }

    fn set_drain(&mut self, on: bool) {
        self.relays.set_drain(on);
    }

    fn set_level_indicator(&mut self, on: bool) {
        self.level_led.set(on);
    }
}

impl DelayPort for HardwareAdapter {
    /// Arm the countdown and yield the control task until it expires. The
    /// wait overshoots by at most one RTOS tick of scheduling granularity;
    /// the three-sample/two-wait debounce rule is unaffected.
    #[cfg(target_os = "espidf")]
    fn wait_ticks(&mut self, ticks: u32) {
        crate::timebase::arm_countdown(ticks);
        while !crate::timebase::countdown_expired() {
            // Cooperative yield — the tick timer decrements the countdown.
            unsafe { esp_idf_svc::sys::vTaskDelay(1) };
        }
    }

    /// Host fallback: wall-clock sleep of the same length.
    #[cfg(not(target_os = "espidf"))]
    fn wait_ticks(&mut self, ticks: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ticks)));
    }
}
