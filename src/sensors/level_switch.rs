//! Float switch — the binary tank level sensor.
//!
//! The switch is wired to a pull-up input and closes to ground when the
//! float drops, so the asserted (LOW) pin level means the tank is below the
//! float. That polarity is a wiring artifact of the board and is preserved
//! exactly; the rest of the firmware only ever sees the named
//! [`LevelReading`], never a raw bit.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the real GPIO level via hw_init helpers.
//! On host/test: reads a static `AtomicBool` for injection (defaults to
//! pin-high, i.e. Full — the quiescent posture).

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(not(target_os = "espidf"))]
static SIM_PIN_HIGH: AtomicBool = AtomicBool::new(true);

/// Inject the raw float switch state on simulation targets.
/// `high = true` reads as [`LevelReading::Full`].
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_pin_high(high: bool) {
    SIM_PIN_HIGH.store(high, Ordering::Relaxed);
}

/// Debounced or raw verdict of the float switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelReading {
    /// Water below the float — pin reads the asserted (LOW) level.
    Empty,
    /// Water at or above the float.
    Full,
}

pub struct LevelSwitch {
    _gpio: i32,
}

impl LevelSwitch {
    pub fn new(gpio: i32) -> Self {
        Self { _gpio: gpio }
    }

    /// One raw, undebounced reading.
    pub fn read_raw(&mut self) -> LevelReading {
        if self.pin_high() {
            LevelReading::Full
        } else {
            LevelReading::Empty
        }
    }

    #[cfg(target_os = "espidf")]
    fn pin_high(&self) -> bool {
        hw_init::gpio_read(pins::FLOAT_SWITCH_GPIO)
    }

    #[cfg(not(target_os = "espidf"))]
    fn pin_high(&self) -> bool {
        SIM_PIN_HIGH.load(Ordering::Relaxed)
    }
}
