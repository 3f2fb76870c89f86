//! Fill/drain pump relay driver.
//!
//! Two relays, each with a paired indicator lamp that mirrors it 1:1. The
//! relay board inputs are active-LOW (energise = drive the pin low); the
//! lamps are active-HIGH. Callers only ever speak in terms of on/off — the
//! polarity lives here and nowhere else.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct PumpRelays {
    fill_on: bool,
    drain_on: bool,
}

impl PumpRelays {
    /// Both relays released.
    pub fn new() -> Self {
        Self {
            fill_on: false,
            drain_on: false,
        }
    }

    /// Energise or release the spray/fill pump relay (and its lamp).
    pub fn set_fill(&mut self, on: bool) {
        hw_init::gpio_write(pins::FILL_RELAY_GPIO, !on); // active-low
        hw_init::gpio_write(pins::FILL_LED_GPIO, on);
        self.fill_on = on;
    }

    /// Energise or release the drain pump relay (and its lamp).
    pub fn set_drain(&mut self, on: bool) {
        hw_init::gpio_write(pins::DRAIN_RELAY_GPIO, !on); // active-low
        hw_init::gpio_write(pins::DRAIN_LED_GPIO, on);
        self.drain_on = on;
    }

    /// Release both relays — safe shutdown.
    pub fn release_all(&mut self) {
        self.set_fill(false);
        self.set_drain(false);
    }

    pub fn fill_on(&self) -> bool {
        self.fill_on
    }

    pub fn drain_on(&self) -> bool {
        self.drain_on
    }
}
