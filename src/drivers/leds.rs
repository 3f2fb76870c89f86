//! Standalone indicator lamps.
//!
//! The relay lamps live with the relays in [`crate::drivers::relay`]; the
//! heartbeat lamp is toggled directly from the tick timer callback (see
//! [`crate::drivers::hw_timer`]). What remains is the level indicator: lit
//! while the raw float switch reads Empty, as a wiring/installation aid.

use crate::drivers::hw_init;
use crate::pins;

pub struct LevelLed {
    lit: bool,
}

impl LevelLed {
    pub fn new() -> Self {
        Self { lit: false }
    }

    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(pins::LEVEL_LED_GPIO, on);
        self.lit = on;
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
