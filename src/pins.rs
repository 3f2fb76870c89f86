//! GPIO / peripheral pin assignments for the livewell controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Float switch (binary level sensor)
// ---------------------------------------------------------------------------

/// Digital input with internal pull-up. The switch closes to ground, so a
/// LOW (asserted) reading means the tank level is below the float — Empty.
/// Polarity is a wiring artifact and must not be reinterpreted; see
/// [`crate::sensors::level_switch`].
pub const FLOAT_SWITCH_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Potentiometers — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Cycle-interval dial (0–10 minutes full sweep). ADC1 channel 4.
pub const POT_CYCLE_INTERVAL_GPIO: i32 = 5;
/// Cycle-duration dial (0–10 minutes full sweep). ADC1 channel 5.
pub const POT_CYCLE_DURATION_GPIO: i32 = 6;
/// Drain-duration dial (0–10 seconds full sweep; fully CCW = forced drain).
/// ADC1 channel 6.
pub const POT_DRAIN_DURATION_GPIO: i32 = 7;

/// ADC attenuation for the pot dividers (11 dB → 0 – 3.1 V range).
pub const POT_ADC_ATTEN: u32 = 3; // adc_atten_t_ADC_ATTEN_DB_11

// ---------------------------------------------------------------------------
// Relay outputs
// ---------------------------------------------------------------------------

/// Spray/fill pump relay. The relay board input is active-LOW.
pub const FILL_RELAY_GPIO: i32 = 15;
/// Drain pump relay. The relay board input is active-LOW.
pub const DRAIN_RELAY_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// Indicator LEDs (all active-HIGH)
// ---------------------------------------------------------------------------

/// Mirrors the fill relay 1:1.
pub const FILL_LED_GPIO: i32 = 17;
/// Mirrors the drain relay 1:1.
pub const DRAIN_LED_GPIO: i32 = 18;
/// Lit while the raw float switch reads Empty (wiring aid, not debounced).
pub const LEVEL_LED_GPIO: i32 = 8;
/// Heartbeat — toggled from the tick timer to show the loop is alive.
pub const STATUS_LED_GPIO: i32 = 9;
