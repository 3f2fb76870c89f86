//! System configuration parameters.
//!
//! All tunable parameters for the livewell controller. The calibration table
//! is keyed by [`PotChannel`] so the dials can be recalibrated without
//! touching control logic. There is no persistence — every boot starts from
//! these defaults.

use serde::{Deserialize, Serialize};

use crate::sensors::pots::PotChannel;

/// Affine calibration for one potentiometer channel.
///
/// `duration_ms = (filtered * slope + offset) / 1000`, computed in u32
/// arithmetic. The constants come from a linear regression fit that makes
/// the ADC counts match the time scale printed around each dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelCal {
    pub slope: u32,
    pub offset: u32,
}

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Dial calibration ---
    /// Per-channel affine constants, indexed by `PotChannel`.
    pub cal: [ChannelCal; PotChannel::COUNT],
    /// Filtered drain-dial value below which forced draining engages.
    pub drain_override_threshold: u16,

    // --- Level debounce ---
    /// Settle time between the three debounce reads (1 ms ticks).
    pub debounce_settle_ticks: u32,

    // --- Logging ---
    /// Interval between telemetry snapshots in the log (milliseconds).
    pub telemetry_interval_ms: u32,
}

impl SystemConfig {
    /// Calibration constants for one channel.
    pub fn cal_for(&self, channel: PotChannel) -> ChannelCal {
        self.cal[channel.index()]
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            cal: [
                // CycleInterval: full sweep ≈ 0–10 minutes (0–600,000 ms)
                ChannelCal {
                    slope: 557_074,
                    offset: 28_097_185,
                },
                // CycleDuration: full sweep ≈ 0–10 minutes
                ChannelCal {
                    slope: 554_866,
                    offset: 42_290_131,
                },
                // DrainDuration: full sweep ≈ 0–10 seconds (0–10,000 ms)
                ChannelCal {
                    slope: 9_211,
                    offset: 499_849,
                },
            ],
            drain_override_threshold: 6,
            debounce_settle_ticks: 5,
            telemetry_interval_ms: 5_000,
        }
    }
}
