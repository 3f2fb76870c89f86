//! Dial-to-duration mapping.
//!
//! Each filtered dial value becomes an operating duration through the
//! per-channel affine transform `duration_ms = (filtered * slope + offset)
//! / 1000`. The constants live in [`crate::config`] so recalibrating a dial
//! never touches control logic.
//!
//! The drain channel's low end is special-cased by the supervisor in
//! [`crate::safety`], not here — the mapper is a pure function.

use crate::config::{ChannelCal, SystemConfig};
use crate::sensors::pots::PotChannel;

/// Operating durations in milliseconds, continuously recomputed from the
/// dials. Written only by the mapper path in the service; the state machine
/// reads them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimingConfig {
    /// Rest time between aeration bursts.
    pub cycle_interval_ms: u32,
    /// Length of one aeration burst.
    pub cycle_duration_ms: u32,
    /// Drain time after a detected level drop.
    pub drain_duration_ms: u32,
}

pub struct DurationMapper {
    cal: [ChannelCal; PotChannel::COUNT],
}

impl DurationMapper {
    pub fn new(config: &SystemConfig) -> Self {
        Self { cal: config.cal }
    }

    /// Map one filtered dial value to a duration in milliseconds.
    ///
    /// All arithmetic is u32; the worst-case intermediate
    /// (`1023 * slope + offset`) fits, as the config tests pin down.
    pub fn map(&self, channel: PotChannel, filtered: u16) -> u32 {
        let cal = self.cal[channel.index()];
        (u32::from(filtered) * cal.slope + cal.offset) / 1000
    }
}
