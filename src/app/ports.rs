//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ LivewellService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, delays, event sinks) implement these
//! traits. The [`LivewellService`](super::service::LivewellService) consumes
//! them via generics, so the domain core never touches hardware directly and
//! never depends on how the tick source or ADC capture is wired — only on
//! their contracts.

use crate::sensors::level_switch::LevelReading;
use crate::sensors::pots::PotChannel;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain raw sensor data.
pub trait SensorPort {
    /// One raw, undebounced float switch reading.
    fn read_level_raw(&mut self) -> LevelReading;

    /// One blocking conversion of all three dial channels, in
    /// [`PotChannel`] order. Counts are 0–1023.
    fn read_pots_raw(&mut self) -> [u16; PotChannel::COUNT];
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the relays and lamps.
/// Each relay's paired indicator LED mirrors it 1:1 inside the adapter.
pub trait ActuatorPort {
    /// Energise or release the spray/fill pump relay.
    fn set_fill(&mut self, on: bool);

    /// Energise or release the drain pump relay.
    fn set_drain(&mut self, on: bool);

    /// Drive the raw-level indicator lamp (lit while the float reads Empty).
    fn set_level_indicator(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Delay port (suspension primitive for the debounce waits)
// ───────────────────────────────────────────────────────────────

/// Suspend-with-timeout primitive. On hardware this arms the
/// [`crate::timebase`] countdown and cooperatively yields until it expires;
/// in tests it is a mock that records the requested waits. This replaces the
/// original busy-wait so the debounce protocol does not monopolise the
/// processor, while keeping the three-sample/two-wait rule intact.
pub trait DelayPort {
    /// Block the control task for `ticks` milliseconds.
    fn wait_ticks(&mut self, ticks: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log today;
/// nothing else is in scope).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
