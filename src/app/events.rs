//! Outbound application events.
//!
//! The [`LivewellService`](super::service::LivewellService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. The only adapter
//! in this system writes them to the serial log; there is deliberately no
//! telemetry transport.

use crate::control::mapper::TimingConfig;
use crate::fsm::context::AerationPhase;
use crate::fsm::OperatingState;
use crate::sensors::level_switch::LevelReading;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The controller has started (carries the boot-decided state).
    Started(OperatingState),

    /// The FSM transitioned between states.
    StateChanged {
        from: OperatingState,
        to: OperatingState,
    },

    /// The drain dial dropped below the override threshold.
    DrainOverrideEngaged,

    /// The drain dial crossed back above the threshold; the controller was
    /// forced to `AllStop`.
    DrainOverrideCleared,

    /// Periodic state snapshot for the log.
    Telemetry(TelemetryData),
}

/// A point-in-time snapshot suitable for logging.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub state: OperatingState,
    pub phase: AerationPhase,
    pub level: LevelReading,
    pub timing: TimingConfig,
    pub drain_override: bool,
    pub fill_on: bool,
    pub drain_on: bool,
}
