//! Application service — the hexagonal core.
//!
//! [`LivewellService`] owns the FSM, the dial filter/mapper pipeline, the
//! level debouncer, and the drain-override supervisor. It exposes a clean,
//! hardware-agnostic API; all I/O flows through port traits injected at call
//! sites, making the entire control cycle testable with mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!    DelayPort ──▶ │        LivewellService        │
//!                  │  Filter · Mapper · Debounce   │
//! ActuatorPort ◀── │  DrainOverride · FSM          │
//!                  └──────────────────────────────┘
//! ```
//!
//! One call to [`LivewellService::tick`] is one full control cycle:
//! refresh dial durations → mirror the raw level lamp → (frozen drain-only
//! posture if the override is engaged) → debounce the level → advance the
//! FSM → apply relay commands.

use log::info;

use crate::config::SystemConfig;
use crate::control::filter::SampleFilter;
use crate::control::mapper::{DurationMapper, TimingConfig};
use crate::fsm::context::{AerationPhase, ControlContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, OperatingState};
use crate::safety::{DrainOverride, OverrideEdge};
use crate::sensors::debounce::LevelDebouncer;
use crate::sensors::level_switch::LevelReading;
use crate::sensors::pots::PotChannel;

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, DelayPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// LivewellService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct LivewellService {
    fsm: Fsm,
    ctx: ControlContext,
    filter: SampleFilter,
    mapper: DurationMapper,
    debouncer: LevelDebouncer,
    drain_override: DrainOverride,
}

impl LivewellService {
    /// Construct the service from configuration.
    ///
    /// Does **not** decide the initial operating state — call [`start`]
    /// next, which performs the boot read-and-filter pass first.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), OperatingState::AllStop),
            ctx: ControlContext::new(),
            filter: SampleFilter::new(),
            mapper: DurationMapper::new(config),
            debouncer: LevelDebouncer::new(config.debounce_settle_ticks),
            drain_override: DrainOverride::new(config.drain_override_threshold),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Boot sequence: one full dial read-and-filter pass (the durations are
    /// undefined until it completes), then the debounced level picks the
    /// initial state — Empty starts a fill, Full goes straight into an
    /// aeration burst with both stamps set to now.
    pub fn start(
        &mut self,
        now_ms: u32,
        hw: &mut (impl SensorPort + ActuatorPort + DelayPort),
        sink: &mut impl EventSink,
    ) {
        self.ctx.now_ms = now_ms;
        let edge = self.refresh_durations(hw);

        let initial = if self.debouncer.read(hw) == LevelReading::Empty {
            OperatingState::RaiseLevel
        } else {
            self.ctx.phase = AerationPhase::DurationActive;
            self.ctx.t_aerate = now_ms;
            self.ctx.t_lower = now_ms;
            OperatingState::Aerate
        };

        self.fsm.start(&mut self.ctx);
        self.fsm.force_transition(initial, &mut self.ctx);

        if let OverrideEdge::Engaged = edge {
            sink.emit(&AppEvent::DrainOverrideEngaged);
        }
        if self.drain_override.is_engaged() {
            // Dial was already at forced-drain when power came up.
            self.apply_drain_only(hw);
        } else {
            self.apply_actuators(hw);
        }

        sink.emit(&AppEvent::Started(initial));
        info!("controller started in {:?}", initial);
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle.
    ///
    /// The `hw` parameter satisfies all three driven ports — this avoids a
    /// double mutable borrow while keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl SensorPort + ActuatorPort + DelayPort),
        sink: &mut impl EventSink,
    ) {
        self.ctx.now_ms = now_ms;

        // 1. Refresh the dial-derived durations and the override latch.
        match self.refresh_durations(hw) {
            OverrideEdge::Engaged => sink.emit(&AppEvent::DrainOverrideEngaged),
            OverrideEdge::Cleared => {
                // Leaving forced drain parks the controller in AllStop —
                // once, on the edge.
                self.fsm.force_transition(OperatingState::AllStop, &mut self.ctx);
                sink.emit(&AppEvent::DrainOverrideCleared);
            }
            OverrideEdge::None => {}
        }

        // 2. The level lamp mirrors the raw (undebounced) float reading.
        let raw = hw.read_level_raw();
        hw.set_level_indicator(raw == LevelReading::Empty);

        // 3. Forced drain preempts everything: drain-only posture, FSM and
        //    all bookkeeping frozen.
        if self.drain_override.is_engaged() {
            self.apply_drain_only(hw);
            return;
        }

        // 4. Debounce the level for this cycle (blocks ≤ two settle waits).
        self.ctx.level = self.debouncer.read(hw);

        // 5. Advance the state machine.
        let prev = self.fsm.current_state();
        self.fsm.tick(&mut self.ctx);

        // 6. Apply the resulting relay commands.
        self.apply_actuators(hw);

        let current = self.fsm.current_state();
        if current != prev {
            sink.emit(&AppEvent::StateChanged {
                from: prev,
                to: current,
            });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn state(&self) -> OperatingState {
        self.fsm.current_state()
    }

    /// Current aeration phase (meaningful while in `Aerate`).
    pub fn phase(&self) -> AerationPhase {
        self.ctx.phase
    }

    /// Latest dial-derived durations.
    pub fn timing(&self) -> TimingConfig {
        self.ctx.timing
    }

    /// True while the forced-drain override is in force.
    pub fn is_draining(&self) -> bool {
        self.drain_override.is_engaged()
    }

    /// Build a telemetry snapshot from the current context.
    pub fn telemetry(&self) -> TelemetryData {
        TelemetryData {
            state: self.fsm.current_state(),
            phase: self.ctx.phase,
            level: self.ctx.level,
            timing: self.ctx.timing,
            drain_override: self.drain_override.is_engaged(),
            fill_on: self.ctx.commands.fill,
            drain_on: self.ctx.commands.drain,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// One blocking conversion of all three dials, filtered and mapped into
    /// `ctx.timing`. While the override is engaged the drain duration keeps
    /// its last dialled value (the window still fills underneath).
    fn refresh_durations(&mut self, hw: &mut impl SensorPort) -> OverrideEdge {
        let raw = hw.read_pots_raw();

        let interval = self
            .filter
            .update(PotChannel::CycleInterval, raw[PotChannel::CycleInterval.index()]);
        self.ctx.timing.cycle_interval_ms = self.mapper.map(PotChannel::CycleInterval, interval);

        let duration = self
            .filter
            .update(PotChannel::CycleDuration, raw[PotChannel::CycleDuration.index()]);
        self.ctx.timing.cycle_duration_ms = self.mapper.map(PotChannel::CycleDuration, duration);

        let drain = self
            .filter
            .update(PotChannel::DrainDuration, raw[PotChannel::DrainDuration.index()]);
        let edge = self.drain_override.evaluate(drain);
        if !self.drain_override.is_engaged() {
            self.ctx.timing.drain_duration_ms = self.mapper.map(PotChannel::DrainDuration, drain);
        }
        edge
    }

    /// Translate FSM relay commands into port calls.
    fn apply_actuators(&self, hw: &mut impl ActuatorPort) {
        hw.set_fill(self.ctx.commands.fill);
        hw.set_drain(self.ctx.commands.drain);
    }

    /// The forced-drain posture: drain energised, fill locked out.
    fn apply_drain_only(&self, hw: &mut impl ActuatorPort) {
        hw.set_fill(false);
        hw.set_drain(true);
    }
}
