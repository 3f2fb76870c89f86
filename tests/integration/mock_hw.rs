//! Mock hardware adapter for integration tests.
//!
//! Records every actuator call and delay so tests can assert on the full
//! command history without touching real GPIO/ADC, and serves scripted or
//! steady level readings to drive the debounce protocol.

use std::collections::VecDeque;

use livewell::app::events::AppEvent;
use livewell::app::ports::{ActuatorPort, DelayPort, EventSink, SensorPort};
use livewell::sensors::level_switch::LevelReading;
use livewell::sensors::pots::PotChannel;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    SetFill(bool),
    SetDrain(bool),
    SetLevelIndicator(bool),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Steady raw level served once the script runs dry.
    pub raw_level: LevelReading,
    /// Scripted raw readings, consumed first (mirror read included).
    pub level_script: VecDeque<LevelReading>,
    /// Raw dial counts returned by every conversion.
    pub pots: [u16; PotChannel::COUNT],
    pub calls: Vec<ActuatorCall>,
    pub waits: Vec<u32>,
    pub level_reads: usize,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            raw_level: LevelReading::Full,
            level_script: VecDeque::new(),
            pots: [512; PotChannel::COUNT],
            calls: Vec::new(),
            waits: Vec::new(),
            level_reads: 0,
        }
    }

    pub fn script_levels(&mut self, readings: &[LevelReading]) {
        self.level_script.extend(readings.iter().copied());
    }

    pub fn fill_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetFill(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn drain_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetDrain(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn level_indicator_on(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::SetLevelIndicator(on) => Some(*on),
            _ => None,
        })
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_level_raw(&mut self) -> LevelReading {
        self.level_reads += 1;
        self.level_script.pop_front().unwrap_or(self.raw_level)
    }

    fn read_pots_raw(&mut self) -> [u16; PotChannel::COUNT] {
        self.pots
    }
}

impl ActuatorPort for MockHardware {
    fn set_fill(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetFill(on));
    }

    fn set_drain(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetDrain(on));
    }

    fn set_level_indicator(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetLevelIndicator(on));
    }
}

impl DelayPort for MockHardware {
    fn wait_ticks(&mut self, ticks: u32) {
        self.waits.push(ticks);
    }
}

// ── Recording event sink ──────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn state_changes(&self) -> Vec<(String, String)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::StateChanged { from, to } => {
                    Some((format!("{from:?}"), format!("{to:?}")))
                }
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
