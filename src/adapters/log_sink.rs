//! Event sink that writes structured application events to the serial log.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => info!("started in {:?}", state),
            AppEvent::StateChanged { from, to } => info!("state {:?} -> {:?}", from, to),
            AppEvent::DrainOverrideEngaged => warn!("drain override ENGAGED — forced draining"),
            AppEvent::DrainOverrideCleared => info!("drain override cleared — parked in AllStop"),
            AppEvent::Telemetry(t) => info!(
                "state={:?} phase={:?} level={:?} interval={}ms duration={}ms drain={}ms override={} fill={} drain_relay={}",
                t.state,
                t.phase,
                t.level,
                t.timing.cycle_interval_ms,
                t.timing.cycle_duration_ms,
                t.timing.drain_duration_ms,
                t.drain_override,
                t.fill_on,
                t.drain_on,
            ),
        }
    }
}
