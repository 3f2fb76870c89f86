//! Forced-drain supervisor.
//!
//! Turning the drain dial fully counter-clockwise (filtered value below a
//! fixed threshold) asserts the drain override: the tank drains
//! continuously, the fill pump is locked out, and the state machine is
//! frozen — the override preempts every table entry. While asserted,
//! `drain_duration_ms` is not recomputed, so the last dialled value survives
//! the excursion.
//!
//! Clearing is **edge-triggered**: the first evaluation back above the
//! threshold reports [`OverrideEdge::Cleared`] exactly once, and the service
//! uses that edge to force the controller into `AllStop` so the forced-drain
//! condition is left cleanly.

use log::{info, warn};

/// What changed on this evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideEdge {
    /// No change in override state.
    None,
    /// The dial just dropped below the threshold.
    Engaged,
    /// The dial just crossed back above the threshold.
    Cleared,
}

pub struct DrainOverride {
    threshold: u16,
    engaged: bool,
}

impl DrainOverride {
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold,
            engaged: false,
        }
    }

    /// Evaluate the filtered drain-dial value and latch the override state.
    pub fn evaluate(&mut self, filtered_drain: u16) -> OverrideEdge {
        if filtered_drain < self.threshold {
            if !self.engaged {
                self.engaged = true;
                warn!("drain override engaged (dial at {filtered_drain})");
                return OverrideEdge::Engaged;
            }
            OverrideEdge::None
        } else if self.engaged {
            self.engaged = false;
            info!("drain override cleared (dial at {filtered_drain})");
            OverrideEdge::Cleared
        } else {
            OverrideEdge::None
        }
    }

    /// True while the override posture is in force.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }
}
