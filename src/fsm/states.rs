//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap. The transition rules:
//!
//! ```text
//!  RAISE_LEVEL ───[level Full]──▶ AERATE (IntervalWait, all-stop)
//!                                   │
//!                        [interval elapsed]
//!                                   ▼
//!                        AERATE (DurationActive, both pumps)
//!                         │                     │
//!              [duration elapsed]        [level drops]
//!                         ▼                     ▼
//!          RAISE_LEVEL_B4_ALL_STOP        LOWER_LEVEL
//!                         │                     │
//!                  [level Full]         [drain time elapsed]
//!                         ▼                     ▼
//!          AERATE (IntervalWait)      RAISE_LEVEL_IN_DURATION
//!                                               │
//!                                        [level Full]
//!                                               ▼
//!                                  AERATE (DurationActive resumes)
//!
//!  ALL_STOP: parked — entered only via the drain-override clear.
//! ```
//!
//! Elapsed-time checks go through the wraparound-safe helpers on the
//! context; the tick counter wrapping at `u32::MAX` is ordinary operation,
//! not an error.

use super::context::{AerationPhase, ControlContext, RelayCommands};
use super::{OperatingState, StateDescriptor};
use crate::sensors::level_switch::LevelReading;
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; OperatingState::COUNT] {
    [
        // Index 0 — AllStop
        StateDescriptor {
            id: OperatingState::AllStop,
            name: "AllStop",
            on_enter: Some(all_stop_enter),
            on_update: all_stop_update,
        },
        // Index 1 — RaiseLevel
        StateDescriptor {
            id: OperatingState::RaiseLevel,
            name: "RaiseLevel",
            on_enter: Some(raise_level_enter),
            on_update: raise_level_update,
        },
        // Index 2 — Aerate
        StateDescriptor {
            id: OperatingState::Aerate,
            name: "Aerate",
            on_enter: Some(aerate_enter),
            on_update: aerate_update,
        },
        // Index 3 — RaiseLevelInDuration
        StateDescriptor {
            id: OperatingState::RaiseLevelInDuration,
            name: "RaiseLevelInDuration",
            on_enter: Some(raise_level_in_duration_enter),
            on_update: raise_level_in_duration_update,
        },
        // Index 4 — LowerLevel
        StateDescriptor {
            id: OperatingState::LowerLevel,
            name: "LowerLevel",
            on_enter: Some(lower_level_enter),
            on_update: lower_level_update,
        },
        // Index 5 — RaiseLevelBeforeAllStop
        StateDescriptor {
            id: OperatingState::RaiseLevelBeforeAllStop,
            name: "RaiseLevelBeforeAllStop",
            on_enter: Some(raise_level_before_all_stop_enter),
            on_update: raise_level_before_all_stop_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  ALL_STOP — parked, both relays released
// ═══════════════════════════════════════════════════════════════════════════

fn all_stop_enter(ctx: &mut ControlContext) {
    ctx.commands = RelayCommands::all_stop();
}

fn all_stop_update(ctx: &mut ControlContext) -> Option<OperatingState> {
    // Re-assert the safe posture every cycle; nothing leaves this state
    // except the force-transition from the override-clear path.
    ctx.commands = RelayCommands::all_stop();
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  RAISE_LEVEL — initial fill, waiting for the float to come up
// ═══════════════════════════════════════════════════════════════════════════

fn raise_level_enter(ctx: &mut ControlContext) {
    ctx.commands = RelayCommands::raise_level();
}

fn raise_level_update(ctx: &mut ControlContext) -> Option<OperatingState> {
    if ctx.level == LevelReading::Full {
        // Tank is up: rest first, then run the first burst.
        ctx.t_aerate = ctx.now_ms;
        ctx.phase = AerationPhase::IntervalWait;
        info!("tank full, resting for {} ms", ctx.timing.cycle_interval_ms);
        return Some(OperatingState::Aerate);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  AERATE — interval/burst cycling, with level-drop detection
// ═══════════════════════════════════════════════════════════════════════════

fn aerate_enter(ctx: &mut ControlContext) {
    // The entry posture depends on where the cycle stands: resting between
    // bursts means everything off, an active burst means both pumps on.
    ctx.commands = match ctx.phase {
        AerationPhase::DurationActive => RelayCommands::aerate(),
        AerationPhase::IntervalWait | AerationPhase::Idle => RelayCommands::all_stop(),
    };
}

fn aerate_update(ctx: &mut ControlContext) -> Option<OperatingState> {
    match ctx.phase {
        AerationPhase::IntervalWait => {
            if ctx.since_aerate() > ctx.timing.cycle_interval_ms {
                ctx.phase = AerationPhase::DurationActive;
                ctx.t_aerate = ctx.now_ms;
                ctx.commands = RelayCommands::aerate();
                info!("burst started for {} ms", ctx.timing.cycle_duration_ms);
            }
            None
        }
        AerationPhase::DurationActive => {
            if ctx.since_aerate() > ctx.timing.cycle_duration_ms {
                // Burst over — top the tank back up, then park.
                return Some(OperatingState::RaiseLevelBeforeAllStop);
            }
            if ctx.level == LevelReading::Empty {
                // Level is genuinely falling: pump-out exceeds pump-in.
                ctx.t_lower = ctx.now_ms;
                return Some(OperatingState::LowerLevel);
            }
            None
        }
        AerationPhase::Idle => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  RAISE_LEVEL_IN_DURATION — refilling mid-burst after a timed drain
// ═══════════════════════════════════════════════════════════════════════════

fn raise_level_in_duration_enter(ctx: &mut ControlContext) {
    ctx.commands = RelayCommands::raise_level();
}

fn raise_level_in_duration_update(ctx: &mut ControlContext) -> Option<OperatingState> {
    if ctx.level == LevelReading::Full {
        // Phase is still DurationActive, so re-entering Aerate resumes the
        // burst where it left off — t_aerate is deliberately not restamped.
        return Some(OperatingState::Aerate);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  LOWER_LEVEL — timed drain after a detected drop
// ═══════════════════════════════════════════════════════════════════════════

fn lower_level_enter(ctx: &mut ControlContext) {
    ctx.commands = RelayCommands::lower_level();
}

fn lower_level_update(ctx: &mut ControlContext) -> Option<OperatingState> {
    if ctx.since_lower() > ctx.timing.drain_duration_ms {
        return Some(OperatingState::RaiseLevelInDuration);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  RAISE_LEVEL_B4_ALL_STOP — final top-up before the next rest period
// ═══════════════════════════════════════════════════════════════════════════

fn raise_level_before_all_stop_enter(ctx: &mut ControlContext) {
    ctx.commands = RelayCommands::raise_level();
}

fn raise_level_before_all_stop_update(ctx: &mut ControlContext) -> Option<OperatingState> {
    if ctx.level == LevelReading::Full {
        ctx.phase = AerationPhase::IntervalWait;
        ctx.t_aerate = ctx.now_ms;
        info!("tank topped up, resting for {} ms", ctx.timing.cycle_interval_ms);
        return Some(OperatingState::Aerate);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
