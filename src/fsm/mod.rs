//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  StateTable                                               │
//! │  ┌─────────────────────────┬───────────┬────────────────┐ │
//! │  │ OperatingState           │ on_enter  │ on_update       │ │
//! │  ├─────────────────────────┼───────────┼────────────────┤ │
//! │  │ AllStop                  │ fn(ctx)   │ fn(ctx)->Opt<> │ │
//! │  │ RaiseLevel               │ fn(ctx)   │ fn(ctx)->Opt<> │ │
//! │  │ Aerate                   │ fn(ctx)   │ fn(ctx)->Opt<> │ │
//! │  │ RaiseLevelInDuration     │ fn(ctx)   │ fn(ctx)->Opt<> │ │
//! │  │ LowerLevel               │ fn(ctx)   │ fn(ctx)->Opt<> │ │
//! │  │ RaiseLevelBeforeAllStop  │ fn(ctx)   │ fn(ctx)->Opt<> │ │
//! │  └─────────────────────────┴───────────┴────────────────┘ │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Each control cycle the engine calls `on_update` for the **current**
//! state. If it returns `Some(next)`, the engine updates the current
//! pointer and runs `on_enter` for the next state. All handlers receive
//! `&mut ControlContext`, which carries the debounced level, the dial
//! durations, the aeration bookkeeping, and the relay command output.

pub mod context;
pub mod states;

use context::ControlContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of every operating mode the controller can be in.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OperatingState {
    AllStop = 0,
    RaiseLevel = 1,
    Aerate = 2,
    RaiseLevelInDuration = 3,
    LowerLevel = 4,
    RaiseLevelBeforeAllStop = 5,
}

impl OperatingState {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 6;

    /// Convert a `u8` index back to `OperatingState`. Panics on
    /// out-of-range in debug builds; returns `AllStop` in release — the
    /// designed fail-safe.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::AllStop,
            1 => Self::RaiseLevel,
            2 => Self::Aerate,
            3 => Self::RaiseLevelInDuration,
            4 => Self::LowerLevel,
            5 => Self::RaiseLevelBeforeAllStop,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::AllStop
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` actions — run exactly once per transition.
pub type StateActionFn = fn(&mut ControlContext);

/// Signature for the per-cycle update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut ControlContext) -> Option<OperatingState>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: OperatingState,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table and is driven by the service, which threads the
/// mutable [`ControlContext`] through every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `OperatingState as usize`.
    table: [StateDescriptor; OperatingState::COUNT],
    /// Index of the currently active state.
    current: usize,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; OperatingState::COUNT], initial: OperatingState) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut ControlContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one control cycle.
    pub fn tick(&mut self, ctx: &mut ControlContext) {
        if let Some(next) = (self.table[self.current].on_update)(ctx) {
            self.transition(next, ctx);
        }
    }

    /// Force an immediate transition — used when the drain override clears
    /// to jump to `AllStop` regardless of what `on_update` would decide.
    pub fn force_transition(&mut self, next: OperatingState, ctx: &mut ControlContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> OperatingState {
        OperatingState::from_index(self.current)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: OperatingState, ctx: &mut ControlContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        self.current = next_idx;
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
