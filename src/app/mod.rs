//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the livewell controller:
//! dial filtering, drain-override supervision, level debounce, and FSM
//! orchestration. All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable without
//! real peripherals.

pub mod events;
pub mod ports;
pub mod service;
