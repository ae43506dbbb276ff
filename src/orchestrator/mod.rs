//! Application-level orchestration.
//!
//! This module owns the run lifecycle (device acquisition, setup, loop,
//! teardown) and the termination flag fed by the signal listener. The CLI
//! layer calls into it once the arguments are parsed.

mod controller;
mod signals;

pub use controller::Runner;
pub use signals::Termination;
