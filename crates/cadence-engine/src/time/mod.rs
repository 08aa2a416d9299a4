//! Time subsystem.
//!
//! Provides the two building blocks of the dual-clock loop without coupling to
//! the runtime:
//! - `PhaseClock`: one stopwatch per loop phase (frame, fixed)
//! - `Rates`: desired intervals plus the fixed-step fluctuation tolerance

mod phase_clock;
mod rates;

pub use phase_clock::PhaseClock;
pub use rates::Rates;
