//! Time subsystem.
//!
//! Pure timing pieces behind the fixed-timestep loop, decoupled from the
//! runtime so they can be driven with synthetic timestamps in tests:
//! - [`FixedStepper`] turns elapsed wall time into ticks owed and a render
//!   decision
//! - [`RateCounter`] samples ticks/frames over one-second windows

mod rate;
mod stepper;

pub use rate::RateCounter;
pub use stepper::{FixedStepper, StepPlan};
