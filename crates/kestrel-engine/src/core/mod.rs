//! Core engine-facing contracts.
//!
//! [`Engine`] owns the fixed-timestep loop state (running/focused flags,
//! accumulators, rate counters); the window runtime drives it once per
//! scheduled callback. [`App`] is the stable contract between the runtime
//! and the host application.

mod app;
mod ctx;
mod engine;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, UpdateCtx};
pub use engine::{Engine, EngineConfig};
