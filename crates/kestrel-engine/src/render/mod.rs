//! Window surface + GPU context lifecycle.
//!
//! [`Renderer`] owns at most one GPU context, created lazily against a
//! window. Context-creation failure degrades rather than aborts: the
//! renderer logs the error and every subsequent frame or resize call
//! becomes a guarded no-op, so a host without a usable adapter still runs
//! its update loop.

mod context;
mod renderer;
mod surface;

pub use context::{DEPTH_FORMAT, FrameHandle, GpuContext};
pub use renderer::{FrameTarget, RenderOutcome, Renderer, RendererInit};
pub use surface::SurfaceErrorAction;
