use std::time::Duration;

use winit::window::Window;

use crate::render::{FrameTarget, RenderOutcome, Renderer};

use super::app::AppControl;

/// Data for one fixed update tick.
#[derive(Debug, Copy, Clone)]
pub struct UpdateCtx {
    /// Ticks still owed when this update runs, including this one.
    ///
    /// Stays near 1.0 when the loop keeps up; larger values mean this tick
    /// is part of a catch-up burst.
    pub delta: f64,

    /// Index of this tick since the engine started.
    pub tick: u64,

    /// Fixed duration of one tick.
    pub tick_interval: Duration,
}

/// Per-frame context passed to [`App::render`](super::App::render).
pub struct FrameCtx<'a, 'w> {
    pub renderer: &'a mut Renderer<'w>,

    /// Frames per second over the last sampled window.
    pub fps: u32,

    /// Ticks per second over the last sampled window.
    pub tps: u32,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    pub fn window(&self) -> &'w Window {
        self.renderer.window()
    }

    /// Clears, hands a [`FrameTarget`] to `draw`, and presents.
    ///
    /// A missing GPU context or a transient surface error skips the frame;
    /// a fatal surface error asks the runtime to exit.
    pub fn draw<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&mut FrameTarget<'_>),
    {
        match self.renderer.render_frame(draw) {
            RenderOutcome::Fatal => AppControl::Exit,
            RenderOutcome::Presented | RenderOutcome::Skipped => AppControl::Continue,
        }
    }
}
