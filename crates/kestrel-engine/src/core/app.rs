use winit::event::WindowEvent;

use super::ctx::{FrameCtx, UpdateCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the host.
///
/// `update` runs at the engine's fixed tick rate (zero or more times per
/// callback, catching up after slow frames); `render` runs at most once per
/// callback, gated by the frame-rate limit. Asynchronous setup (shader or
/// resource loading) must complete before the runtime starts — the loop
/// never awaits.
pub trait App {
    /// Called for raw window events.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// One fixed simulation tick.
    fn update(&mut self, ctx: &UpdateCtx);

    /// One rendered frame.
    fn render(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
