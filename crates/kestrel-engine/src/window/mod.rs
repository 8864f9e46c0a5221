//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and window, and wires them to the engine:
//! redraw callbacks drive [`Engine::step`](crate::core::Engine::step),
//! focus events feed the pause flag, resize events re-sync the surface.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
