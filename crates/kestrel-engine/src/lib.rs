//! Kestrel engine crate.
//!
//! A thin rendering toy-engine: a fixed-timestep loop, a window/surface
//! renderer, shader compilation helpers, a resource loader with optional
//! caching, and a color utility. The crate is a library driven by a host
//! application through [`window::Runtime::run`] and the [`core::App`]
//! contract.

pub mod core;
pub mod render;
pub mod shader;
pub mod time;
pub mod window;

pub mod color;
pub mod logging;
pub mod resources;
