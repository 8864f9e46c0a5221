//! Color values and cylindrical color-space conversions.
//!
//! Channels are canonically `f32` in `[0, 1]`, clamped on every write.
//! Byte-oriented callers construct through [`Color::from_rgba8`] instead of
//! relying on wraparound arithmetic.

mod color;

pub use color::{Color, Hsl, Hsv};
