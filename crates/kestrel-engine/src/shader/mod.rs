//! Shader and pipeline lifecycle.
//!
//! [`Shader`] wraps one shader module with an explicit create/compile/delete
//! lifecycle. Compilation never panics on bad source: it runs inside a
//! validation error scope and returns a [`CompileReport`] — the caller
//! decides whether a failure is fatal. [`Program`] links a vertex+fragment
//! pair into a render pipeline with the engine's default primitive and
//! depth state.

mod program;
mod shader;

pub use program::{LinkReport, Program, ProgramInit};
pub use shader::{CompileReport, Shader, ShaderStage};
