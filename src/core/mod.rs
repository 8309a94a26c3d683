//! Emitter construction and dispatch.

mod emitter;

pub use emitter::Emitter;
