//! Event keys, erased payloads, and the typed kind mapping.

mod event;
mod kind;
mod payload;

pub use event::{EventType, WILDCARD};
pub use kind::EventKind;
pub use payload::Payload;
