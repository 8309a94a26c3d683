//! # Compile-time event-to-payload mapping.
//!
//! [`EventKind`] associates an event name with its payload type at compile
//! time. The registry itself stays dynamically keyed (see
//! [`Registry`](crate::Registry)), but typed entry points —
//! [`Emitter::emit_kind`](crate::Emitter::emit_kind),
//! [`Handler::typed`](crate::Handler::typed) — route through the mapping so
//! callers never spell out downcasts by hand.
//!
//! ## Example
//! ```rust
//! use emitly::{EventKind, EventType};
//!
//! struct TaskStarted;
//!
//! impl EventKind for TaskStarted {
//!     const NAME: &'static str = "task.started";
//!     type Payload = String;
//! }
//!
//! assert_eq!(TaskStarted::event_type(), EventType::from("task.started"));
//! ```

use std::any::Any;
use std::fmt;

use crate::events::event::EventType;

/// Associates an event name with the payload type carried under it.
///
/// Implement on a marker type per event channel. `NAME` must not be the
/// wildcard marker; the wildcard has no single payload type.
pub trait EventKind: 'static {
    /// Registry key this kind is published under.
    const NAME: &'static str;

    /// Payload type carried by emissions of this kind.
    type Payload: Any + fmt::Debug + Send + Sync;

    /// The registry key as an [`EventType`].
    fn event_type() -> EventType {
        EventType::from_static(Self::NAME)
    }
}
