//! # Erased event payloads.
//!
//! [`Payload`] carries one value of any `'static` type through the emitter:
//! the registry stores handlers for many distinct payload types behind one
//! structure, so the concrete type is erased at the emit call site and
//! recovered by the handler via [`Payload::downcast`].
//!
//! The `Debug` representation of the original value is captured at
//! construction (a monomorphized formatter fn), so debug tracing can still
//! print a payload after erasure.
//!
//! ## Example
//! ```rust
//! use emitly::Payload;
//!
//! let p = Payload::new(42u64);
//! assert_eq!(p.downcast::<u64>().as_deref(), Some(&42));
//! assert!(p.downcast::<String>().is_none());
//! assert_eq!(format!("{p:?}"), "42");
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

type DebugFn = fn(&(dyn Any + Send + Sync), &mut fmt::Formatter<'_>) -> fmt::Result;

fn debug_erased<T: Any + fmt::Debug>(
    value: &(dyn Any + Send + Sync),
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match value.downcast_ref::<T>() {
        Some(v) => fmt::Debug::fmt(v, f),
        None => f.write_str("<erased>"),
    }
}

/// Type-erased, cheaply clonable event payload.
///
/// Clones share the underlying value (`Arc`). Handlers recover the concrete
/// type with [`Payload::downcast`]; a mismatch returns `None` rather than
/// panicking, so middleware that rewrites payloads can never crash a handler.
#[derive(Clone)]
pub struct Payload {
    value: Arc<dyn Any + Send + Sync>,
    debug: DebugFn,
}

impl Payload {
    /// Wraps a value, erasing its type.
    pub fn new<T>(value: T) -> Self
    where
        T: Any + fmt::Debug + Send + Sync,
    {
        Self {
            value: Arc::new(value),
            debug: debug_erased::<T>,
        }
    }

    /// Payload for emissions that carry no data (wraps the unit value).
    pub fn empty() -> Self {
        Self::new(())
    }

    /// Recovers the concrete value as a shared handle.
    ///
    /// Returns `None` when the stored value is not a `T`.
    #[must_use]
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    /// Borrowing variant of [`Payload::downcast`].
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// True if the stored value is a `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.debug)(self.value.as_ref(), f)
    }
}
