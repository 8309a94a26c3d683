//! # Core handler trait and the identity-bearing handle.
//!
//! [`Handle`] is the extension point for plugging event handlers into the
//! emitter. Most callers never implement it directly: [`Handler::from_fn`],
//! [`Handler::wildcard_fn`], and [`Handler::typed`] wrap closures the same
//! way a hand-written impl would.
//!
//! ## Identity
//! Removal (`off`) and one-time tracking key on *which registered instance* a
//! handler is, not on value equality. [`Handler`] is a shared handle: clones
//! of one `Handler` are the same subscription ([`Handler::id`] is stable
//! across clones), while two independently constructed handlers are always
//! distinct even if built from identical closures.
//!
//! ## Example (trait impl)
//! ```rust
//! use emitly::{EventType, Handle, HandlerError, Payload};
//!
//! struct Audit;
//!
//! #[async_trait::async_trait]
//! impl Handle for Audit {
//!     async fn invoke(&self, event: &EventType, payload: Payload) -> Result<(), HandlerError> {
//!         let _ = (event, payload); // write audit record...
//!         Ok(())
//!     }
//!     fn name(&self) -> &str { "audit" }
//! }
//! ```

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::events::{EventKind, EventType, Payload};

/// Boxed future returned by closure-backed handlers.
pub type BoxHandlerFuture = Pin<Box<dyn Future<Output = Result<(), HandlerError>> + Send>>;

/// Contract for event handlers.
///
/// Handlers of one emission run concurrently; implementations should avoid
/// blocking the async runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Handle: Send + Sync + 'static {
    /// Handle a single emission.
    ///
    /// # Parameters
    /// - `event`: the (possibly middleware-rewritten) event key
    /// - `payload`: shared, type-erased payload
    async fn invoke(&self, event: &EventType, payload: Payload) -> Result<(), HandlerError>;

    /// Human-readable name (for logs and error reports).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Stable identity of a registered handler.
///
/// Derived from the handle's allocation; equal for clones of one [`Handler`],
/// distinct for separately constructed handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(usize);

/// Shared, identity-comparable handle around a [`Handle`] implementation.
#[derive(Clone)]
pub struct Handler {
    inner: Arc<dyn Handle>,
}

type ErasedFn = Box<dyn Fn(EventType, Payload) -> BoxHandlerFuture + Send + Sync>;

/// Closure-backed handler implementation.
struct HandlerFn {
    name: Cow<'static, str>,
    f: ErasedFn,
}

#[async_trait]
impl Handle for HandlerFn {
    async fn invoke(&self, event: &EventType, payload: Payload) -> Result<(), HandlerError> {
        (self.f)(event.clone(), payload).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Handler {
    /// Wraps an existing [`Handle`] implementation.
    pub fn new(handle: Arc<dyn Handle>) -> Self {
        Self { inner: handle }
    }

    /// Creates a handler from a payload-only closure.
    ///
    /// The closure produces a fresh future per invocation; shared state goes
    /// through an explicit `Arc` inside the closure.
    ///
    /// ## Example
    /// ```rust
    /// use emitly::{Handler, Payload};
    ///
    /// let h = Handler::from_fn("printer", |payload: Payload| async move {
    ///     println!("got {payload:?}");
    ///     Ok(())
    /// });
    /// assert_eq!(h.name(), "printer");
    /// ```
    pub fn from_fn<F, Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(Payload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        Self::new(Arc::new(HandlerFn {
            name: name.into(),
            f: Box::new(move |_event, payload| Box::pin(f(payload)) as BoxHandlerFuture),
        }))
    }

    /// Creates a handler from an `(event, payload)` closure.
    ///
    /// Intended for wildcard subscriptions, which receive the emitted type
    /// alongside the payload.
    pub fn wildcard_fn<F, Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(EventType, Payload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        Self::new(Arc::new(HandlerFn {
            name: name.into(),
            f: Box::new(move |event, payload| Box::pin(f(event, payload)) as BoxHandlerFuture),
        }))
    }

    /// Creates a handler for one [`EventKind`], downcasting the payload.
    ///
    /// A payload of the wrong concrete type (possible after a middleware
    /// rewrite) fails the invocation with
    /// [`HandlerError::PayloadMismatch`] instead of panicking.
    pub fn typed<K, F, Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        K: EventKind,
        F: Fn(Arc<K::Payload>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        Self::new(Arc::new(HandlerFn {
            name: name.into(),
            f: Box::new(move |_event, payload| match payload.downcast::<K::Payload>() {
                Some(value) => Box::pin(f(value)) as BoxHandlerFuture,
                None => Box::pin(async {
                    Err(HandlerError::PayloadMismatch {
                        expected: std::any::type_name::<K::Payload>(),
                    })
                }),
            }),
        }))
    }

    /// Identity of this subscription (stable across clones).
    #[must_use]
    pub fn id(&self) -> HandlerId {
        HandlerId(Arc::as_ptr(&self.inner) as *const () as usize)
    }

    /// Name of the underlying handle.
    #[must_use]
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Invokes the underlying handle directly.
    pub async fn invoke(&self, event: &EventType, payload: Payload) -> Result<(), HandlerError> {
        self.inner.invoke(event, payload).await
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name())
            .field("id", &self.id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Handler {
        Handler::from_fn("noop", |_payload| async { Ok(()) })
    }

    #[test]
    fn test_clone_shares_identity() {
        let h = noop();
        assert_eq!(h.id(), h.clone().id());
    }

    #[test]
    fn test_separate_handlers_are_distinct() {
        assert_ne!(noop().id(), noop().id());
    }
}
