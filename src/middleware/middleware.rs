//! # Middleware trait and per-step outcome.
//!
//! Every emission flows through the middleware chain before any handler is
//! looked up. Each middleware sees the *current* `(event, payload)` pair —
//! already updated by earlier steps — and decides the emission's fate via
//! [`Flow`]:
//!
//! - [`Flow::Next`] — pass the pair through unchanged;
//! - [`Flow::Replace`] — adopt a new pair for all later middleware and for
//!   dispatch (handlers of the *replacement* type fire, not the original's);
//! - [`Flow::Cancel`] — drop the emission; no handler runs, `emit` returns
//!   `Ok`.
//!
//! Middleware runs strictly sequentially in registration order; each step is
//! awaited before the next starts, since each depends on the prior's output.
//!
//! ## Example
//! ```rust
//! use emitly::{Flow, Middleware, MiddlewareFn, Payload};
//!
//! // Append "!" to string payloads on the "foo" channel.
//! let shout = MiddlewareFn::arc("shout", |event, payload: Payload| async move {
//!     if event.as_str() == "foo" {
//!         if let Some(text) = payload.downcast_ref::<String>() {
//!             return Ok(Flow::Replace(event, Payload::new(format!("{text}!"))));
//!         }
//!     }
//!     Ok(Flow::Next)
//! });
//! assert_eq!(shout.name(), "shout");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::events::{EventType, Payload};

/// Outcome of one middleware step.
#[derive(Debug)]
pub enum Flow {
    /// Keep the current `(event, payload)` pair.
    Next,
    /// Replace the pair for all subsequent middleware and for dispatch.
    Replace(EventType, Payload),
    /// Cancel the emission; nothing is dispatched.
    Cancel,
}

/// Contract for emission middleware.
#[async_trait]
pub trait Middleware: Send + Sync + 'static {
    /// Inspect (and possibly redirect or cancel) one in-flight emission.
    ///
    /// An `Err` aborts the emission and surfaces to the `emit` caller as
    /// [`EmitError::Middleware`](crate::EmitError::Middleware).
    async fn apply(&self, event: &EventType, payload: &Payload) -> Result<Flow, HandlerError>;

    /// Human-readable name (for logs and error reports).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

type BoxFlowFuture = Pin<Box<dyn Future<Output = Result<Flow, HandlerError>> + Send>>;
type ErasedFn = Box<dyn Fn(EventType, Payload) -> BoxFlowFuture + Send + Sync>;

/// Closure-backed middleware implementation.
pub struct MiddlewareFn {
    name: Cow<'static, str>,
    f: ErasedFn,
}

impl MiddlewareFn {
    /// Creates a new closure-backed middleware.
    ///
    /// Prefer [`MiddlewareFn::arc`] when you immediately need the shared
    /// handle that [`Emitter::use_middleware`](crate::Emitter::use_middleware)
    /// takes.
    pub fn new<F, Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(EventType, Payload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Flow, HandlerError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            f: Box::new(move |event, payload| Box::pin(f(event, payload)) as BoxFlowFuture),
        }
    }

    /// Creates the middleware and returns it as a shared handle.
    pub fn arc<F, Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self>
    where
        F: Fn(EventType, Payload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Flow, HandlerError>> + Send + 'static,
    {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl Middleware for MiddlewareFn {
    async fn apply(&self, event: &EventType, payload: &Payload) -> Result<Flow, HandlerError> {
        (self.f)(event.clone(), payload.clone()).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
