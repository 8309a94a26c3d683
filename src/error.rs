//! Error types used by the emitter and by user handlers/middleware.
//!
//! This module defines two main error enums:
//!
//! - [`HandlerError`] — failures raised inside a handler or middleware body.
//! - [`EmitError`] — failures surfaced to the caller of
//!   [`Emitter::emit`](crate::Emitter::emit), wrapping the originating
//!   [`HandlerError`] with the event and the unit that failed.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics. Registration misuse (removing an absent handler, clearing
//! an empty type) is never an error: those operations are silent no-ops.

use thiserror::Error;

use crate::events::EventType;

/// # Errors produced inside a handler or middleware body.
///
/// User code returns these from [`Handle::invoke`](crate::Handle::invoke) and
/// [`Middleware::apply`](crate::Middleware::apply). The emitter does not retry
/// and does not isolate siblings: the failure travels to the `emit` caller.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Handler or middleware execution failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// A typed handler received a payload of an unexpected type
    /// (usually after a middleware rewrote the emission).
    #[error("payload type mismatch: expected {expected}")]
    PayloadMismatch {
        /// Type name the handler expected.
        expected: &'static str,
    },
}

impl HandlerError {
    /// Shorthand for [`HandlerError::Fail`] from any displayable error.
    pub fn fail(error: impl std::fmt::Display) -> Self {
        HandlerError::Fail {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use emitly::HandlerError;
    ///
    /// let err = HandlerError::fail("boom");
    /// assert_eq!(err.as_label(), "handler_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Fail { .. } => "handler_failed",
            HandlerError::PayloadMismatch { .. } => "payload_mismatch",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Fail { error } => format!("error: {error}"),
            HandlerError::PayloadMismatch { expected } => {
                format!("payload mismatch: expected {expected}")
            }
        }
    }
}

/// # Errors surfaced by [`Emitter::emit`](crate::Emitter::emit).
///
/// Each variant names the event being dispatched and the handler or
/// middleware that failed; the originating [`HandlerError`] is attached as
/// the error source.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EmitError {
    /// A handler failed while processing the emission.
    ///
    /// Sibling handlers of the same emission still run to completion; only
    /// the first failure (in registration order) is carried here.
    #[error("handler '{handler}' failed for event '{event}': {source}")]
    Handler {
        /// Event the handler was invoked for (after middleware rewrites).
        event: EventType,
        /// Name of the failing handler.
        handler: String,
        /// The underlying handler error.
        source: HandlerError,
    },

    /// A middleware failed; the emission was aborted before dispatch.
    #[error("middleware '{middleware}' failed for event '{event}': {source}")]
    Middleware {
        /// Event the middleware was inspecting when it failed.
        event: EventType,
        /// Name of the failing middleware.
        middleware: String,
        /// The underlying middleware error.
        source: HandlerError,
    },
}

impl EmitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use emitly::{EmitError, EventType, HandlerError};
    ///
    /// let err = EmitError::Middleware {
    ///     event: EventType::from("task.started"),
    ///     middleware: "auth".into(),
    ///     source: HandlerError::fail("denied"),
    /// };
    /// assert_eq!(err.as_label(), "emit_middleware_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitError::Handler { .. } => "emit_handler_failed",
            EmitError::Middleware { .. } => "emit_middleware_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EmitError::Handler { event, handler, source } => {
                format!("handler '{handler}' on '{event}': {}", source.as_message())
            }
            EmitError::Middleware { event, middleware, source } => {
                format!("middleware '{middleware}' on '{event}': {}", source.as_message())
            }
        }
    }

    /// The [`HandlerError`] this emit failure wraps.
    pub fn source_error(&self) -> &HandlerError {
        match self {
            EmitError::Handler { source, .. } | EmitError::Middleware { source, .. } => source,
        }
    }
}
