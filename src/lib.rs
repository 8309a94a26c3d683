//! # emitly
//!
//! **Emitly** is a minimal typed publish/subscribe event emitter for Rust.
//!
//! It lets producers register handlers for named event types, emit events
//! with typed payloads, observe every emission through a wildcard
//! subscription, run emissions through a transform/cancel middleware chain,
//! and await completion of (possibly asynchronous) handlers. The crate is
//! designed as a building block for in-process plugin and notification
//! layers.
//!
//! ## Architecture
//! ### Overview
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  Emitter                                                       │
//! │  - Registry (EventType → insertion-ordered handler set)        │
//! │  - Once markers ((EventType, HandlerId) pairs)                 │
//! │  - Chain (ordered middleware slots)                            │
//! │  - debug flag                                                  │
//! └──────┬─────────────────────────────────────────────────────────┘
//!        │ emit(event, payload)
//!        ▼
//! ┌────────────────┐    ┌─────────────────────┐    ┌───────────────┐
//! │ middleware #1  │ ─► │ middleware #2       │ ─► │ middleware #N │
//! │ Next / Replace │    │ (sees current pair) │    │ Cancel ─► Ok  │
//! └────────────────┘    └─────────────────────┘    └──────┬────────┘
//!                                                         ▼
//!                       ┌──────────────────┐   ┌────────────────────┐
//!                       │ handlers[event]  │   │ handlers["*"]      │
//!                       │ (payload)        │   │ (event, payload)   │
//!                       └──────┬───────────┘   └─────────┬──────────┘
//!                              └───────► join_all ◄──────┘
//!                                   (wait for every handler,
//!                                    surface first failure)
//! ```
//!
//! ### Guarantees
//! - Registration is idempotent per registered instance; dispatch order
//!   within a type is registration order.
//! - Middleware runs strictly sequentially; handlers of one emission run
//!   concurrently with no mutual ordering, type-specific before wildcard.
//! - `emit` resolves only after **all** handlers of the emission completed;
//!   a failing handler never cancels its siblings, the first failure is
//!   surfaced to the caller.
//! - Dispatch iterates a snapshot: handlers added or removed mid-emission
//!   affect only future emissions.
//!
//! ## Features
//! | Area             | Description                                              | Key types / traits                     |
//! |------------------|----------------------------------------------------------|----------------------------------------|
//! | **Registration** | Subscribe, one-shot subscribe, remove, clear.            | [`Emitter`], [`Handler`]               |
//! | **Handlers**     | Closure-backed or trait-backed async handlers.           | [`Handle`], [`Handler`]                |
//! | **Wildcard**     | Observe every emission with `(event, payload)`.          | [`WILDCARD`], [`Handler::wildcard_fn`] |
//! | **Middleware**   | Rewrite or cancel emissions before dispatch.             | [`Middleware`], [`Flow`]               |
//! | **Typed events** | Compile-time event-to-payload mapping.                   | [`EventKind`], [`Handler::typed`]      |
//! | **Errors**       | Typed failures surfaced to the `emit` caller.            | [`EmitError`], [`HandlerError`]        |
//! | **Configuration**| Debug tracing, shared registries across emitters.        | [`EmitterConfig`]                      |
//!
//! ## Example
//! ```rust
//! use emitly::{Emitter, Flow, Handler, MiddlewareFn, Payload};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), emitly::EmitError> {
//!     let emitter = Emitter::new();
//!
//!     // Named subscription: receives the payload.
//!     let greeter = Handler::from_fn("greeter", |payload: Payload| async move {
//!         if let Some(name) = payload.downcast_ref::<&str>() {
//!             println!("hello, {name}");
//!         }
//!         Ok(())
//!     });
//!     emitter.on("greet", &greeter);
//!
//!     // Wildcard subscription: receives (event, payload) for every emission.
//!     let audit = Handler::wildcard_fn("audit", |event, payload| async move {
//!         println!("[audit] {event}: {payload:?}");
//!         Ok(())
//!     });
//!     emitter.on("*", &audit);
//!
//!     // Middleware: drop anything emitted on the "internal" channel.
//!     let guard = emitter.use_middleware(MiddlewareFn::arc("fence", |event, _payload| async move {
//!         if event.as_str() == "internal" {
//!             Ok(Flow::Cancel)
//!         } else {
//!             Ok(Flow::Next)
//!         }
//!     }));
//!
//!     emitter.emit("greet", Payload::new("world")).await?;
//!     emitter.emit("internal", Payload::empty()).await?; // fenced off
//!
//!     guard.unregister();
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod handlers;
mod middleware;

// ---- Public re-exports ----

pub use config::EmitterConfig;
pub use self::core::Emitter;
pub use error::{EmitError, HandlerError};
pub use events::{EventKind, EventType, Payload, WILDCARD};
pub use handlers::{BoxHandlerFuture, Handle, Handler, HandlerId, Registry};
pub use middleware::{Flow, Middleware, MiddlewareFn, MiddlewareGuard};
