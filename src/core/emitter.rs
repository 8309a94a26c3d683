//! # Emitter — registration surface and the dispatch algorithm.
//!
//! One [`Emitter`] owns a handler registry, a one-time marker set, an ordered
//! middleware chain, and a debug flag.
//!
//! ## Dispatch pipeline
//! ```text
//! emit(event, payload)
//!   │
//!   ├─► debug trace (optional)
//!   │
//!   ├─► middleware pass (sequential, registration order)
//!   │     each step: Next | Replace(event', payload') | Cancel ─► return Ok
//!   │
//!   ├─► snapshot handlers (one critical section)
//!   │     ├─ type-specific set for the (rewritten) event
//!   │     ├─ wildcard set
//!   │     └─ consume one-time markers, drop marked handlers from live sets
//!   │
//!   └─► run all snapshot futures concurrently (type-specific first,
//!       then wildcard), wait for ALL, surface the first failure
//! ```
//!
//! ## Locking
//! Registry and marker set live behind `parking_lot` mutexes; no lock is held
//! across an await point. Only the snapshot section takes both locks, always
//! registry before markers.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future;
use parking_lot::Mutex;
use tracing::debug;

use crate::config::EmitterConfig;
use crate::error::EmitError;
use crate::events::{EventKind, EventType, Payload};
use crate::handlers::{Handler, HandlerId, Registry};
use crate::middleware::{Chain, Flow, Middleware, MiddlewareGuard};

/// One-time markers are scoped to the `(type, handler)` pair, so a handler
/// registered `once` on several types fires once per type, independently.
type OnceKey = (EventType, HandlerId);

/// Minimal typed publish/subscribe event emitter.
///
/// Registration (`on` / `once` / `off*` / `clear*` / `use_middleware`) is
/// synchronous and infallible; [`Emitter::emit`] is async and resolves after
/// every handler of the emission has completed.
pub struct Emitter {
    registry: Arc<Mutex<Registry>>,
    once: Mutex<HashSet<OnceKey>>,
    chain: Arc<Chain>,
    debug: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    /// Creates an emitter with a fresh registry and debug off.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Creates an emitter from explicit options.
    #[must_use]
    pub fn with_config(config: EmitterConfig) -> Self {
        let registry = config
            .registry
            .unwrap_or_else(|| Arc::new(Mutex::new(Registry::new())));
        Self {
            registry,
            once: Mutex::new(HashSet::new()),
            chain: Arc::new(Chain::new()),
            debug: config.debug,
        }
    }

    /// Shared handle to the underlying registry.
    ///
    /// Advanced callers may inspect or mutate it directly; pass it via
    /// [`EmitterConfig::registry`] to share subscriptions across emitters.
    #[must_use]
    pub fn registry(&self) -> Arc<Mutex<Registry>> {
        Arc::clone(&self.registry)
    }

    // ---------------------------
    // Registration
    // ---------------------------

    /// Subscribes `handler` to `event` (use `"*"` for every emission).
    ///
    /// Idempotent for the same registered instance; never fails.
    pub fn on(&self, event: impl Into<EventType>, handler: &Handler) {
        self.registry.lock().insert(event.into(), handler);
    }

    /// Subscribes `handler` to `event` for a single invocation.
    ///
    /// The handler fires on the first matching emission after registration
    /// and is removed from that type's set as it starts.
    pub fn once(&self, event: impl Into<EventType>, handler: &Handler) {
        let event = event.into();
        self.registry.lock().insert(event.clone(), handler);
        self.once.lock().insert((event, handler.id()));
    }

    /// Removes `handler` from `event`'s set and clears the pair's one-time
    /// marker. Removing an absent handler is a silent no-op.
    pub fn off(&self, event: impl Into<EventType>, handler: &Handler) {
        let event = event.into();
        self.registry.lock().remove(&event, handler.id());
        self.once.lock().remove(&(event, handler.id()));
    }

    /// Removes every handler registered under `event`.
    ///
    /// One-time markers are left untouched: a handler removed in bulk keeps
    /// a stale marker that applies again if it is re-registered on the same
    /// type. Use [`Emitter::off`] for marker-clean removal.
    pub fn off_all(&self, event: impl Into<EventType>) {
        self.registry.lock().clear_event(event.into());
    }

    /// Empties `event`'s handler set only (markers untouched).
    ///
    /// Same effect as [`Emitter::off_all`]; kept as the per-type form of
    /// [`Emitter::clear`].
    pub fn clear_event(&self, event: impl Into<EventType>) {
        self.registry.lock().clear_event(event.into());
    }

    /// Empties the entire registry (wildcard included) and all one-time
    /// markers. The emitter itself stays usable.
    pub fn clear(&self) {
        self.registry.lock().clear();
        self.once.lock().clear();
    }

    /// Appends a middleware to the chain.
    ///
    /// Returns a [`MiddlewareGuard`] that removes exactly this registration;
    /// calling it more than once is a no-op.
    pub fn use_middleware(&self, middleware: Arc<dyn Middleware>) -> MiddlewareGuard {
        let id = self.chain.register(middleware);
        MiddlewareGuard::new(id, Arc::downgrade(&self.chain))
    }

    // ---------------------------
    // Typed surface
    // ---------------------------

    /// [`Emitter::on`] keyed by an [`EventKind`].
    pub fn on_kind<K: EventKind>(&self, handler: &Handler) {
        self.on(K::event_type(), handler);
    }

    /// [`Emitter::once`] keyed by an [`EventKind`].
    pub fn once_kind<K: EventKind>(&self, handler: &Handler) {
        self.once(K::event_type(), handler);
    }

    /// [`Emitter::emit`] keyed by an [`EventKind`], wrapping the typed
    /// payload.
    pub async fn emit_kind<K: EventKind>(&self, payload: K::Payload) -> Result<(), EmitError> {
        self.emit(K::event_type(), Payload::new(payload)).await
    }

    // ---------------------------
    // Dispatch
    // ---------------------------

    /// Emits `payload` under `event`, resolving after all handler work.
    ///
    /// Runs the middleware chain first (which may rewrite or cancel the
    /// emission), then the type-specific handlers, then the wildcard
    /// handlers. Handlers of one emission run concurrently; `emit` waits for
    /// every one of them and surfaces the first failure in registration
    /// order — sibling handlers are never cancelled.
    ///
    /// Emitting the wildcard type itself runs the wildcard set exactly once.
    pub async fn emit(
        &self,
        event: impl Into<EventType>,
        payload: Payload,
    ) -> Result<(), EmitError> {
        let mut event = event.into();
        let mut payload = payload;

        if self.debug {
            debug!(event = %event, payload = ?payload, "emit");
        }

        for middleware in self.chain.snapshot() {
            let flow = middleware
                .apply(&event, &payload)
                .await
                .map_err(|source| EmitError::Middleware {
                    event: event.clone(),
                    middleware: middleware.name().to_string(),
                    source,
                })?;
            match flow {
                Flow::Next => {}
                Flow::Replace(next_event, next_payload) => {
                    if self.debug {
                        debug!(
                            middleware = middleware.name(),
                            from = %event,
                            to = %next_event,
                            "emission rewritten"
                        );
                    }
                    event = next_event;
                    payload = next_payload;
                }
                Flow::Cancel => {
                    if self.debug {
                        debug!(middleware = middleware.name(), event = %event, "emission cancelled");
                    }
                    return Ok(());
                }
            }
        }

        let (named, wild) = self.snapshot_and_consume_once(&event);

        let mut pending = Vec::with_capacity(named.len() + wild.len());
        for handler in named.into_iter().chain(wild) {
            let event = event.clone();
            let payload = payload.clone();
            pending.push(async move {
                handler
                    .invoke(&event, payload)
                    .await
                    .map_err(|source| EmitError::Handler {
                        event,
                        handler: handler.name().to_string(),
                        source,
                    })
            });
        }

        let mut first_failure = None;
        for result in future::join_all(pending).await {
            if let Err(err) = result {
                first_failure.get_or_insert(err);
            }
        }
        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Snapshots the type-specific and wildcard sets for one emission and
    /// consumes one-time markers, removing marked handlers from the live
    /// sets. The snapshots themselves still dispatch every member.
    fn snapshot_and_consume_once(&self, event: &EventType) -> (Vec<Handler>, Vec<Handler>) {
        let mut registry = self.registry.lock();
        let mut once = self.once.lock();

        let named = if event.is_wildcard() {
            // the wildcard pass below covers this emission exactly once
            Vec::new()
        } else {
            registry.snapshot(event)
        };
        for handler in &named {
            if once.remove(&(event.clone(), handler.id())) {
                registry.remove(event, handler.id());
            }
        }

        let wildcard = EventType::wildcard();
        let wild = registry.snapshot(&wildcard);
        for handler in &wild {
            if once.remove(&(wildcard.clone(), handler.id())) {
                registry.remove(&wildcard, handler.id());
            }
        }

        (named, wild)
    }

    #[cfg(test)]
    pub(crate) fn once_marker_count(&self) -> usize {
        self.once.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(name: &'static str) -> Handler {
        Handler::from_fn(name, |_payload| async { Ok(()) })
    }

    #[test]
    fn test_off_clears_the_pair_marker() {
        let emitter = Emitter::new();
        let h = noop("h");
        emitter.once("a", &h);
        assert_eq!(emitter.once_marker_count(), 1);

        emitter.off("a", &h);
        assert_eq!(emitter.once_marker_count(), 0);
        assert!(!emitter.registry().lock().contains(&"a".into(), h.id()));
    }

    #[test]
    fn test_bulk_off_keeps_stale_markers() {
        let emitter = Emitter::new();
        let h = noop("h");
        emitter.once("a", &h);

        emitter.off_all("a");
        assert_eq!(emitter.registry().lock().handler_count(&"a".into()), 0);
        // documented limitation: bulk removal leaves the marker behind
        assert_eq!(emitter.once_marker_count(), 1);
    }

    #[test]
    fn test_clear_wipes_markers_clear_event_does_not() {
        let emitter = Emitter::new();
        emitter.once("a", &noop("ha"));
        emitter.once("b", &noop("hb"));

        emitter.clear_event("a");
        assert_eq!(emitter.once_marker_count(), 2);

        emitter.clear();
        assert_eq!(emitter.once_marker_count(), 0);
        assert!(emitter.registry().lock().is_empty());
    }

    #[test]
    fn test_once_markers_are_scoped_per_type() {
        let emitter = Emitter::new();
        let h = noop("h");
        emitter.once("a", &h);
        emitter.once("b", &h);
        assert_eq!(emitter.once_marker_count(), 2);

        emitter.off("a", &h);
        // the "b" marker is untouched by removal on "a"
        assert_eq!(emitter.once_marker_count(), 1);
        assert!(emitter.registry().lock().contains(&"b".into(), h.id()));
    }
}
