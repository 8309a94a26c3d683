//! # Middleware chain and unregister guard.
//!
//! The chain is an ordered list of slots, each pairing a registration id with
//! a shared middleware. Registration appends; removal goes through the
//! [`MiddlewareGuard`] returned at registration time, which drops exactly the
//! slot it was issued for. A guard whose slot is already gone (or whose
//! emitter is gone) does nothing, so calling `unregister` repeatedly is safe.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::middleware::middleware::Middleware;

struct Slot {
    id: u64,
    middleware: Arc<dyn Middleware>,
}

/// Ordered middleware list shared between an emitter and its guards.
#[derive(Default)]
pub(crate) struct Chain {
    next_id: AtomicU64,
    slots: Mutex<Vec<Slot>>,
}

impl Chain {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware, returning its slot id.
    pub(crate) fn register(&self, middleware: Arc<dyn Middleware>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.slots.lock().push(Slot { id, middleware });
        id
    }

    /// Removes the slot with the given id, if still present.
    pub(crate) fn unregister(&self, id: u64) -> bool {
        let mut slots = self.slots.lock();
        match slots.iter().position(|slot| slot.id == id) {
            Some(idx) => {
                slots.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Clones the current middleware list, in registration order.
    pub(crate) fn snapshot(&self) -> Vec<Arc<dyn Middleware>> {
        self.slots
            .lock()
            .iter()
            .map(|slot| Arc::clone(&slot.middleware))
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.lock().len()
    }
}

/// Removal handle for one registered middleware.
///
/// Returned by [`Emitter::use_middleware`](crate::Emitter::use_middleware).
/// Holds a weak reference to the chain: the guard never keeps an emitter
/// alive, and unregistering after the emitter is dropped is a no-op.
pub struct MiddlewareGuard {
    id: u64,
    chain: Weak<Chain>,
}

impl MiddlewareGuard {
    pub(crate) fn new(id: u64, chain: Weak<Chain>) -> Self {
        Self { id, chain }
    }

    /// Removes the middleware this guard was issued for.
    ///
    /// Idempotent: once the slot is gone, further calls find nothing.
    pub fn unregister(&self) {
        if let Some(chain) = self.chain.upgrade() {
            chain.unregister(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::middleware::{Flow, MiddlewareFn};

    fn passthrough(name: &'static str) -> Arc<MiddlewareFn> {
        MiddlewareFn::arc(name, |_event, _payload| async { Ok(Flow::Next) })
    }

    #[test]
    fn test_register_preserves_order() {
        let chain = Chain::new();
        chain.register(passthrough("first"));
        chain.register(passthrough("second"));
        let names: Vec<_> = chain.snapshot().iter().map(|m| m.name().to_string()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_unregister_is_idempotent() {
        let chain = Arc::new(Chain::new());
        let id = chain.register(passthrough("mw"));
        let guard = MiddlewareGuard::new(id, Arc::downgrade(&chain));

        guard.unregister();
        assert_eq!(chain.len(), 0);
        guard.unregister(); // second call finds nothing
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn test_unregister_removes_only_its_slot() {
        let chain = Arc::new(Chain::new());
        let first = chain.register(passthrough("first"));
        chain.register(passthrough("second"));

        MiddlewareGuard::new(first, Arc::downgrade(&chain)).unregister();
        let names: Vec<_> = chain.snapshot().iter().map(|m| m.name().to_string()).collect();
        assert_eq!(names, vec!["second"]);
    }

    #[test]
    fn test_guard_survives_dropped_chain() {
        let chain = Arc::new(Chain::new());
        let id = chain.register(passthrough("mw"));
        let guard = MiddlewareGuard::new(id, Arc::downgrade(&chain));
        drop(chain);
        guard.unregister(); // no-op, must not panic
    }
}
