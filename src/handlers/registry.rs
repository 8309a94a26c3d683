//! # Handler registry.
//!
//! Maps each [`EventType`] (wildcard included) to an insertion-ordered,
//! identity-deduplicating set of handlers. The per-type container is a `Vec`
//! scanned by [`HandlerId`]: adding the same registered instance twice is a
//! no-op, and dispatch order within a type is registration order.
//!
//! The registry is plain data — no locking here. The
//! [`Emitter`](crate::Emitter) keeps it behind a mutex and hands the shared
//! handle out via [`Emitter::registry`](crate::Emitter::registry), so
//! advanced callers (and emitters sharing one registry) mutate the same map.

use std::collections::HashMap;

use crate::events::EventType;
use crate::handlers::handler::{Handler, HandlerId};

/// Mapping from event type to its registered handlers.
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<EventType, Vec<Handler>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler under `event`, creating the set on first use.
    ///
    /// Idempotent: the same registered instance is never duplicated within
    /// one type's set.
    pub fn insert(&mut self, event: EventType, handler: &Handler) {
        let set = self.entries.entry(event).or_default();
        if !set.iter().any(|h| h.id() == handler.id()) {
            set.push(handler.clone());
        }
    }

    /// Removes one handler from `event`'s set.
    ///
    /// Returns `true` if it was present; removing an absent handler is a
    /// silent no-op.
    pub fn remove(&mut self, event: &EventType, id: HandlerId) -> bool {
        match self.entries.get_mut(event) {
            Some(set) => match set.iter().position(|h| h.id() == id) {
                Some(idx) => {
                    set.remove(idx);
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Replaces `event`'s handler set with an empty one.
    pub fn clear_event(&mut self, event: EventType) {
        self.entries.insert(event, Vec::new());
    }

    /// Empties the entire registry, wildcard set included.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Clones `event`'s current handler set, in registration order.
    ///
    /// Dispatch iterates this snapshot, so registry mutation mid-emission
    /// never affects which handlers the in-flight emission invokes.
    #[must_use]
    pub fn snapshot(&self, event: &EventType) -> Vec<Handler> {
        self.entries.get(event).cloned().unwrap_or_default()
    }

    /// True if `event`'s set currently contains the handler.
    #[must_use]
    pub fn contains(&self, event: &EventType, id: HandlerId) -> bool {
        self.entries
            .get(event)
            .is_some_and(|set| set.iter().any(|h| h.id() == id))
    }

    /// Number of handlers currently registered under `event`.
    #[must_use]
    pub fn handler_count(&self, event: &EventType) -> usize {
        self.entries.get(event).map_or(0, Vec::len)
    }

    /// True if no type has any handler registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }

    /// Event types that currently have at least one handler.
    #[must_use]
    pub fn event_types(&self) -> Vec<EventType> {
        let mut types: Vec<EventType> = self
            .entries
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(event, _)| event.clone())
            .collect();
        types.sort_unstable();
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(name: &'static str) -> Handler {
        Handler::from_fn(name, |_payload| async { Ok(()) })
    }

    #[test]
    fn test_insert_is_idempotent_per_instance() {
        let mut reg = Registry::new();
        let h = handler("h");
        reg.insert("a".into(), &h);
        reg.insert("a".into(), &h);
        assert_eq!(reg.handler_count(&"a".into()), 1);

        // same name, different instance: a second subscription
        reg.insert("a".into(), &handler("h"));
        assert_eq!(reg.handler_count(&"a".into()), 2);
    }

    #[test]
    fn test_snapshot_preserves_registration_order() {
        let mut reg = Registry::new();
        let (h1, h2, h3) = (handler("h1"), handler("h2"), handler("h3"));
        reg.insert("a".into(), &h1);
        reg.insert("a".into(), &h2);
        reg.insert("a".into(), &h3);
        let ids: Vec<_> = reg.snapshot(&"a".into()).iter().map(Handler::id).collect();
        assert_eq!(ids, vec![h1.id(), h2.id(), h3.id()]);
    }

    #[test]
    fn test_remove_by_identity() {
        let mut reg = Registry::new();
        let (h1, h2) = (handler("h1"), handler("h2"));
        reg.insert("a".into(), &h1);
        reg.insert("a".into(), &h2);

        assert!(reg.remove(&"a".into(), h1.id()));
        assert!(!reg.remove(&"a".into(), h1.id()));
        assert!(!reg.contains(&"a".into(), h1.id()));
        assert!(reg.contains(&"a".into(), h2.id()));
    }

    #[test]
    fn test_clear_event_leaves_other_types() {
        let mut reg = Registry::new();
        reg.insert("a".into(), &handler("ha"));
        reg.insert("b".into(), &handler("hb"));

        reg.clear_event("a".into());
        assert_eq!(reg.handler_count(&"a".into()), 0);
        assert_eq!(reg.handler_count(&"b".into()), 1);
        assert_eq!(reg.event_types(), vec![EventType::from("b")]);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut reg = Registry::new();
        reg.insert("a".into(), &handler("ha"));
        reg.insert(EventType::wildcard(), &handler("hw"));

        reg.clear();
        assert!(reg.is_empty());
        assert_eq!(reg.handler_count(&EventType::wildcard()), 0);
    }

    #[test]
    fn test_snapshot_is_detached_from_live_set() {
        let mut reg = Registry::new();
        let h = handler("h");
        reg.insert("a".into(), &h);

        let snap = reg.snapshot(&"a".into());
        reg.remove(&"a".into(), h.id());
        assert_eq!(snap.len(), 1);
        assert_eq!(reg.handler_count(&"a".into()), 0);
    }
}
