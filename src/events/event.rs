//! # Event type keys.
//!
//! [`EventType`] is the key a handler subscribes under and the name an
//! emission is published as. Keys are opaque, hashable, and cheap to clone
//! (`Cow<'static, str>` inside, so static names never allocate).
//!
//! One value is reserved: the wildcard marker [`WILDCARD`] (`"*"`). Handlers
//! registered under it receive every emission regardless of type; dispatch
//! never matches it as a specific type.
//!
//! ## Example
//! ```rust
//! use emitly::EventType;
//!
//! let a = EventType::from("task.started");
//! let b = EventType::new(String::from("task.started"));
//! assert_eq!(a, b);
//! assert!(!a.is_wildcard());
//! assert!(EventType::wildcard().is_wildcard());
//! ```

use std::borrow::Cow;
use std::fmt;

/// Reserved key for "receive every emitted type" subscriptions.
pub const WILDCARD: &str = "*";

/// Opaque key identifying a channel of events.
///
/// Total equality/hash semantics, no interpretation of the string beyond the
/// reserved [`WILDCARD`] value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventType(Cow<'static, str>);

impl EventType {
    /// Creates a key from an owned or borrowed name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Creates a key from a static name without allocating.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Returns the reserved wildcard key.
    pub const fn wildcard() -> Self {
        Self(Cow::Borrowed(WILDCARD))
    }

    /// True if this key is the reserved wildcard marker.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.0 == WILDCARD
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for EventType {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for EventType {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl AsRef<str> for EventType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_across_ownership() {
        assert_eq!(EventType::from("a"), EventType::new(String::from("a")));
        assert_ne!(EventType::from("a"), EventType::from("b"));
    }

    #[test]
    fn test_wildcard_is_reserved_star() {
        let w = EventType::wildcard();
        assert!(w.is_wildcard());
        assert_eq!(w.as_str(), WILDCARD);
        assert_eq!(w, EventType::from("*"));
    }

    #[test]
    fn test_display_matches_key() {
        assert_eq!(EventType::from("task.started").to_string(), "task.started");
    }
}
