//! # Emitter configuration.
//!
//! [`EmitterConfig`] seeds a new [`Emitter`](crate::Emitter): a debug toggle
//! (one trace line per emission) and an optional pre-existing registry, which
//! lets several emitters dispatch over one shared handler map.
//!
//! # Example
//! ```
//! use emitly::EmitterConfig;
//!
//! let mut cfg = EmitterConfig::default();
//! cfg.debug = true;
//! assert!(cfg.registry.is_none());
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use crate::handlers::Registry;

/// Construction-time options for an [`Emitter`](crate::Emitter).
#[derive(Clone, Debug, Default)]
pub struct EmitterConfig {
    /// Emit one `tracing` debug line per `emit` call (default: off).
    pub debug: bool,
    /// Registry to dispatch over. `None` creates a fresh private registry;
    /// pass another emitter's [`Emitter::registry`](crate::Emitter::registry)
    /// handle to share subscriptions across instances.
    pub registry: Option<Arc<Mutex<Registry>>>,
}
