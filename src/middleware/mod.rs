//! Middleware trait, per-step outcome, and the ordered chain.

mod chain;
#[allow(clippy::module_inception)]
mod middleware;

pub(crate) use chain::Chain;
pub use chain::MiddlewareGuard;
pub use middleware::{Flow, Middleware, MiddlewareFn};
