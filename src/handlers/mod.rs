//! Handler trait, identity-bearing handles, and the handler registry.

mod handler;
mod registry;

pub use handler::{BoxHandlerFuture, Handle, Handler, HandlerId};
pub use registry::Registry;
