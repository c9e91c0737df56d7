//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.

pub mod proxy;

// Re-export main types for convenience
pub use proxy::{CommandProxyRunner, ProxyChild, DEFAULT_PROXY_COMMAND};
