//! Ports layer - Trait definitions (interfaces).
//!
//! The application layer drives the proxy through these traits.
//! Implementations live in `adapters`.

mod proxy;

pub use proxy::{ProxyRunnerPort, RunningProxyPort};
