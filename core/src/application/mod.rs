//! Application layer - Use case services.
//!
//! Services here are thin orchestrators: they accept domain types, reach
//! external systems only through `ports` traits, and own the startup
//! context that replaces process-wide state.

mod app;
mod launcher;

pub use app::{TestApp, Termination};
pub use launcher::ProxyLauncher;
