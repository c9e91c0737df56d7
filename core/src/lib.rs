//! testapp Core Library
//!
//! Upstream test application for exercising a front-end proxy layer.
//! Provides functionality to:
//! - Resolve a front port and an app port from CLI tokens
//! - Launch an external reverse proxy between the two and mirror its exit code
//! - Serve a handful of canned HTTP routes (ok, error, hang, file)
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Port arithmetic and the proxy launch lifecycle
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services and the startup context
//! - `server`: The HTTP router

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod server;

pub mod config;
pub mod error;

// Re-export domain types (primary API)
pub use domain::{LaunchState, PortSpec, APP_PORT_RANGE};

// Re-export other commonly used types
pub use adapters::CommandProxyRunner;
pub use application::{ProxyLauncher, Termination, TestApp};
pub use config::ServerConfig;
pub use error::{Error, Result};
