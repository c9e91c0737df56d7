//! Domain layer - Pure port arithmetic and launch lifecycle.
//!
//! These types have no I/O dependencies and can be tested in isolation.

mod launch;
mod port_spec;

pub use launch::LaunchState;
pub use port_spec::{PortSpec, APP_PORT_RANGE};
