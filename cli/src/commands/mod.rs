//! CLI commands.

pub mod check;
pub mod serve;
