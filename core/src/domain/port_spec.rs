//! Front/app port arithmetic.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::error::{Error, Result};

/// Ports the app is allowed to listen on.
pub const APP_PORT_RANGE: RangeInclusive<i64> = 2000..=30000;

/// Resolved front and app ports.
///
/// Only the app port is range-checked. The front port is whatever the caller
/// passed and may lie outside [`APP_PORT_RANGE`] when an offset moves the app
/// port back into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortSpec {
    front_port: i64,
    app_port: u16,
    offset: i64,
}

impl PortSpec {
    /// Resolve a spec from the raw front port token and optional offset token.
    ///
    /// An offset that is missing or not an integer counts as `0`.
    pub fn resolve(front_token: &str, offset_token: Option<&str>) -> Result<Self> {
        let front_port = parse_int(front_token).ok_or_else(|| Error::BadPort {
            token: front_token.to_string(),
        })?;
        let offset = offset_token.and_then(parse_int).unwrap_or(0);

        Self::new(front_port, offset)
    }

    /// Build a spec from already parsed values.
    pub fn new(front_port: i64, offset: i64) -> Result<Self> {
        let out_of_range = || Error::PortOutOfRange {
            front_port,
            offset,
            app_port: front_port.saturating_add(offset),
        };

        let app_port = front_port.checked_add(offset).ok_or_else(out_of_range)?;
        if !APP_PORT_RANGE.contains(&app_port) {
            return Err(out_of_range());
        }

        Ok(Self {
            front_port,
            app_port: u16::try_from(app_port).map_err(|_| out_of_range())?,
            offset,
        })
    }

    /// The externally advertised port.
    pub fn front_port(&self) -> i64 {
        self.front_port
    }

    /// The port the HTTP server binds.
    pub fn app_port(&self) -> u16 {
        self.app_port
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Whether a proxy must be launched from the front port to the app port.
    pub fn needs_proxy(&self) -> bool {
        self.offset != 0
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.needs_proxy() {
            write!(f, "{} -> {}", self.front_port, self.app_port)
        } else {
            write!(f, "{}", self.app_port)
        }
    }
}

fn parse_int(token: &str) -> Option<i64> {
    token.trim().parse().ok()
}
