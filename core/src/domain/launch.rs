//! Proxy launch lifecycle.

use std::fmt;

use crate::error::{Error, Result};

/// Where the proxy launch currently stands.
///
/// ```text
/// Idle -> Launching -> ProxyEnded(code)
///                   -> LaunchFailed(reason)
/// ```
///
/// `Idle` is terminal when no proxy is needed. `ProxyEnded` and
/// `LaunchFailed` end the whole process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LaunchState {
    #[default]
    Idle,
    Launching,
    /// The proxy exited; the process exits with the same code.
    ProxyEnded(i32),
    /// The proxy could not be started or waited on.
    LaunchFailed(String),
}

impl LaunchState {
    /// Idle -> Launching.
    pub fn launch(&mut self) -> Result<()> {
        self.expect_state(matches!(self, LaunchState::Idle), "launch")?;
        *self = LaunchState::Launching;
        Ok(())
    }

    /// Launching -> ProxyEnded.
    pub fn end(&mut self, exit_code: i32) -> Result<()> {
        self.expect_state(matches!(self, LaunchState::Launching), "end")?;
        *self = LaunchState::ProxyEnded(exit_code);
        Ok(())
    }

    /// Launching -> LaunchFailed.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<()> {
        self.expect_state(matches!(self, LaunchState::Launching), "fail")?;
        *self = LaunchState::LaunchFailed(reason.into());
        Ok(())
    }

    /// Whether this state ends the process.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LaunchState::ProxyEnded(_) | LaunchState::LaunchFailed(_)
        )
    }

    /// The exit code the process must use, once known.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            LaunchState::ProxyEnded(code) => Some(*code),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            LaunchState::Idle => "idle",
            LaunchState::Launching => "launching",
            LaunchState::ProxyEnded(_) => "ended",
            LaunchState::LaunchFailed(_) => "failed",
        }
    }

    fn expect_state(&self, ok: bool, action: &'static str) -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                from: self.name(),
                action,
            })
        }
    }
}

impl fmt::Display for LaunchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchState::ProxyEnded(code) => write!(f, "ended ({})", code),
            LaunchState::LaunchFailed(reason) => write!(f, "failed ({})", reason),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_is_default_and_not_terminal() {
        let state = LaunchState::default();
        assert_eq!(state, LaunchState::Idle);
        assert!(!state.is_terminal());
        assert_eq!(state.exit_code(), None);
    }

    #[test]
    fn test_launch_then_end() {
        let mut state = LaunchState::Idle;
        state.launch().unwrap();
        assert_eq!(state, LaunchState::Launching);
        assert!(!state.is_terminal());

        state.end(3).unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.exit_code(), Some(3));
    }

    #[test]
    fn test_launch_then_fail() {
        let mut state = LaunchState::Idle;
        state.launch().unwrap();
        state.fail("no such file").unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.exit_code(), None);
        assert_eq!(state.to_string(), "failed (no such file)");
    }

    #[test]
    fn test_cannot_launch_twice() {
        let mut state = LaunchState::Idle;
        state.launch().unwrap();
        let err = state.launch().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTransition {
                from: "launching",
                action: "launch"
            }
        ));
    }

    #[test]
    fn test_cannot_end_without_launch() {
        let mut state = LaunchState::Idle;
        assert!(state.end(0).is_err());
        assert_eq!(state, LaunchState::Idle);
    }

    #[test]
    fn test_cannot_fail_without_launch() {
        let mut state = LaunchState::Idle;
        let err = state.fail("too early").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTransition {
                from: "idle",
                action: "fail"
            }
        ));
        assert_eq!(state, LaunchState::Idle);
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut state = LaunchState::ProxyEnded(0);
        assert!(state.launch().is_err());
        assert!(state.fail("late").is_err());
        assert_eq!(state, LaunchState::ProxyEnded(0));
    }
}
