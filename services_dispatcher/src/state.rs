//! Dispatcher states

use std::fmt;

/// Lifecycle states of a dispatcher
///
/// Transitions only move forward; there is no way back from `Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DispatcherState {
    /// Entries resolved, nothing constructed yet
    Uninitialized,
    /// Units constructed and attached, `on_create` not yet delivered
    Instantiated,
    /// `on_create` delivered; runtime events flow
    Running,
    /// `on_terminate` delivered and instances dropped
    Terminated,
}

impl DispatcherState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatcherState::Uninitialized => "uninitialized",
            DispatcherState::Instantiated => "instantiated",
            DispatcherState::Running => "running",
            DispatcherState::Terminated => "terminated",
        }
    }

    /// Checks if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, DispatcherState::Terminated)
    }

    /// Checks if runtime events are accepted
    pub fn is_running(&self) -> bool {
        matches!(self, DispatcherState::Running)
    }
}

impl fmt::Display for DispatcherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
