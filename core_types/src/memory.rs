//! Memory pressure signals

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a memory trim request
///
/// The host passes the level it received through unchanged. The named
/// constants match the levels hosts commonly report; any other value is
/// still valid and delivered as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrimLevel(i32);

impl TrimLevel {
    /// Process is running, memory is getting moderately low
    pub const RUNNING_MODERATE: TrimLevel = TrimLevel(5);
    /// Process is running, memory is low
    pub const RUNNING_LOW: TrimLevel = TrimLevel(10);
    /// Process is running, memory is critically low
    pub const RUNNING_CRITICAL: TrimLevel = TrimLevel(15);
    /// Process UI is no longer visible
    pub const UI_HIDDEN: TrimLevel = TrimLevel(20);
    /// Process entered the background LRU list
    pub const BACKGROUND: TrimLevel = TrimLevel(40);
    /// Process is around the middle of the background LRU list
    pub const MODERATE: TrimLevel = TrimLevel(60);
    /// Process is among the first to be killed
    pub const COMPLETE: TrimLevel = TrimLevel(80);

    /// Creates a trim level from its raw value
    pub const fn new(level: i32) -> Self {
        Self(level)
    }

    /// Returns the raw value
    pub const fn value(&self) -> i32 {
        self.0
    }

    /// Returns the conventional name of this level, if it has one
    pub fn name(&self) -> Option<&'static str> {
        match self.0 {
            5 => Some("running-moderate"),
            10 => Some("running-low"),
            15 => Some("running-critical"),
            20 => Some("ui-hidden"),
            40 => Some("background"),
            60 => Some("moderate"),
            80 => Some("complete"),
            _ => None,
        }
    }

    /// Checks whether the process is still in the foreground
    pub fn is_running(&self) -> bool {
        self.0 < Self::UI_HIDDEN.0
    }
}

impl From<i32> for TrimLevel {
    fn from(level: i32) -> Self {
        Self(level)
    }
}

impl fmt::Display for TrimLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", self.0, name),
            None => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_levels() {
        assert_eq!(TrimLevel::RUNNING_MODERATE.value(), 5);
        assert_eq!(TrimLevel::COMPLETE.name(), Some("complete"));
        assert_eq!(TrimLevel::new(7).name(), None);
    }

    #[test]
    fn test_is_running() {
        assert!(TrimLevel::RUNNING_CRITICAL.is_running());
        assert!(!TrimLevel::UI_HIDDEN.is_running());
        assert!(!TrimLevel::BACKGROUND.is_running());
    }

    #[test]
    fn test_display() {
        assert_eq!(TrimLevel::BACKGROUND.to_string(), "40 (background)");
        assert_eq!(TrimLevel::new(-1).to_string(), "-1");
    }
}
