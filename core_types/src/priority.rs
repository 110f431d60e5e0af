//! Dispatch priority

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordering key for instantiation and notification within a process
///
/// Lower values are created and notified first. Units that provide shared
/// infrastructure should use low values so dependents see it initialized.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Priority(i32);

impl Priority {
    /// The earliest possible priority
    pub const HIGHEST: Priority = Priority(i32::MIN);

    /// The latest possible priority
    pub const LOWEST: Priority = Priority(i32::MAX);

    /// Creates a priority from its numeric value
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the numeric value
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
