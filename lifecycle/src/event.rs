//! Lifecycle events delivered to units

use crate::LogicUnit;
use core_types::{Configuration, TrimLevel};
use std::fmt;

/// A lifecycle event
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    /// Process start; always the first event a unit sees
    Create,
    /// Low-memory signal
    LowMemory,
    /// Memory trim request
    TrimMemory(TrimLevel),
    /// Configuration change
    ConfigurationChanged(Configuration),
    /// Process termination; always the last event a unit sees
    Terminate,
}

/// Payload-free discriminant of [`LifecycleEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEventKind {
    Create,
    LowMemory,
    TrimMemory,
    ConfigurationChanged,
    Terminate,
}

impl LifecycleEventKind {
    /// Returns the event name
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleEventKind::Create => "create",
            LifecycleEventKind::LowMemory => "low-memory",
            LifecycleEventKind::TrimMemory => "trim-memory",
            LifecycleEventKind::ConfigurationChanged => "configuration-changed",
            LifecycleEventKind::Terminate => "terminate",
        }
    }
}

impl fmt::Display for LifecycleEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LifecycleEvent {
    /// Returns the kind of this event
    pub fn kind(&self) -> LifecycleEventKind {
        match self {
            LifecycleEvent::Create => LifecycleEventKind::Create,
            LifecycleEvent::LowMemory => LifecycleEventKind::LowMemory,
            LifecycleEvent::TrimMemory(_) => LifecycleEventKind::TrimMemory,
            LifecycleEvent::ConfigurationChanged(_) => LifecycleEventKind::ConfigurationChanged,
            LifecycleEvent::Terminate => LifecycleEventKind::Terminate,
        }
    }

    /// Invokes the matching hook on a unit
    pub fn apply(&self, unit: &mut dyn LogicUnit) {
        match self {
            LifecycleEvent::Create => unit.on_create(),
            LifecycleEvent::LowMemory => unit.on_low_memory(),
            LifecycleEvent::TrimMemory(level) => unit.on_trim_memory(*level),
            LifecycleEvent::ConfigurationChanged(config) => unit.on_configuration_changed(config),
            LifecycleEvent::Terminate => unit.on_terminate(),
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleEvent::TrimMemory(level) => write!(f, "trim-memory({})", level),
            other => f.write_str(other.kind().as_str()),
        }
    }
}
