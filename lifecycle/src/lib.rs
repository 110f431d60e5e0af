//! # Lifecycle
//!
//! The capability every pluggable logic unit implements, and the context it
//! is bound to.
//!
//! ## Philosophy
//!
//! - **Opt-in hooks**: Every callback has a no-op default
//! - **Construction is a factory**: Units are built from descriptors, not reflection
//! - **Context is borrowed, not owned**: Units hold a weak handle to the application
//! - **No async runtime required**: Every hook runs synchronously
//!
//! ## Core Concepts
//!
//! - [`LogicUnit`]: Lifecycle callbacks for one module of application behavior
//! - [`UnitDescriptor`]: Identity plus zero-argument constructor of a unit
//! - [`LifecycleEvent`]: One of the five events fanned out to units
//! - [`AppContext`] / [`AppHandle`]: Per-process application context and a
//!   weak back-reference to it

pub mod context;
pub mod descriptor;
pub mod event;

pub use context::{AppContext, AppHandle};
pub use descriptor::{InstantiationError, UnitDescriptor};
pub use event::{LifecycleEvent, LifecycleEventKind};

use core_types::{Configuration, TrimLevel};

/// One pluggable piece of application behavior
///
/// A unit is registered against a process name and only ever instantiated in
/// that process. Hooks run on the process's main thread, in priority order
/// relative to the other units of the same process.
pub trait LogicUnit {
    /// Binds the unit to its application context
    ///
    /// Called once, right after construction and before any event.
    fn attach(&mut self, app: AppHandle) {
        let _ = app;
    }

    /// The process has started
    fn on_create(&mut self) {}

    /// The process is terminating; no further events follow
    fn on_terminate(&mut self) {}

    /// The system is running low on memory
    fn on_low_memory(&mut self) {}

    /// The host asks the process to release memory
    fn on_trim_memory(&mut self, level: TrimLevel) {
        let _ = level;
    }

    /// The host configuration changed
    fn on_configuration_changed(&mut self, config: &Configuration) {
        let _ = config;
    }
}
