//! # Lifecycle Dispatcher
//!
//! This crate instantiates the running process's logic units and fans
//! lifecycle events out to them for the life of the process.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized --instantiate--> Instantiated --start--> Running --terminate--> Terminated
//! ```
//!
//! - Units are built in dispatch order; a unit that fails to build is logged
//!   and sits out every event for good.
//! - `on_create` reaches every unit, in order, before any other event.
//! - Every later event reaches every live unit exactly once, in the same order.
//! - After `terminate` nothing is delivered again.

pub mod dispatcher;
pub mod state;

pub use dispatcher::{DispatchError, InstantiationFailure, LifecycleDispatcher};
pub use state::DispatcherState;
