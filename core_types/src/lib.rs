//! # Core Types
//!
//! This crate defines the value types shared by every part of the runtime
//! coordinator.
//!
//! ## Philosophy
//!
//! - **Names are typed**: A process name cannot be confused with a unit id.
//! - **Ordering is explicit**: Priorities compare the way they are dispatched.
//! - **Opaque payloads stay opaque**: Configuration values pass through untouched.
//!
//! ## Key Types
//!
//! - [`ProcessName`]: Logical name of an OS process
//! - [`UnitId`]: Identity of a logic unit descriptor
//! - [`Priority`]: Dispatch ordering key (lower runs first)
//! - [`TrimLevel`]: Memory trim severity delivered to units
//! - [`Configuration`]: Structured configuration-change payload

pub mod configuration;
pub mod ids;
pub mod memory;
pub mod priority;

pub use configuration::Configuration;
pub use ids::{ProcessName, UnitId};
pub use memory::TrimLevel;
pub use priority::Priority;
