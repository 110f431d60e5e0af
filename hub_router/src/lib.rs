//! # Hub Router
//!
//! This crate elects one process as the routing hub and wires every other
//! process to it as a spoke.
//!
//! ## Philosophy
//!
//! The hub is not special machinery. Its bootstrap is an ordinary logic unit,
//! registered under a reserved process name with the highest priority, so it
//! is built and started by the same dispatcher as everything else.
//!
//! ## Core Concepts
//!
//! - [`RouterBootstrap`]: Registers the hub unit and requests the listener
//! - [`HubBootstrap`]: The unit that starts the router and registers spokes
//! - [`HubRouter`] / [`RoutingTable`]: Spoke process name to endpoint map
//! - [`RouterProvider`]: Hands out the hub router, creating it once
//! - [`SpokeTopology`]: Application callback that declares the spokes

pub mod bootstrap;
pub mod provider;
pub mod router;
pub mod topology;

pub use bootstrap::{HubBootstrap, RouterBootstrap, RouterHooks};
pub use provider::{LazyRouterProvider, RouterProvider};
pub use router::{HubRouter, RouterError, RoutingTable};
pub use topology::{SpokeTopology, StaticTopology};

use core_types::Priority;

/// Reserved name of the hub process
pub const DEFAULT_HUB_PROCESS: &str = ":router";

/// Priority of the hub bootstrap unit
///
/// No application unit can sort ahead of it.
pub const HUB_PRIORITY: Priority = Priority::HIGHEST;
