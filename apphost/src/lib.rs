//! # Application Host
//!
//! This crate hosts a multi-process application: it registers the
//! application's logic, picks out the running process's share of it, and
//! forwards host lifecycle events for the rest of the process's life.
//!
//! ## Philosophy
//!
//! - **Registration before resolution**: All logic is registered before any
//!   process looks at its own bucket
//! - **One machinery for everything**: The hub bootstrap is dispatched like
//!   any other unit
//! - **Deterministic mode is first-class**: Event scripts drive the host in
//!   tests and demos
//!
//! ## Responsibilities
//!
//! The host:
//! - Installs the router bootstrap when the application is multi-process
//! - Runs `Application::initialize_logic` against a [`Registrar`]
//! - Instantiates and starts the running process's units
//! - Forwards terminate, low-memory, trim and configuration events
//!
//! ## Non-Responsibilities
//!
//! The host does NOT:
//! - Spawn OS processes
//! - Implement a transport or a routing protocol
//! - Order IPC traffic between hub and spokes
//!
//! [`Registrar`]: services_registry::Registrar

pub mod application;
pub mod config;
pub mod demo;
pub mod error;
pub mod event_script;
pub mod host;

pub use application::Application;
pub use config::{ConfigError, HostConfig, SpokeConfig};
pub use error::HostError;
pub use event_script::{EventScript, EventScriptError, ScriptEvent};
pub use host::{AppHost, StartReport};
