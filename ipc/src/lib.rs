//! # Inter-Process Connector Boundary
//!
//! This crate defines the seam between the coordinator and whatever transport
//! the platform offers for connecting processes (sockets, pipes, binder...).
//!
//! ## Philosophy
//!
//! - **Transport is a black box**: The coordinator only issues requests
//! - **Non-blocking starts**: Starting the hub listener never waits for it
//! - **Endpoints are descriptors**: A spoke is reached through an opaque address
//!
//! The coordinator calls [`Connector::start_hub_listener`] when it elects the
//! hub and [`Connector::connect_spoke_to_hub`] once per spoke the hub learns
//! about. Everything past those calls belongs to the transport.

pub mod channel;
pub mod connector;

pub use channel::{EndpointDescriptor, EndpointId};
pub use connector::{Connector, ConnectorCall, ConnectorError, RecordingConnector};
