//! Endpoint descriptors for spoke processes

use core_types::ProcessName;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointId(Uuid);

impl EndpointId {
    /// Creates a new random endpoint ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an endpoint ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EndpointId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Endpoint({})", self.0)
    }
}

/// Describes how the hub reaches one spoke process
///
/// The address is interpreted only by the transport; to the coordinator it
/// is an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// Unique identifier
    pub id: EndpointId,
    /// Process this endpoint belongs to
    pub process: ProcessName,
    /// Transport-specific address
    pub address: String,
}

impl EndpointDescriptor {
    /// Creates a descriptor for a spoke process
    pub fn new(process: impl Into<ProcessName>, address: impl Into<String>) -> Self {
        Self {
            id: EndpointId::new(),
            process: process.into(),
            address: address.into(),
        }
    }
}

impl fmt::Display for EndpointDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.process, self.address)
    }
}
