//! Connector trait and an in-memory recording implementation

use crate::EndpointDescriptor;
use core_types::ProcessName;
use parking_lot::Mutex;
use std::collections::HashSet;
use thiserror::Error;

/// Errors reported by a transport
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("Hub listener could not be started: {0}")]
    ListenerUnavailable(String),

    #[error("Spoke {process} unreachable: {reason}")]
    SpokeUnreachable { process: ProcessName, reason: String },
}

/// Transport used to link spokes to the hub
///
/// Both calls are requests: implementations may complete them asynchronously
/// and must not block the caller on connection establishment.
pub trait Connector: Send + Sync {
    /// Asks the transport to start accepting spoke connections in the hub
    fn start_hub_listener(&self) -> Result<(), ConnectorError>;

    /// Asks the transport to connect a spoke process to the hub
    fn connect_spoke_to_hub(
        &self,
        process: &ProcessName,
        endpoint: &EndpointDescriptor,
    ) -> Result<(), ConnectorError>;
}

/// A call observed by [`RecordingConnector`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectorCall {
    StartHubListener,
    ConnectSpoke {
        process: ProcessName,
        address: String,
    },
}

#[derive(Debug, Default)]
struct RecordingState {
    calls: Vec<ConnectorCall>,
    fail_listener: bool,
    unreachable: HashSet<ProcessName>,
}

/// Connector that records every request instead of touching a transport
///
/// Used by tests and by the demo host. Failures can be injected per call
/// kind; a failed call is still recorded.
#[derive(Debug, Default)]
pub struct RecordingConnector {
    state: Mutex<RecordingState>,
}

impl RecordingConnector {
    /// Creates a connector with no recorded calls
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `start_hub_listener` fail
    pub fn fail_listener(self) -> Self {
        self.state.lock().fail_listener = true;
        self
    }

    /// Makes connections to the given spoke fail
    pub fn unreachable(self, process: impl Into<ProcessName>) -> Self {
        self.state.lock().unreachable.insert(process.into());
        self
    }

    /// Returns a snapshot of all calls so far, in order
    pub fn calls(&self) -> Vec<ConnectorCall> {
        self.state.lock().calls.clone()
    }

    /// Returns how many times the hub listener was requested
    pub fn listener_requests(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| matches!(call, ConnectorCall::StartHubListener))
            .count()
    }
}

impl Connector for RecordingConnector {
    fn start_hub_listener(&self) -> Result<(), ConnectorError> {
        let mut state = self.state.lock();
        state.calls.push(ConnectorCall::StartHubListener);
        if state.fail_listener {
            return Err(ConnectorError::ListenerUnavailable(
                "injected failure".to_string(),
            ));
        }
        Ok(())
    }

    fn connect_spoke_to_hub(
        &self,
        process: &ProcessName,
        endpoint: &EndpointDescriptor,
    ) -> Result<(), ConnectorError> {
        let mut state = self.state.lock();
        state.calls.push(ConnectorCall::ConnectSpoke {
            process: process.clone(),
            address: endpoint.address.clone(),
        });
        if state.unreachable.contains(process) {
            return Err(ConnectorError::SpokeUnreachable {
                process: process.clone(),
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}
