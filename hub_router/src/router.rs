//! Hub routing table

use core_types::ProcessName;
use ipc::{Connector, ConnectorError, EndpointDescriptor, EndpointId};
use log::{debug, info};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("Spoke already registered: {0}")]
    SpokeAlreadyRegistered(ProcessName),

    #[error("Hub process {0} cannot register as a spoke")]
    HubIsNotASpoke(ProcessName),

    #[error("Spoke process name must not be empty")]
    EmptyProcessName,

    #[error("Connector error: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Router unavailable: {0}")]
    Unavailable(String),
}

/// The hub side of cross-process routing
///
/// Spokes are registered by process name; the router asks the transport to
/// link each one before it becomes routable.
pub trait HubRouter: Send + Sync {
    /// Name of the process hosting the router
    fn hub_process(&self) -> &ProcessName;

    /// Links a spoke process to the hub
    fn register_spoke(
        &self,
        process: ProcessName,
        address: String,
    ) -> Result<EndpointId, RouterError>;

    /// Forgets a spoke, returning its endpoint if it was registered
    fn unregister_spoke(&self, process: &str) -> Option<EndpointDescriptor>;

    /// Looks up the endpoint a spoke was registered with
    fn endpoint(&self, process: &str) -> Option<EndpointDescriptor>;

    /// Registered spoke names, sorted
    fn spokes(&self) -> Vec<ProcessName>;
}

/// Bundled [`HubRouter`] backed by an in-memory map
///
/// Safe to share across threads; transport callbacks may reach it from
/// anywhere. No lock is held while the connector runs, so a transport may call
/// back into the table from inside `connect_spoke_to_hub`.
pub struct RoutingTable {
    hub: ProcessName,
    connector: Arc<dyn Connector>,
    spokes: RwLock<BTreeMap<ProcessName, EndpointDescriptor>>,
    /// Names whose connect request is in flight
    pending: Mutex<BTreeSet<ProcessName>>,
}

impl RoutingTable {
    pub fn new(hub: impl Into<ProcessName>, connector: Arc<dyn Connector>) -> Self {
        Self {
            hub: hub.into(),
            connector,
            spokes: RwLock::new(BTreeMap::new()),
            pending: Mutex::new(BTreeSet::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.spokes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.spokes.read().is_empty()
    }

    /// Claims `process` for one in-flight registration
    fn reserve(&self, process: &ProcessName) -> Result<(), RouterError> {
        let mut pending = self.pending.lock();
        if pending.contains(process) || self.spokes.read().contains_key(process) {
            return Err(RouterError::SpokeAlreadyRegistered(process.clone()));
        }
        pending.insert(process.clone());
        Ok(())
    }

    fn release(&self, process: &ProcessName) {
        self.pending.lock().remove(process);
    }
}

impl HubRouter for RoutingTable {
    fn hub_process(&self) -> &ProcessName {
        &self.hub
    }

    fn register_spoke(
        &self,
        process: ProcessName,
        address: String,
    ) -> Result<EndpointId, RouterError> {
        if process.is_empty() {
            return Err(RouterError::EmptyProcessName);
        }
        if process == self.hub {
            return Err(RouterError::HubIsNotASpoke(process));
        }

        self.reserve(&process)?;
        let endpoint = EndpointDescriptor::new(process.clone(), address);
        if let Err(err) = self.connector.connect_spoke_to_hub(&process, &endpoint) {
            self.release(&process);
            return Err(err.into());
        }

        let id = endpoint.id;
        info!("Registered spoke {} with hub {}", endpoint, self.hub);
        // Insert before releasing so no other caller sees the name free.
        self.spokes.write().insert(process.clone(), endpoint);
        self.release(&process);
        Ok(id)
    }

    fn unregister_spoke(&self, process: &str) -> Option<EndpointDescriptor> {
        let removed = self.spokes.write().remove(process);
        if removed.is_some() {
            debug!("Unregistered spoke {} from hub {}", process, self.hub);
        }
        removed
    }

    fn endpoint(&self, process: &str) -> Option<EndpointDescriptor> {
        self.spokes.read().get(process).cloned()
    }

    fn spokes(&self) -> Vec<ProcessName> {
        self.spokes.read().keys().cloned().collect()
    }
}

impl std::fmt::Debug for RoutingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingTable")
            .field("hub", &self.hub)
            .field("spokes", &*self.spokes.read())
            .finish_non_exhaustive()
    }
}
