//! Access to the hub router

use crate::{HubRouter, RouterError, RoutingTable};
use core_types::ProcessName;
use ipc::Connector;
use log::info;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Hands out the process's hub router
pub trait RouterProvider {
    /// Returns the hub router, starting it on first use
    fn hub_router(&self) -> Result<Arc<dyn HubRouter>, RouterError>;
}

/// Provider that builds a [`RoutingTable`] on first request
///
/// Later requests return the same router.
pub struct LazyRouterProvider {
    hub: ProcessName,
    connector: Arc<dyn Connector>,
    router: OnceCell<Arc<RoutingTable>>,
}

impl LazyRouterProvider {
    pub fn new(hub: impl Into<ProcessName>, connector: Arc<dyn Connector>) -> Self {
        Self {
            hub: hub.into(),
            connector,
            router: OnceCell::new(),
        }
    }

    /// Checks whether the router has been created yet
    pub fn is_started(&self) -> bool {
        self.router.get().is_some()
    }

    /// Returns the concrete table once started
    pub fn routing_table(&self) -> Option<Arc<RoutingTable>> {
        self.router.get().cloned()
    }
}

impl RouterProvider for LazyRouterProvider {
    fn hub_router(&self) -> Result<Arc<dyn HubRouter>, RouterError> {
        let table = self.router.get_or_init(|| {
            info!("Starting hub router in {}", self.hub);
            Arc::new(RoutingTable::new(self.hub.clone(), self.connector.clone()))
        });
        Ok(table.clone() as Arc<dyn HubRouter>)
    }
}
