//! The application-author surface

use hub_router::{HubRouter, RouterError, SpokeTopology};
use services_registry::{Registrar, RegistryError};
use std::rc::Rc;

/// An application made of per-process logic units
pub trait Application {
    /// Whether the application runs in more than one process
    ///
    /// When true the host elects a hub process and wires spokes to it.
    fn needs_multi_process(&self) -> bool;

    /// Registers every unit of every process
    ///
    /// Runs in each process, before any of them is resolved.
    fn initialize_logic(&self, registrar: &mut Registrar<'_>) -> Result<(), RegistryError>;

    /// Declares the spokes of the hub
    ///
    /// Only called in the hub process, once the router is up.
    fn register_spokes(&self, router: &dyn HubRouter) -> Result<(), RouterError> {
        let _ = router;
        Ok(())
    }
}

/// Exposes an application's spoke declarations to the hub unit
pub(crate) struct ApplicationTopology(pub Rc<dyn Application>);

impl SpokeTopology for ApplicationTopology {
    fn register_spokes(&self, router: &dyn HubRouter) -> Result<(), RouterError> {
        self.0.register_spokes(router)
    }
}
