//! Hub bootstrap

use crate::{HubRouter, LazyRouterProvider, RouterError, RouterProvider, SpokeTopology};
use crate::{DEFAULT_HUB_PROCESS, HUB_PRIORITY};
use core_types::ProcessName;
use ipc::Connector;
use lifecycle::{AppContext, AppHandle, LogicUnit, UnitDescriptor};
use log::{error, info, warn};
use services_registry::{ProcessLogicRegistry, RegistryError};
use std::rc::Rc;
use std::sync::Arc;

/// What the hub unit needs at start, stored in the application context
pub struct RouterHooks {
    pub provider: Arc<dyn RouterProvider>,
    pub topology: Rc<dyn SpokeTopology>,
}

/// Logic unit that runs in the hub process
///
/// On create it starts the hub router and hands it to the application's
/// spoke topology.
#[derive(Default)]
pub struct HubBootstrap {
    app: AppHandle,
    router: Option<Arc<dyn HubRouter>>,
}

impl HubBootstrap {
    /// Identity the unit is registered under
    pub fn descriptor() -> UnitDescriptor {
        UnitDescriptor::of::<HubBootstrap>()
    }

    fn start_router(&mut self) -> Result<(), RouterError> {
        let context = self
            .app
            .upgrade()
            .ok_or_else(|| RouterError::Unavailable("application context dropped".to_string()))?;
        let hooks = context
            .extension::<RouterHooks>()
            .ok_or_else(|| RouterError::Unavailable("router hooks not installed".to_string()))?;

        let router = hooks.provider.hub_router()?;
        self.router = Some(router.clone());
        if let Err(err) = hooks.topology.register_spokes(router.as_ref()) {
            warn!(
                "Hub {} running with an incomplete topology: {}",
                router.hub_process(),
                err
            );
        }

        info!(
            "Hub {} ready with {} spoke(s)",
            router.hub_process(),
            router.spokes().len()
        );
        Ok(())
    }
}

impl LogicUnit for HubBootstrap {
    fn attach(&mut self, app: AppHandle) {
        self.app = app;
    }

    fn on_create(&mut self) {
        if let Err(err) = self.start_router() {
            error!("Hub bootstrap failed: {}", err);
        }
    }

    fn on_terminate(&mut self) {
        if let Some(router) = self.router.take() {
            info!("Hub {} shutting down", router.hub_process());
        }
    }
}

/// Sets up hub/spoke routing for a multi-process application
pub struct RouterBootstrap {
    hub_process: ProcessName,
    connector: Arc<dyn Connector>,
    topology: Rc<dyn SpokeTopology>,
}

impl RouterBootstrap {
    /// Creates a bootstrap for the default hub process
    pub fn new(connector: Arc<dyn Connector>, topology: Rc<dyn SpokeTopology>) -> Self {
        Self {
            hub_process: ProcessName::new(DEFAULT_HUB_PROCESS),
            connector,
            topology,
        }
    }

    /// Uses a different reserved name for the hub process
    pub fn with_hub_process(mut self, hub_process: impl Into<ProcessName>) -> Self {
        self.hub_process = hub_process.into();
        self
    }

    pub fn hub_process(&self) -> &ProcessName {
        &self.hub_process
    }

    /// Registers the hub unit and requests the hub listener
    ///
    /// Does nothing and returns `false` when `multi_process` is off. Must run
    /// before the application registers its own logic. Fails only if the hub
    /// unit is already registered.
    pub fn install(
        &self,
        multi_process: bool,
        registry: &mut ProcessLogicRegistry,
        context: &AppContext,
    ) -> Result<bool, RegistryError> {
        if !multi_process {
            return Ok(false);
        }

        registry.register_system(
            self.hub_process.clone(),
            HUB_PRIORITY,
            HubBootstrap::descriptor(),
        )?;

        let hooks = RouterHooks {
            provider: Arc::new(LazyRouterProvider::new(
                self.hub_process.clone(),
                self.connector.clone(),
            )),
            topology: self.topology.clone(),
        };
        if context.insert_extension(Rc::new(hooks)).is_some() {
            warn!("Router hooks replaced in {}", context.process_name());
        }

        if let Err(err) = self.connector.start_hub_listener() {
            error!("Hub listener request failed: {}", err);
        }
        info!("Router bootstrap installed for hub {}", self.hub_process);
        Ok(true)
    }
}
