//! Bundled demo application
//!
//! Three processes: `main` runs the UI-facing units, `:worker` runs a job
//! queue, and the hub audits the spokes it was given.

use crate::Application;
use core_types::{Configuration, TrimLevel};
use hub_router::{HubRouter, RouterError, SpokeTopology, StaticTopology};
use lifecycle::{AppHandle, LogicUnit, UnitDescriptor};
use log::info;
use services_registry::{Registrar, RegistryError};

pub const MAIN_PROCESS: &str = "main";
pub const WORKER_PROCESS: &str = ":worker";

pub struct DemoApplication {
    multi_process: bool,
    hub_process: String,
    spokes: StaticTopology,
}

impl DemoApplication {
    pub fn new(multi_process: bool) -> Self {
        Self {
            multi_process,
            hub_process: hub_router::DEFAULT_HUB_PROCESS.to_string(),
            spokes: StaticTopology::new(),
        }
    }

    pub fn with_hub_process(mut self, hub_process: impl Into<String>) -> Self {
        self.hub_process = hub_process.into();
        self
    }

    pub fn with_spokes(mut self, spokes: StaticTopology) -> Self {
        self.spokes = spokes;
        self
    }
}

impl Application for DemoApplication {
    fn needs_multi_process(&self) -> bool {
        self.multi_process
    }

    fn initialize_logic(&self, registrar: &mut Registrar<'_>) -> Result<(), RegistryError> {
        registrar.register_logic(MAIN_PROCESS, 0, UnitDescriptor::of::<Preferences>())?;
        registrar.register_logic(MAIN_PROCESS, 10, UnitDescriptor::of::<ImageCache>())?;
        registrar.register_logic(WORKER_PROCESS, 0, UnitDescriptor::of::<JobQueue>())?;
        registrar.register_logic(
            self.hub_process.as_str(),
            0,
            UnitDescriptor::of::<SpokeAudit>(),
        )?;
        Ok(())
    }

    fn register_spokes(&self, router: &dyn HubRouter) -> Result<(), RouterError> {
        self.spokes.register_spokes(router)
    }
}

/// Tracks the current configuration
#[derive(Default)]
pub struct Preferences {
    app: AppHandle,
    current: Configuration,
}

impl LogicUnit for Preferences {
    fn attach(&mut self, app: AppHandle) {
        self.app = app;
    }

    fn on_create(&mut self) {
        let process = self.app.process_name().map(|p| p.to_string());
        info!("Preferences loaded in {}", process.unwrap_or_default());
    }

    fn on_configuration_changed(&mut self, config: &Configuration) {
        info!("Preferences updated: {} -> {}", self.current, config);
        self.current = config.clone();
    }
}

/// Cache that sheds entries under memory pressure
pub struct ImageCache {
    entries: usize,
}

impl Default for ImageCache {
    fn default() -> Self {
        Self { entries: 64 }
    }
}

impl LogicUnit for ImageCache {
    fn on_low_memory(&mut self) {
        self.entries = 0;
        info!("Image cache cleared");
    }

    fn on_trim_memory(&mut self, level: TrimLevel) {
        self.entries = if level.is_running() {
            self.entries / 2
        } else {
            0
        };
        info!("Image cache trimmed at {} to {} entries", level, self.entries);
    }

    fn on_terminate(&mut self) {
        info!("Image cache dropping {} entries", self.entries);
    }
}

/// Background job queue of the worker process
#[derive(Default)]
pub struct JobQueue {
    running: bool,
}

impl LogicUnit for JobQueue {
    fn on_create(&mut self) {
        self.running = true;
        info!("Job queue accepting work");
    }

    fn on_terminate(&mut self) {
        if self.running {
            info!("Job queue drained");
        }
        self.running = false;
    }
}

/// Runs in the hub after the router is up
#[derive(Default)]
pub struct SpokeAudit;

impl LogicUnit for SpokeAudit {
    fn on_create(&mut self) {
        info!("Spoke audit active");
    }
}
