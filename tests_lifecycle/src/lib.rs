//! Lifecycle Test Utilities
//!
//! This crate provides shared utilities for cross-crate lifecycle tests.
//!
//! ## Test Philosophy
//!
//! - **Observe, don't inspect**: Units write what they saw into a journal;
//!   tests assert on the journal
//! - **Deterministic identities**: Every test pins the process name
//! - **Failures are injected**: Broken units are built from failing factories

use core_types::{Configuration, ProcessName, TrimLevel};
use lifecycle::{AppContext, AppHandle, InstantiationError, LogicUnit, UnitDescriptor};
use services_dispatcher::LifecycleDispatcher;
use services_process_selector::{FixedIdentity, ProcessSelector};
use services_registry::ProcessLogicRegistry;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared record of unit invocations, as `"<unit>.<event>"` strings
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: String) {
        self.0.borrow_mut().push(entry);
    }

    /// Returns and clears everything recorded so far
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    /// Entries for one event suffix, e.g. `"create"`
    pub fn events(&self, event: &str) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter(|entry| entry.split_once('.').map(|(_, e)| e) == Some(event))
            .cloned()
            .collect()
    }
}

/// Unit that journals every hook it receives
pub struct RecordingUnit {
    name: &'static str,
    journal: Journal,
    app: AppHandle,
}

impl RecordingUnit {
    fn record(&self, event: impl std::fmt::Display) {
        self.journal.record(format!("{}.{}", self.name, event));
    }
}

impl LogicUnit for RecordingUnit {
    fn attach(&mut self, app: AppHandle) {
        self.app = app;
    }

    fn on_create(&mut self) {
        match self.app.upgrade() {
            Some(_) => self.record("create"),
            None => self.record("create(detached)"),
        }
    }

    fn on_terminate(&mut self) {
        self.record("terminate");
    }

    fn on_low_memory(&mut self) {
        self.record("low-memory");
    }

    fn on_trim_memory(&mut self, level: TrimLevel) {
        self.record(format!("trim({})", level.value()));
    }

    fn on_configuration_changed(&mut self, config: &Configuration) {
        self.record(format!("config({})", config));
    }
}

/// Descriptor for a [`RecordingUnit`] named `name`
pub fn recording(name: &'static str, journal: &Journal) -> UnitDescriptor {
    let journal = journal.clone();
    UnitDescriptor::with(name, move || RecordingUnit {
        name,
        journal: journal.clone(),
        app: AppHandle::default(),
    })
}

/// Descriptor whose construction always fails
pub fn failing(name: &'static str) -> UnitDescriptor {
    UnitDescriptor::from_fn(name, move || {
        Err(InstantiationError::Construction(format!(
            "{} refused to start",
            name
        )))
    })
}

/// Selects, instantiates and starts `process`'s share of `registry`
///
/// Returns the context alongside the dispatcher; dropping it invalidates
/// every unit's handle.
pub fn boot(
    process: &str,
    registry: &mut ProcessLogicRegistry,
) -> (Rc<AppContext>, LifecycleDispatcher) {
    let selector = ProcessSelector::new(FixedIdentity::new(process));
    let selection = match selector.select(registry) {
        Ok(selection) => selection,
        Err(err) => panic!("Fixed identity failed: {}", err),
    };

    let context = AppContext::new(ProcessName::new(process));
    let mut dispatcher = LifecycleDispatcher::from_selection(selection);
    if let Err(err) = dispatcher.instantiate(&context.handle()) {
        panic!("Instantiation failed: {}", err);
    }
    if let Err(err) = dispatcher.start() {
        panic!("Start failed: {}", err);
    }
    (context, dispatcher)
}
