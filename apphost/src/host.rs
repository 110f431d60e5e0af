//! # Host Runtime
//!
//! Startup sequence and lifecycle forwarding for one process.

use crate::application::ApplicationTopology;
use crate::{Application, EventScript, HostError, ScriptEvent};
use core_types::{Configuration, ProcessName, TrimLevel, UnitId};
use hub_router::{RouterBootstrap, DEFAULT_HUB_PROCESS};
use ipc::Connector;
use lifecycle::{AppContext, LifecycleEvent};
use log::{debug, info};
use services_dispatcher::{DispatcherState, LifecycleDispatcher};
use services_process_selector::ProcessSelector;
use services_registry::{ProcessLogicRegistry, Registrar};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

/// Outcome of a successful start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartReport {
    pub process: ProcessName,
    pub router_installed: bool,
    /// Units that received `on_create`, in order
    pub started: Vec<UnitId>,
    /// Units that could not be constructed
    pub failed: Vec<UnitId>,
}

/// Hosts an application inside one OS process
///
/// Owns the registry, the application context and the dispatcher. Nothing
/// here is global; a second host in the same process is independent.
pub struct AppHost {
    application: Rc<dyn Application>,
    selector: ProcessSelector,
    connector: Arc<dyn Connector>,
    hub_process: ProcessName,
    multi_process: Option<bool>,
    registry: ProcessLogicRegistry,
    context: Option<Rc<AppContext>>,
    dispatcher: Option<LifecycleDispatcher>,
}

impl AppHost {
    pub fn new(
        application: impl Application + 'static,
        selector: ProcessSelector,
        connector: Arc<dyn Connector>,
    ) -> Self {
        Self {
            application: Rc::new(application),
            selector,
            connector,
            hub_process: ProcessName::new(DEFAULT_HUB_PROCESS),
            multi_process: None,
            registry: ProcessLogicRegistry::new(),
            context: None,
            dispatcher: None,
        }
    }

    /// Uses a different reserved name for the hub process
    pub fn with_hub_process(mut self, hub_process: impl Into<ProcessName>) -> Self {
        self.hub_process = hub_process.into();
        self
    }

    /// Overrides the application's multi-process answer
    ///
    /// Only has an effect before [`on_start`](Self::on_start).
    pub fn set_multi_process_mode(&mut self, enabled: bool) {
        self.multi_process = Some(enabled);
    }

    pub fn multi_process_enabled(&self) -> bool {
        self.multi_process
            .unwrap_or_else(|| self.application.needs_multi_process())
    }

    pub fn hub_process(&self) -> &ProcessName {
        &self.hub_process
    }

    /// Registrations left for other processes; never instantiated here
    pub fn registry(&self) -> &ProcessLogicRegistry {
        &self.registry
    }

    pub fn context(&self) -> Option<&Rc<AppContext>> {
        self.context.as_ref()
    }

    pub fn state(&self) -> DispatcherState {
        self.dispatcher
            .as_ref()
            .map(LifecycleDispatcher::state)
            .unwrap_or(DispatcherState::Uninitialized)
    }

    /// Registers, selects, instantiates and starts this process's units
    ///
    /// A duplicate registration aborts startup before anything is built.
    pub fn on_start(&mut self) -> Result<StartReport, HostError> {
        if self.dispatcher.is_some() {
            return Err(HostError::AlreadyStarted);
        }

        let begin = Instant::now();
        let process = self.selector.current_process_name()?;
        info!("Application on_start begin in {}", process);

        let context = AppContext::new(process.clone());
        let topology = Rc::new(ApplicationTopology(self.application.clone()));
        let router_installed = RouterBootstrap::new(self.connector.clone(), topology)
            .with_hub_process(self.hub_process.clone())
            .install(
                self.multi_process_enabled(),
                &mut self.registry,
                &context,
            )?;

        self.application
            .initialize_logic(&mut Registrar::new(&mut self.registry))?;
        debug!(
            "Registered logic for {} process(es)",
            self.registry.process_names().len()
        );

        let selection = ProcessSelector::select_for(process.clone(), &mut self.registry);
        let mut dispatcher = LifecycleDispatcher::from_selection(selection);
        dispatcher.instantiate(&context.handle())?;
        dispatcher.start()?;

        let report = StartReport {
            process,
            router_installed,
            started: dispatcher.live_units().into_iter().cloned().collect(),
            failed: dispatcher.failed_units().into_iter().cloned().collect(),
        };

        self.context = Some(context);
        self.dispatcher = Some(dispatcher);
        info!(
            "Application on_start end in {} ({} unit(s), {:?})",
            report.process,
            report.started.len(),
            begin.elapsed()
        );
        Ok(report)
    }

    pub fn on_terminate(&mut self) -> Result<usize, HostError> {
        let delivered = self.deliver(LifecycleEvent::Terminate)?;
        info!("Application terminated ({} unit(s) notified)", delivered);
        Ok(delivered)
    }

    pub fn on_low_memory(&mut self) -> Result<usize, HostError> {
        self.deliver(LifecycleEvent::LowMemory)
    }

    pub fn on_trim_memory(&mut self, level: TrimLevel) -> Result<usize, HostError> {
        self.deliver(LifecycleEvent::TrimMemory(level))
    }

    pub fn on_configuration_changed(
        &mut self,
        config: Configuration,
    ) -> Result<usize, HostError> {
        self.deliver(LifecycleEvent::ConfigurationChanged(config))
    }

    /// Starts, plays the script, and terminates if the script did not
    pub fn run_script(&mut self, mut script: EventScript) -> Result<StartReport, HostError> {
        let report = self.on_start()?;
        while let Some(event) = script.next_event() {
            match event {
                ScriptEvent::Terminate => {
                    self.on_terminate()?;
                }
                event => {
                    let description = format!("{:?}", event);
                    let delivered = self.deliver(event.into_lifecycle_event())?;
                    debug!("Script event {} reached {} unit(s)", description, delivered);
                }
            }
        }
        if self.state() != DispatcherState::Terminated {
            self.on_terminate()?;
        }
        Ok(report)
    }

    fn deliver(&mut self, event: LifecycleEvent) -> Result<usize, HostError> {
        let dispatcher = self.dispatcher.as_mut().ok_or(HostError::NotStarted)?;
        Ok(dispatcher.deliver(event)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipc::RecordingConnector;
    use lifecycle::{LogicUnit, UnitDescriptor};
    use services_dispatcher::DispatchError;
    use services_process_selector::FixedIdentity;
    use services_registry::RegistryError;
    use std::cell::RefCell;

    type Journal = Rc<RefCell<Vec<String>>>;

    struct Probe {
        name: &'static str,
        journal: Journal,
    }

    impl LogicUnit for Probe {
        fn on_create(&mut self) {
            self.journal.borrow_mut().push(format!("{}.create", self.name));
        }

        fn on_terminate(&mut self) {
            self.journal
                .borrow_mut()
                .push(format!("{}.terminate", self.name));
        }

        fn on_trim_memory(&mut self, level: TrimLevel) {
            self.journal
                .borrow_mut()
                .push(format!("{}.trim({})", self.name, level.value()));
        }
    }

    struct TestApp {
        multi_process: bool,
        journal: Journal,
        duplicate: bool,
    }

    impl TestApp {
        fn probe(&self, name: &'static str) -> UnitDescriptor {
            let journal = self.journal.clone();
            UnitDescriptor::with(name, move || Probe {
                name,
                journal: journal.clone(),
            })
        }
    }

    impl Application for TestApp {
        fn needs_multi_process(&self) -> bool {
            self.multi_process
        }

        fn initialize_logic(&self, registrar: &mut Registrar<'_>) -> Result<(), RegistryError> {
            registrar.register_logic("main", 10, self.probe("A"))?;
            registrar.register_logic("main", 5, self.probe("B"))?;
            registrar.register_logic(":worker", 0, self.probe("W"))?;
            if self.duplicate {
                registrar.register_logic("main", 1, self.probe("A"))?;
            }
            Ok(())
        }
    }

    fn host(process: &str, multi_process: bool, journal: &Journal) -> AppHost {
        let app = TestApp {
            multi_process,
            journal: journal.clone(),
            duplicate: false,
        };
        AppHost::new(
            app,
            ProcessSelector::new(FixedIdentity::new(process)),
            Arc::new(RecordingConnector::new()),
        )
    }

    #[test]
    fn test_start_runs_own_units_in_order() {
        let journal = Journal::default();
        let mut host = host("main", false, &journal);

        let report = host.on_start().unwrap();

        assert!(!report.router_installed);
        assert_eq!(report.started, vec![UnitId::from_static("B"), UnitId::from_static("A")]);
        assert_eq!(*journal.borrow(), vec!["B.create", "A.create"]);
        assert_eq!(host.registry().len(":worker"), 1);
        assert_eq!(host.context().unwrap().process_name(), "main");
    }

    #[test]
    fn test_events_forwarded_then_terminate() {
        let journal = Journal::default();
        let mut host = host(":worker", false, &journal);
        host.on_start().unwrap();

        assert_eq!(host.on_trim_memory(TrimLevel::BACKGROUND).unwrap(), 1);
        assert_eq!(host.on_terminate().unwrap(), 1);
        assert!(matches!(
            host.on_low_memory(),
            Err(HostError::Dispatch(DispatchError::Terminated { .. }))
        ));
        assert_eq!(
            *journal.borrow(),
            vec!["W.create", "W.trim(40)", "W.terminate"]
        );
    }

    #[test]
    fn test_events_before_start() {
        let journal = Journal::default();
        let mut host = host("main", false, &journal);
        assert!(matches!(host.on_low_memory(), Err(HostError::NotStarted)));
        assert_eq!(host.state(), DispatcherState::Uninitialized);
    }

    #[test]
    fn test_start_twice_rejected() {
        let journal = Journal::default();
        let mut host = host("main", false, &journal);
        host.on_start().unwrap();
        assert!(matches!(host.on_start(), Err(HostError::AlreadyStarted)));
    }

    #[test]
    fn test_duplicate_registration_aborts_start() {
        let journal = Journal::default();
        let app = TestApp {
            multi_process: false,
            journal: journal.clone(),
            duplicate: true,
        };
        let mut host = AppHost::new(
            app,
            ProcessSelector::new(FixedIdentity::new("main")),
            Arc::new(RecordingConnector::new()),
        );

        assert!(matches!(
            host.on_start(),
            Err(HostError::Registry(RegistryError::DuplicateRegistration { .. }))
        ));
        assert!(journal.borrow().is_empty());
    }

    #[test]
    fn test_multi_process_override() {
        let journal = Journal::default();
        let mut host = host(":router", false, &journal);
        assert!(!host.multi_process_enabled());

        host.set_multi_process_mode(true);
        let report = host.on_start().unwrap();

        assert!(report.router_installed);
        assert_eq!(report.started.len(), 1);
        assert!(report.started[0].as_str().ends_with("HubBootstrap"));
    }

    #[test]
    fn test_run_script_terminates_implicitly() {
        let journal = Journal::default();
        let mut host = host("main", false, &journal);
        let script = EventScript::from_text("trim 5").unwrap();

        host.run_script(script).unwrap();

        assert_eq!(host.state(), DispatcherState::Terminated);
        assert_eq!(
            *journal.borrow(),
            vec![
                "B.create",
                "A.create",
                "B.trim(5)",
                "A.trim(5)",
                "B.terminate",
                "A.terminate"
            ]
        );
    }
}
