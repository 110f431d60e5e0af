//! Multi-Process Bootstrap Tests
//!
//! Validates hub election and spoke wiring through the full host startup.

use apphost::{AppHost, Application};
use hub_router::{HubRouter, RouterError, SpokeTopology, StaticTopology, DEFAULT_HUB_PROCESS};
use ipc::{ConnectorCall, RecordingConnector};
use services_process_selector::{FixedIdentity, ProcessSelector};
use services_registry::{Registrar, RegistryError};
use std::sync::Arc;
use tests_lifecycle::{recording, Journal};

struct ChatApp {
    journal: Journal,
}

impl Application for ChatApp {
    fn needs_multi_process(&self) -> bool {
        true
    }

    fn initialize_logic(&self, registrar: &mut Registrar<'_>) -> Result<(), RegistryError> {
        registrar.register_logic("main", 0, recording("Ui", &self.journal))?;
        registrar.register_logic(":push", 0, recording("Push", &self.journal))?;
        // Tries to outrank the hub bootstrap in its own process.
        registrar.register_logic(
            DEFAULT_HUB_PROCESS,
            i32::MIN,
            recording("Eager", &self.journal),
        )?;
        Ok(())
    }

    fn register_spokes(&self, router: &dyn HubRouter) -> Result<(), RouterError> {
        self.journal.record("app.register_spokes".to_string());
        router.register_spoke("main".into(), "unix:///tmp/main.sock".to_string())?;
        router.register_spoke(":push".into(), "unix:///tmp/push.sock".to_string())?;
        Ok(())
    }
}

fn host(process: &str, journal: &Journal, connector: &Arc<RecordingConnector>) -> AppHost {
    AppHost::new(
        ChatApp {
            journal: journal.clone(),
        },
        ProcessSelector::new(FixedIdentity::new(process)),
        connector.clone(),
    )
}

/// Test: The hub bootstrap is the first unit created in the hub process
///
/// Even an application unit at the lowest possible priority starts after
/// it, and spoke registration happens inside the hub's on_create.
#[test]
fn test_hub_unit_runs_first_in_hub() {
    let journal = Journal::new();
    let connector = Arc::new(RecordingConnector::new());
    let mut host = host(DEFAULT_HUB_PROCESS, &journal, &connector);

    let report = host.on_start().unwrap();

    assert!(report.router_installed);
    assert_eq!(report.started.len(), 2);
    assert!(report.started[0].as_str().ends_with("HubBootstrap"));
    assert_eq!(journal.entries(), vec!["app.register_spokes", "Eager.create"]);
    assert_eq!(
        connector.calls(),
        vec![
            ConnectorCall::StartHubListener,
            ConnectorCall::ConnectSpoke {
                process: "main".into(),
                address: "unix:///tmp/main.sock".to_string(),
            },
            ConnectorCall::ConnectSpoke {
                process: ":push".into(),
                address: "unix:///tmp/push.sock".to_string(),
            },
        ]
    );
}

/// Test: Spoke processes never instantiate the hub bootstrap
#[test]
fn test_spoke_process_skips_hub_unit() {
    let journal = Journal::new();
    let connector = Arc::new(RecordingConnector::new());
    let mut host = host("main", &journal, &connector);

    let report = host.on_start().unwrap();

    assert!(report.router_installed);
    assert_eq!(report.started.len(), 1);
    assert_eq!(journal.entries(), vec!["Ui.create"]);
    assert_eq!(connector.listener_requests(), 1);
    assert_eq!(host.registry().len(DEFAULT_HUB_PROCESS), 2);
}

/// Test: Disabling multi-process mode skips the bootstrap entirely
#[test]
fn test_single_process_mode() {
    let journal = Journal::new();
    let connector = Arc::new(RecordingConnector::new());
    let mut host = host(DEFAULT_HUB_PROCESS, &journal, &connector);
    host.set_multi_process_mode(false);

    let report = host.on_start().unwrap();

    assert!(!report.router_installed);
    assert_eq!(journal.entries(), vec!["Eager.create"]);
    assert!(connector.calls().is_empty());
}

/// Test: A failing listener request does not stop startup
#[test]
fn test_listener_failure_tolerated() {
    let journal = Journal::new();
    let connector = Arc::new(RecordingConnector::new().fail_listener());
    let mut host = host(DEFAULT_HUB_PROCESS, &journal, &connector);

    let report = host.on_start().unwrap();

    assert!(report.router_installed);
    assert_eq!(journal.events("create"), vec!["Eager.create"]);
}

/// Test: An unreachable spoke is logged and the hub process keeps running
#[test]
fn test_unreachable_spoke_tolerated() {
    let journal = Journal::new();
    let connector = Arc::new(RecordingConnector::new().unreachable("main"));
    let mut host = host(DEFAULT_HUB_PROCESS, &journal, &connector);

    host.on_start().unwrap();
    assert_eq!(host.on_low_memory().unwrap(), 2);
    assert_eq!(
        journal.entries(),
        vec!["app.register_spokes", "Eager.create", "Eager.low-memory"]
    );
}

/// Test: One unreachable spoke does not keep the others off the hub
#[test]
fn test_static_spokes_registered_past_failure() {
    let journal = Journal::new();
    let connector = Arc::new(RecordingConnector::new().unreachable("main"));
    let spokes = StaticTopology::new()
        .spoke("main", "unix:///tmp/main.sock")
        .spoke(":push", "unix:///tmp/push.sock");
    let mut host = AppHost::new(
        StaticChatApp {
            inner: ChatApp {
                journal: journal.clone(),
            },
            spokes,
        },
        ProcessSelector::new(FixedIdentity::new(DEFAULT_HUB_PROCESS)),
        connector.clone(),
    );

    host.on_start().unwrap();

    let attempted: Vec<_> = connector
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            ConnectorCall::ConnectSpoke { process, .. } => Some(process.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(attempted, vec!["main", ":push"]);
    assert_eq!(journal.events("create"), vec!["Eager.create"]);
}

struct StaticChatApp {
    inner: ChatApp,
    spokes: StaticTopology,
}

impl Application for StaticChatApp {
    fn needs_multi_process(&self) -> bool {
        true
    }

    fn initialize_logic(&self, registrar: &mut Registrar<'_>) -> Result<(), RegistryError> {
        self.inner.initialize_logic(registrar)
    }

    fn register_spokes(&self, router: &dyn HubRouter) -> Result<(), RouterError> {
        self.spokes.register_spokes(router)
    }
}
