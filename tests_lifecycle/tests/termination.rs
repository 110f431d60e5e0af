//! Termination Tests
//!
//! Validates that terminate is final.

use core_types::{Configuration, TrimLevel};
use lifecycle::LifecycleEvent;
use services_dispatcher::{DispatchError, DispatcherState};
use services_registry::ProcessLogicRegistry;
use tests_lifecycle::{boot, recording, Journal};

/// Test: After terminate no event invokes any unit
#[test]
fn test_nothing_after_terminate() {
    let journal = Journal::new();
    let mut registry = ProcessLogicRegistry::new();
    registry.register("main", 0, recording("A", &journal)).unwrap();
    registry.register("main", 1, recording("B", &journal)).unwrap();

    let (_context, mut dispatcher) = boot("main", &mut registry);
    assert_eq!(dispatcher.terminate().unwrap(), 2);
    assert_eq!(
        journal.drain(),
        vec!["A.create", "B.create", "A.terminate", "B.terminate"]
    );

    for event in [
        LifecycleEvent::LowMemory,
        LifecycleEvent::TrimMemory(TrimLevel::COMPLETE),
        LifecycleEvent::ConfigurationChanged(Configuration::empty()),
        LifecycleEvent::Terminate,
        LifecycleEvent::Create,
    ] {
        assert!(dispatcher.deliver(event).is_err());
    }

    assert!(journal.entries().is_empty());
    assert!(dispatcher.live_units().is_empty());
    assert_eq!(dispatcher.state(), DispatcherState::Terminated);
}

/// Test: A second terminate reports the terminated state
#[test]
fn test_terminate_twice() {
    let mut registry = ProcessLogicRegistry::new();
    let (_context, mut dispatcher) = boot("main", &mut registry);

    dispatcher.terminate().unwrap();
    assert!(matches!(
        dispatcher.terminate(),
        Err(DispatchError::Terminated { .. })
    ));
}

/// Test: Units see a live context for as long as the host holds it
#[test]
fn test_units_see_live_context() {
    let journal = Journal::new();
    let mut registry = ProcessLogicRegistry::new();
    registry.register("main", 0, recording("A", &journal)).unwrap();

    let (context, _dispatcher) = boot("main", &mut registry);

    assert_eq!(journal.entries(), vec!["A.create"]);
    assert_eq!(context.process_name(), "main");
}
