//! Dispatch Order Tests
//!
//! Validates that fan-out is total and follows the same priority order for
//! every event.

use core_types::{Configuration, TrimLevel};
use serde_json::json;
use services_dispatcher::DispatcherState;
use services_registry::ProcessLogicRegistry;
use tests_lifecycle::{boot, recording, Journal};

/// Test: Lower priority values are created first
///
/// A registered at 10 and B at 5 under "main" resolve as [B, A], and
/// on_create reaches them in that order.
#[test]
fn test_create_order_follows_priority() {
    let journal = Journal::new();
    let mut registry = ProcessLogicRegistry::new();
    registry.register("main", 10, recording("A", &journal)).unwrap();
    registry.register("main", 5, recording("B", &journal)).unwrap();

    let ids: Vec<String> = registry
        .resolve("main")
        .iter()
        .map(|entry| entry.unit_id().to_string())
        .collect();
    assert_eq!(ids, vec!["B", "A"]);

    let (_context, dispatcher) = boot("main", &mut registry);
    assert_eq!(dispatcher.state(), DispatcherState::Running);
    assert_eq!(journal.drain(), vec!["B.create", "A.create"]);
}

/// Test: Every unit sees on_create before any other event
#[test]
fn test_create_precedes_everything() {
    let journal = Journal::new();
    let mut registry = ProcessLogicRegistry::new();
    for (priority, name) in [(2, "C"), (0, "A"), (1, "B")] {
        registry.register("main", priority, recording(name, &journal)).unwrap();
    }

    let (_context, mut dispatcher) = boot("main", &mut registry);
    dispatcher.low_memory().unwrap();

    let entries = journal.entries();
    let last_create = entries.iter().rposition(|e| e.ends_with(".create")).unwrap();
    let first_other = entries.iter().position(|e| !e.ends_with(".create")).unwrap();
    assert!(last_create < first_other);
    assert_eq!(journal.events("create"), vec!["A.create", "B.create", "C.create"]);
}

/// Test: trim(5) reaches each of three units exactly once, in order
#[test]
fn test_trim_reaches_each_unit_once() {
    let journal = Journal::new();
    let mut registry = ProcessLogicRegistry::new();
    registry.register("main", 1, recording("A", &journal)).unwrap();
    registry.register("main", 2, recording("B", &journal)).unwrap();
    registry.register("main", 3, recording("C", &journal)).unwrap();

    let (_context, mut dispatcher) = boot("main", &mut registry);
    journal.drain();

    assert_eq!(dispatcher.trim_memory(TrimLevel::new(5)).unwrap(), 3);
    assert_eq!(journal.drain(), vec!["A.trim(5)", "B.trim(5)", "C.trim(5)"]);
}

/// Test: Repeated events keep the same order and the payload is unchanged
#[test]
fn test_every_event_uses_the_same_order() {
    let journal = Journal::new();
    let mut registry = ProcessLogicRegistry::new();
    registry.register("main", 7, recording("Y", &journal)).unwrap();
    registry.register("main", -1, recording("X", &journal)).unwrap();

    let (_context, mut dispatcher) = boot("main", &mut registry);
    journal.drain();

    dispatcher
        .configuration_changed(Configuration::new(json!({"locale": "fr"})))
        .unwrap();
    dispatcher.trim_memory(TrimLevel::new(-42)).unwrap();
    dispatcher.low_memory().unwrap();
    dispatcher.low_memory().unwrap();

    assert_eq!(
        journal.drain(),
        vec![
            r#"X.config({"locale":"fr"})"#,
            r#"Y.config({"locale":"fr"})"#,
            "X.trim(-42)",
            "Y.trim(-42)",
            "X.low-memory",
            "Y.low-memory",
            "X.low-memory",
            "Y.low-memory",
        ]
    );
}

/// Test: A process with nothing registered runs through its lifecycle quietly
#[test]
fn test_empty_process_has_no_invocations() {
    let journal = Journal::new();
    let mut registry = ProcessLogicRegistry::new();
    registry.register("main", 0, recording("A", &journal)).unwrap();

    let (_context, mut dispatcher) = boot(":idle", &mut registry);
    assert_eq!(dispatcher.low_memory().unwrap(), 0);
    assert_eq!(dispatcher.trim_memory(TrimLevel::COMPLETE).unwrap(), 0);
    assert_eq!(dispatcher.terminate().unwrap(), 0);

    assert!(journal.entries().is_empty());
    assert_eq!(registry.len("main"), 1);
}
