//! # Process Logic Registry
//!
//! This crate records which logic units belong to which process.
//!
//! ## Philosophy
//!
//! Registration happens once, up front, in every process, for every process.
//! Each process then resolves only its own bucket; the others stay inert and
//! are never instantiated. Wiring mistakes (the same unit twice under one
//! process) are rejected at registration time instead of being overwritten.

pub mod entry;

pub use entry::{PriorityEntry, Tier};

use core_types::{Priority, ProcessName, UnitId};
use lifecycle::UnitDescriptor;
use log::debug;
use std::collections::HashMap;
use thiserror::Error;

/// Error types for registry operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The same unit was registered twice under one process
    #[error("{unit} has already been registered for process {process}")]
    DuplicateRegistration { process: ProcessName, unit: UnitId },

    /// Registration used an empty process name
    #[error("Process name must not be empty (unit {unit})")]
    EmptyProcessName { unit: UnitId },
}

/// Mapping from process name to the units registered for it
///
/// Buckets keep registration order; sorting happens when a bucket is
/// resolved. The registry is populated before resolution and has no
/// internal locking: a caller that wants late or concurrent registration
/// must wrap it in a mutex.
#[derive(Debug, Default)]
pub struct ProcessLogicRegistry {
    buckets: HashMap<ProcessName, Vec<PriorityEntry>>,
    next_sequence: u64,
}

impl ProcessLogicRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an application unit for a process
    pub fn register(
        &mut self,
        process: impl Into<ProcessName>,
        priority: impl Into<Priority>,
        descriptor: UnitDescriptor,
    ) -> Result<(), RegistryError> {
        self.insert(process.into(), Tier::Application, priority.into(), descriptor)
    }

    /// Registers a built-in unit that must run before every application unit
    pub fn register_system(
        &mut self,
        process: impl Into<ProcessName>,
        priority: impl Into<Priority>,
        descriptor: UnitDescriptor,
    ) -> Result<(), RegistryError> {
        self.insert(process.into(), Tier::System, priority.into(), descriptor)
    }

    fn insert(
        &mut self,
        process: ProcessName,
        tier: Tier,
        priority: Priority,
        descriptor: UnitDescriptor,
    ) -> Result<(), RegistryError> {
        if process.is_empty() {
            return Err(RegistryError::EmptyProcessName {
                unit: descriptor.id().clone(),
            });
        }

        let bucket = self.buckets.entry(process.clone()).or_default();
        if bucket.iter().any(|entry| entry.unit_id() == descriptor.id()) {
            return Err(RegistryError::DuplicateRegistration {
                process,
                unit: descriptor.id().clone(),
            });
        }

        debug!(
            "registered {} for {} ({:?}, priority {})",
            descriptor.id(),
            process,
            tier,
            priority
        );

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        bucket.push(PriorityEntry::new(process, tier, priority, sequence, descriptor));
        Ok(())
    }

    /// Returns the entries for a process in dispatch order
    ///
    /// Returns an empty list when nothing is registered for the process.
    pub fn resolve(&self, process: &str) -> Vec<&PriorityEntry> {
        let mut entries: Vec<&PriorityEntry> = self
            .buckets
            .get(process)
            .map(|bucket| bucket.iter().collect())
            .unwrap_or_default();
        entries.sort_by_key(|entry| entry.sort_key());
        entries
    }

    /// Moves the entries for a process out of the registry, in dispatch order
    pub fn take(&mut self, process: &str) -> Vec<PriorityEntry> {
        let mut entries = self.buckets.remove(process).unwrap_or_default();
        entries.sort_by_key(|entry| entry.sort_key());
        entries
    }

    /// Checks whether a unit is registered for a process
    pub fn contains(&self, process: &str, unit: &UnitId) -> bool {
        self.buckets
            .get(process)
            .is_some_and(|bucket| bucket.iter().any(|entry| entry.unit_id() == unit))
    }

    /// Number of units registered for a process
    pub fn len(&self, process: &str) -> usize {
        self.buckets.get(process).map_or(0, Vec::len)
    }

    /// Checks whether nothing is registered for any process
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Lists every process with at least one registration, sorted by name
    pub fn process_names(&self) -> Vec<&ProcessName> {
        let mut names: Vec<_> = self
            .buckets
            .iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(name, _)| name)
            .collect();
        names.sort();
        names
    }
}

/// Registration surface handed to application code
///
/// Only application-tier registration is available through it.
pub struct Registrar<'a> {
    registry: &'a mut ProcessLogicRegistry,
}

impl<'a> Registrar<'a> {
    /// Wraps a registry
    pub fn new(registry: &'a mut ProcessLogicRegistry) -> Self {
        Self { registry }
    }

    /// Registers a unit for a process
    pub fn register_logic(
        &mut self,
        process: impl Into<ProcessName>,
        priority: impl Into<Priority>,
        descriptor: UnitDescriptor,
    ) -> Result<(), RegistryError> {
        self.registry.register(process, priority, descriptor)
    }
}
