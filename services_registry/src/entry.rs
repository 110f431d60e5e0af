//! Prioritized registry entries

use core_types::{Priority, ProcessName, UnitId};
use lifecycle::{InstantiationError, LogicUnit, UnitDescriptor};
use std::fmt;

/// Registration tier
///
/// Every `System` entry of a process is dispatched before any `Application`
/// entry, whatever their numeric priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Built-in infrastructure units
    System,
    /// Units registered by the application
    Application,
}

/// A unit descriptor with its priority and, once instantiated, its instance
pub struct PriorityEntry {
    process: ProcessName,
    tier: Tier,
    priority: Priority,
    sequence: u64,
    descriptor: UnitDescriptor,
    instance: Option<Box<dyn LogicUnit>>,
}

impl PriorityEntry {
    /// Creates an entry without an instance
    ///
    /// `sequence` is the registration order used to break priority ties.
    pub fn new(
        process: ProcessName,
        tier: Tier,
        priority: Priority,
        sequence: u64,
        descriptor: UnitDescriptor,
    ) -> Self {
        Self {
            process,
            tier,
            priority,
            sequence,
            descriptor,
            instance: None,
        }
    }

    /// Process this entry is registered under
    pub fn process(&self) -> &ProcessName {
        &self.process
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Registration order within the registry
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn descriptor(&self) -> &UnitDescriptor {
        &self.descriptor
    }

    pub fn unit_id(&self) -> &UnitId {
        self.descriptor.id()
    }

    /// Dispatch ordering key: tier, then priority, then registration order
    pub fn sort_key(&self) -> (Tier, Priority, u64) {
        (self.tier, self.priority, self.sequence)
    }

    /// Constructs the unit and stores it in the entry
    ///
    /// On failure the entry stays without an instance.
    pub fn instantiate(&mut self) -> Result<&mut (dyn LogicUnit + 'static), InstantiationError> {
        let unit = self.descriptor.instantiate()?;
        Ok(self.instance.insert(unit).as_mut())
    }

    /// Checks whether the entry holds a live instance
    pub fn is_live(&self) -> bool {
        self.instance.is_some()
    }

    /// Mutable access to the instance, if any
    pub fn instance_mut(&mut self) -> Option<&mut (dyn LogicUnit + 'static)> {
        self.instance.as_deref_mut()
    }

    /// Drops the instance, if any
    pub fn discard(&mut self) {
        self.instance = None;
    }
}

impl fmt::Debug for PriorityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityEntry")
            .field("process", &self.process)
            .field("unit", self.descriptor.id())
            .field("tier", &self.tier)
            .field("priority", &self.priority)
            .field("sequence", &self.sequence)
            .field("live", &self.is_live())
            .finish()
    }
}
