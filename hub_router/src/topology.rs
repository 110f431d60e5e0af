//! Spoke declarations

use crate::{HubRouter, RouterError};
use core_types::ProcessName;
use log::error;

/// Declares which processes join the hub as spokes
///
/// Invoked once, inside the hub process, after the router has started.
pub trait SpokeTopology {
    fn register_spokes(&self, router: &dyn HubRouter) -> Result<(), RouterError>;
}

impl<F> SpokeTopology for F
where
    F: Fn(&dyn HubRouter) -> Result<(), RouterError>,
{
    fn register_spokes(&self, router: &dyn HubRouter) -> Result<(), RouterError> {
        self(router)
    }
}

/// A fixed list of spokes and their addresses
#[derive(Debug, Clone, Default)]
pub struct StaticTopology {
    spokes: Vec<(ProcessName, String)>,
}

impl StaticTopology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoke(mut self, process: impl Into<ProcessName>, address: impl Into<String>) -> Self {
        self.spokes.push((process.into(), address.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.spokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spokes.is_empty()
    }
}

impl SpokeTopology for StaticTopology {
    /// Registers every spoke in declaration order
    ///
    /// One failed spoke does not hold back the rest. Each failure is logged
    /// and the first one is returned once every spoke has been attempted.
    fn register_spokes(&self, router: &dyn HubRouter) -> Result<(), RouterError> {
        let mut first_failure = None;
        for (process, address) in &self.spokes {
            if let Err(err) = router.register_spoke(process.clone(), address.clone()) {
                error!("Spoke {} not registered with hub: {}", process, err);
                first_failure.get_or_insert(err);
            }
        }
        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
