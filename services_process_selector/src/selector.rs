//! Selection of the current process's entry set

use crate::{IdentityError, ProcessIdentity};
use core_types::ProcessName;
use log::{debug, info};
use services_registry::{PriorityEntry, ProcessLogicRegistry};

/// Entries resolved for the running process, in dispatch order
#[derive(Debug)]
pub struct Selection {
    pub process: ProcessName,
    pub entries: Vec<PriorityEntry>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves which bucket of the registry belongs to this process
pub struct ProcessSelector {
    identity: Box<dyn ProcessIdentity>,
}

impl ProcessSelector {
    pub fn new(identity: impl ProcessIdentity + 'static) -> Self {
        Self {
            identity: Box::new(identity),
        }
    }

    /// Logical name of the running process
    pub fn current_process_name(&self) -> Result<ProcessName, IdentityError> {
        let name = self.identity.current_process_name()?;
        if name.is_empty() {
            return Err(IdentityError::Empty);
        }
        Ok(name)
    }

    /// Takes the running process's entries out of the registry
    ///
    /// The other buckets are left untouched and are never instantiated by
    /// this process.
    pub fn select(&self, registry: &mut ProcessLogicRegistry) -> Result<Selection, IdentityError> {
        let process = self.current_process_name()?;
        Ok(Self::select_for(process, registry))
    }

    /// Same as [`select`](Self::select) for an already resolved name
    pub fn select_for(process: ProcessName, registry: &mut ProcessLogicRegistry) -> Selection {
        let entries = registry.take(process.as_str());
        if entries.is_empty() {
            debug!("no logic registered for process {}", process);
        } else {
            info!(
                "selected {} logic unit(s) for process {}",
                entries.len(),
                process
            );
        }
        Selection { process, entries }
    }
}
