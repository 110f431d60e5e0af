//! Instantiation and fan-out

use crate::DispatcherState;
use core_types::{Configuration, ProcessName, TrimLevel, UnitId};
use lifecycle::{AppHandle, InstantiationError, LifecycleEvent, LifecycleEventKind};
use log::{debug, info, warn};
use services_process_selector::Selection;
use services_registry::PriorityEntry;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Cannot {action} while dispatcher is {state}")]
    InvalidTransition {
        action: &'static str,
        state: DispatcherState,
    },

    #[error("Cannot deliver {event} while dispatcher is {state}")]
    NotRunning {
        event: LifecycleEventKind,
        state: DispatcherState,
    },

    #[error("Dispatcher has terminated; {event} not delivered")]
    Terminated { event: LifecycleEventKind },
}

/// A unit that could not be constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstantiationFailure {
    pub unit: UnitId,
    pub error: InstantiationError,
}

/// Drives the resolved entry set of one process
///
/// Owns the entries exclusively. Everything runs on the caller's thread,
/// synchronously; a call returns once every unit has seen the event.
#[derive(Debug)]
pub struct LifecycleDispatcher {
    process: ProcessName,
    entries: Vec<PriorityEntry>,
    state: DispatcherState,
    failures: Vec<InstantiationFailure>,
}

impl LifecycleDispatcher {
    /// Creates a dispatcher for a process's entries
    ///
    /// Entries are put in dispatch order if they are not already.
    pub fn new(process: ProcessName, mut entries: Vec<PriorityEntry>) -> Self {
        entries.sort_by_key(|entry| entry.sort_key());
        Self {
            process,
            entries,
            state: DispatcherState::Uninitialized,
            failures: Vec::new(),
        }
    }

    /// Creates a dispatcher from a selector result
    pub fn from_selection(selection: Selection) -> Self {
        Self::new(selection.process, selection.entries)
    }

    pub fn process(&self) -> &ProcessName {
        &self.process
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    /// Units taking part in fan-out, in dispatch order
    pub fn live_units(&self) -> Vec<&UnitId> {
        self.entries
            .iter()
            .filter(|entry| entry.is_live())
            .map(PriorityEntry::unit_id)
            .collect()
    }

    /// Units that failed to construct, with the reason
    pub fn failures(&self) -> &[InstantiationFailure] {
        &self.failures
    }

    pub fn failed_units(&self) -> Vec<&UnitId> {
        self.failures.iter().map(|failure| &failure.unit).collect()
    }

    /// Constructs every unit and attaches it to the application context
    ///
    /// Returns how many units were built. Construction failures are logged
    /// and recorded; they never fail the call.
    pub fn instantiate(&mut self, app: &AppHandle) -> Result<usize, DispatchError> {
        if self.state != DispatcherState::Uninitialized {
            return Err(DispatchError::InvalidTransition {
                action: "instantiate",
                state: self.state,
            });
        }

        let mut built = 0;
        for entry in &mut self.entries {
            match entry.instantiate() {
                Ok(unit) => {
                    unit.attach(app.clone());
                    built += 1;
                }
                Err(error) => {
                    warn!(
                        "[{}] failed to instantiate {}: {}",
                        self.process,
                        entry.unit_id(),
                        error
                    );
                    self.failures.push(InstantiationFailure {
                        unit: entry.unit_id().clone(),
                        error,
                    });
                }
            }
        }

        info!(
            "[{}] instantiated {} of {} logic unit(s)",
            self.process,
            built,
            self.entries.len()
        );
        self.state = DispatcherState::Instantiated;
        Ok(built)
    }

    /// Delivers `on_create` to every unit
    pub fn start(&mut self) -> Result<usize, DispatchError> {
        if self.state != DispatcherState::Instantiated {
            return Err(DispatchError::InvalidTransition {
                action: "start",
                state: self.state,
            });
        }
        let delivered = self.fan_out(&LifecycleEvent::Create);
        self.state = DispatcherState::Running;
        Ok(delivered)
    }

    /// Delivers `on_terminate` to every unit and drops the instances
    ///
    /// Units that never received `on_create` are dropped without callbacks.
    pub fn terminate(&mut self) -> Result<usize, DispatchError> {
        let delivered = match self.state {
            DispatcherState::Terminated => {
                return Err(DispatchError::Terminated {
                    event: LifecycleEventKind::Terminate,
                })
            }
            DispatcherState::Running => self.fan_out(&LifecycleEvent::Terminate),
            DispatcherState::Uninitialized | DispatcherState::Instantiated => {
                debug!(
                    "[{}] terminating before start; discarding units without callbacks",
                    self.process
                );
                0
            }
        };

        for entry in &mut self.entries {
            entry.discard();
        }
        self.entries.clear();
        self.state = DispatcherState::Terminated;
        Ok(delivered)
    }

    /// Delivers any lifecycle event
    ///
    /// `Create` and `Terminate` go through [`start`](Self::start) and
    /// [`terminate`](Self::terminate). The others require `Running`.
    pub fn deliver(&mut self, event: LifecycleEvent) -> Result<usize, DispatchError> {
        match event {
            LifecycleEvent::Create => self.start(),
            LifecycleEvent::Terminate => self.terminate(),
            event => match self.state {
                DispatcherState::Running => Ok(self.fan_out(&event)),
                DispatcherState::Terminated => Err(DispatchError::Terminated {
                    event: event.kind(),
                }),
                state => Err(DispatchError::NotRunning {
                    event: event.kind(),
                    state,
                }),
            },
        }
    }

    pub fn low_memory(&mut self) -> Result<usize, DispatchError> {
        self.deliver(LifecycleEvent::LowMemory)
    }

    pub fn trim_memory(&mut self, level: TrimLevel) -> Result<usize, DispatchError> {
        self.deliver(LifecycleEvent::TrimMemory(level))
    }

    pub fn configuration_changed(
        &mut self,
        config: Configuration,
    ) -> Result<usize, DispatchError> {
        self.deliver(LifecycleEvent::ConfigurationChanged(config))
    }

    fn fan_out(&mut self, event: &LifecycleEvent) -> usize {
        let mut delivered = 0;
        for entry in &mut self.entries {
            if let Some(unit) = entry.instance_mut() {
                event.apply(unit);
                delivered += 1;
            }
        }
        debug!(
            "[{}] delivered {} to {} unit(s)",
            self.process, event, delivered
        );
        delivered
    }
}
