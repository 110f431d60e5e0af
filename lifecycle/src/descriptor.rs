//! Unit descriptors: identity plus constructor

use crate::LogicUnit;
use core_types::UnitId;
use std::any::type_name;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Why a unit could not be constructed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InstantiationError {
    #[error("Construction failed: {0}")]
    Construction(String),

    #[error("Missing dependency: {0}")]
    MissingDependency(String),
}

type Factory = Rc<dyn Fn() -> Result<Box<dyn LogicUnit>, InstantiationError>>;

/// Describes a unit before it exists
///
/// Registration stores descriptors; only the process that resolves them
/// calls [`UnitDescriptor::instantiate`].
#[derive(Clone)]
pub struct UnitDescriptor {
    id: UnitId,
    factory: Factory,
}

impl UnitDescriptor {
    /// Descriptor for a default-constructible unit type
    ///
    /// The identity is the type's name, so describing the same type twice
    /// yields equal identities.
    pub fn of<T: LogicUnit + Default + 'static>() -> Self {
        Self {
            id: UnitId::from_static(type_name::<T>()),
            factory: Rc::new(|| Ok(Box::new(T::default()) as Box<dyn LogicUnit>)),
        }
    }

    /// Descriptor with an explicit identity and an infallible constructor
    pub fn with<U, F>(id: impl Into<UnitId>, constructor: F) -> Self
    where
        U: LogicUnit + 'static,
        F: Fn() -> U + 'static,
    {
        Self {
            id: id.into(),
            factory: Rc::new(move || Ok(Box::new(constructor()) as Box<dyn LogicUnit>)),
        }
    }

    /// Descriptor with an explicit identity and a fallible constructor
    pub fn from_fn<F>(id: impl Into<UnitId>, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn LogicUnit>, InstantiationError> + 'static,
    {
        Self {
            id: id.into(),
            factory: Rc::new(factory),
        }
    }

    /// Identity used for duplicate detection
    pub fn id(&self) -> &UnitId {
        &self.id
    }

    /// Constructs a fresh unit
    pub fn instantiate(&self) -> Result<Box<dyn LogicUnit>, InstantiationError> {
        (self.factory)()
    }
}

impl fmt::Debug for UnitDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitDescriptor")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
