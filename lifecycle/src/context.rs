//! Application context shared with units

use core_types::ProcessName;
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Per-process application context
///
/// Exactly one exists per process. It outlives every unit; units reach it
/// through an [`AppHandle`]. Components that need to hand shared services to
/// units store them as typed extensions.
pub struct AppContext {
    process_name: ProcessName,
    extensions: RefCell<HashMap<TypeId, Rc<dyn Any>>>,
}

impl AppContext {
    /// Creates the context for the current process
    pub fn new(process_name: impl Into<ProcessName>) -> Rc<Self> {
        Rc::new(Self {
            process_name: process_name.into(),
            extensions: RefCell::new(HashMap::new()),
        })
    }

    /// Returns a weak handle suitable for units
    pub fn handle(self: &Rc<Self>) -> AppHandle {
        AppHandle {
            inner: Rc::downgrade(self),
        }
    }

    /// Name of the process this context belongs to
    pub fn process_name(&self) -> &ProcessName {
        &self.process_name
    }

    /// Stores an extension, returning the one it replaced
    pub fn insert_extension<T: 'static>(&self, value: Rc<T>) -> Option<Rc<T>> {
        self.extensions
            .borrow_mut()
            .insert(TypeId::of::<T>(), value)
            .and_then(|previous| previous.downcast::<T>().ok())
    }

    /// Looks up an extension by type
    pub fn extension<T: 'static>(&self) -> Option<Rc<T>> {
        self.extensions
            .borrow()
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|value| value.downcast::<T>().ok())
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("process_name", &self.process_name)
            .field("extensions", &self.extensions.borrow().len())
            .finish()
    }
}

/// Weak back-reference from a unit to its application context
#[derive(Debug, Clone, Default)]
pub struct AppHandle {
    inner: Weak<AppContext>,
}

impl AppHandle {
    /// Returns the context if it is still alive
    pub fn upgrade(&self) -> Option<Rc<AppContext>> {
        self.inner.upgrade()
    }

    /// Convenience accessor for the process name
    pub fn process_name(&self) -> Option<ProcessName> {
        self.upgrade().map(|app| app.process_name().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Marker(u32);

    #[test]
    fn test_handle_sees_context() {
        let app = AppContext::new("main");
        let handle = app.handle();
        assert_eq!(handle.process_name(), Some(ProcessName::new("main")));
    }

    #[test]
    fn test_handle_does_not_keep_context_alive() {
        let app = AppContext::new("main");
        let handle = app.handle();
        drop(app);
        assert!(handle.upgrade().is_none());
        assert!(AppHandle::default().upgrade().is_none());
    }

    #[test]
    fn test_extensions_by_type() {
        let app = AppContext::new(":worker");
        assert!(app.extension::<Marker>().is_none());

        assert!(app.insert_extension(Rc::new(Marker(1))).is_none());
        assert_eq!(app.extension::<Marker>().as_deref(), Some(&Marker(1)));

        let previous = app.insert_extension(Rc::new(Marker(2)));
        assert_eq!(previous.as_deref(), Some(&Marker(1)));
        assert_eq!(app.extension::<Marker>().as_deref(), Some(&Marker(2)));
        assert!(app.extension::<String>().is_none());
    }
}
