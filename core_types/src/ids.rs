//! Identifiers for processes and logic units

use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::fmt;

/// Logical name of an OS process
///
/// Every process spawned by the application has one. Logic is registered
/// against these names and each process only ever resolves its own.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessName(String);

impl ProcessName {
    /// Creates a process name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether the name is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProcessName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProcessName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ProcessName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for ProcessName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ProcessName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProcessName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Identity of a logic unit descriptor
///
/// Two descriptors with the same id are the same unit as far as
/// registration is concerned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(Cow<'static, str>);

impl UnitId {
    /// Creates a unit id from a static string (typically a type name)
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Creates a unit id from an owned string
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for UnitId {
    fn from(id: &'static str) -> Self {
        Self::from_static(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_process_name_display() {
        let name = ProcessName::new("main");
        assert_eq!(name.to_string(), "main");
        assert_eq!(name.as_str(), "main");
        assert!(!name.is_empty());
    }

    #[test]
    fn test_process_name_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(ProcessName::new(":worker"), 1);
        assert_eq!(map.get(":worker"), Some(&1));
        assert_eq!(map.get("main"), None);
    }

    #[test]
    fn test_process_name_compares_with_str() {
        let name = ProcessName::from("main");
        assert_eq!(name, "main");
        assert!(ProcessName::new("").is_empty());
    }

    #[test]
    fn test_unit_id_static_and_owned_are_equal() {
        let borrowed = UnitId::from_static("app::Logger");
        let owned = UnitId::new(String::from("app::Logger"));
        assert_eq!(borrowed, owned);
    }

    #[test]
    fn test_serde_is_transparent() {
        let name = ProcessName::new(":router");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\":router\"");

        let id: UnitId = serde_json::from_str("\"a::B\"").unwrap();
        assert_eq!(id.as_str(), "a::B");
    }
}
