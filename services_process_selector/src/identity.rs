//! Process identity sources

use core_types::ProcessName;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Environment variable {0} is not set")]
    MissingVariable(String),

    #[error("Could not read process command line: {0}")]
    Cmdline(String),

    #[error("Process identity resolved to an empty name")]
    Empty,
}

/// Maps the running OS process to its logical name
pub trait ProcessIdentity {
    fn current_process_name(&self) -> Result<ProcessName, IdentityError>;
}

impl<F> ProcessIdentity for F
where
    F: Fn() -> Result<ProcessName, IdentityError>,
{
    fn current_process_name(&self) -> Result<ProcessName, IdentityError> {
        self()
    }
}

/// Identity known up front (tests, single-binary hosts, CLI overrides)
#[derive(Debug, Clone)]
pub struct FixedIdentity(ProcessName);

impl FixedIdentity {
    pub fn new(name: impl Into<ProcessName>) -> Self {
        Self(name.into())
    }
}

impl ProcessIdentity for FixedIdentity {
    fn current_process_name(&self) -> Result<ProcessName, IdentityError> {
        Ok(self.0.clone())
    }
}

/// Identity read from an environment variable set by the spawner
#[derive(Debug, Clone)]
pub struct EnvIdentity {
    variable: String,
    fallback: Option<ProcessName>,
}

impl EnvIdentity {
    /// Reads the given variable
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            fallback: None,
        }
    }

    /// Name to use when the variable is not set
    pub fn with_fallback(mut self, fallback: impl Into<ProcessName>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }
}

impl ProcessIdentity for EnvIdentity {
    fn current_process_name(&self) -> Result<ProcessName, IdentityError> {
        match std::env::var(&self.variable) {
            Ok(value) if !value.is_empty() => Ok(ProcessName::new(value)),
            _ => self
                .fallback
                .clone()
                .ok_or_else(|| IdentityError::MissingVariable(self.variable.clone())),
        }
    }
}

/// Identity taken from the process command line
///
/// On Linux the first argument in `/proc/self/cmdline` is used, since a
/// spawner may rename its children there; elsewhere `argv[0]`.
#[derive(Debug, Clone, Default)]
pub struct CmdlineIdentity {
    basename: bool,
}

impl CmdlineIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only the final path component of the first argument
    pub fn basename(mut self) -> Self {
        self.basename = true;
        self
    }
}

impl ProcessIdentity for CmdlineIdentity {
    fn current_process_name(&self) -> Result<ProcessName, IdentityError> {
        let argument = first_argument()?;
        let name = if self.basename {
            Path::new(&argument)
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
                .unwrap_or(argument)
        } else {
            argument
        };
        if name.is_empty() {
            return Err(IdentityError::Empty);
        }
        Ok(ProcessName::new(name))
    }
}

#[cfg(target_os = "linux")]
fn first_argument() -> Result<String, IdentityError> {
    let raw = std::fs::read("/proc/self/cmdline")
        .map_err(|err| IdentityError::Cmdline(err.to_string()))?;
    parse_cmdline(&raw).ok_or(IdentityError::Empty)
}

#[cfg(not(target_os = "linux"))]
fn first_argument() -> Result<String, IdentityError> {
    std::env::args()
        .next()
        .ok_or_else(|| IdentityError::Cmdline("argv is empty".to_string()))
}

/// Extracts the first NUL-terminated argument of a raw command line
pub fn parse_cmdline(raw: &[u8]) -> Option<String> {
    let first = raw.split(|byte| *byte == 0).next()?;
    let text = String::from_utf8_lossy(first).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_identity() {
        let identity = FixedIdentity::new("main");
        assert_eq!(identity.current_process_name().unwrap(), "main");
    }

    #[test]
    fn test_closure_identity() {
        let identity = || -> Result<ProcessName, IdentityError> { Ok(ProcessName::new(":push")) };
        assert_eq!(identity.current_process_name().unwrap(), ":push");
    }

    #[test]
    fn test_env_identity_missing_variable() {
        let identity = EnvIdentity::new("PROCESS_SELECTOR_TEST_UNSET_VARIABLE");
        assert_eq!(
            identity.current_process_name(),
            Err(IdentityError::MissingVariable(
                "PROCESS_SELECTOR_TEST_UNSET_VARIABLE".to_string()
            ))
        );
    }

    #[test]
    fn test_env_identity_fallback() {
        let identity =
            EnvIdentity::new("PROCESS_SELECTOR_TEST_UNSET_VARIABLE").with_fallback("main");
        assert_eq!(identity.current_process_name().unwrap(), "main");
    }

    #[test]
    fn test_parse_cmdline() {
        assert_eq!(
            parse_cmdline(b"com.example.app:worker\0--flag\0"),
            Some("com.example.app:worker".to_string())
        );
        assert_eq!(parse_cmdline(b"/usr/bin/apphost"), Some("/usr/bin/apphost".to_string()));
        assert_eq!(parse_cmdline(b"\0ignored\0"), None);
        assert_eq!(parse_cmdline(b""), None);
    }

    #[test]
    fn test_cmdline_identity_resolves_something() {
        let name = CmdlineIdentity::new().basename().current_process_name().unwrap();
        assert!(!name.is_empty());
        assert!(!name.as_str().contains('/'));
    }
}
