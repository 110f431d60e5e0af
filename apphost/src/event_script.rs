//! # Event Script Parser
//!
//! Provides a scripted lifecycle for deterministic testing and demos.
//!
//! ## Format
//!
//! Scripts are line-based, with each line representing one host event:
//! - `low-memory`
//! - `trim <level>`: numeric level or a name such as `background`
//! - `config <json>`: new configuration, JSON on the rest of the line
//! - `terminate`: must be the last event
//! - Comments: `# This is a comment`
//!
//! Start is implicit and always happens first.
//!
//! ## Example
//!
//! ```text
//! # Memory pressure, then a locale switch
//! trim 5
//! low-memory
//! config {"locale":"fr"}
//! terminate
//! ```

use core_types::{Configuration, TrimLevel};
use lifecycle::LifecycleEvent;
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventScriptError {
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("Invalid trim level: {0}")]
    InvalidTrimLevel(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Event at line {line} follows terminate")]
    AfterTerminate { line: usize },
}

/// A single scripted host event
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptEvent {
    LowMemory,
    TrimMemory(TrimLevel),
    ConfigurationChanged(Configuration),
    Terminate,
}

impl ScriptEvent {
    pub fn into_lifecycle_event(self) -> LifecycleEvent {
        match self {
            ScriptEvent::LowMemory => LifecycleEvent::LowMemory,
            ScriptEvent::TrimMemory(level) => LifecycleEvent::TrimMemory(level),
            ScriptEvent::ConfigurationChanged(config) => {
                LifecycleEvent::ConfigurationChanged(config)
            }
            ScriptEvent::Terminate => LifecycleEvent::Terminate,
        }
    }
}

/// Event script
#[derive(Debug, Clone, Default)]
pub struct EventScript {
    events: VecDeque<ScriptEvent>,
}

impl EventScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a script from text
    ///
    /// An empty script is valid: the host starts and then terminates.
    pub fn from_text(text: &str) -> Result<Self, EventScriptError> {
        let mut events = VecDeque::new();
        let mut terminated = false;

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line_num = index + 1;
            if terminated {
                return Err(EventScriptError::AfterTerminate { line: line_num });
            }

            let event = Self::parse_line(line, line_num)?;
            terminated = event == ScriptEvent::Terminate;
            events.push_back(event);
        }

        Ok(Self { events })
    }

    fn parse_line(line: &str, line_num: usize) -> Result<ScriptEvent, EventScriptError> {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "low-memory" | "lowmemory" if rest.is_empty() => Ok(ScriptEvent::LowMemory),
            "terminate" if rest.is_empty() => Ok(ScriptEvent::Terminate),
            "trim" => Self::parse_trim_level(rest)
                .map(ScriptEvent::TrimMemory)
                .map_err(|e| EventScriptError::ParseError {
                    line: line_num,
                    message: e.to_string(),
                }),
            "config" => serde_json::from_str(rest)
                .map(|value| ScriptEvent::ConfigurationChanged(Configuration::new(value)))
                .map_err(|e| EventScriptError::ParseError {
                    line: line_num,
                    message: e.to_string(),
                }),
            _ => Err(EventScriptError::UnknownEvent(line.to_string())),
        }
    }

    /// Parses a trim level (e.g., "40", "background", "running-low")
    fn parse_trim_level(s: &str) -> Result<TrimLevel, EventScriptError> {
        let named = match s.to_lowercase().replace('_', "-").as_str() {
            "running-moderate" => Some(TrimLevel::RUNNING_MODERATE),
            "running-low" => Some(TrimLevel::RUNNING_LOW),
            "running-critical" => Some(TrimLevel::RUNNING_CRITICAL),
            "ui-hidden" => Some(TrimLevel::UI_HIDDEN),
            "background" => Some(TrimLevel::BACKGROUND),
            "moderate" => Some(TrimLevel::MODERATE),
            "complete" => Some(TrimLevel::COMPLETE),
            _ => None,
        };
        match named {
            Some(level) => Ok(level),
            None => s
                .parse::<i32>()
                .map(TrimLevel::new)
                .map_err(|_| EventScriptError::InvalidTrimLevel(s.to_string())),
        }
    }

    /// Returns the next event, if any
    pub fn next_event(&mut self) -> Option<ScriptEvent> {
        self.events.pop_front()
    }

    pub fn has_more(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    /// Checks whether the script terminates the host itself
    pub fn ends_with_terminate(&self) -> bool {
        self.events.back() == Some(&ScriptEvent::Terminate)
    }
}
