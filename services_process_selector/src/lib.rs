//! # Process Selector
//!
//! This crate decides which registered logic applies to the running process.
//!
//! ## Philosophy
//!
//! The coordinator never computes process identity itself. An identity
//! source maps the OS process to a logical name; the selector uses that name
//! to pull exactly one bucket out of the registry. A process with nothing
//! registered gets an empty selection, which is a normal outcome.

pub mod identity;
pub mod selector;

pub use identity::{CmdlineIdentity, EnvIdentity, FixedIdentity, IdentityError, ProcessIdentity};
pub use selector::{ProcessSelector, Selection};
