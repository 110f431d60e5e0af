//! Host error types

use crate::{ConfigError, EventScriptError};
use services_dispatcher::DispatchError;
use services_process_selector::IdentityError;
use services_registry::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("Registration error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Script error: {0}")]
    Script(#[from] EventScriptError),

    #[error("Host has not started")]
    NotStarted,

    #[error("Host already started")]
    AlreadyStarted,
}
