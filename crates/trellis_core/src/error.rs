//! Error types
//!
//! Every failure in the core is local and synchronous: precondition violations
//! and container mismatches fail fast, toolkit failures are surfaced unchanged.

use std::path::PathBuf;

use thiserror::Error;

use crate::component::ComponentId;
use crate::kind::{ComponentKind, ContainerKind};

/// Component tree and resolution errors
#[derive(Error, Debug)]
pub enum ComponentError {
    /// An accessor or operation ran before `initialize` completed
    #[error("component {id:?} is not initialized")]
    Uninitialized { id: ComponentId },

    /// The component was destroyed (or never belonged to this tree)
    #[error("component {id:?} has been destroyed")]
    Destroyed { id: ComponentId },

    /// `initialize` was called without one of its mandatory fields
    #[error("cannot initialize component: `{field}` is missing")]
    MissingField { field: &'static str },

    /// The container is not on the whitelist for this kind
    #[error("{operation}: invalid container {container} for {kind}")]
    InvalidContainer {
        operation: &'static str,
        kind: ComponentKind,
        container: ContainerKind,
    },

    /// The container is the component itself or one of its descendants
    #[error("component {id:?} cannot be placed under its own descendant {container:?}")]
    Cycle {
        id: ComponentId,
        container: ComponentId,
    },

    /// The native toolkit rejected an operation
    #[error(transparent)]
    Toolkit(#[from] ToolkitError),

    /// Action dispatch failed
    #[error(transparent)]
    Action(#[from] ActionError),
}

/// Action dispatch errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// No handler is registered under this name
    #[error("action not found: {name}")]
    NotFound { name: String },
}

/// Errors reported by a [`Toolkit`](crate::toolkit::Toolkit) implementation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolkitError {
    /// The toolkit could not create a root widget
    #[error("failed to create {kind} widget: {reason}")]
    Create { kind: ComponentKind, reason: String },

    /// A container widget could not attach a child widget
    #[error("failed to attach {kind} widget: {reason}")]
    Attach { kind: ComponentKind, reason: String },

    /// A native event could not be subscribed to
    #[error("cannot subscribe to `{event}`: {reason}")]
    Subscribe { event: String, reason: String },

    /// A native method call failed
    #[error("native call `{method}` failed: {reason}")]
    Call { method: String, reason: String },

    /// The toolkit does not offer this capability
    #[error("toolkit does not support {0}")]
    Unsupported(String),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read or write the configuration file
    #[error("config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for component operations
pub type Result<T> = std::result::Result<T, ComponentError>;
