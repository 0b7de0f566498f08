//! Widget error types

use thiserror::Error;
use trellis_core::{ActionError, ComponentError, ToolkitError};

/// Errors raised by widget operations
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Tree, lifecycle or container resolution failure
    #[error(transparent)]
    Component(#[from] ComponentError),

    /// The native toolkit rejected an operation
    #[error(transparent)]
    Toolkit(#[from] ToolkitError),

    /// Action lookup failed
    #[error(transparent)]
    Action(#[from] ActionError),

    /// Data handed to a widget could not be parsed
    #[error("invalid {widget} data: {source}")]
    InvalidData {
        widget: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A widget parameter was rejected before reaching the toolkit
    #[error("invalid {param} for {widget}: {reason}")]
    InvalidParam {
        widget: &'static str,
        param: &'static str,
        reason: String,
    },

    /// The toolkit answered a query with an unexpected value
    #[error("unexpected reply to `{method}`: {value}")]
    UnexpectedReply {
        method: &'static str,
        value: serde_json::Value,
    },
}

/// Result type for widget operations
pub type Result<T> = std::result::Result<T, WidgetError>;
