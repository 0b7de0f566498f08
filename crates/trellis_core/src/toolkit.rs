//! Toolkit abstraction
//!
//! Trellis never renders anything itself. Every component owns a native widget
//! obtained from a [`Toolkit`], either created directly on a [`Surface`] or
//! attached as a child of the container's own native widget.

use std::any::Any;
use std::fmt;

use serde_json::{Map, Value};

use crate::config::TrellisConfig;
use crate::error::ToolkitError;
use crate::kind::ComponentKind;

/// A toolkit-defined mount point for root components.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    /// The document body / main screen
    Body,
    /// A named element on the screen
    Element(String),
}

impl Surface {
    /// Create an element surface
    pub fn element(id: impl Into<String>) -> Self {
        Surface::Element(id.into())
    }

    /// Whether the toolkit can mount on this surface
    pub fn is_recognized(&self) -> bool {
        match self {
            Surface::Body => true,
            Surface::Element(id) => !id.trim().is_empty(),
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::Body => f.write_str("body"),
            Surface::Element(id) => write!(f, "#{id}"),
        }
    }
}

/// Options passed to the toolkit when creating a native widget
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WidgetOptions {
    /// Toolkit skin / theme identifier
    pub skin: Option<String>,
    /// Base path for the widget's icons
    pub icons_path: Option<String>,
    /// Widget-specific parameters (layout pattern, cell id, geometry, ...)
    pub params: Map<String, Value>,
}

impl WidgetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying the configured skin and the icon path for `kind`
    pub fn from_config(kind: ComponentKind, config: &TrellisConfig) -> Self {
        Self {
            skin: Some(config.skin.clone()),
            icons_path: config.icons.for_kind(kind).map(str::to_owned),
            params: Map::new(),
        }
    }

    /// Set the skin
    pub fn with_skin(mut self, skin: impl Into<String>) -> Self {
        self.skin = Some(skin.into());
        self
    }

    /// Set the icons path
    pub fn with_icons_path(mut self, path: impl Into<String>) -> Self {
        self.icons_path = Some(path.into());
        self
    }

    /// Add a widget-specific parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Look up a string parameter
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }
}

/// A request for a native widget
#[derive(Clone, Debug, PartialEq)]
pub struct NativeRequest {
    pub kind: ComponentKind,
    /// Set for root widgets created directly on a surface
    pub surface: Option<Surface>,
    pub options: WidgetOptions,
}

impl NativeRequest {
    /// Request a root widget mounted on `surface`
    pub fn on_surface(kind: ComponentKind, surface: Surface, options: WidgetOptions) -> Self {
        Self {
            kind,
            surface: Some(surface),
            options,
        }
    }

    /// Request a child widget of an existing native widget
    pub fn child(kind: ComponentKind, options: WidgetOptions) -> Self {
        Self {
            kind,
            surface: None,
            options,
        }
    }
}

/// Arguments reported by a native event, also used as action parameters
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventArgs {
    id: Option<String>,
    values: Vec<Value>,
}

impl EventArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments reporting the symbolic id of the item the event concerns
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            values: Vec::new(),
        }
    }

    /// Append a positional value
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.values.push(value.into());
        self
    }

    /// The reported id, if any
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// All positional values
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// A positional value
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

/// Callback installed on a native event
pub type NativeCallback = Box<dyn FnMut(&EventArgs)>;

/// Identifies one event subscription on a native widget
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// A native widget owned by exactly one component.
pub trait NativeWidget {
    /// The kind this widget was created for
    fn kind(&self) -> ComponentKind;

    /// Create a child native widget hosted by this one
    fn attach(&mut self, request: NativeRequest) -> Result<Box<dyn NativeWidget>, ToolkitError>;

    /// Subscribe a callback to a native event by name.
    ///
    /// Subscribing twice to the same event installs two callbacks.
    fn attach_event(
        &mut self,
        event: &str,
        callback: NativeCallback,
    ) -> Result<SubscriptionId, ToolkitError>;

    /// Invoke a widget-specific native method
    fn call(&mut self, method: &str, args: &[Value]) -> Result<Value, ToolkitError>;

    /// Tear down the native widget. Called exactly once, when the owning
    /// component is destroyed. Leaf widgets without teardown keep the default.
    fn unload(&mut self) {}

    fn as_any(&self) -> &dyn Any;
}

/// Modal message styles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Alert,
    Confirm,
}

/// A modal message shown by the toolkit
#[derive(Clone, Debug, PartialEq)]
pub struct MessageRequest {
    pub kind: MessageKind,
    pub title: Option<String>,
    pub text: String,
}

/// Receives `true` when the user accepts a message, `false` when cancelled
pub type MessageReply = Box<dyn FnOnce(bool)>;

/// The external widget toolkit.
pub trait Toolkit {
    /// Toolkit name, for logs
    fn name(&self) -> &str;

    /// Create a root native widget on `request.surface`
    fn create(&mut self, request: NativeRequest) -> Result<Box<dyn NativeWidget>, ToolkitError>;

    /// Show a modal message. `reply` must be called at most once.
    fn show_message(
        &mut self,
        request: MessageRequest,
        reply: MessageReply,
    ) -> Result<(), ToolkitError> {
        let _ = (request, reply);
        Err(ToolkitError::Unsupported("messages".into()))
    }
}
