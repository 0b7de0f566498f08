//! Action descriptors
//!
//! Small immutable records pairing a symbolic name with a handler and the
//! presentation metadata a menu, toolbar or tree needs to show it. A
//! descriptor never holds toolkit state.

use std::fmt;
use std::rc::Rc;

use crate::action::Handler;
use crate::toolkit::EventArgs;

/// Parent name addressing the top level of a menu or tree
pub const ROOT_PARENT: &str = "root";

/// A named action handler
pub struct ActionDescriptor<C> {
    name: String,
    handler: Handler<C>,
}

impl<C> ActionDescriptor<C> {
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&EventArgs, &C) + 'static,
    {
        Self::from_handler(name, Rc::new(handler))
    }

    /// Wrap an already shared handler
    pub fn from_handler(name: impl Into<String>, handler: Handler<C>) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handler(&self) -> &Handler<C> {
        &self.handler
    }
}

impl<C> Clone for ActionDescriptor<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            handler: Rc::clone(&self.handler),
        }
    }
}

impl<C> fmt::Debug for ActionDescriptor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// An entry of a hierarchical menu (or a toolbar button)
pub struct MenuItemDescriptor<C> {
    parent_name: String,
    name: String,
    caption: String,
    icon: Option<String>,
    icon_disabled: Option<String>,
    handler: Option<Handler<C>>,
}

impl<C> MenuItemDescriptor<C> {
    pub fn new(
        parent_name: impl Into<String>,
        name: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            parent_name: parent_name.into(),
            name: name.into(),
            caption: caption.into(),
            icon: None,
            icon_disabled: None,
            handler: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_icon_disabled(mut self, icon: impl Into<String>) -> Self {
        self.icon_disabled = Some(icon.into());
        self
    }

    pub fn with_handler(mut self, handler: Handler<C>) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn parent_name(&self) -> &str {
        &self.parent_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn icon_disabled(&self) -> Option<&str> {
        self.icon_disabled.as_deref()
    }

    /// The handler, if the action was registered when the item was created
    pub fn handler(&self) -> Option<&Handler<C>> {
        self.handler.as_ref()
    }

    /// Whether this item sits at the top level
    pub fn is_top_level(&self) -> bool {
        self.parent_name == ROOT_PARENT
    }
}

impl<C> Clone for MenuItemDescriptor<C> {
    fn clone(&self) -> Self {
        Self {
            parent_name: self.parent_name.clone(),
            name: self.name.clone(),
            caption: self.caption.clone(),
            icon: self.icon.clone(),
            icon_disabled: self.icon_disabled.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<C> fmt::Debug for MenuItemDescriptor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItemDescriptor")
            .field("parent_name", &self.parent_name)
            .field("name", &self.name)
            .field("caption", &self.caption)
            .field("icon", &self.icon)
            .field("icon_disabled", &self.icon_disabled)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

/// A node of a hierarchical tree
pub struct TreeItemDescriptor<C> {
    parent_name: String,
    name: String,
    caption: String,
    handler: Option<Handler<C>>,
}

impl<C> TreeItemDescriptor<C> {
    pub fn new(
        parent_name: impl Into<String>,
        name: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            parent_name: parent_name.into(),
            name: name.into(),
            caption: caption.into(),
            handler: None,
        }
    }

    pub fn with_handler(mut self, handler: Handler<C>) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn parent_name(&self) -> &str {
        &self.parent_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn handler(&self) -> Option<&Handler<C>> {
        self.handler.as_ref()
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_name == ROOT_PARENT
    }
}

impl<C> Clone for TreeItemDescriptor<C> {
    fn clone(&self) -> Self {
        Self {
            parent_name: self.parent_name.clone(),
            name: self.name.clone(),
            caption: self.caption.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<C> fmt::Debug for TreeItemDescriptor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeItemDescriptor")
            .field("parent_name", &self.parent_name)
            .field("name", &self.name)
            .field("caption", &self.caption)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}
