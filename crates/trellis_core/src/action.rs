//! Action registry
//!
//! An [`ActionRegistry`] maps symbolic action names to handlers and carries an
//! opaque context handed to every handler it dispatches. Registries can be
//! nested: a child created with [`ActionRegistry::with_parent`] is recorded in
//! its parent's children list. That link is bookkeeping only; a child does not
//! see its parent's actions.
//!
//! Registries are cheap handles (`Rc`) so the same registry can be bound to
//! several components and still be extended by the application afterwards.
//! Handlers run without any registry borrow held, so a handler may register or
//! remove actions.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::descriptor::{ActionDescriptor, MenuItemDescriptor, TreeItemDescriptor};
use crate::error::ActionError;
use crate::toolkit::EventArgs;

/// Shared action handler: `(params, context)`
pub type Handler<C> = Rc<dyn Fn(&EventArgs, &C)>;

struct Registry<C> {
    context: Rc<C>,
    actions: IndexMap<String, Handler<C>>,
    parent: Option<Weak<RefCell<Registry<C>>>>,
    children: Vec<ActionRegistry<C>>,
}

/// Hierarchical, name-indexed table of action handlers
pub struct ActionRegistry<C> {
    inner: Rc<RefCell<Registry<C>>>,
}

impl<C> Clone for ActionRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C> ActionRegistry<C> {
    /// Create a root registry
    pub fn new(context: C) -> Self {
        Self::build(Rc::new(context), None)
    }

    /// Create a registry nested under `parent`
    pub fn with_parent(parent: &ActionRegistry<C>, context: C) -> Self {
        let child = Self::build(Rc::new(context), Some(Rc::downgrade(&parent.inner)));
        parent.inner.borrow_mut().children.push(child.clone());
        child
    }

    fn build(context: Rc<C>, parent: Option<Weak<RefCell<Registry<C>>>>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                context,
                actions: IndexMap::new(),
                parent,
                children: Vec::new(),
            })),
        }
    }

    /// Register `handler` under `name`, replacing any previous handler
    pub fn add_action<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&EventArgs, &C) + 'static,
    {
        self.add_handler(name, Rc::new(handler));
    }

    /// Register an already shared handler
    pub fn add_handler(&self, name: impl Into<String>, handler: Handler<C>) {
        let name = name.into();
        tracing::trace!(action = %name, "registering action");
        self.inner.borrow_mut().actions.insert(name, handler);
    }

    /// Register the handler carried by a descriptor under its name
    pub fn add_action_obj(&self, descriptor: &ActionDescriptor<C>) {
        self.add_handler(descriptor.name(), Rc::clone(descriptor.handler()));
    }

    /// The handler registered under `name`
    pub fn get(&self, name: &str) -> Option<Handler<C>> {
        self.inner.borrow().actions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.borrow().actions.contains_key(name)
    }

    /// Unregister an action, keeping the order of the others
    pub fn remove(&self, name: &str) -> Option<Handler<C>> {
        self.inner.borrow_mut().actions.shift_remove(name)
    }

    /// Registered action names in registration order
    pub fn names(&self) -> Vec<String> {
        self.inner.borrow().actions.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().actions.is_empty()
    }

    /// The registry's own context
    pub fn context(&self) -> Rc<C> {
        Rc::clone(&self.inner.borrow().context)
    }

    /// The parent registry, if it is still alive
    pub fn parent(&self) -> Option<ActionRegistry<C>> {
        let parent = self.inner.borrow().parent.as_ref()?.upgrade()?;
        Some(Self { inner: parent })
    }

    /// Registries created with this one as parent
    pub fn children(&self) -> Vec<ActionRegistry<C>> {
        self.inner.borrow().children.clone()
    }

    /// Whether both handles refer to the same registry
    pub fn ptr_eq(&self, other: &ActionRegistry<C>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Invoke the handler registered under `name` with a caller-supplied context
    pub fn run(&self, name: &str, args: &EventArgs, context: &C) -> Result<(), ActionError> {
        let handler = self.get(name).ok_or_else(|| ActionError::NotFound {
            name: name.to_string(),
        })?;
        tracing::trace!(action = name, "running action");
        handler(args, context);
        Ok(())
    }

    /// Invoke the handler registered under `name` with the registry's context
    pub fn dispatch(&self, name: &str, args: &EventArgs) -> Result<(), ActionError> {
        let context = self.context();
        self.run(name, args, &context)
    }

    /// Package the handler registered under `action_name` as a menu item.
    ///
    /// An unregistered action yields a caption-only item without a handler.
    pub fn create_menu_item(
        &self,
        parent_name: &str,
        action_name: &str,
        caption: &str,
        icon: Option<&str>,
        icon_disabled: Option<&str>,
    ) -> MenuItemDescriptor<C> {
        let mut item = MenuItemDescriptor::new(parent_name, action_name, caption);
        if let Some(icon) = icon {
            item = item.with_icon(icon);
        }
        if let Some(icon) = icon_disabled {
            item = item.with_icon_disabled(icon);
        }
        match self.get(action_name) {
            Some(handler) => item.with_handler(handler),
            None => {
                tracing::warn!(action = action_name, "menu item created for unregistered action");
                item
            }
        }
    }

    /// Like [`create_menu_item`](Self::create_menu_item), but fails when the
    /// action is not registered
    pub fn create_menu_item_strict(
        &self,
        parent_name: &str,
        action_name: &str,
        caption: &str,
        icon: Option<&str>,
        icon_disabled: Option<&str>,
    ) -> Result<MenuItemDescriptor<C>, ActionError> {
        self.require(action_name)?;
        Ok(self.create_menu_item(parent_name, action_name, caption, icon, icon_disabled))
    }

    /// Package the handler registered under `action_name` as a tree item.
    ///
    /// An unregistered action yields a caption-only item without a handler.
    pub fn create_tree_item(
        &self,
        parent_name: &str,
        action_name: &str,
        caption: &str,
    ) -> TreeItemDescriptor<C> {
        let item = TreeItemDescriptor::new(parent_name, action_name, caption);
        match self.get(action_name) {
            Some(handler) => item.with_handler(handler),
            None => {
                tracing::warn!(action = action_name, "tree item created for unregistered action");
                item
            }
        }
    }

    /// Like [`create_tree_item`](Self::create_tree_item), but fails when the
    /// action is not registered
    pub fn create_tree_item_strict(
        &self,
        parent_name: &str,
        action_name: &str,
        caption: &str,
    ) -> Result<TreeItemDescriptor<C>, ActionError> {
        self.require(action_name)?;
        Ok(self.create_tree_item(parent_name, action_name, caption))
    }

    fn require(&self, name: &str) -> Result<(), ActionError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(ActionError::NotFound {
                name: name.to_string(),
            })
        }
    }
}

impl<C> fmt::Debug for ActionRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ActionRegistry")
            .field("actions", &inner.actions.keys().collect::<Vec<_>>())
            .field("children", &inner.children.len())
            .field("has_parent", &inner.parent.is_some())
            .finish()
    }
}
