//! Menus
//!
//! A menu is bound to one action registry. Clicking an item raises `onClick`
//! with the item's name, which selects the handler to run.

use serde_json::{json, Value};
use trellis_core::{
    descriptor::ROOT_PARENT, ActionRegistry, ComponentType, Container, MenuItemDescriptor,
    UiContext, WidgetOptions,
};

use crate::error::Result;

component_type!(
    /// A hierarchical menu bar or context menu
    Menu,
    Menu,
    "Menu::new"
);

/// Native event raised when an item is clicked
pub const CLICK_EVENT: &str = "onClick";

/// Parent argument for a native menu call
pub(crate) fn parent_arg(parent_name: &str) -> Value {
    if parent_name == ROOT_PARENT {
        Value::Null
    } else {
        json!(parent_name)
    }
}

impl Menu {
    pub fn new<C: 'static>(
        ctx: &mut UiContext,
        container: impl Into<Container>,
        name: impl Into<String>,
        actions: &ActionRegistry<C>,
    ) -> Result<Self> {
        let options = WidgetOptions::from_config(Self::KIND, ctx.config());
        let menu = Self::mount(ctx, container, name, options)?;
        crate::finish_mount(ctx, menu, |ctx, menu| {
            ctx.tree_mut()
                .attach_action_manager(menu.id(), CLICK_EVENT, actions)?;
            Ok(())
        })
    }

    /// Add an item below `item.parent_name()`
    pub fn add_item<C>(&self, ctx: &mut UiContext, item: &MenuItemDescriptor<C>) -> Result<()> {
        tracing::debug!(menu = ?self.id(), item = item.name(), "adding menu item");
        ctx.call(
            self.id(),
            "addNewChild",
            &[
                parent_arg(item.parent_name()),
                json!(item.name()),
                json!(item.caption()),
                json!(false),
                json!(item.icon()),
                json!(item.icon_disabled()),
            ],
        )?;
        Ok(())
    }

    pub fn add_items<C>(&self, ctx: &mut UiContext, items: &[MenuItemDescriptor<C>]) -> Result<()> {
        items.iter().try_for_each(|item| self.add_item(ctx, item))
    }

    /// Add a separator after item `after`
    pub fn add_separator(&self, ctx: &mut UiContext, after: &str) -> Result<()> {
        ctx.call(self.id(), "addSeparator", &[json!(after)])?;
        Ok(())
    }

    pub fn set_item_enabled(&self, ctx: &mut UiContext, item: &str, enabled: bool) -> Result<()> {
        ctx.call(self.id(), "setItemEnabled", &[json!(item), json!(enabled)])?;
        Ok(())
    }

    pub fn remove_item(&self, ctx: &mut UiContext, item: &str) -> Result<()> {
        ctx.call(self.id(), "removeItem", &[json!(item)])?;
        Ok(())
    }
}
