//! Toolbars

use serde_json::json;
use trellis_core::{
    ActionRegistry, ComponentType, Container, MenuItemDescriptor, UiContext, WidgetOptions,
};

use crate::error::Result;

component_type!(
    /// A row of buttons bound to an action registry
    Toolbar,
    Toolbar,
    "Toolbar::new"
);

impl Toolbar {
    pub fn new<C: 'static>(
        ctx: &mut UiContext,
        container: impl Into<Container>,
        name: impl Into<String>,
        actions: &ActionRegistry<C>,
    ) -> Result<Self> {
        let options = WidgetOptions::from_config(Self::KIND, ctx.config());
        let toolbar = Self::mount(ctx, container, name, options)?;
        crate::finish_mount(ctx, toolbar, |ctx, toolbar| {
            ctx.tree_mut()
                .attach_action_manager(toolbar.id(), crate::menu::CLICK_EVENT, actions)?;
            Ok(())
        })
    }

    /// Add a button. Its name is reported when clicked.
    pub fn add_button<C>(&self, ctx: &mut UiContext, button: &MenuItemDescriptor<C>) -> Result<()> {
        ctx.call(
            self.id(),
            "addButton",
            &[
                json!(button.name()),
                json!(button.caption()),
                json!(button.icon()),
                json!(button.icon_disabled()),
            ],
        )?;
        Ok(())
    }

    pub fn add_separator(&self, ctx: &mut UiContext, name: &str) -> Result<()> {
        ctx.call(self.id(), "addSeparator", &[json!(name)])?;
        Ok(())
    }

    /// Add a static text item
    pub fn add_text(&self, ctx: &mut UiContext, name: &str, text: &str) -> Result<()> {
        ctx.call(self.id(), "addText", &[json!(name), json!(text)])?;
        Ok(())
    }

    pub fn set_item_text(&self, ctx: &mut UiContext, name: &str, text: &str) -> Result<()> {
        ctx.call(self.id(), "setItemText", &[json!(name), json!(text)])?;
        Ok(())
    }

    pub fn set_item_enabled(&self, ctx: &mut UiContext, name: &str, enabled: bool) -> Result<()> {
        ctx.call(self.id(), "setItemEnabled", &[json!(name), json!(enabled)])?;
        Ok(())
    }
}
