//! Tab bars
//!
//! Each tab is a component of its own and hosts content like a layout cell.
//! A tab's component name doubles as its native tab id.

use serde_json::{json, Value};
use trellis_core::{
    resolve_handle, ComponentError, ComponentType, Container, NativeWidget, UiContext,
    WidgetOptions,
};

use crate::error::{Result, WidgetError};

component_type!(
    /// A strip of tabs
    Tabbar,
    Tabbar,
    "Tabbar::new"
);

component_type!(
    /// One tab of a [`Tabbar`]
    Tab,
    Tab,
    "Tab::new",
    resolve = resolve_tab
);

impl Tabbar {
    pub fn new(
        ctx: &mut UiContext,
        container: impl Into<Container>,
        name: impl Into<String>,
    ) -> Result<Self> {
        let options = WidgetOptions::from_config(Self::KIND, ctx.config());
        Ok(Self::mount(ctx, container, name, options)?)
    }

    pub fn add_tab(&self, ctx: &mut UiContext, name: &str, caption: &str) -> Result<Tab> {
        crate::ensure_unclaimed::<Tab>(ctx, self.id(), "tabbar", "tab", name)?;
        let options = WidgetOptions::from_config(Tab::KIND, ctx.config())
            .param("tab", name)
            .param("caption", caption);
        Ok(Tab::mount(ctx, *self, name, options)?)
    }

    pub fn tabs(&self, ctx: &UiContext) -> Vec<Tab> {
        crate::children_of(ctx, self.id())
    }

    /// Activate the tab named `name`
    pub fn set_active(&self, ctx: &mut UiContext, name: &str) -> Result<()> {
        ctx.call(self.id(), "setActiveTab", &[json!(name)])?;
        Ok(())
    }

    /// Name of the active tab, if any
    pub fn active_tab(&self, ctx: &mut UiContext) -> Result<Option<String>> {
        match ctx.call(self.id(), "getActiveTab", &[])? {
            Value::Null => Ok(None),
            Value::String(name) => Ok(Some(name)),
            value => Err(WidgetError::UnexpectedReply {
                method: "getActiveTab",
                value,
            }),
        }
    }
}

/// Tabs need a caption for their header
fn resolve_tab(
    ctx: &mut UiContext,
    container: &Container,
    options: WidgetOptions,
) -> trellis_core::Result<Box<dyn NativeWidget>> {
    if options.get_str("caption").is_none() {
        return Err(ComponentError::MissingField { field: "caption" });
    }
    resolve_handle(ctx, Tab::KIND, container, options, Tab::OPERATION)
}

impl Tab {
    pub fn set_text(&self, ctx: &mut UiContext, text: &str) -> Result<()> {
        ctx.call(self.id(), "setText", &[json!(text)])?;
        Ok(())
    }

    /// Make this tab the active one
    pub fn activate(&self, ctx: &mut UiContext) -> Result<()> {
        let tabbar: Option<Tabbar> = ctx
            .tree()
            .container(self.id())?
            .as_component()
            .and_then(|id| crate::downcast(&*ctx, id));
        let Some(tabbar) = tabbar else {
            return Err(ComponentError::InvalidContainer {
                operation: "Tab::activate",
                kind: Self::KIND,
                container: ctx.tree().container_kind(self.id())?,
            }
            .into());
        };
        let name = self.name(ctx)?.to_string();
        tabbar.set_active(ctx, &name)
    }
}
