//! Forms
//!
//! A form is described by a JSON structure (a list of item definitions) and
//! raises `onButtonClick` with the button's name.

use serde_json::{json, Value};
use trellis_core::{ActionRegistry, ComponentType, Container, UiContext, WidgetOptions};

use crate::error::{Result, WidgetError};

component_type!(
    /// An input form
    Form,
    Form,
    "Form::new"
);

/// Native event raised when a form button is clicked
pub const BUTTON_CLICK_EVENT: &str = "onButtonClick";

impl Form {
    /// `structure` must be a JSON array of item definitions
    pub fn new<C: 'static>(
        ctx: &mut UiContext,
        container: impl Into<Container>,
        name: impl Into<String>,
        structure: Value,
        actions: &ActionRegistry<C>,
    ) -> Result<Self> {
        if !structure.is_array() {
            return Err(WidgetError::InvalidParam {
                widget: "form",
                param: "structure",
                reason: "expected an array of items".into(),
            });
        }
        let options =
            WidgetOptions::from_config(Self::KIND, ctx.config()).param("structure", structure);
        let form = Self::mount(ctx, container, name, options)?;
        crate::finish_mount(ctx, form, |ctx, form| {
            ctx.tree_mut()
                .attach_action_manager(form.id(), BUTTON_CLICK_EVENT, actions)?;
            Ok(())
        })
    }

    pub fn item_value(&self, ctx: &mut UiContext, item: &str) -> Result<Value> {
        Ok(ctx.call(self.id(), "getItemValue", &[json!(item)])?)
    }

    pub fn set_item_value(
        &self,
        ctx: &mut UiContext,
        item: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        ctx.call(self.id(), "setItemValue", &[json!(item), value.into()])?;
        Ok(())
    }

    /// Run the toolkit's validation rules. A toolkit that reports nothing
    /// counts as valid.
    pub fn validate(&self, ctx: &mut UiContext) -> Result<bool> {
        match ctx.call(self.id(), "validate", &[])? {
            Value::Null => Ok(true),
            Value::Bool(valid) => Ok(valid),
            value => Err(WidgetError::UnexpectedReply {
                method: "validate",
                value,
            }),
        }
    }

    /// Reset every item
    pub fn clear(&self, ctx: &mut UiContext) -> Result<()> {
        ctx.call(self.id(), "clear", &[])?;
        Ok(())
    }
}
