//! Trees
//!
//! Selecting a node raises `onSelect` with the node's name.

use serde_json::{json, Value};
use trellis_core::{
    descriptor::ROOT_PARENT, ActionRegistry, ComponentType, Container, TreeItemDescriptor,
    UiContext, WidgetOptions,
};

use crate::error::{Result, WidgetError};

component_type!(
    /// A hierarchical tree, hosted by a layout cell
    Tree,
    Tree,
    "Tree::new"
);

/// Native event raised when a node is selected
pub const SELECT_EVENT: &str = "onSelect";

/// Native id of the invisible root node
const NATIVE_ROOT: &str = "0";

impl Tree {
    pub fn new<C: 'static>(
        ctx: &mut UiContext,
        container: impl Into<Container>,
        name: impl Into<String>,
        actions: &ActionRegistry<C>,
    ) -> Result<Self> {
        let options = WidgetOptions::from_config(Self::KIND, ctx.config());
        let tree = Self::mount(ctx, container, name, options)?;
        crate::finish_mount(ctx, tree, |ctx, tree| {
            ctx.tree_mut()
                .attach_action_manager(tree.id(), SELECT_EVENT, actions)?;
            Ok(())
        })
    }

    pub fn add_item<C>(&self, ctx: &mut UiContext, item: &TreeItemDescriptor<C>) -> Result<()> {
        let parent = if item.parent_name() == ROOT_PARENT {
            NATIVE_ROOT
        } else {
            item.parent_name()
        };
        ctx.call(
            self.id(),
            "insertNewItem",
            &[json!(parent), json!(item.name()), json!(item.caption())],
        )?;
        Ok(())
    }

    pub fn add_items<C>(&self, ctx: &mut UiContext, items: &[TreeItemDescriptor<C>]) -> Result<()> {
        items.iter().try_for_each(|item| self.add_item(ctx, item))
    }

    pub fn delete_item(&self, ctx: &mut UiContext, name: &str) -> Result<()> {
        ctx.call(self.id(), "deleteItem", &[json!(name)])?;
        Ok(())
    }

    pub fn select_item(&self, ctx: &mut UiContext, name: &str) -> Result<()> {
        ctx.call(self.id(), "selectItem", &[json!(name)])?;
        Ok(())
    }

    /// Name of the selected node, if any
    pub fn selected_item(&self, ctx: &mut UiContext) -> Result<Option<String>> {
        match ctx.call(self.id(), "getSelectedItemId", &[])? {
            Value::Null => Ok(None),
            Value::String(id) if id.is_empty() => Ok(None),
            Value::String(id) => Ok(Some(id)),
            value => Err(WidgetError::UnexpectedReply {
                method: "getSelectedItemId",
                value,
            }),
        }
    }
}
