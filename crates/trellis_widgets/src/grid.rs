//! Data grids

use serde_json::{json, Value};
use trellis_core::{
    ComponentType, Container, EventArgs, SubscriptionId, UiContext, WidgetOptions,
};

use crate::error::{Result, WidgetError};

component_type!(
    /// A tabular data grid
    Grid,
    Grid,
    "Grid::new"
);

/// Native event raised when a row is selected; reports the row id
pub const ROW_SELECT_EVENT: &str = "onRowSelect";

impl Grid {
    pub fn new(
        ctx: &mut UiContext,
        container: impl Into<Container>,
        name: impl Into<String>,
    ) -> Result<Self> {
        let options = WidgetOptions::from_config(Self::KIND, ctx.config());
        Ok(Self::mount(ctx, container, name, options)?)
    }

    /// Set the column captions
    pub fn set_header(&self, ctx: &mut UiContext, columns: &[&str]) -> Result<()> {
        ctx.call(self.id(), "setHeader", &[json!(columns.join(","))])?;
        Ok(())
    }

    pub fn set_column_ids(&self, ctx: &mut UiContext, ids: &[&str]) -> Result<()> {
        ctx.call(self.id(), "setColumnIds", &[json!(ids.join(","))])?;
        Ok(())
    }

    /// Apply header and column settings
    pub fn init(&self, ctx: &mut UiContext) -> Result<()> {
        ctx.call(self.id(), "init", &[])?;
        Ok(())
    }

    pub fn add_row(&self, ctx: &mut UiContext, row_id: &str, cells: &[Value]) -> Result<()> {
        ctx.call(self.id(), "addRow", &[json!(row_id), Value::Array(cells.to_vec())])?;
        Ok(())
    }

    pub fn clear_all(&self, ctx: &mut UiContext) -> Result<()> {
        ctx.call(self.id(), "clearAll", &[])?;
        Ok(())
    }

    /// Load rows from JSON of the form `{"rows": [{"id": .., "data": [..]}, ..]}`.
    ///
    /// Returns the number of rows handed to the toolkit. Malformed data is
    /// rejected before the toolkit sees it.
    pub fn parse(&self, ctx: &mut UiContext, data: &str) -> Result<usize> {
        let value: Value = serde_json::from_str(data).map_err(|source| WidgetError::InvalidData {
            widget: "grid",
            source,
        })?;
        let rows = value
            .get("rows")
            .and_then(Value::as_array)
            .ok_or_else(|| WidgetError::InvalidParam {
                widget: "grid",
                param: "data",
                reason: "expected an object with a `rows` array".into(),
            })?
            .len();
        ctx.call(self.id(), "parse", &[value, json!("json")])?;
        tracing::debug!(grid = ?self.id(), rows, "grid data parsed");
        Ok(rows)
    }

    /// Number of rows, as reported by the toolkit
    pub fn row_count(&self, ctx: &mut UiContext) -> Result<u64> {
        match ctx.call(self.id(), "getRowsNum", &[])? {
            Value::Null => Ok(0),
            value => value.as_u64().ok_or(WidgetError::UnexpectedReply {
                method: "getRowsNum",
                value,
            }),
        }
    }

    /// Run `handler(args, &context)` whenever a row is selected
    pub fn on_row_select<C, F>(
        &self,
        ctx: &mut UiContext,
        handler: F,
        context: C,
    ) -> Result<SubscriptionId>
    where
        C: 'static,
        F: Fn(&EventArgs, &C) + 'static,
    {
        Ok(ctx
            .tree_mut()
            .attach_action(self.id(), ROW_SELECT_EVENT, handler, context)?)
    }
}
