//! Layouts and layout cells
//!
//! A layout splits its container into cells according to a pattern such as
//! `"1C"` (one cell) or `"3L"` (three cells). Cells are addressed by letter,
//! `"a"` first, and host the actual content.

use serde_json::{json, Value};
use trellis_core::{
    resolve_handle, ComponentError, ComponentId, ComponentType, Container, NativeWidget,
    UiContext, WidgetOptions,
};

use crate::error::{Result, WidgetError};

component_type!(
    /// A multi-cell layout
    Layout,
    Layout,
    "Layout::new"
);

component_type!(
    /// One cell of a [`Layout`]
    LayoutCell,
    LayoutCell,
    "LayoutCell::new",
    resolve = resolve_cell
);

/// Number of cells a layout pattern describes
pub fn pattern_cells(pattern: &str) -> Option<usize> {
    let digits: String = pattern.chars().take_while(char::is_ascii_digit).collect();
    let shape = &pattern[digits.len()..];
    let cells: usize = digits.parse().ok()?;
    let valid_shape = shape.len() == 1 && shape.chars().all(|c| c.is_ascii_uppercase());
    (cells > 0 && cells <= 26 && valid_shape).then_some(cells)
}

/// Letter ids of the cells of a pattern
pub fn cell_ids(pattern: &str) -> Vec<String> {
    let count = pattern_cells(pattern).unwrap_or(0);
    (b'a'..)
        .take(count)
        .map(|letter| char::from(letter).to_string())
        .collect()
}

impl Layout {
    pub fn new(
        ctx: &mut UiContext,
        container: impl Into<Container>,
        name: impl Into<String>,
        pattern: &str,
    ) -> Result<Self> {
        if pattern_cells(pattern).is_none() {
            return Err(WidgetError::InvalidParam {
                widget: "layout",
                param: "pattern",
                reason: format!("`{pattern}` is not a layout pattern"),
            });
        }
        let options =
            WidgetOptions::from_config(Self::KIND, ctx.config()).param("pattern", pattern);
        Ok(Self::mount(ctx, container, name, options)?)
    }

    /// Wrap cell `cell_id` of this layout as a component.
    ///
    /// The id must belong to the layout's pattern, and each cell can be
    /// wrapped by one live component at a time.
    pub fn cell(
        &self,
        ctx: &mut UiContext,
        cell_id: &str,
        name: impl Into<String>,
    ) -> Result<LayoutCell> {
        if !cell_id.is_empty() {
            let pattern = ctx.tree().options(self.id())?.get_str("pattern").unwrap_or_default();
            if !cell_ids(pattern).iter().any(|id| id == cell_id) {
                return Err(WidgetError::InvalidParam {
                    widget: "layout",
                    param: "cell",
                    reason: format!("pattern `{pattern}` has no cell `{cell_id}`"),
                });
            }
            crate::ensure_unclaimed::<LayoutCell>(ctx, self.id(), "layout", "cell", cell_id)?;
        }
        let options = WidgetOptions::from_config(LayoutCell::KIND, ctx.config()).param("cell", cell_id);
        Ok(LayoutCell::mount(ctx, *self, name, options)?)
    }

    /// Cells wrapped so far, in creation order
    pub fn cells(&self, ctx: &UiContext) -> Vec<LayoutCell> {
        crate::children_of(ctx, self.id())
    }

    /// Re-layout after the container was resized
    pub fn set_sizes(&self, ctx: &mut UiContext) -> Result<()> {
        ctx.call(self.id(), "setSizes", &[])?;
        Ok(())
    }
}

/// Cells need the id of the layout cell they wrap
fn resolve_cell(
    ctx: &mut UiContext,
    container: &Container,
    options: WidgetOptions,
) -> trellis_core::Result<Box<dyn NativeWidget>> {
    if options.get_str("cell").map_or(true, str::is_empty) {
        return Err(ComponentError::MissingField { field: "cell" });
    }
    resolve_handle(ctx, LayoutCell::KIND, container, options, LayoutCell::OPERATION)
}

impl LayoutCell {
    fn invoke(&self, ctx: &mut UiContext, method: &str, args: &[Value]) -> Result<()> {
        ctx.call(self.id(), method, args)?;
        Ok(())
    }

    pub fn set_text(&self, ctx: &mut UiContext, text: &str) -> Result<()> {
        self.invoke(ctx, "setText", &[json!(text)])
    }

    pub fn set_width(&self, ctx: &mut UiContext, width: u32) -> Result<()> {
        self.invoke(ctx, "setWidth", &[json!(width)])
    }

    pub fn set_height(&self, ctx: &mut UiContext, height: u32) -> Result<()> {
        self.invoke(ctx, "setHeight", &[json!(height)])
    }

    pub fn collapse(&self, ctx: &mut UiContext) -> Result<()> {
        self.invoke(ctx, "collapse", &[])
    }

    pub fn expand(&self, ctx: &mut UiContext) -> Result<()> {
        self.invoke(ctx, "expand", &[])
    }

    pub fn hide_header(&self, ctx: &mut UiContext) -> Result<()> {
        self.invoke(ctx, "hideHeader", &[])
    }

    /// Show the busy indicator
    pub fn progress_on(&self, ctx: &mut UiContext) -> Result<()> {
        self.invoke(ctx, "progressOn", &[])
    }

    pub fn progress_off(&self, ctx: &mut UiContext) -> Result<()> {
        self.invoke(ctx, "progressOff", &[])
    }

    /// The layout this cell belongs to
    pub fn layout(&self, ctx: &UiContext) -> Option<Layout> {
        let container: ComponentId = ctx.tree().container(self.id()).ok()?.as_component()?;
        crate::downcast(ctx, container)
    }
}
