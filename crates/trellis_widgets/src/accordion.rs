//! Accordions

use serde_json::json;
use trellis_core::{
    resolve_handle, ComponentError, ComponentType, Container, NativeWidget, UiContext,
    WidgetOptions,
};

use crate::error::Result;

component_type!(
    /// A vertical stack of collapsible cells
    Accordion,
    Accordion,
    "Accordion::new"
);

component_type!(
    /// One collapsible cell of an [`Accordion`]
    AccordionCell,
    AccordionCell,
    "AccordionCell::new",
    resolve = resolve_accordion_cell
);

impl Accordion {
    pub fn new(
        ctx: &mut UiContext,
        container: impl Into<Container>,
        name: impl Into<String>,
    ) -> Result<Self> {
        let options = WidgetOptions::from_config(Self::KIND, ctx.config());
        Ok(Self::mount(ctx, container, name, options)?)
    }

    /// Add a cell with header `text`
    pub fn add_cell(&self, ctx: &mut UiContext, name: &str, text: &str) -> Result<AccordionCell> {
        crate::ensure_unclaimed::<AccordionCell>(ctx, self.id(), "accordion", "cell", name)?;
        let options = WidgetOptions::from_config(AccordionCell::KIND, ctx.config())
            .param("cell", name)
            .param("text", text);
        Ok(AccordionCell::mount(ctx, *self, name, options)?)
    }

    pub fn cells(&self, ctx: &UiContext) -> Vec<AccordionCell> {
        crate::children_of(ctx, self.id())
    }
}

fn resolve_accordion_cell(
    ctx: &mut UiContext,
    container: &Container,
    options: WidgetOptions,
) -> trellis_core::Result<Box<dyn NativeWidget>> {
    if options.get_str("cell").map_or(true, str::is_empty) {
        return Err(ComponentError::MissingField { field: "cell" });
    }
    resolve_handle(ctx, AccordionCell::KIND, container, options, AccordionCell::OPERATION)
}

impl AccordionCell {
    pub fn open(&self, ctx: &mut UiContext) -> Result<()> {
        ctx.call(self.id(), "open", &[])?;
        Ok(())
    }

    pub fn close(&self, ctx: &mut UiContext) -> Result<()> {
        ctx.call(self.id(), "close", &[])?;
        Ok(())
    }

    pub fn set_text(&self, ctx: &mut UiContext, text: &str) -> Result<()> {
        ctx.call(self.id(), "setText", &[json!(text)])?;
        Ok(())
    }
}
