//! Windows
//!
//! Floating windows live under a [`WindowManager`], which is an ordinary
//! component mounted on a surface. Applications create the manager they need
//! and pass it around; shutting it down destroys every window it owns.

use serde_json::json;
use trellis_core::{
    resolve_handle, ComponentError, ComponentType, Container, NativeWidget, UiContext,
    WidgetOptions,
};

use crate::error::{Result, WidgetError};

component_type!(
    /// Owner of floating windows
    WindowManager,
    WindowManager,
    "WindowManager::new"
);

component_type!(
    /// A floating window
    Window,
    Window,
    "Window::new",
    resolve = resolve_window
);

/// Initial window geometry and caption
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    pub caption: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Center on the screen after creation
    pub centered: bool,
    pub modal: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            caption: String::new(),
            x: 0,
            y: 0,
            width: 400,
            height: 300,
            centered: false,
            modal: false,
        }
    }
}

impl WindowConfig {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    pub fn modal(mut self) -> Self {
        self.modal = true;
        self
    }

    fn options(&self, base: WidgetOptions) -> WidgetOptions {
        base.param("caption", self.caption.as_str())
            .param("x", self.x)
            .param("y", self.y)
            .param("width", self.width)
            .param("height", self.height)
    }
}

impl WindowManager {
    pub fn new(
        ctx: &mut UiContext,
        container: impl Into<Container>,
        name: impl Into<String>,
    ) -> Result<Self> {
        let options = WidgetOptions::from_config(Self::KIND, ctx.config());
        Ok(Self::mount(ctx, container, name, options)?)
    }

    pub fn create_window(
        &self,
        ctx: &mut UiContext,
        name: impl Into<String>,
        config: &WindowConfig,
    ) -> Result<Window> {
        if config.width == 0 || config.height == 0 {
            return Err(WidgetError::InvalidParam {
                widget: "window",
                param: "size",
                reason: format!("{}x{} window", config.width, config.height),
            });
        }
        let options = config.options(WidgetOptions::from_config(Window::KIND, ctx.config()));
        let window = Window::mount(ctx, *self, name, options)?;
        crate::finish_mount(ctx, window, |ctx, window| {
            if config.modal {
                window.set_modal(ctx, true)?;
            }
            if config.centered {
                window.center(ctx)?;
            }
            Ok(())
        })
    }

    /// Open windows, oldest first
    pub fn windows(&self, ctx: &UiContext) -> Vec<Window> {
        crate::children_of(ctx, self.id())
    }

    /// Find an open window by name
    pub fn window(&self, ctx: &UiContext, name: &str) -> Option<Window> {
        self.windows(ctx)
            .into_iter()
            .find(|window| window.name(ctx).is_ok_and(|n| n == name))
    }

    /// Close every window and destroy the manager
    pub fn shutdown(self, ctx: &mut UiContext) {
        tracing::debug!(windows = self.windows(ctx).len(), "window manager shutting down");
        self.destroy(ctx);
    }
}

/// Windows need their geometry up front
fn resolve_window(
    ctx: &mut UiContext,
    container: &Container,
    options: WidgetOptions,
) -> trellis_core::Result<Box<dyn NativeWidget>> {
    for field in ["width", "height"] {
        if options.get(field).and_then(|v| v.as_u64()).is_none() {
            return Err(ComponentError::MissingField { field });
        }
    }
    resolve_handle(ctx, Window::KIND, container, options, Window::OPERATION)
}

impl Window {
    pub fn set_text(&self, ctx: &mut UiContext, text: &str) -> Result<()> {
        ctx.call(self.id(), "setText", &[json!(text)])?;
        Ok(())
    }

    pub fn center(&self, ctx: &mut UiContext) -> Result<()> {
        ctx.call(self.id(), "center", &[])?;
        Ok(())
    }

    pub fn set_modal(&self, ctx: &mut UiContext, modal: bool) -> Result<()> {
        ctx.call(self.id(), "setModal", &[json!(modal)])?;
        Ok(())
    }

    /// Close the window. The component and everything in it is destroyed.
    pub fn close(self, ctx: &mut UiContext) {
        self.destroy(ctx);
    }
}
