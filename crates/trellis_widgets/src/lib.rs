//! Trellis Widget Library
//!
//! Typed wrappers over the component tree. Every widget is a `Copy` handle
//! around a [`ComponentId`]; the component itself, its native widget and its
//! children live in the [`UiContext`]'s tree.
//!
//! Widgets that raise user actions (menus, toolbars, trees, forms) are bound to
//! an [`ActionRegistry`](trellis_core::ActionRegistry) when constructed.

use trellis_core::{ComponentId, ComponentType, UiContext};

/// Declare a widget handle and its [`ComponentType`] implementation.
///
/// The optional `resolve = path` form overrides how the native widget is
/// obtained; the function has the signature of [`ComponentType::resolve`].
macro_rules! component_type {
    (@impl $name:ident, $kind:ident, $op:literal { $($body:tt)* }) => {
        impl trellis_core::ComponentType for $name {
            const KIND: trellis_core::ComponentKind = trellis_core::ComponentKind::$kind;
            const OPERATION: &'static str = $op;

            fn from_id(id: trellis_core::ComponentId) -> Self {
                $name(id)
            }

            fn id(&self) -> trellis_core::ComponentId {
                self.0
            }

            $($body)*
        }

        impl From<$name> for trellis_core::Container {
            fn from(widget: $name) -> Self {
                trellis_core::Container::Component(widget.0)
            }
        }
    };
    ($(#[$meta:meta])* $name:ident, $kind:ident, $op:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(trellis_core::ComponentId);

        component_type!(@impl $name, $kind, $op {});
    };
    ($(#[$meta:meta])* $name:ident, $kind:ident, $op:literal, resolve = $resolve:path) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(trellis_core::ComponentId);

        component_type!(@impl $name, $kind, $op {
            fn resolve(
                ctx: &mut trellis_core::UiContext,
                container: &trellis_core::Container,
                options: trellis_core::WidgetOptions,
            ) -> trellis_core::Result<Box<dyn trellis_core::NativeWidget>> {
                $resolve(ctx, container, options)
            }
        });
    };
}

pub mod accordion;
pub mod error;
pub mod form;
pub mod grid;
pub mod layout;
pub mod menu;
pub mod message;
pub mod tabbar;
pub mod toolbar;
pub mod tree;
pub mod vault;
pub mod window;

pub use accordion::{Accordion, AccordionCell};
pub use error::{Result, WidgetError};
pub use form::Form;
pub use grid::Grid;
pub use layout::{Layout, LayoutCell};
pub use menu::Menu;
pub use message::{alert, confirm, show_message, Confirm, Deferred};
pub use tabbar::{Tab, Tabbar};
pub use toolbar::Toolbar;
pub use tree::Tree;
pub use vault::Vault;
pub use window::{Window, WindowConfig, WindowManager};

/// Wrap an existing component as `T` if its kind matches
pub fn downcast<T: ComponentType>(ctx: &UiContext, id: ComponentId) -> Option<T> {
    (ctx.tree().kind(id).ok()? == T::KIND).then(|| T::from_id(id))
}

/// Children of `parent` that are of kind `T`, in order
pub(crate) fn children_of<T: ComponentType>(ctx: &UiContext, parent: ComponentId) -> Vec<T> {
    ctx.tree()
        .children(parent)
        .map(|children| {
            children
                .iter()
                .filter(|id| ctx.tree().kind(**id).ok() == Some(T::KIND))
                .map(|id| T::from_id(*id))
                .collect()
        })
        .unwrap_or_default()
}

/// Fail if a live `T` child of `parent` was created with `param` set to
/// `value`
pub(crate) fn ensure_unclaimed<T: ComponentType>(
    ctx: &UiContext,
    parent: ComponentId,
    widget: &'static str,
    param: &'static str,
    value: &str,
) -> Result<()> {
    let claimed = children_of::<T>(ctx, parent).iter().any(|child| {
        ctx.tree()
            .options(child.id())
            .ok()
            .and_then(|options| options.get_str(param))
            == Some(value)
    });
    if claimed {
        return Err(WidgetError::InvalidParam {
            widget,
            param,
            reason: format!("`{value}` is already in use"),
        });
    }
    Ok(())
}

/// Run `setup` on a freshly mounted widget. On failure the widget is
/// destroyed again before the error is returned.
pub(crate) fn finish_mount<W: ComponentType>(
    ctx: &mut UiContext,
    widget: W,
    setup: impl FnOnce(&mut UiContext, &W) -> Result<()>,
) -> Result<W> {
    match setup(ctx, &widget) {
        Ok(()) => Ok(widget),
        Err(err) => {
            tracing::debug!(id = ?widget.id(), %err, "setup failed, destroying widget");
            widget.destroy(ctx);
            Err(err)
        }
    }
}

/// Commonly used types
pub mod prelude {
    pub use crate::accordion::{Accordion, AccordionCell};
    pub use crate::error::{Result, WidgetError};
    pub use crate::form::Form;
    pub use crate::grid::Grid;
    pub use crate::layout::{Layout, LayoutCell};
    pub use crate::menu::Menu;
    pub use crate::message::{alert, confirm, Confirm, Deferred};
    pub use crate::tabbar::{Tab, Tabbar};
    pub use crate::toolbar::Toolbar;
    pub use crate::tree::Tree;
    pub use crate::vault::Vault;
    pub use crate::window::{Window, WindowConfig, WindowManager};
    pub use trellis_core::prelude::*;
}
