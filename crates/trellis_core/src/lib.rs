//! Trellis Core Runtime
//!
//! This crate provides the foundational pieces every Trellis widget is built on:
//!
//! - **Component Tree**: named components with a single lifecycle, a non-owning
//!   container back-reference, and cascading destruction
//! - **Container Resolution**: a closed whitelist deciding which kinds may be
//!   mounted under which containers, evaluated before any native widget exists
//! - **Action Dispatch**: hierarchical registries mapping symbolic action names
//!   to handlers, independent of any particular widget
//!
//! The widget toolkit itself sits behind the [`Toolkit`] and [`NativeWidget`]
//! traits.
//!
//! # Example
//!
//! ```ignore
//! use trellis_core::prelude::*;
//!
//! let mut ctx = UiContext::new(toolkit, TrellisConfig::default());
//!
//! let actions = ActionRegistry::new("main window");
//! actions.add_action("open", |_args, who| println!("open from {who}"));
//!
//! let handle = resolve_handle(
//!     &mut ctx,
//!     ComponentKind::Menu,
//!     &Container::Surface(Surface::Body),
//!     WidgetOptions::default(),
//!     "Menu::new",
//! )?;
//! let menu = ctx.tree_mut().insert(
//!     ComponentInit::new()
//!         .name("main_menu")
//!         .kind(ComponentKind::Menu)
//!         .container(Surface::Body)
//!         .handle(handle),
//! )?;
//! ctx.tree_mut().attach_action_manager(menu, "onClick", &actions)?;
//! ```

pub mod action;
pub mod component;
pub mod config;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod kind;
pub mod logging;
pub mod resolve;
pub mod toolkit;

pub use action::{ActionRegistry, Handler};
pub use component::{ComponentId, ComponentInit, ComponentTree, Container, Lifecycle};
pub use config::{IconPaths, TrellisConfig};
pub use context::UiContext;
pub use descriptor::{ActionDescriptor, MenuItemDescriptor, TreeItemDescriptor};
pub use error::{ActionError, ComponentError, ConfigError, Result, ToolkitError};
pub use kind::{is_allowed_container, ComponentKind, ContainerKind};
pub use resolve::{check_container, resolve_handle, ComponentType};
pub use toolkit::{
    EventArgs, MessageKind, MessageReply, MessageRequest, NativeCallback, NativeRequest,
    NativeWidget, SubscriptionId, Surface, Toolkit, WidgetOptions,
};

/// Commonly used types, for glob import by widget crates and applications.
pub mod prelude {
    pub use crate::action::ActionRegistry;
    pub use crate::component::{ComponentId, ComponentInit, ComponentTree, Container, Lifecycle};
    pub use crate::config::TrellisConfig;
    pub use crate::context::UiContext;
    pub use crate::descriptor::{ActionDescriptor, MenuItemDescriptor, TreeItemDescriptor};
    pub use crate::error::{ActionError, ComponentError, Result, ToolkitError};
    pub use crate::kind::{ComponentKind, ContainerKind};
    pub use crate::resolve::{resolve_handle, ComponentType};
    pub use crate::toolkit::{EventArgs, NativeRequest, NativeWidget, Surface, Toolkit, WidgetOptions};
}
