//! Container resolution
//!
//! Turning a requested container into a native widget happens in two steps.
//! The container is first checked against the kind whitelist without touching
//! the toolkit. Only then is a native widget obtained: created by the toolkit
//! when the container is a surface, or attached by the container's own native
//! widget when it is a component.
//!
//! [`ComponentType`] packages this for the typed wrappers. Kinds whose native
//! widget needs extra information from its container (a cell id, a caption)
//! override [`ComponentType::resolve`] and keep the rest.

use crate::component::{ComponentId, ComponentInit, ComponentTree, Container};
use crate::context::UiContext;
use crate::error::{ComponentError, Result};
use crate::kind::{is_allowed_container, ComponentKind, ContainerKind};
use crate::toolkit::{NativeRequest, NativeWidget, WidgetOptions};

/// Check that `kind` may be mounted under `container`.
///
/// Surfaces must be recognized and component containers must be initialized.
/// Returns the container kind the check ran against.
pub fn check_container(
    tree: &ComponentTree,
    kind: ComponentKind,
    container: &Container,
    operation: &'static str,
) -> Result<ContainerKind> {
    let container_kind = match container {
        Container::Surface(surface) => {
            if !surface.is_recognized() {
                tracing::warn!(%kind, %surface, operation, "unrecognized surface");
                return Err(ComponentError::InvalidContainer {
                    operation,
                    kind,
                    container: ContainerKind::Surface,
                });
            }
            ContainerKind::Surface
        }
        Container::Component(id) => ContainerKind::Component(tree.kind(*id)?),
    };

    if !is_allowed_container(kind, container_kind) {
        tracing::warn!(%kind, container = %container_kind, operation, "invalid container");
        return Err(ComponentError::InvalidContainer {
            operation,
            kind,
            container: container_kind,
        });
    }
    Ok(container_kind)
}

/// Obtain a native widget of `kind` for `container`.
///
/// Nothing reaches the toolkit unless the container passes
/// [`check_container`].
pub fn resolve_handle(
    ctx: &mut UiContext,
    kind: ComponentKind,
    container: &Container,
    options: WidgetOptions,
    operation: &'static str,
) -> Result<Box<dyn NativeWidget>> {
    let container_kind = check_container(ctx.tree(), kind, container, operation)?;

    let handle = match container {
        Container::Surface(surface) => ctx
            .toolkit_mut()
            .create(NativeRequest::on_surface(kind, surface.clone(), options))?,
        Container::Component(id) => ctx
            .tree_mut()
            .handle_mut(*id)?
            .attach(NativeRequest::child(kind, options))?,
    };
    tracing::debug!(%kind, container = %container_kind, "native widget resolved");
    Ok(handle)
}

/// A typed component wrapper.
///
/// Implementors are thin newtypes over [`ComponentId`]; all state lives in the
/// [`ComponentTree`].
pub trait ComponentType: Sized {
    const KIND: ComponentKind;

    /// Operation name reported in resolution errors
    const OPERATION: &'static str;

    fn from_id(id: ComponentId) -> Self;

    fn id(&self) -> ComponentId;

    /// Obtain the native widget for this kind under `container`
    fn resolve(
        ctx: &mut UiContext,
        container: &Container,
        options: WidgetOptions,
    ) -> Result<Box<dyn NativeWidget>> {
        resolve_handle(ctx, Self::KIND, container, options, Self::OPERATION)
    }

    /// Resolve a native widget and initialize a new component around it
    fn mount(
        ctx: &mut UiContext,
        container: impl Into<Container>,
        name: impl Into<String>,
        options: WidgetOptions,
    ) -> Result<Self> {
        let container = container.into();
        let handle = Self::resolve(ctx, &container, options.clone())?;
        let id = ctx.tree_mut().insert(
            ComponentInit::new()
                .name(name)
                .kind(Self::KIND)
                .container(container)
                .handle(handle)
                .options(options),
        )?;
        Ok(Self::from_id(id))
    }

    /// Re-resolve this component under `container` and re-initialize it.
    ///
    /// The previous native widget and all children are destroyed first.
    /// A destroyed component, or a container below this component, fails
    /// before any native widget is created.
    fn remount(
        &self,
        ctx: &mut UiContext,
        container: impl Into<Container>,
        name: impl Into<String>,
        options: WidgetOptions,
    ) -> Result<()> {
        let id = self.id();
        let container = container.into();
        if !ctx.tree().contains(id) {
            return Err(ComponentError::Destroyed { id });
        }
        if let Some(parent) = container.as_component() {
            ctx.tree().check_attachable(id, parent)?;
        }
        let handle = Self::resolve(ctx, &container, options.clone())?;
        ctx.tree_mut().initialize(
            id,
            ComponentInit::new()
                .name(name)
                .kind(Self::KIND)
                .container(container)
                .handle(handle)
                .options(options),
        )
    }

    /// Destroy this component and everything below it
    fn destroy(&self, ctx: &mut UiContext) {
        ctx.tree_mut().destroy(self.id());
    }

    fn name<'a>(&self, ctx: &'a UiContext) -> Result<&'a str> {
        ctx.tree().name(self.id())
    }

    fn children<'a>(&self, ctx: &'a UiContext) -> Result<&'a [ComponentId]> {
        ctx.tree().children(self.id())
    }

    /// Search this component's subtree by name
    fn find(&self, ctx: &UiContext, name: &str) -> Option<ComponentId> {
        ctx.tree().find(self.id(), name)
    }

    /// Search this component and its containers by name
    fn find_parent(&self, ctx: &UiContext, name: &str) -> Option<ComponentId> {
        ctx.tree().find_parent(self.id(), name)
    }

    fn is_alive(&self, ctx: &UiContext) -> bool {
        ctx.tree().contains(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrellisConfig;
    use crate::error::ToolkitError;
    use crate::toolkit::{NativeCallback, SubscriptionId, Surface, Toolkit};
    use serde_json::Value;
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// (kind, on surface) for every native widget created
    type Created = Rc<RefCell<Vec<(ComponentKind, bool)>>>;

    struct CountingToolkit {
        created: Created,
    }

    struct CountingWidget {
        kind: ComponentKind,
        created: Created,
    }

    impl Toolkit for CountingToolkit {
        fn name(&self) -> &str {
            "counting"
        }

        fn create(&mut self, request: NativeRequest) -> std::result::Result<Box<dyn NativeWidget>, ToolkitError> {
            self.created.borrow_mut().push((request.kind, true));
            Ok(Box::new(CountingWidget {
                kind: request.kind,
                created: self.created.clone(),
            }))
        }
    }

    impl NativeWidget for CountingWidget {
        fn kind(&self) -> ComponentKind {
            self.kind
        }

        fn attach(&mut self, request: NativeRequest) -> std::result::Result<Box<dyn NativeWidget>, ToolkitError> {
            if request.kind == ComponentKind::Vault {
                return Err(ToolkitError::Attach {
                    kind: request.kind,
                    reason: "no uploads here".into(),
                });
            }
            self.created.borrow_mut().push((request.kind, false));
            Ok(Box::new(CountingWidget {
                kind: request.kind,
                created: self.created.clone(),
            }))
        }

        fn attach_event(
            &mut self,
            _event: &str,
            _callback: NativeCallback,
        ) -> std::result::Result<SubscriptionId, ToolkitError> {
            Ok(SubscriptionId(0))
        }

        fn call(&mut self, _method: &str, _args: &[Value]) -> std::result::Result<Value, ToolkitError> {
            Ok(Value::Null)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct Panel(ComponentId);

    impl ComponentType for Panel {
        const KIND: ComponentKind = ComponentKind::Layout;
        const OPERATION: &'static str = "Panel::new";

        fn from_id(id: ComponentId) -> Self {
            Panel(id)
        }

        fn id(&self) -> ComponentId {
            self.0
        }
    }

    fn context() -> (UiContext, Created) {
        let created = Created::default();
        let toolkit = CountingToolkit {
            created: created.clone(),
        };
        (UiContext::new(toolkit, TrellisConfig::default()), created)
    }

    #[test]
    fn test_surface_creates_root_widget() {
        let (mut ctx, created) = context();
        let panel = Panel::mount(&mut ctx, Surface::Body, "main", WidgetOptions::new()).unwrap();

        assert_eq!(*created.borrow(), vec![(ComponentKind::Layout, true)]);
        assert_eq!(panel.name(&ctx).unwrap(), "main");
        assert_eq!(ctx.tree().roots(), vec![panel.id()]);
    }

    #[test]
    fn test_component_container_attaches_child_widget() {
        let (mut ctx, created) = context();
        let panel = Panel::mount(&mut ctx, Surface::Body, "main", WidgetOptions::new()).unwrap();
        let container = Container::Component(panel.id());

        let handle = resolve_handle(
            &mut ctx,
            ComponentKind::LayoutCell,
            &container,
            WidgetOptions::new(),
            "Cell::new",
        )
        .unwrap();

        assert_eq!(handle.kind(), ComponentKind::LayoutCell);
        assert_eq!(created.borrow().last(), Some(&(ComponentKind::LayoutCell, false)));
    }

    #[test]
    fn test_invalid_container_creates_nothing() {
        let (mut ctx, created) = context();
        let panel = Panel::mount(&mut ctx, Surface::Body, "main", WidgetOptions::new()).unwrap();

        let err = resolve_handle(
            &mut ctx,
            ComponentKind::Tree,
            &Container::Component(panel.id()),
            WidgetOptions::new(),
            "Tree::new",
        )
        .err()
        .unwrap();

        assert!(matches!(
            err,
            ComponentError::InvalidContainer {
                operation: "Tree::new",
                kind: ComponentKind::Tree,
                container: ContainerKind::Component(ComponentKind::Layout),
            }
        ));
        assert_eq!(created.borrow().len(), 1);
    }

    #[test]
    fn test_unrecognized_surface() {
        let (mut ctx, created) = context();
        let err = Panel::mount(&mut ctx, Surface::element("  "), "main", WidgetOptions::new())
            .err()
            .unwrap();

        assert!(matches!(
            err,
            ComponentError::InvalidContainer {
                container: ContainerKind::Surface,
                ..
            }
        ));
        assert!(created.borrow().is_empty());
        assert!(ctx.tree().is_empty());
    }

    #[test]
    fn test_uninitialized_container() {
        let (mut ctx, created) = context();
        let placeholder = ctx.tree_mut().create_placeholder();

        let err = check_container(
            ctx.tree(),
            ComponentKind::LayoutCell,
            &Container::Component(placeholder),
            "Cell::new",
        )
        .unwrap_err();

        assert!(matches!(err, ComponentError::Uninitialized { .. }));
        assert!(created.borrow().is_empty());
    }

    #[test]
    fn test_toolkit_failure_surfaces_unchanged() {
        let (mut ctx, _created) = context();
        let panel = Panel::mount(&mut ctx, Surface::Body, "main", WidgetOptions::new()).unwrap();
        let cell = ctx
            .tree_mut()
            .insert(
                ComponentInit::new()
                    .name("cell")
                    .kind(ComponentKind::LayoutCell)
                    .container(panel.id())
                    .handle(Box::new(CountingWidget {
                        kind: ComponentKind::LayoutCell,
                        created: Created::default(),
                    })),
            )
            .unwrap();

        let err = resolve_handle(
            &mut ctx,
            ComponentKind::Vault,
            &Container::Component(cell),
            WidgetOptions::new(),
            "Vault::new",
        )
        .err()
        .unwrap();

        assert!(matches!(
            err,
            ComponentError::Toolkit(ToolkitError::Attach {
                kind: ComponentKind::Vault,
                ..
            })
        ));
    }

    #[test]
    fn test_remount_replaces_previous_state() {
        let (mut ctx, created) = context();
        let panel = Panel::mount(&mut ctx, Surface::Body, "main", WidgetOptions::new()).unwrap();

        panel
            .remount(&mut ctx, Surface::element("side"), "side", WidgetOptions::new())
            .unwrap();

        assert_eq!(created.borrow().len(), 2);
        assert_eq!(panel.name(&ctx).unwrap(), "side");
        assert_eq!(
            ctx.tree().container(panel.id()).unwrap(),
            &Container::Surface(Surface::element("side"))
        );
    }

    #[test]
    fn test_remount_under_own_descendant_creates_nothing() {
        let (mut ctx, created) = context();
        let panel = Panel::mount(&mut ctx, Surface::Body, "outer", WidgetOptions::new()).unwrap();
        let cell = ctx
            .tree_mut()
            .insert(
                ComponentInit::new()
                    .name("cell")
                    .kind(ComponentKind::LayoutCell)
                    .container(panel.id())
                    .handle(Box::new(CountingWidget {
                        kind: ComponentKind::LayoutCell,
                        created: Created::default(),
                    })),
            )
            .unwrap();

        let err = panel
            .remount(&mut ctx, cell, "outer2", WidgetOptions::new())
            .unwrap_err();

        assert!(matches!(err, ComponentError::Cycle { .. }));
        assert_eq!(created.borrow().len(), 1);
        assert_eq!(panel.name(&ctx).unwrap(), "outer");
        assert_eq!(panel.children(&ctx).unwrap(), &[cell]);
    }

    #[test]
    fn test_remount_destroyed_creates_nothing() {
        let (mut ctx, created) = context();
        let panel = Panel::mount(&mut ctx, Surface::Body, "main", WidgetOptions::new()).unwrap();
        panel.destroy(&mut ctx);

        let err = panel
            .remount(&mut ctx, Surface::Body, "again", WidgetOptions::new())
            .unwrap_err();

        assert!(matches!(err, ComponentError::Destroyed { .. }));
        assert_eq!(created.borrow().len(), 1);
    }

    #[test]
    fn test_mount_keeps_options() {
        let (mut ctx, _created) = context();
        let panel = Panel::mount(
            &mut ctx,
            Surface::Body,
            "main",
            WidgetOptions::new().param("pattern", "2U"),
        )
        .unwrap();

        let options = ctx.tree().options(panel.id()).unwrap();
        assert_eq!(options.get_str("pattern"), Some("2U"));
    }

    #[test]
    fn test_destroy_through_wrapper() {
        let (mut ctx, _created) = context();
        let panel = Panel::mount(&mut ctx, Surface::Body, "main", WidgetOptions::new()).unwrap();
        assert!(panel.is_alive(&ctx));

        panel.destroy(&mut ctx);
        panel.destroy(&mut ctx);

        assert!(!panel.is_alive(&ctx));
        assert!(matches!(panel.name(&ctx), Err(ComponentError::Destroyed { .. })));
        assert_eq!(panel.find(&ctx, "main"), None);
    }
}
