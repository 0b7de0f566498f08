//! Component tree lifecycle driven through the headless toolkit

use pretty_assertions::assert_eq;
use trellis_core::prelude::*;
use trellis_headless::{native_id, HeadlessProbe, HeadlessToolkit, NativeId};

fn context() -> (UiContext, HeadlessProbe) {
    let toolkit = HeadlessToolkit::new();
    let probe = toolkit.probe();
    (UiContext::new(toolkit, TrellisConfig::default()), probe)
}

fn mount(
    ctx: &mut UiContext,
    kind: ComponentKind,
    container: impl Into<Container>,
    name: &str,
) -> Result<ComponentId> {
    let container = container.into();
    let handle = resolve_handle(ctx, kind, &container, WidgetOptions::new(), "mount")?;
    ctx.tree_mut().insert(
        ComponentInit::new()
            .name(name)
            .kind(kind)
            .container(container)
            .handle(handle),
    )
}

fn native(ctx: &UiContext, id: ComponentId) -> NativeId {
    native_id(ctx.tree().handle(id).unwrap()).unwrap()
}

#[test]
fn test_destroy_unloads_deepest_first() {
    let (mut ctx, probe) = context();
    let root = mount(&mut ctx, ComponentKind::Layout, Surface::Body, "root").unwrap();
    let a = mount(&mut ctx, ComponentKind::LayoutCell, root, "a").unwrap();
    let b = mount(&mut ctx, ComponentKind::Grid, a, "b").unwrap();
    let expected = vec![native(&ctx, b), native(&ctx, a), native(&ctx, root)];

    ctx.destroy(root);

    assert_eq!(probe.unload_order(), expected);
    for id in [root, a, b] {
        assert_eq!(ctx.tree().lifecycle(id), Lifecycle::Destroyed);
    }
}

#[test]
fn test_destroy_middle_of_tree() {
    let (mut ctx, probe) = context();
    let root = mount(&mut ctx, ComponentKind::Layout, Surface::Body, "root").unwrap();
    let child = mount(&mut ctx, ComponentKind::LayoutCell, root, "child").unwrap();
    let grandchild = mount(&mut ctx, ComponentKind::Toolbar, child, "grandchild").unwrap();
    let root_native = native(&ctx, root);

    ctx.destroy(child);

    assert_eq!(ctx.tree().lifecycle(grandchild), Lifecycle::Destroyed);
    assert!(ctx.tree().children(root).unwrap().is_empty());
    assert!(!probe.widget(root_native).unwrap().is_unloaded());

    let replacement = mount(&mut ctx, ComponentKind::LayoutCell, root, "replacement").unwrap();
    assert_eq!(ctx.tree().children(root).unwrap(), &[replacement]);
}

#[test]
fn test_native_parentage_mirrors_tree() {
    let (mut ctx, probe) = context();
    let root = mount(&mut ctx, ComponentKind::Layout, Surface::element("app"), "root").unwrap();
    let cell = mount(&mut ctx, ComponentKind::LayoutCell, root, "cell").unwrap();

    let root_record = probe.widget(native(&ctx, root)).unwrap();
    let cell_record = probe.widget(native(&ctx, cell)).unwrap();

    assert_eq!(root_record.surface, Some(Surface::element("app")));
    assert_eq!(root_record.parent, None);
    assert_eq!(cell_record.parent, Some(root_record.id));
}

#[test]
fn test_rejected_container_reaches_no_toolkit() {
    let (mut ctx, probe) = context();
    let root = mount(&mut ctx, ComponentKind::Layout, Surface::Body, "root").unwrap();
    let cell = mount(&mut ctx, ComponentKind::LayoutCell, root, "cell").unwrap();
    let grid = mount(&mut ctx, ComponentKind::Grid, cell, "grid").unwrap();
    let before = probe.created_count();

    let err = mount(&mut ctx, ComponentKind::Tree, grid, "tree").unwrap_err();

    assert!(matches!(
        err,
        ComponentError::InvalidContainer {
            kind: ComponentKind::Tree,
            container: ContainerKind::Component(ComponentKind::Grid),
            ..
        }
    ));
    assert_eq!(probe.created_count(), before);
    assert_eq!(ctx.tree().children(grid).unwrap().len(), 0);
}

#[test]
fn test_action_manager_through_native_events() {
    let (mut ctx, probe) = context();
    let menu = mount(&mut ctx, ComponentKind::Menu, Surface::Body, "menu").unwrap();

    let registry = ActionRegistry::new(String::from("ctx"));
    let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = log.clone();
    registry.add_action("open", move |args: &EventArgs, ctx: &String| {
        sink.borrow_mut()
            .push(format!("{}:{ctx}", args.id().unwrap_or_default()));
    });
    ctx.tree_mut()
        .attach_action_manager(menu, "onClick", &registry)
        .unwrap();

    let id = native(&ctx, menu);
    assert_eq!(probe.fire(id, "onClick", &EventArgs::with_id("open")), 1);
    assert_eq!(probe.fire(id, "onClick", &EventArgs::with_id("unknown")), 1);
    assert_eq!(*log.borrow(), vec!["open:ctx"]);

    ctx.destroy(menu);
    assert_eq!(probe.fire(id, "onClick", &EventArgs::with_id("open")), 0);
}

#[test]
fn test_shutdown_destroys_every_root() {
    let (mut ctx, probe) = context();
    mount(&mut ctx, ComponentKind::Menu, Surface::Body, "menu").unwrap();
    let layout = mount(&mut ctx, ComponentKind::Layout, Surface::element("side"), "side").unwrap();
    mount(&mut ctx, ComponentKind::LayoutCell, layout, "cell").unwrap();
    ctx.tree_mut().create_placeholder();

    ctx.shutdown();

    assert!(ctx.tree().is_empty());
    assert_eq!(probe.unload_order().len(), 3);
    assert!(probe.widgets().iter().all(|w| w.unload_count == 1));
}
