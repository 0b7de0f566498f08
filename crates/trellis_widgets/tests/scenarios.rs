//! End-to-end scenarios over the headless toolkit

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use trellis_headless::{native_id, HeadlessProbe, HeadlessToolkit, NativeId};
use trellis_widgets::prelude::*;

fn context() -> (UiContext, HeadlessProbe) {
    let toolkit = HeadlessToolkit::new();
    let probe = toolkit.probe();
    (UiContext::new(toolkit, TrellisConfig::default()), probe)
}

fn native(ctx: &UiContext, id: ComponentId) -> NativeId {
    native_id(ctx.tree().handle(id).unwrap()).unwrap()
}

#[test]
fn test_menu_click_runs_registered_action() {
    let (mut ctx, probe) = context();
    let layout = Layout::new(&mut ctx, Surface::Body, "main", "2U").unwrap();
    let cell = layout.cell(&mut ctx, "a", "left").unwrap();

    let calls = Rc::new(RefCell::new(Vec::new()));
    let actions = ActionRegistry::new("main window".to_string());
    let spy = calls.clone();
    actions.add_action("open", move |args: &EventArgs, ctx: &String| {
        spy.borrow_mut().push((args.id().map(str::to_owned), ctx.clone()));
    });
    let menu = Menu::new(&mut ctx, cell, "main_menu", &actions).unwrap();

    let fired = probe.fire(native(&ctx, menu.id()), "onClick", &EventArgs::with_id("open"));

    assert_eq!(fired, 1);
    assert_eq!(
        *calls.borrow(),
        vec![(Some("open".to_string()), "main window".to_string())]
    );
    assert_eq!(ctx.tree().children(cell.id()).unwrap(), &[menu.id()]);
}

#[test]
fn test_destroying_middle_component() {
    let (mut ctx, probe) = context();
    let root = Layout::new(&mut ctx, Surface::Body, "root", "1C").unwrap();
    let child = root.cell(&mut ctx, "a", "child").unwrap();
    let grandchild = Grid::new(&mut ctx, child, "grandchild").unwrap();
    let root_native = native(&ctx, root.id());

    child.destroy(&mut ctx);

    assert_eq!(ctx.tree().lifecycle(grandchild.id()), Lifecycle::Destroyed);
    assert_eq!(ctx.tree().lifecycle(child.id()), Lifecycle::Destroyed);
    assert!(root.cells(&ctx).is_empty());
    assert_eq!(root.name(&ctx).unwrap(), "root");
    assert!(!probe.widget(root_native).unwrap().is_unloaded());

    let again = root.cell(&mut ctx, "a", "again").unwrap();
    assert_eq!(root.cells(&ctx), vec![again]);
}

#[test]
fn test_menu_under_tree_is_rejected() {
    let (mut ctx, probe) = context();
    let layout = Layout::new(&mut ctx, Surface::Body, "main", "1C").unwrap();
    let cell = layout.cell(&mut ctx, "a", "nav").unwrap();
    let tree = Tree::new(&mut ctx, cell, "files", &ActionRegistry::new(())).unwrap();
    let created = probe.created_count();
    let subscriptions = probe.subscriptions().len();

    let err = Menu::new(&mut ctx, tree, "menu", &ActionRegistry::new(())).unwrap_err();

    assert!(matches!(
        err,
        WidgetError::Component(ComponentError::InvalidContainer {
            operation: "Menu::new",
            kind: ComponentKind::Menu,
            container: ContainerKind::Component(ComponentKind::Tree),
        })
    ));
    assert_eq!(probe.created_count(), created);
    assert_eq!(probe.subscriptions().len(), subscriptions);
    assert!(ctx.tree().children(tree.id()).unwrap().is_empty());
}

#[test]
fn test_tree_under_grid_is_rejected() {
    let (mut ctx, probe) = context();
    let grid = Grid::new(&mut ctx, Surface::Body, "grid").unwrap();
    let created = probe.created_count();

    let err = Tree::new(&mut ctx, grid, "tree", &ActionRegistry::new(())).unwrap_err();

    assert!(matches!(
        err,
        WidgetError::Component(ComponentError::InvalidContainer {
            kind: ComponentKind::Tree,
            container: ContainerKind::Component(ComponentKind::Grid),
            ..
        })
    ));
    assert_eq!(probe.created_count(), created);
}

#[test]
fn test_tree_on_surface_is_rejected() {
    let (mut ctx, probe) = context();

    let err = Tree::new(&mut ctx, Surface::Body, "tree", &ActionRegistry::new(())).unwrap_err();

    assert!(matches!(
        err,
        WidgetError::Component(ComponentError::InvalidContainer {
            container: ContainerKind::Surface,
            ..
        })
    ));
    assert_eq!(probe.created_count(), 0);
}

#[test]
fn test_full_application_teardown() {
    let (mut ctx, probe) = context();
    let actions = ActionRegistry::new(());
    let layout = Layout::new(&mut ctx, Surface::Body, "app", "3L").unwrap();
    let nav = layout.cell(&mut ctx, "a", "nav").unwrap();
    let content = layout.cell(&mut ctx, "b", "content").unwrap();
    let details = layout.cell(&mut ctx, "c", "details").unwrap();
    Tree::new(&mut ctx, nav, "files", &actions).unwrap();
    Grid::new(&mut ctx, content, "table").unwrap();
    Form::new(&mut ctx, details, "props", serde_json::json!([]), &actions).unwrap();
    Toolbar::new(&mut ctx, Surface::element("toolbar"), "tools", &actions).unwrap();

    let windows = WindowManager::new(&mut ctx, Surface::Body, "windows").unwrap();
    windows
        .create_window(&mut ctx, "about", &WindowConfig::new("About"))
        .unwrap();

    ctx.shutdown();

    assert!(ctx.tree().is_empty());
    let widgets = probe.widgets();
    assert_eq!(widgets.len(), 10);
    assert!(widgets.iter().all(|w| w.unload_count == 1));
    assert!(probe.subscriptions().is_empty());
}

#[test]
fn test_find_across_widgets() {
    let (mut ctx, _probe) = context();
    let layout = Layout::new(&mut ctx, Surface::Body, "app", "2E").unwrap();
    let top = layout.cell(&mut ctx, "a", "top").unwrap();
    let bottom = layout.cell(&mut ctx, "b", "bottom").unwrap();
    let grid = Grid::new(&mut ctx, bottom, "table").unwrap();
    Toolbar::new(&mut ctx, top, "tools", &ActionRegistry::new(())).unwrap();

    assert_eq!(layout.find(&ctx, "table"), Some(grid.id()));
    assert_eq!(grid.find_parent(&ctx, "app"), Some(layout.id()));
    assert_eq!(grid.find_parent(&ctx, "top"), None);
    assert_eq!(top.layout(&ctx), Some(layout));
}
