//! File explorer demo
//!
//! Builds a three-pane explorer on the headless toolkit, simulates a few user
//! interactions, and tears everything down.
//!
//! Run with: cargo run -p trellis_widgets --example explorer

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use serde_json::json;
use trellis_core::descriptor::ROOT_PARENT;
use trellis_core::logging;
use trellis_headless::{native_id, HeadlessToolkit};
use trellis_widgets::prelude::*;

#[derive(Default)]
struct Explorer {
    opened: RefCell<Vec<String>>,
}

fn main() -> Result<()> {
    let config = TrellisConfig::load_or_default(".")?;
    logging::init(&config);

    let toolkit = HeadlessToolkit::new();
    let probe = toolkit.probe();
    let mut ctx = UiContext::new(toolkit, config);

    let state = Rc::new(Explorer::default());
    let actions = ActionRegistry::new(Rc::clone(&state));
    actions.add_action("open", |args: &EventArgs, app: &Rc<Explorer>| {
        let target = args
            .get(0)
            .and_then(|v| v.as_str())
            .unwrap_or("<nothing>")
            .to_string();
        tracing::info!(%target, "open");
        app.opened.borrow_mut().push(target);
    });
    actions.add_action("quit", |_, _| tracing::info!("quit requested"));

    let layout = Layout::new(&mut ctx, Surface::Body, "explorer", "3L")?;
    let nav = layout.cell(&mut ctx, "a", "nav")?;
    let files = layout.cell(&mut ctx, "b", "files")?;
    let details = layout.cell(&mut ctx, "c", "details")?;
    nav.set_text(&mut ctx, "Folders")?;

    let menu = Menu::new(&mut ctx, layout, "main_menu", &actions)?;
    menu.add_items(
        &mut ctx,
        &[
            MenuItemDescriptor::new(ROOT_PARENT, "file", "File"),
            actions.create_menu_item("file", "open", "Open", Some("open.png"), None),
            actions.create_menu_item("file", "quit", "Quit", None, None),
        ],
    )?;

    let tree = Tree::new(&mut ctx, nav, "folders", &actions)?;
    tree.add_items(
        &mut ctx,
        &[
            TreeItemDescriptor::<()>::new(ROOT_PARENT, "home", "Home"),
            TreeItemDescriptor::new("home", "docs", "Documents"),
        ],
    )?;

    let grid = Grid::new(&mut ctx, files, "listing")?;
    grid.set_header(&mut ctx, &["Name", "Size"])?;
    grid.init(&mut ctx)?;
    grid.parse(
        &mut ctx,
        &json!({"rows": [{"id": "r1", "data": ["notes.txt", 120]}]}).to_string(),
    )?;
    grid.on_row_select(
        &mut ctx,
        |args: &EventArgs, app: &Rc<Explorer>| {
            app.opened
                .borrow_mut()
                .push(format!("row {}", args.id().unwrap_or_default()));
        },
        Rc::clone(&state),
    )?;

    let form = Form::new(
        &mut ctx,
        details,
        "properties",
        json!([{"type": "input", "name": "name", "label": "Name"}]),
        &actions,
    )?;
    form.set_item_value(&mut ctx, "name", "notes.txt")?;

    let menu_native = ctx.tree().handle(menu.id()).ok().and_then(native_id);
    let grid_native = ctx.tree().handle(grid.id()).ok().and_then(native_id);
    if let (Some(menu_native), Some(grid_native)) = (menu_native, grid_native) {
        probe.fire(
            menu_native,
            "onClick",
            &EventArgs::with_id("open").value("notes.txt"),
        );
        probe.fire(grid_native, "onRowSelect", &EventArgs::with_id("r1"));
    }

    let answer = confirm(&mut ctx, "Quit explorer?")?;
    answer.on_confirmed(|| tracing::info!("bye"));
    probe.answer_message(true);

    tracing::info!(
        components = ctx.tree().len(),
        native_widgets = probe.created_count(),
        opened = ?state.opened.borrow(),
        "explorer built"
    );

    ctx.shutdown();
    tracing::info!(unloaded = probe.unload_order().len(), "explorer closed");
    Ok(())
}
