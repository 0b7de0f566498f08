//! Component kinds and the container whitelist
//!
//! Which kinds may be mounted under which containers is a closed table. The
//! check is a pure function so it can run before any native widget exists.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a component. Immutable after initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Layout,
    LayoutCell,
    Toolbar,
    Form,
    Menu,
    Grid,
    Tree,
    Window,
    WindowManager,
    Tabbar,
    Tab,
    Accordion,
    AccordionCell,
    Vault,
}

/// What a component is being mounted onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// A toolkit mount point (document body, element id)
    Surface,
    /// An existing component of the given kind
    Component(ComponentKind),
}

use ComponentKind::*;
use ContainerKind::{Component as In, Surface};

/// Containers that host general content: the surface, layout cells,
/// windows, tabs and accordion cells.
const CONTENT_HOSTS: &[ContainerKind] = &[
    Surface,
    In(LayoutCell),
    In(Window),
    In(Tab),
    In(AccordionCell),
];

const MENU_HOSTS: &[ContainerKind] = &[Surface, In(LayoutCell), In(Layout), In(Window)];
const PANEL_HOSTS: &[ContainerKind] = &[Surface, In(LayoutCell), In(Window)];
const SURFACE_ONLY: &[ContainerKind] = &[Surface];
const IN_LAYOUT: &[ContainerKind] = &[In(Layout)];
const IN_LAYOUT_CELL: &[ContainerKind] = &[In(LayoutCell)];
const IN_WINDOW_MANAGER: &[ContainerKind] = &[In(WindowManager)];
const IN_TABBAR: &[ContainerKind] = &[In(Tabbar)];
const IN_ACCORDION: &[ContainerKind] = &[In(Accordion)];

impl ComponentKind {
    /// Every kind, in declaration order
    pub const ALL: [ComponentKind; 14] = [
        Layout,
        LayoutCell,
        Toolbar,
        Form,
        Menu,
        Grid,
        Tree,
        Window,
        WindowManager,
        Tabbar,
        Tab,
        Accordion,
        AccordionCell,
        Vault,
    ];

    /// Stable name used in logs and toolkit requests
    pub const fn as_str(self) -> &'static str {
        match self {
            Layout => "layout",
            LayoutCell => "layout_cell",
            Toolbar => "toolbar",
            Form => "form",
            Menu => "menu",
            Grid => "grid",
            Tree => "tree",
            Window => "window",
            WindowManager => "window_manager",
            Tabbar => "tabbar",
            Tab => "tab",
            Accordion => "accordion",
            AccordionCell => "accordion_cell",
            Vault => "vault",
        }
    }

    /// The containers this kind may be mounted under
    pub const fn allowed_containers(self) -> &'static [ContainerKind] {
        match self {
            Layout | Toolbar | Grid | Form => CONTENT_HOSTS,
            LayoutCell => IN_LAYOUT,
            Menu => MENU_HOSTS,
            Tree => IN_LAYOUT_CELL,
            WindowManager => SURFACE_ONLY,
            Window => IN_WINDOW_MANAGER,
            Tabbar | Accordion | Vault => PANEL_HOSTS,
            Tab => IN_TABBAR,
            AccordionCell => IN_ACCORDION,
        }
    }

    /// Whether this kind can be mounted directly on a surface
    pub fn mounts_on_surface(self) -> bool {
        is_allowed_container(self, Surface)
    }
}

/// Whether a component of kind `child` may be mounted under `container`.
pub fn is_allowed_container(child: ComponentKind, container: ContainerKind) -> bool {
    child.allowed_containers().contains(&container)
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface => f.write_str("surface"),
            In(kind) => write!(f, "{kind}"),
        }
    }
}
