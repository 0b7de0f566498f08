//! Component tree
//!
//! Components live in an arena and are addressed by [`ComponentId`]. Each one
//! owns its native widget and an ordered list of children, and refers to its
//! container by id without owning it.
//!
//! # Lifecycle
//!
//! ```text
//! create_placeholder()          initialize()              destroy()
//!  ───────────────▶ Uninitialized ─────────▶ Initialized ─────────▶ Destroyed
//!                                  ▲            │
//!                                  └────────────┘ initialize() again:
//!                                    previous state is destroyed first
//! ```
//!
//! Destruction is a post-order walk: children are popped last-first and each
//! is destroyed completely before the next, then the component detaches from
//! its container, then its native widget is unloaded exactly once.

use std::fmt;

use serde_json::Value;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::action::ActionRegistry;
use crate::error::{ComponentError, Result};
use crate::kind::{ComponentKind, ContainerKind};
use crate::toolkit::{EventArgs, NativeWidget, SubscriptionId, Surface, WidgetOptions};

new_key_type! {
    /// Unique identifier for a component in a [`ComponentTree`]
    pub struct ComponentId;
}

/// Where a component is mounted
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    /// Directly on a toolkit surface (a root component)
    Surface(Surface),
    /// Under another component (non-owning)
    Component(ComponentId),
}

impl Container {
    pub fn as_component(&self) -> Option<ComponentId> {
        match self {
            Container::Component(id) => Some(*id),
            Container::Surface(_) => None,
        }
    }

    pub fn is_surface(&self) -> bool {
        matches!(self, Container::Surface(_))
    }
}

impl From<Surface> for Container {
    fn from(surface: Surface) -> Self {
        Container::Surface(surface)
    }
}

impl From<ComponentId> for Container {
    fn from(id: ComponentId) -> Self {
        Container::Component(id)
    }
}

/// Observable lifecycle state of a component
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
    Destroyed,
}

/// The four core fields, gathered before `initialize` commits them.
///
/// Fields left unset make `initialize` fail without touching the component.
/// The options the native widget was created with are optional and kept
/// for later lookups.
#[derive(Default)]
pub struct ComponentInit {
    name: Option<String>,
    kind: Option<ComponentKind>,
    container: Option<Container>,
    handle: Option<Box<dyn NativeWidget>>,
    options: Option<WidgetOptions>,
}

impl ComponentInit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(mut self, kind: ComponentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn container(mut self, container: impl Into<Container>) -> Self {
        self.container = Some(container.into());
        self
    }

    pub fn handle(mut self, handle: Box<dyn NativeWidget>) -> Self {
        self.handle = Some(handle);
        self
    }

    pub fn options(mut self, options: WidgetOptions) -> Self {
        self.options = Some(options);
        self
    }

    fn into_fields(self) -> Result<Fields> {
        let ComponentInit {
            name,
            kind,
            container,
            handle,
            options,
        } = self;
        Ok(Fields {
            name: name.ok_or(ComponentError::MissingField { field: "name" })?,
            kind: kind.ok_or(ComponentError::MissingField { field: "kind" })?,
            container: container.ok_or(ComponentError::MissingField { field: "container" })?,
            handle: handle.ok_or(ComponentError::MissingField { field: "handle" })?,
            options: options.unwrap_or_default(),
            children: SmallVec::new(),
        })
    }
}

impl fmt::Debug for ComponentInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInit")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("container", &self.container)
            .field("has_handle", &self.handle.is_some())
            .field("options", &self.options)
            .finish()
    }
}

struct Fields {
    name: String,
    kind: ComponentKind,
    container: Container,
    handle: Box<dyn NativeWidget>,
    options: WidgetOptions,
    children: SmallVec<[ComponentId; 4]>,
}

enum Slot {
    Uninitialized,
    Initialized(Fields),
}

/// Arena of components.
///
/// Ids of destroyed components are never reused for another component; any
/// id this tree does not hold reports [`Lifecycle::Destroyed`].
#[derive(Default)]
pub struct ComponentTree {
    slots: SlotMap<ComponentId, Slot>,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (uninitialized or initialized) components
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `id` is live in this tree
    pub fn contains(&self, id: ComponentId) -> bool {
        self.slots.contains_key(id)
    }

    pub fn lifecycle(&self, id: ComponentId) -> Lifecycle {
        match self.slots.get(id) {
            None => Lifecycle::Destroyed,
            Some(Slot::Uninitialized) => Lifecycle::Uninitialized,
            Some(Slot::Initialized(_)) => Lifecycle::Initialized,
        }
    }

    /// Every live id, initialized or not
    pub fn ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.slots.keys()
    }

    /// Initialized components mounted directly on a surface
    pub fn roots(&self) -> Vec<ComponentId> {
        self.slots
            .iter()
            .filter_map(|(id, slot)| match slot {
                Slot::Initialized(fields) if fields.container.is_surface() => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Reserve an uninitialized component
    pub fn create_placeholder(&mut self) -> ComponentId {
        self.slots.insert(Slot::Uninitialized)
    }

    /// Create and initialize a component in one step
    pub fn insert(&mut self, init: ComponentInit) -> Result<ComponentId> {
        let id = self.create_placeholder();
        if let Err(err) = self.initialize(id, init) {
            self.slots.remove(id);
            return Err(err);
        }
        Ok(id)
    }

    /// Set the four core fields of `id` and register it with its container.
    ///
    /// Every field is validated before anything changes: on error the
    /// component keeps its previous state. An initialized component is fully
    /// destroyed (children, container link, native widget) before the new
    /// fields are stored. Destroyed components cannot be initialized again.
    pub fn initialize(&mut self, id: ComponentId, init: ComponentInit) -> Result<()> {
        if !self.slots.contains_key(id) {
            return Err(ComponentError::Destroyed { id });
        }
        let fields = init.into_fields()?;
        if let Container::Component(container) = fields.container {
            self.check_attachable(id, container)?;
        }

        if matches!(self.slots.get(id), Some(Slot::Initialized(_))) {
            tracing::debug!(?id, "re-initializing component, destroying previous state");
            self.teardown(id);
        }

        tracing::debug!(
            ?id,
            name = %fields.name,
            kind = %fields.kind,
            "component initialized"
        );
        let container = fields.container.as_component();
        self.slots[id] = Slot::Initialized(fields);
        if let Some(container) = container {
            self.fields_mut(container)?.children.push(id);
        }
        Ok(())
    }

    /// Destroy `id` and its whole subtree.
    ///
    /// Destroying an already destroyed component does nothing. An
    /// uninitialized placeholder is simply released.
    pub fn destroy(&mut self, id: ComponentId) {
        match self.slots.get(id) {
            None => {}
            Some(Slot::Uninitialized) => {
                self.slots.remove(id);
            }
            Some(Slot::Initialized(_)) => {
                self.teardown(id);
                self.slots.remove(id);
            }
        }
    }

    /// Children first (last-first), then detach, then unload. Leaves the slot
    /// uninitialized.
    fn teardown(&mut self, id: ComponentId) {
        while let Some(child) = self.pop_child(id) {
            self.destroy(child);
        }

        let Some(Slot::Initialized(mut fields)) = self
            .slots
            .get_mut(id)
            .map(|slot| std::mem::replace(slot, Slot::Uninitialized))
        else {
            return;
        };

        if let Container::Component(container) = fields.container {
            if let Some(Slot::Initialized(parent)) = self.slots.get_mut(container) {
                if let Some(index) = parent.children.iter().position(|child| *child == id) {
                    parent.children.remove(index);
                }
            }
        }

        tracing::debug!(?id, name = %fields.name, kind = %fields.kind, "unloading component");
        fields.handle.unload();
    }

    fn pop_child(&mut self, id: ComponentId) -> Option<ComponentId> {
        match self.slots.get_mut(id) {
            Some(Slot::Initialized(fields)) => fields.children.pop(),
            _ => None,
        }
    }

    /// `container` must be initialized and must not be `id` or below it
    pub fn check_attachable(&self, id: ComponentId, container: ComponentId) -> Result<()> {
        self.fields(container)?;
        let mut current = Some(container);
        while let Some(ancestor) = current {
            if ancestor == id {
                return Err(ComponentError::Cycle { id, container });
            }
            current = match self.slots.get(ancestor) {
                Some(Slot::Initialized(fields)) => fields.container.as_component(),
                _ => None,
            };
        }
        Ok(())
    }

    fn fields(&self, id: ComponentId) -> Result<&Fields> {
        match self.slots.get(id) {
            Some(Slot::Initialized(fields)) => Ok(fields),
            Some(Slot::Uninitialized) => Err(ComponentError::Uninitialized { id }),
            None => Err(ComponentError::Destroyed { id }),
        }
    }

    fn fields_mut(&mut self, id: ComponentId) -> Result<&mut Fields> {
        match self.slots.get_mut(id) {
            Some(Slot::Initialized(fields)) => Ok(fields),
            Some(Slot::Uninitialized) => Err(ComponentError::Uninitialized { id }),
            None => Err(ComponentError::Destroyed { id }),
        }
    }

    pub fn name(&self, id: ComponentId) -> Result<&str> {
        Ok(&self.fields(id)?.name)
    }

    pub fn kind(&self, id: ComponentId) -> Result<ComponentKind> {
        Ok(self.fields(id)?.kind)
    }

    pub fn container(&self, id: ComponentId) -> Result<&Container> {
        Ok(&self.fields(id)?.container)
    }

    /// The kind of container `id` is mounted on
    pub fn container_kind(&self, id: ComponentId) -> Result<ContainerKind> {
        match self.container(id)? {
            Container::Surface(_) => Ok(ContainerKind::Surface),
            Container::Component(container) => {
                Ok(ContainerKind::Component(self.kind(*container)?))
            }
        }
    }

    /// Options the component's native widget was created with
    pub fn options(&self, id: ComponentId) -> Result<&WidgetOptions> {
        Ok(&self.fields(id)?.options)
    }

    pub fn handle(&self, id: ComponentId) -> Result<&dyn NativeWidget> {
        Ok(self.fields(id)?.handle.as_ref())
    }

    pub fn handle_mut(&mut self, id: ComponentId) -> Result<&mut dyn NativeWidget> {
        Ok(self.fields_mut(id)?.handle.as_mut())
    }

    pub fn children(&self, id: ComponentId) -> Result<&[ComponentId]> {
        Ok(&self.fields(id)?.children)
    }

    /// Invoke a native method on the component's widget
    pub fn call(&mut self, id: ComponentId, method: &str, args: &[Value]) -> Result<Value> {
        Ok(self.handle_mut(id)?.call(method, args)?)
    }

    /// Depth-first pre-order search of `id` and its descendants.
    ///
    /// Children are visited in stored order; the first match wins.
    pub fn find(&self, id: ComponentId, name: &str) -> Option<ComponentId> {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Ok(fields) = self.fields(current) else {
                continue;
            };
            if fields.name == name {
                return Some(current);
            }
            stack.extend(fields.children.iter().rev().copied());
        }
        None
    }

    /// Search `id` and then its container chain upwards
    pub fn find_parent(&self, id: ComponentId, name: &str) -> Option<ComponentId> {
        let mut current = id;
        loop {
            let fields = self.fields(current).ok()?;
            if fields.name == name {
                return Some(current);
            }
            current = fields.container.as_component()?;
        }
    }

    /// Containers of `id`, nearest first
    pub fn ancestors(&self, id: ComponentId) -> Vec<ComponentId> {
        let mut ancestors = Vec::new();
        let mut current = self.fields(id).ok().and_then(|f| f.container.as_component());
        while let Some(ancestor) = current {
            ancestors.push(ancestor);
            current = self
                .fields(ancestor)
                .ok()
                .and_then(|f| f.container.as_component());
        }
        ancestors
    }

    /// Route a native event through `registry`.
    ///
    /// When `event` fires, the id it reports selects the handler, which runs
    /// with the registry's context. Events without an id, or with an id no
    /// handler is registered for, are ignored.
    pub fn attach_action_manager<C: 'static>(
        &mut self,
        id: ComponentId,
        event: &str,
        registry: &ActionRegistry<C>,
    ) -> Result<SubscriptionId> {
        let registry = registry.clone();
        let event_name = event.to_string();
        let subscription = self.handle_mut(id)?.attach_event(
            event,
            Box::new(move |args: &EventArgs| {
                let Some(action) = args.id() else {
                    tracing::trace!(event = %event_name, "native event without id");
                    return;
                };
                match registry.get(action) {
                    Some(handler) => {
                        tracing::trace!(event = %event_name, action, "dispatching action");
                        let context = registry.context();
                        handler(args, &context);
                    }
                    None => {
                        tracing::warn!(event = %event_name, action, "no handler for action");
                    }
                }
            }),
        )?;
        tracing::debug!(?id, event, "action manager attached");
        Ok(subscription)
    }

    /// Call `handler(args, &context)` every time `event` fires
    pub fn attach_action<C, F>(
        &mut self,
        id: ComponentId,
        event: &str,
        handler: F,
        context: C,
    ) -> Result<SubscriptionId>
    where
        C: 'static,
        F: Fn(&EventArgs, &C) + 'static,
    {
        let subscription = self
            .handle_mut(id)?
            .attach_event(event, Box::new(move |args: &EventArgs| handler(args, &context)))?;
        tracing::debug!(?id, event, "action attached");
        Ok(subscription)
    }
}

impl fmt::Debug for ComponentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (id, slot) in &self.slots {
            match slot {
                Slot::Uninitialized => map.entry(&id, &"<uninitialized>"),
                Slot::Initialized(fields) => {
                    map.entry(&id, &format_args!("{} ({})", fields.name, fields.kind))
                }
            };
        }
        map.finish()
    }
}
