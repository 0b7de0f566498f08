//! Headless toolkit and native widgets

use std::any::Any;
use std::rc::Rc;

use serde_json::Value;
use trellis_core::{
    ComponentKind, MessageReply, MessageRequest, NativeCallback, NativeRequest, NativeWidget,
    SubscriptionId, Toolkit, ToolkitError,
};

use crate::probe::HeadlessProbe;
use crate::state::{NativeId, PendingMessage, SharedState};

/// Configuration for a [`HeadlessToolkit`].
#[derive(Clone, Debug)]
pub struct HeadlessConfig {
    /// Name reported by [`Toolkit::name`]
    pub name: String,
    /// Kinds the toolkit refuses to create or attach
    pub reject_kinds: Vec<ComponentKind>,
    /// Whether modal messages are supported
    pub messages: bool,
    /// Events whose subscription fails
    pub failing_events: Vec<String>,
    /// Native methods whose calls fail
    pub failing_methods: Vec<String>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            name: "headless".to_string(),
            reject_kinds: Vec::new(),
            messages: true,
            failing_events: Vec::new(),
            failing_methods: Vec::new(),
        }
    }
}

impl HeadlessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse native widgets of `kind`.
    pub fn rejecting(mut self, kind: ComponentKind) -> Self {
        self.reject_kinds.push(kind);
        self
    }

    /// Disable modal messages.
    pub fn without_messages(mut self) -> Self {
        self.messages = false;
        self
    }

    /// Make subscribing to `event` fail on every widget.
    pub fn failing_event(mut self, event: impl Into<String>) -> Self {
        self.failing_events.push(event.into());
        self
    }

    /// Make every call to `method` fail.
    pub fn failing_method(mut self, method: impl Into<String>) -> Self {
        self.failing_methods.push(method.into());
        self
    }
}

/// An in-memory toolkit.
///
/// Take a [`HeadlessProbe`] before handing the toolkit to a `UiContext`; the
/// probe shares the toolkit's records.
pub struct HeadlessToolkit {
    config: Rc<HeadlessConfig>,
    state: SharedState,
}

impl Default for HeadlessToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessToolkit {
    pub fn new() -> Self {
        Self::with_config(HeadlessConfig::default())
    }

    pub fn with_config(config: HeadlessConfig) -> Self {
        Self {
            config: Rc::new(config),
            state: SharedState::default(),
        }
    }

    pub fn config(&self) -> &HeadlessConfig {
        &self.config
    }

    /// A view onto everything this toolkit records
    pub fn probe(&self) -> HeadlessProbe {
        HeadlessProbe::new(self.state.clone())
    }

}

impl Toolkit for HeadlessToolkit {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn create(&mut self, request: NativeRequest) -> Result<Box<dyn NativeWidget>, ToolkitError> {
        let NativeRequest {
            kind,
            surface,
            options,
        } = request;
        if self.config.reject_kinds.contains(&kind) {
            return Err(ToolkitError::Create {
                kind,
                reason: format!("{} rejects {kind} widgets", self.config.name),
            });
        }

        let id = self.state.borrow_mut().register(kind, None, surface, options);
        tracing::trace!(id, %kind, "headless widget created");
        Ok(Box::new(HeadlessWidget {
            id,
            kind,
            config: Rc::clone(&self.config),
            state: self.state.clone(),
        }))
    }

    fn show_message(
        &mut self,
        request: MessageRequest,
        reply: MessageReply,
    ) -> Result<(), ToolkitError> {
        if !self.config.messages {
            return Err(ToolkitError::Unsupported("messages".into()));
        }
        tracing::trace!(kind = ?request.kind, "headless message queued");
        self.state
            .borrow_mut()
            .messages
            .push(PendingMessage { request, reply });
        Ok(())
    }
}

/// A recorded native widget
pub struct HeadlessWidget {
    id: NativeId,
    kind: ComponentKind,
    config: Rc<HeadlessConfig>,
    state: SharedState,
}

impl HeadlessWidget {
    pub fn id(&self) -> NativeId {
        self.id
    }
}

impl NativeWidget for HeadlessWidget {
    fn kind(&self) -> ComponentKind {
        self.kind
    }

    fn attach(&mut self, request: NativeRequest) -> Result<Box<dyn NativeWidget>, ToolkitError> {
        let kind = request.kind;
        if self.config.reject_kinds.contains(&kind) {
            return Err(ToolkitError::Attach {
                kind,
                reason: format!("{} widget refuses {kind} children", self.kind),
            });
        }
        let id = self
            .state
            .borrow_mut()
            .register(kind, Some(self.id), None, request.options);
        tracing::trace!(id, parent = self.id, %kind, "headless widget attached");
        Ok(Box::new(HeadlessWidget {
            id,
            kind,
            config: Rc::clone(&self.config),
            state: self.state.clone(),
        }))
    }

    fn attach_event(
        &mut self,
        event: &str,
        callback: NativeCallback,
    ) -> Result<SubscriptionId, ToolkitError> {
        if self.config.failing_events.iter().any(|e| e == event) {
            return Err(ToolkitError::Subscribe {
                event: event.to_string(),
                reason: format!("{} widget refuses the subscription", self.kind),
            });
        }
        Ok(self.state.borrow_mut().subscribe(self.id, event, callback))
    }

    fn call(&mut self, method: &str, args: &[Value]) -> Result<Value, ToolkitError> {
        if self.config.failing_methods.iter().any(|m| m == method) {
            return Err(ToolkitError::Call {
                method: method.to_string(),
                reason: "configured to fail".into(),
            });
        }
        Ok(self.state.borrow_mut().call(self.id, method, args))
    }

    fn unload(&mut self) {
        tracing::trace!(id = self.id, kind = %self.kind, "headless widget unloaded");
        self.state.borrow_mut().unload(self.id);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for HeadlessWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessWidget")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

/// The headless id behind a native widget, if it is a headless one
pub fn native_id(widget: &dyn NativeWidget) -> Option<NativeId> {
    widget
        .as_any()
        .downcast_ref::<HeadlessWidget>()
        .map(HeadlessWidget::id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use trellis_core::{EventArgs, MessageKind, Surface, WidgetOptions};

    fn root(toolkit: &mut HeadlessToolkit, kind: ComponentKind) -> Box<dyn NativeWidget> {
        toolkit
            .create(NativeRequest::on_surface(kind, Surface::Body, WidgetOptions::new()))
            .unwrap()
    }

    #[test]
    fn test_create_and_attach_record_parentage() {
        let mut toolkit = HeadlessToolkit::new();
        let probe = toolkit.probe();

        let mut layout = root(&mut toolkit, ComponentKind::Layout);
        let cell = layout
            .attach(NativeRequest::child(
                ComponentKind::LayoutCell,
                WidgetOptions::new().param("cell", "a"),
            ))
            .unwrap();

        let layout_id = native_id(layout.as_ref()).unwrap();
        let cell_id = native_id(cell.as_ref()).unwrap();
        let record = probe.widget(cell_id).unwrap();

        assert_eq!(probe.created_count(), 2);
        assert_eq!(record.parent, Some(layout_id));
        assert_eq!(record.options.get_str("cell"), Some("a"));
        assert_eq!(probe.widget(layout_id).unwrap().surface, Some(Surface::Body));
    }

    #[test]
    fn test_rejected_kinds() {
        let mut toolkit =
            HeadlessToolkit::with_config(HeadlessConfig::new().rejecting(ComponentKind::Vault));
        let probe = toolkit.probe();

        let err = toolkit
            .create(NativeRequest::on_surface(
                ComponentKind::Vault,
                Surface::Body,
                WidgetOptions::new(),
            ))
            .err()
            .unwrap();
        assert!(matches!(err, ToolkitError::Create { kind: ComponentKind::Vault, .. }));

        let mut layout = root(&mut toolkit, ComponentKind::Layout);
        let err = layout
            .attach(NativeRequest::child(ComponentKind::Vault, WidgetOptions::new()))
            .err()
            .unwrap();
        assert!(matches!(err, ToolkitError::Attach { .. }));
        assert_eq!(probe.created_count(), 1);
    }

    #[test]
    fn test_fire_runs_matching_callbacks() {
        let mut toolkit = HeadlessToolkit::new();
        let probe = toolkit.probe();
        let mut menu = root(&mut toolkit, ComponentKind::Menu);
        let id = native_id(menu.as_ref()).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second"] {
            let sink = seen.clone();
            menu.attach_event(
                "onClick",
                Box::new(move |args: &EventArgs| {
                    sink.borrow_mut().push(format!("{tag}:{}", args.id().unwrap_or("-")))
                }),
            )
            .unwrap();
        }

        assert_eq!(probe.fire(id, "onClick", &EventArgs::with_id("open")), 2);
        assert_eq!(probe.fire(id, "onHover", &EventArgs::with_id("open")), 0);
        assert_eq!(*seen.borrow(), vec!["first:open", "second:open"]);
        assert_eq!(probe.subscription_count(id, "onClick"), 2);
    }

    #[test]
    fn test_refire_from_callback_skips_running_callback() {
        let mut toolkit = HeadlessToolkit::new();
        let probe = toolkit.probe();
        let mut tree = root(&mut toolkit, ComponentKind::Tree);
        let id = native_id(tree.as_ref()).unwrap();

        let inner_runs = Rc::new(RefCell::new(Vec::new()));
        let sink = inner_runs.clone();
        let refire = probe.clone();
        tree.attach_event(
            "onSelect",
            Box::new(move |_: &EventArgs| {
                sink.borrow_mut().push(refire.fire(id, "onSelect", &EventArgs::new()));
            }),
        )
        .unwrap();

        assert_eq!(probe.fire(id, "onSelect", &EventArgs::new()), 1);
        assert_eq!(*inner_runs.borrow(), vec![0]);
    }

    #[test]
    fn test_failing_events_and_methods() {
        let mut toolkit = HeadlessToolkit::with_config(
            HeadlessConfig::new()
                .failing_event("onClick")
                .failing_method("center"),
        );
        let probe = toolkit.probe();
        let mut window = root(&mut toolkit, ComponentKind::Window);
        let id = native_id(window.as_ref()).unwrap();

        let err = window
            .attach_event("onClick", Box::new(|_: &EventArgs| {}))
            .unwrap_err();
        assert!(matches!(err, ToolkitError::Subscribe { ref event, .. } if event == "onClick"));
        assert!(probe.subscriptions().is_empty());

        let err = window.call("center", &[]).unwrap_err();
        assert!(matches!(err, ToolkitError::Call { ref method, .. } if method == "center"));
        assert_eq!(window.call("setText", &[Value::from("ok")]).unwrap(), Value::Null);
        assert_eq!(probe.calls_to(id).len(), 1);
    }

    #[test]
    fn test_property_store() {
        let mut toolkit = HeadlessToolkit::new();
        let probe = toolkit.probe();
        let mut form = root(&mut toolkit, ComponentKind::Form);
        let id = native_id(form.as_ref()).unwrap();

        form.call("setItemValue", &[Value::from("email"), Value::from("a@b.c")])
            .unwrap();
        form.call("setText", &[Value::from("Sign in")]).unwrap();

        assert_eq!(
            form.call("getItemValue", &[Value::from("email")]).unwrap(),
            Value::from("a@b.c")
        );
        assert_eq!(form.call("getText", &[]).unwrap(), Value::from("Sign in"));
        assert_eq!(form.call("getItemValue", &[Value::from("name")]).unwrap(), Value::Null);
        assert_eq!(form.call("validate", &[]).unwrap(), Value::Null);
        assert_eq!(probe.calls_to(id).len(), 6);
        assert_eq!(probe.property(id, "ItemValue:email"), Some(Value::from("a@b.c")));
    }

    #[test]
    fn test_unload_drops_subscriptions() {
        let mut toolkit = HeadlessToolkit::new();
        let probe = toolkit.probe();
        let mut grid = root(&mut toolkit, ComponentKind::Grid);
        let id = native_id(grid.as_ref()).unwrap();
        grid.attach_event("onRowSelect", Box::new(|_: &EventArgs| {})).unwrap();

        grid.unload();

        assert_eq!(probe.unload_order(), vec![id]);
        assert!(probe.widget(id).unwrap().is_unloaded());
        assert_eq!(probe.fire(id, "onRowSelect", &EventArgs::new()), 0);
    }

    #[test]
    fn test_messages_are_answered_in_order() {
        let mut toolkit = HeadlessToolkit::new();
        let probe = toolkit.probe();
        let answers = Rc::new(RefCell::new(Vec::new()));

        for text in ["one", "two"] {
            let sink = answers.clone();
            toolkit
                .show_message(
                    MessageRequest {
                        kind: MessageKind::Confirm,
                        title: None,
                        text: text.into(),
                    },
                    Box::new(move |accepted| sink.borrow_mut().push((text, accepted))),
                )
                .unwrap();
        }

        assert_eq!(probe.pending_messages().len(), 2);
        assert!(probe.answer_message(true));
        assert!(probe.answer_message(false));
        assert!(!probe.answer_message(true));
        assert_eq!(*answers.borrow(), vec![("one", true), ("two", false)]);
    }

    #[test]
    fn test_messages_can_be_disabled() {
        let mut toolkit = HeadlessToolkit::with_config(HeadlessConfig::new().without_messages());
        let err = toolkit
            .show_message(
                MessageRequest {
                    kind: MessageKind::Alert,
                    title: None,
                    text: "hi".into(),
                },
                Box::new(|_| {}),
            )
            .unwrap_err();
        assert_eq!(err, ToolkitError::Unsupported("messages".into()));
    }
}
