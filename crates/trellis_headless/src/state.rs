//! Shared recording state behind the toolkit, its widgets and probes

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde_json::Value;
use trellis_core::{
    ComponentKind, EventArgs, MessageReply, MessageRequest, NativeCallback, SubscriptionId,
    Surface, WidgetOptions,
};

/// Identifier of a headless native widget, unique per toolkit
pub type NativeId = u64;

/// Everything known about one native widget
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetRecord {
    pub id: NativeId,
    pub kind: ComponentKind,
    /// Native widget this one was attached to
    pub parent: Option<NativeId>,
    /// Surface a root widget was created on
    pub surface: Option<Surface>,
    pub options: WidgetOptions,
    /// How many times `unload` ran
    pub unload_count: u32,
    /// Values stored through `set*` calls
    pub properties: FxHashMap<String, Value>,
}

impl WidgetRecord {
    pub fn is_unloaded(&self) -> bool {
        self.unload_count > 0
    }
}

/// One `NativeWidget::call`
#[derive(Clone, Debug, PartialEq)]
pub struct CallRecord {
    pub widget: NativeId,
    pub method: String,
    pub args: Vec<Value>,
}

/// One live event subscription
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub widget: NativeId,
    pub event: String,
    pub id: SubscriptionId,
}

pub(crate) type SharedCallback = Rc<RefCell<NativeCallback>>;

pub(crate) struct Subscription {
    pub record: SubscriptionRecord,
    pub callback: SharedCallback,
}

pub(crate) struct PendingMessage {
    pub request: MessageRequest,
    pub reply: MessageReply,
}

#[derive(Default)]
pub(crate) struct HeadlessState {
    next_widget: NativeId,
    next_subscription: u64,
    /// Creation order
    pub order: Vec<NativeId>,
    pub widgets: FxHashMap<NativeId, WidgetRecord>,
    pub calls: Vec<CallRecord>,
    pub subscriptions: Vec<Subscription>,
    pub unload_order: Vec<NativeId>,
    pub messages: Vec<PendingMessage>,
}

pub(crate) type SharedState = Rc<RefCell<HeadlessState>>;

impl HeadlessState {
    pub fn register(
        &mut self,
        kind: ComponentKind,
        parent: Option<NativeId>,
        surface: Option<Surface>,
        options: WidgetOptions,
    ) -> NativeId {
        self.next_widget += 1;
        let id = self.next_widget;
        self.order.push(id);
        self.widgets.insert(
            id,
            WidgetRecord {
                id,
                kind,
                parent,
                surface,
                options,
                unload_count: 0,
                properties: FxHashMap::default(),
            },
        );
        id
    }

    pub fn subscribe(
        &mut self,
        widget: NativeId,
        event: &str,
        callback: NativeCallback,
    ) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscriptions.push(Subscription {
            record: SubscriptionRecord {
                widget,
                event: event.to_string(),
                id,
            },
            callback: Rc::new(RefCell::new(callback)),
        });
        id
    }

    /// Callbacks subscribed to `event` on `widget`, in subscription order
    pub fn callbacks(&self, widget: NativeId, event: &str) -> Vec<SharedCallback> {
        self.subscriptions
            .iter()
            .filter(|sub| sub.record.widget == widget && sub.record.event == event)
            .map(|sub| Rc::clone(&sub.callback))
            .collect()
    }

    /// Record a call and apply the property-store convention:
    /// `setX(v)` stores `X`, `setX(key, v)` stores `X:key`, and `getX` /
    /// `getX(key)` read them back (`null` when unset).
    pub fn call(&mut self, widget: NativeId, method: &str, args: &[Value]) -> Value {
        self.calls.push(CallRecord {
            widget,
            method: method.to_string(),
            args: args.to_vec(),
        });

        let Some(record) = self.widgets.get_mut(&widget) else {
            return Value::Null;
        };
        if let Some(property) = method.strip_prefix("set") {
            match args {
                [value] => {
                    record.properties.insert(property.to_string(), value.clone());
                }
                [key, value] => {
                    record
                        .properties
                        .insert(property_key(property, key), value.clone());
                }
                _ => {}
            }
            Value::Null
        } else if let Some(property) = method.strip_prefix("get") {
            let key = match args {
                [] => property.to_string(),
                [key, ..] => property_key(property, key),
            };
            record.properties.get(&key).cloned().unwrap_or(Value::Null)
        } else {
            Value::Null
        }
    }

    pub fn unload(&mut self, widget: NativeId) {
        if let Some(record) = self.widgets.get_mut(&widget) {
            record.unload_count += 1;
        }
        self.unload_order.push(widget);
        self.subscriptions.retain(|sub| sub.record.widget != widget);
    }
}

/// Property key for a keyed `set` / `get` pair
pub(crate) fn property_key(property: &str, key: &Value) -> String {
    match key {
        Value::String(key) => format!("{property}:{key}"),
        other => format!("{property}:{other}"),
    }
}

/// Fire `event` on `widget`. Callbacks run with no state borrow held.
///
/// A callback that is still running further up the stack is skipped, so a
/// handler may fire its own event again. Returns how many callbacks ran.
pub(crate) fn fire(state: &SharedState, widget: NativeId, event: &str, args: &EventArgs) -> usize {
    let callbacks = state.borrow().callbacks(widget, event);
    tracing::trace!(widget, event, callbacks = callbacks.len(), "firing native event");
    let mut ran = 0;
    for callback in &callbacks {
        let Ok(mut callback) = callback.try_borrow_mut() else {
            tracing::trace!(widget, event, "skipping re-entered callback");
            continue;
        };
        (&mut *callback)(args);
        ran += 1;
    }
    ran
}
