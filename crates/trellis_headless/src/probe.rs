//! Read access to a headless toolkit's records

use serde_json::Value;
use trellis_core::{ComponentKind, EventArgs, MessageRequest};

use crate::state::{self, CallRecord, NativeId, SharedState, SubscriptionRecord, WidgetRecord};

/// Shares state with the [`HeadlessToolkit`](crate::HeadlessToolkit) it came
/// from. Cheap to clone.
#[derive(Clone)]
pub struct HeadlessProbe {
    state: SharedState,
}

impl HeadlessProbe {
    pub(crate) fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Number of native widgets created or attached so far
    pub fn created_count(&self) -> usize {
        self.state.borrow().order.len()
    }

    /// All widgets, in creation order
    pub fn widgets(&self) -> Vec<WidgetRecord> {
        let state = self.state.borrow();
        state
            .order
            .iter()
            .filter_map(|id| state.widgets.get(id).cloned())
            .collect()
    }

    pub fn widget(&self, id: NativeId) -> Option<WidgetRecord> {
        self.state.borrow().widgets.get(&id).cloned()
    }

    /// Ids of widgets of `kind`, in creation order
    pub fn find_by_kind(&self, kind: ComponentKind) -> Vec<NativeId> {
        let state = self.state.borrow();
        state
            .order
            .iter()
            .copied()
            .filter(|id| state.widgets.get(id).is_some_and(|w| w.kind == kind))
            .collect()
    }

    /// Every call made so far
    pub fn calls(&self) -> Vec<CallRecord> {
        self.state.borrow().calls.clone()
    }

    /// Calls made on one widget
    pub fn calls_to(&self, widget: NativeId) -> Vec<CallRecord> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|call| call.widget == widget)
            .cloned()
            .collect()
    }

    /// Method names called on one widget, in order
    pub fn methods_called(&self, widget: NativeId) -> Vec<String> {
        self.calls_to(widget)
            .into_iter()
            .map(|call| call.method)
            .collect()
    }

    /// Live subscriptions, in subscription order
    pub fn subscriptions(&self) -> Vec<SubscriptionRecord> {
        self.state
            .borrow()
            .subscriptions
            .iter()
            .map(|sub| sub.record.clone())
            .collect()
    }

    pub fn subscription_count(&self, widget: NativeId, event: &str) -> usize {
        self.state.borrow().callbacks(widget, event).len()
    }

    /// Raise `event` on `widget` as the user would. Returns how many
    /// callbacks ran.
    pub fn fire(&self, widget: NativeId, event: &str, args: &EventArgs) -> usize {
        state::fire(&self.state, widget, event, args)
    }

    /// Widgets in the order they were unloaded
    pub fn unload_order(&self) -> Vec<NativeId> {
        self.state.borrow().unload_order.clone()
    }

    /// A stored property (see the `set*` / `get*` convention)
    pub fn property(&self, widget: NativeId, key: &str) -> Option<Value> {
        self.state
            .borrow()
            .widgets
            .get(&widget)
            .and_then(|record| record.properties.get(key).cloned())
    }

    /// Preset a property, as if the user had changed it
    pub fn set_property(&self, widget: NativeId, key: impl Into<String>, value: impl Into<Value>) {
        if let Some(record) = self.state.borrow_mut().widgets.get_mut(&widget) {
            record.properties.insert(key.into(), value.into());
        }
    }

    /// Messages waiting for an answer, oldest first
    pub fn pending_messages(&self) -> Vec<MessageRequest> {
        self.state
            .borrow()
            .messages
            .iter()
            .map(|pending| pending.request.clone())
            .collect()
    }

    /// Answer the oldest pending message. Returns `false` if none is pending.
    pub fn answer_message(&self, accepted: bool) -> bool {
        let pending = {
            let mut state = self.state.borrow_mut();
            if state.messages.is_empty() {
                return false;
            }
            state.messages.remove(0)
        };
        (pending.reply)(accepted);
        true
    }
}

impl std::fmt::Debug for HeadlessProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("HeadlessProbe")
            .field("widgets", &state.order.len())
            .field("calls", &state.calls.len())
            .field("subscriptions", &state.subscriptions.len())
            .field("pending_messages", &state.messages.len())
            .finish()
    }
}
