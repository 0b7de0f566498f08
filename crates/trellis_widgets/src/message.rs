//! Modal messages
//!
//! Messages are shown by the toolkit and answered later, from the toolkit's
//! own dispatch. The answer arrives through a [`Deferred`] that resolves
//! exactly once.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use trellis_core::{MessageKind, MessageRequest, UiContext};

use crate::error::Result;

/// Outcome of a confirmation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Confirm {
    Confirmed,
    Cancelled,
}

impl Confirm {
    pub fn from_accepted(accepted: bool) -> Self {
        if accepted {
            Confirm::Confirmed
        } else {
            Confirm::Cancelled
        }
    }

    pub fn is_confirmed(self) -> bool {
        self == Confirm::Confirmed
    }
}

type Callback<T> = Box<dyn FnOnce(T)>;

struct DeferredState<T> {
    value: Option<T>,
    callbacks: Vec<Callback<T>>,
}

/// A value that becomes available once.
///
/// Callbacks registered before resolution run when it resolves, in
/// registration order; callbacks registered afterwards run immediately.
pub struct Deferred<T> {
    state: Rc<RefCell<DeferredState<T>>>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: Clone + 'static> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> Deferred<T> {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(DeferredState {
                value: None,
                callbacks: Vec::new(),
            })),
        }
    }

    /// Resolve with `value`. Returns `false`, leaving the first value in
    /// place, if already resolved.
    pub fn resolve(&self, value: T) -> bool {
        let callbacks = {
            let mut state = self.state.borrow_mut();
            if state.value.is_some() {
                return false;
            }
            state.value = Some(value.clone());
            std::mem::take(&mut state.callbacks)
        };
        for callback in callbacks {
            callback(value.clone());
        }
        true
    }

    /// Run `callback` with the value once it is available
    pub fn then(&self, callback: impl FnOnce(T) + 'static) {
        let value = {
            let mut state = self.state.borrow_mut();
            match &state.value {
                Some(value) => value.clone(),
                None => {
                    state.callbacks.push(Box::new(callback));
                    return;
                }
            }
        };
        callback(value);
    }

    pub fn value(&self) -> Option<T> {
        self.state.borrow().value.clone()
    }

    pub fn is_resolved(&self) -> bool {
        self.state.borrow().value.is_some()
    }
}

impl Deferred<Confirm> {
    /// Run `callback` if the user confirms
    pub fn on_confirmed(&self, callback: impl FnOnce() + 'static) {
        self.then(move |outcome| {
            if outcome.is_confirmed() {
                callback();
            }
        });
    }

    /// Run `callback` if the user cancels
    pub fn on_cancelled(&self, callback: impl FnOnce() + 'static) {
        self.then(move |outcome| {
            if !outcome.is_confirmed() {
                callback();
            }
        });
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Deferred")
            .field("value", &state.value)
            .field("pending_callbacks", &state.callbacks.len())
            .finish()
    }
}

/// Show `request` and resolve with the user's answer
pub fn show_message(ctx: &mut UiContext, request: MessageRequest) -> Result<Deferred<Confirm>> {
    let deferred = Deferred::new();
    let answer = deferred.clone();
    tracing::debug!(kind = ?request.kind, "showing message");
    ctx.toolkit_mut().show_message(
        request,
        Box::new(move |accepted| {
            answer.resolve(Confirm::from_accepted(accepted));
        }),
    )?;
    Ok(deferred)
}

/// Show an alert. Resolves when dismissed.
pub fn alert(ctx: &mut UiContext, text: impl Into<String>) -> Result<Deferred<()>> {
    let dismissed = Deferred::new();
    let outcome = show_message(
        ctx,
        MessageRequest {
            kind: MessageKind::Alert,
            title: None,
            text: text.into(),
        },
    )?;
    let notify = dismissed.clone();
    outcome.then(move |_| {
        notify.resolve(());
    });
    Ok(dismissed)
}

/// Ask the user to confirm
pub fn confirm(ctx: &mut UiContext, text: impl Into<String>) -> Result<Deferred<Confirm>> {
    show_message(
        ctx,
        MessageRequest {
            kind: MessageKind::Confirm,
            title: None,
            text: text.into(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_resolves_once() {
        let deferred = Deferred::new();
        assert!(deferred.resolve(Confirm::Cancelled));
        assert!(!deferred.resolve(Confirm::Confirmed));
        assert_eq!(deferred.value(), Some(Confirm::Cancelled));
    }

    #[test]
    fn test_callbacks_before_and_after_resolution() {
        let deferred = Deferred::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let early = seen.clone();
        deferred.then(move |v: u32| early.borrow_mut().push(("early", v)));
        assert!(seen.borrow().is_empty());

        deferred.resolve(7);
        let late = seen.clone();
        deferred.then(move |v| late.borrow_mut().push(("late", v)));

        assert_eq!(*seen.borrow(), vec![("early", 7), ("late", 7)]);
    }

    #[test]
    fn test_callback_may_chain_on_same_deferred() {
        let deferred: Deferred<u8> = Deferred::new();
        let hits = Rc::new(Cell::new(0));

        let inner = deferred.clone();
        let counter = hits.clone();
        deferred.then(move |_| {
            let counter = counter.clone();
            inner.then(move |_| counter.set(counter.get() + 1));
        });
        deferred.resolve(1);

        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_confirm_branches() {
        let deferred = Deferred::new();
        let confirmed = Rc::new(Cell::new(false));
        let cancelled = Rc::new(Cell::new(false));

        let flag = confirmed.clone();
        deferred.on_confirmed(move || flag.set(true));
        let flag = cancelled.clone();
        deferred.on_cancelled(move || flag.set(true));
        deferred.resolve(Confirm::from_accepted(true));

        assert!(confirmed.get());
        assert!(!cancelled.get());
    }
}
