//! Headless toolkit for Trellis
//!
//! An in-memory [`Toolkit`](trellis_core::Toolkit) that creates no real
//! widgets. Every native widget is a record; every call, subscription and
//! teardown is logged so tests and display-less applications can drive a
//! component tree and observe what a real toolkit would have been asked to do.
//!
//! ```ignore
//! use trellis_headless::HeadlessToolkit;
//!
//! let toolkit = HeadlessToolkit::new();
//! let probe = toolkit.probe();
//! let mut ctx = UiContext::new(toolkit, TrellisConfig::default());
//!
//! // ... build components ...
//!
//! probe.fire(native_id, "onClick", &EventArgs::with_id("open"));
//! assert_eq!(probe.created_count(), 3);
//! ```

mod probe;
mod state;
mod toolkit;

pub use probe::HeadlessProbe;
pub use state::{CallRecord, NativeId, SubscriptionRecord, WidgetRecord};
pub use toolkit::{native_id, HeadlessConfig, HeadlessToolkit, HeadlessWidget};
