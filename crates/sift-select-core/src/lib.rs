//! Core systems for sift-select.
//!
//! This crate provides the reactive substrate the sift-select widget is
//! built on:
//!
//! - **Signal/Slot System**: Type-safe notification between widget, models,
//!   and caller code
//! - **Property System**: Reactive value cells with change detection
//! - **Logging**: `tracing` targets for per-subsystem filtering
//!
//! Dispatch is synchronous and cooperative: slots run to completion inside
//! the emitting call. There is no event loop, no queued delivery, and no
//! background work - every state change happens inside a UI event-loop turn
//! driven by the host.
//!
//! # Signal/Slot Example
//!
//! ```
//! use sift_select_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Property Example
//!
//! ```
//! use sift_select_core::{Property, Signal};
//!
//! // A reactive counter with change notification
//! struct Counter {
//!     value: Property<i32>,
//!     value_changed: Signal<i32>,
//! }
//!
//! impl Counter {
//!     fn new() -> Self {
//!         Self {
//!             value: Property::new(0),
//!             value_changed: Signal::new(),
//!         }
//!     }
//!
//!     fn increment(&self) {
//!         let new_value = self.value.get() + 1;
//!         if self.value.set(new_value) {
//!             self.value_changed.emit(new_value);
//!         }
//!     }
//! }
//! ```

mod error;
pub mod logging;
pub mod property;
pub mod signal;

pub use error::{CoreError, Result, SignalError};
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
