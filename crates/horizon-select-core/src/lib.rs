//! Core systems for Horizon Select.
//!
//! This crate provides the reactive building blocks the select engine is
//! assembled from:
//!
//! - **Signal/Slot System**: Type-safe notification of state changes
//! - **Property System**: Values with change detection
//! - **Logging**: `tracing` targets and helper macros
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_select_core::Signal;
//!
//! let search_changed = Signal::<String>::new();
//!
//! let conn_id = search_changed.connect(|text| {
//!     println!("Search is now: {}", text);
//! });
//!
//! search_changed.emit("can".to_string());
//! search_changed.disconnect(conn_id);
//! ```
//!
//! # Property Example
//!
//! ```
//! use horizon_select_core::{Property, Signal};
//!
//! struct Dropdown {
//!     open: Property<bool>,
//!     opened: Signal<()>,
//! }
//!
//! impl Dropdown {
//!     fn open(&self) {
//!         if self.open.set(true) {
//!             self.opened.emit(());
//!         }
//!     }
//! }
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};

static_assertions::assert_impl_all!(Signal<String>: Send, Sync);
static_assertions::assert_impl_all!(Property<String>: Send, Sync);
