//! Horizon Select - a headless select, multi-select and typeahead component.
//!
//! The crate models everything a select/combobox does except drawing it:
//! the option list, search filtering, tag creation, single and multi
//! selection, value reduction, keyboard navigation and the open state.
//! A view binds its widgets to a [`Select`] and listens to its signals.
//!
//! # Example
//!
//! ```
//! use horizon_select::{codes, Select};
//! use serde_json::json;
//!
//! let mut select = Select::builder()
//!     .with_options(vec![json!("one"), json!("two"), json!("three")])
//!     .with_multiple(true)
//!     .configure(|c| c.close_on_select = false)
//!     .build()
//!     .unwrap();
//!
//! select.on_search_focus();
//! select.on_search_keydown(codes::ARROW_DOWN);
//! select.on_search_keydown(codes::ENTER);
//!
//! assert_eq!(select.value(), json!(["two"]));
//! assert!(select.is_open());
//! ```
//!
//! # Modules
//!
//! - [`option`]: option labels and identity keys
//! - [`reduce`]: mapping options to model values and back
//! - [`matcher`]: search filtering and option equality
//! - [`selection`]: the selected set and the selectable predicate
//! - [`pointer`]: the keyboard highlight
//! - [`keymap`]: keydown dispatch and composition tracking
//! - [`config`]: plain-data configuration
//! - [`select`]: the component itself

pub mod config;
pub mod error;
pub mod keymap;
pub mod matcher;
pub mod option;
pub mod pointer;
pub mod reduce;
pub mod select;
pub mod selection;

pub use config::SelectConfig;
pub use error::{Error, Result};
pub use keymap::{codes, Composition, KeyAction, KeydownMap};
pub use matcher::Matcher;
pub use option::{option_key, LabelRule, DEFAULT_LABEL_KEY};
pub use pointer::{PointerState, TypeaheadPointer};
pub use reduce::Reducer;
pub use select::{ClickTarget, ResetPolicy, Select, SelectBuilder};
pub use selection::{Selectable, SelectOutcome, SelectionStore};

pub use horizon_select_core::{ConnectionGuard, ConnectionId, Property, Signal};

static_assertions::assert_impl_all!(Select: Send, Sync);
static_assertions::assert_impl_all!(SelectConfig: Send, Sync);
