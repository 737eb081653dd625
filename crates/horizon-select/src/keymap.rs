//! Keydown dispatch and text-composition tracking.
//!
//! Keys pressed in the search input are looked up by key code in a
//! [`KeydownMap`]. The default map handles backspace, tab, escape and the
//! arrow keys, and every code listed in `select_on_key_codes` selects the
//! highlighted option. Hosts can extend or replace entries through the
//! `map_keydown` hook of [`SelectBuilder`](crate::SelectBuilder).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use horizon_select_core::logging::targets;

use crate::select::Select;

/// Key codes of the keys the default map handles.
pub mod codes {
    /// Backspace.
    pub const BACKSPACE: u32 = 8;
    /// Tab.
    pub const TAB: u32 = 9;
    /// Enter / Return.
    pub const ENTER: u32 = 13;
    /// Escape.
    pub const ESCAPE: u32 = 27;
    /// Space bar.
    pub const SPACE: u32 = 32;
    /// Up arrow.
    pub const ARROW_UP: u32 = 38;
    /// Down arrow.
    pub const ARROW_DOWN: u32 = 40;
}

type KeyHandler = Arc<dyn Fn(&mut Select) + Send + Sync>;

/// What a key press in the search input does.
#[derive(Clone)]
pub enum KeyAction {
    /// Remove the last selected value when the search is empty.
    DeleteLast,
    /// Select the highlighted option if tab selection is enabled.
    Tab,
    /// Clear the search, or close the dropdown when the search is empty.
    Escape,
    /// Open the dropdown, or move the pointer up.
    Up,
    /// Open the dropdown, or move the pointer down.
    Down,
    /// Select the highlighted option.
    Select,
    /// Run a host-supplied handler.
    Custom(KeyHandler),
}

impl KeyAction {
    /// A host-supplied key handler.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&mut Select) + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }
}

impl fmt::Debug for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteLast => f.write_str("DeleteLast"),
            Self::Tab => f.write_str("Tab"),
            Self::Escape => f.write_str("Escape"),
            Self::Up => f.write_str("Up"),
            Self::Down => f.write_str("Down"),
            Self::Select => f.write_str("Select"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Key code to action table.
#[derive(Debug, Clone, Default)]
pub struct KeydownMap {
    actions: BTreeMap<u32, KeyAction>,
}

impl KeydownMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default map, with `select_codes` bound to [`KeyAction::Select`].
    ///
    /// Select codes override the built-in binding of the same code, so
    /// `select_on_key_codes = [9]` makes tab always select.
    pub fn defaults(select_codes: &[u32]) -> Self {
        let mut map = Self::new()
            .with(codes::BACKSPACE, KeyAction::DeleteLast)
            .with(codes::TAB, KeyAction::Tab)
            .with(codes::ESCAPE, KeyAction::Escape)
            .with(codes::ARROW_UP, KeyAction::Up)
            .with(codes::ARROW_DOWN, KeyAction::Down);
        for &code in select_codes {
            map.insert(code, KeyAction::Select);
        }
        map
    }

    /// Bind `code` to `action`, replacing any previous binding.
    pub fn insert(&mut self, code: u32, action: KeyAction) -> Option<KeyAction> {
        self.actions.insert(code, action)
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, code: u32, action: KeyAction) -> Self {
        self.insert(code, action);
        self
    }

    /// Unbind `code`.
    pub fn remove(&mut self, code: u32) -> Option<KeyAction> {
        self.actions.remove(&code)
    }

    /// The action bound to `code`.
    pub fn get(&self, code: u32) -> Option<&KeyAction> {
        self.actions.get(&code)
    }

    /// Bound key codes, ascending.
    pub fn codes(&self) -> impl Iterator<Item = u32> + '_ {
        self.actions.keys().copied()
    }
}

/// Input-method composition state of the search input.
///
/// While a composition session is active, the keystroke that commits the
/// composed text must not also commit a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Composition {
    /// No composition in progress.
    #[default]
    Idle,
    /// A composition session is in progress.
    Composing,
}

impl Composition {
    /// Handle a composition-start event.
    pub fn start(&mut self) {
        if *self != Self::Composing {
            tracing::trace!(target: targets::KEYMAP, "composition started");
        }
        *self = Self::Composing;
    }

    /// Handle a composition-end event.
    pub fn end(&mut self) {
        if *self != Self::Idle {
            tracing::trace!(target: targets::KEYMAP, "composition ended");
        }
        *self = Self::Idle;
    }

    /// Whether a composition session is in progress.
    pub fn is_composing(self) -> bool {
        self == Self::Composing
    }
}
