//! The ordered set of selected options.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use horizon_select_core::{select_debug, select_trace, select_warn};

use crate::matcher::Matcher;

type SelectableFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Per-option predicate gating whether it can be chosen.
///
/// Non-selectable options stay visible in the list; they are skipped by
/// keyboard navigation and refused by [`SelectionStore::select`].
#[derive(Clone, Default)]
pub struct Selectable(Option<SelectableFn>);

impl Selectable {
    /// Every option is selectable.
    pub fn all() -> Self {
        Self(None)
    }

    /// Options are selectable when `f` returns `true`.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self(Some(Arc::new(f)))
    }

    /// Whether `option` may be selected.
    pub fn test(&self, option: &Value) -> bool {
        self.0.as_ref().is_none_or(|f| f(option))
    }
}

impl fmt::Debug for Selectable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Selectable(..)"),
            None => f.write_str("Selectable(all)"),
        }
    }
}

/// What a call to [`SelectionStore::select`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The option was added (multi) or became the selection (single).
    Selected,
    /// An equal option was already selected; nothing changed.
    AlreadySelected,
    /// [`SelectionStore::toggle`] removed the option.
    Deselected,
    /// The selectable predicate refused the option.
    NotSelectable,
    /// Multi mode is at its configured capacity.
    AtCapacity,
}

impl SelectOutcome {
    /// Whether the selection changed.
    pub fn is_selected(self) -> bool {
        self == Self::Selected
    }
}

/// Holds the currently selected options.
///
/// In single mode the store holds at most one option and `select` replaces
/// it. In multi mode options are appended in selection order, without
/// duplicates (as decided by the [`Matcher`]), up to an optional capacity.
///
/// Every entry carries its model value next to the displayed option. Options
/// selected through the store get the reduced option as their model value;
/// host values that match no option are kept with themselves as both.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    items: Vec<Value>,
    keys: Vec<Value>,
    multiple: bool,
    capacity: Option<usize>,
    matcher: Matcher,
    selectable: Selectable,
}

impl SelectionStore {
    /// Create an empty store.
    pub fn new(multiple: bool, matcher: Matcher, selectable: Selectable) -> Self {
        Self {
            items: Vec::new(),
            keys: Vec::new(),
            multiple,
            capacity: None,
            matcher,
            selectable,
        }
    }

    /// Limit the number of options multi mode may hold.
    pub fn with_capacity_limit(mut self, capacity: Option<usize>) -> Self {
        self.capacity = capacity;
        self
    }

    /// Whether the store is in multi mode.
    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Switch between single and multi mode. The selection is cleared.
    pub fn set_multiple(&mut self, multiple: bool) {
        if self.multiple != multiple {
            self.multiple = multiple;
            self.clear();
        }
    }

    /// The configured multi-mode capacity.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// The selected options, in selection order.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// The model value of each selected option, in selection order.
    pub fn keys(&self) -> &[Value] {
        &self.keys
    }

    /// The model value: an array of keys in multi mode, the single key or
    /// `null` in single mode.
    pub fn reduced_value(&self) -> Value {
        if self.multiple {
            Value::Array(self.keys.clone())
        } else {
            self.keys.last().cloned().unwrap_or(Value::Null)
        }
    }

    /// Number of selected options.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The most recently selected option.
    pub fn last(&self) -> Option<&Value> {
        self.items.last()
    }

    /// The matcher deciding option equality.
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// The selectable predicate.
    pub fn selectable(&self) -> &Selectable {
        &self.selectable
    }

    /// Whether an option equal to `option` is selected.
    pub fn is_selected(&self, option: &Value) -> bool {
        self.position(option).is_some()
    }

    /// Whether an option with model value `key` is selected.
    pub fn is_key_selected(&self, key: &Value) -> bool {
        self.keys.contains(key)
    }

    fn position(&self, option: &Value) -> Option<usize> {
        self.items.iter().position(|item| item == option).or_else(|| {
            let key = self.matcher.reducer().reduce(option);
            self.keys.iter().position(|k| *k == key)
        })
    }

    /// Select `option`.
    ///
    /// Non-selectable options are refused. In single mode the selection is
    /// replaced; in multi mode the option is appended unless already
    /// present or the capacity is reached.
    pub fn select(&mut self, option: Value) -> SelectOutcome {
        if !self.selectable.test(&option) {
            select_trace!(option = %option, "refusing non-selectable option");
            return SelectOutcome::NotSelectable;
        }
        if self.is_selected(&option) {
            return SelectOutcome::AlreadySelected;
        }
        let key = self.matcher.reducer().reduce(&option);
        if self.multiple {
            if self.capacity.is_some_and(|cap| self.items.len() >= cap) {
                select_debug!(capacity = ?self.capacity, "selection at capacity");
                return SelectOutcome::AtCapacity;
            }
            select_debug!(option = %option, "appending to selection");
            self.items.push(option);
            self.keys.push(key);
        } else {
            select_debug!(option = %option, "replacing selection");
            self.items = vec![option];
            self.keys = vec![key];
        }
        SelectOutcome::Selected
    }

    /// Remove the selected option equal to `option`.
    ///
    /// An exact match wins over a match by model value. Returns the removed
    /// option, or `None` if nothing matched.
    pub fn deselect(&mut self, option: &Value) -> Option<Value> {
        let index = self.position(option)?;
        Some(self.remove(index))
    }

    /// Remove the selected option whose model value is `key`.
    pub fn deselect_key(&mut self, key: &Value) -> Option<Value> {
        let index = self.keys.iter().position(|k| k == key)?;
        Some(self.remove(index))
    }

    fn remove(&mut self, index: usize) -> Value {
        self.keys.remove(index);
        let removed = self.items.remove(index);
        select_debug!(option = %removed, "deselected option");
        removed
    }

    /// Deselect `option` if selected, otherwise select it.
    pub fn toggle(&mut self, option: Value) -> SelectOutcome {
        if self.deselect(&option).is_some() {
            SelectOutcome::Deselected
        } else {
            self.select(option)
        }
    }

    /// Remove and return the most recently selected option.
    pub fn pop(&mut self) -> Option<Value> {
        self.keys.pop();
        self.items.pop()
    }

    /// Remove every selected option.
    pub fn clear(&mut self) {
        self.items.clear();
        self.keys.clear();
    }

    /// Replace the selection wholesale with `(option, model value)` entries,
    /// bypassing the selectable predicate.
    ///
    /// Used when the host supplies a new value. In single mode only the last
    /// entry is kept.
    pub fn replace_entries(&mut self, mut entries: Vec<(Value, Value)>) {
        if !self.multiple && entries.len() > 1 {
            select_warn!(count = entries.len(), "single mode keeps only the last value");
            entries.drain(..entries.len() - 1);
        }
        (self.items, self.keys) = entries.into_iter().unzip();
    }
}
