//! The select component.
//!
//! [`Select`] owns the option list, the selection, the search text, the
//! typeahead pointer and the open state, and raises a [`Signal`] for every
//! change a presentation layer or host needs to observe. It renders
//! nothing: a view binds its input and list to these operations.
//!
//! Derived state is recomputed explicitly at three trigger points: the
//! search text changed, the option list changed, or the value changed.
//!
//! # Example
//!
//! ```
//! use horizon_select::{Reducer, Select};
//! use serde_json::json;
//!
//! let mut select = Select::builder()
//!     .with_options(vec![
//!         json!({"label": "Canada", "value": "CA"}),
//!         json!({"label": "United States", "value": "US"}),
//!     ])
//!     .with_reducer(Reducer::field("value"))
//!     .build()
//!     .unwrap();
//!
//! select.value_changed.connect(|value| println!("value: {}", value));
//!
//! select.on_search_focus();
//! select.set_search("united");
//! assert_eq!(select.filtered_options().len(), 1);
//!
//! select.type_ahead_select();
//! assert_eq!(select.value(), json!("US"));
//! assert!(!select.is_open());
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use horizon_select_core::logging::{span_names, targets};
use horizon_select_core::{PerfSpan, Property, Signal};

use crate::config::SelectConfig;
use crate::error::Result;
use crate::keymap::{Composition, KeyAction, KeydownMap};
use crate::matcher::Matcher;
use crate::option::LabelRule;
use crate::pointer::TypeaheadPointer;
use crate::reduce::Reducer;
use crate::selection::{Selectable, SelectOutcome, SelectionStore};

type CreateOptionFn = Arc<dyn Fn(&str) -> Value + Send + Sync>;
type MapKeydownFn = Arc<dyn Fn(KeydownMap) -> KeydownMap + Send + Sync>;
type DropdownShouldOpenFn = Arc<dyn Fn(&Select) -> bool + Send + Sync>;
type FilterByFn = Arc<dyn Fn(&Value, &str, &str) -> bool + Send + Sync>;
type ResetFn = Arc<dyn Fn(&[Value], &[Value], &[Value]) -> bool + Send + Sync>;

/// Whether replacing the option list clears the selection.
#[derive(Clone, Default)]
pub enum ResetPolicy {
    /// Keep the selection.
    #[default]
    Never,
    /// Clear the selection.
    Always,
    /// Decide with `(new_options, old_options, selection) -> bool`.
    Custom(ResetFn),
}

impl ResetPolicy {
    /// Policy backed by a callback.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[Value], &[Value], &[Value]) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    fn should_reset(&self, new: &[Value], old: &[Value], selection: &[Value]) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::Custom(f) => f(new, old, selection),
        }
    }
}

impl fmt::Debug for ResetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => f.write_str("Never"),
            Self::Always => f.write_str("Always"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// The part of the control a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The search input.
    SearchInput,
    /// A selected-option tag.
    SelectedTag,
    /// The deselect button of a selected-option tag.
    DeselectButton,
    /// The clear-selection button.
    ClearButton,
    /// Any other part of the control (toggle area, open indicator).
    Control,
}

/// Builder for [`Select`].
#[derive(Default)]
pub struct SelectBuilder {
    config: SelectConfig,
    options: Vec<Value>,
    value: Option<Value>,
    reducer: Reducer,
    label: Option<LabelRule>,
    filter_by: Option<FilterByFn>,
    selectable: Selectable,
    create_option: Option<CreateOptionFn>,
    map_keydown: Option<MapKeydownFn>,
    dropdown_should_open: Option<DropdownShouldOpenFn>,
    reset_policy: Option<ResetPolicy>,
}

impl SelectBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` for every plain-data setting.
    pub fn with_config(mut self, config: SelectConfig) -> Self {
        self.config = config;
        self
    }

    /// Adjust the configuration in place.
    pub fn configure(mut self, f: impl FnOnce(&mut SelectConfig)) -> Self {
        f(&mut self.config);
        self
    }

    /// Set the candidate options.
    pub fn with_options(mut self, options: Vec<Value>) -> Self {
        self.options = options;
        self
    }

    /// Seed the selection from a host value (reduced or full options).
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Allow several selections.
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.config.multiple = multiple;
        self
    }

    /// Allow creating options from the search text.
    pub fn with_taggable(mut self, taggable: bool) -> Self {
        self.config.taggable = taggable;
        self
    }

    /// Set how options reduce to the model value.
    pub fn with_reducer(mut self, reducer: Reducer) -> Self {
        self.reducer = reducer;
        self
    }

    /// Set how option labels are extracted. Overrides `config.label`.
    pub fn with_label(mut self, label: LabelRule) -> Self {
        self.label = Some(label);
        self
    }

    /// Replace the default search policy.
    pub fn with_filter_by<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &str, &str) -> bool + Send + Sync + 'static,
    {
        self.filter_by = Some(Arc::new(f));
        self
    }

    /// Gate which options can be chosen.
    pub fn with_selectable<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.selectable = Selectable::new(f);
        self
    }

    /// Build tag options from search text.
    pub fn with_create_option<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Value + Send + Sync + 'static,
    {
        self.create_option = Some(Arc::new(f));
        self
    }

    /// Customize the keydown map.
    pub fn with_map_keydown<F>(mut self, f: F) -> Self
    where
        F: Fn(KeydownMap) -> KeydownMap + Send + Sync + 'static,
    {
        self.map_keydown = Some(Arc::new(f));
        self
    }

    /// Decide whether the dropdown list is shown.
    pub fn with_dropdown_should_open<F>(mut self, f: F) -> Self
    where
        F: Fn(&Select) -> bool + Send + Sync + 'static,
    {
        self.dropdown_should_open = Some(Arc::new(f));
        self
    }

    /// Decide whether replacing the options clears the selection.
    /// Overrides `config.reset_on_options_change`.
    pub fn with_reset_on_options_change(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = Some(policy);
        self
    }

    /// Validate the configuration and build the select.
    pub fn build(self) -> Result<Select> {
        self.config.validate()?;
        Ok(self.assemble())
    }

    fn assemble(self) -> Select {
        let label = self
            .label
            .unwrap_or_else(|| LabelRule::key(self.config.label.clone()));
        let mut matcher = Matcher::new(self.reducer, label);
        if let Some(filter_by) = self.filter_by {
            matcher = matcher
                .with_filter_by(move |option, label, search| filter_by(option, label, search));
        }
        let reset_policy = self.reset_policy.unwrap_or(if self.config.reset_on_options_change {
            ResetPolicy::Always
        } else {
            ResetPolicy::Never
        });
        let selection =
            SelectionStore::new(self.config.multiple, matcher.clone(), self.selectable.clone())
                .with_capacity_limit(self.config.max_selections);

        let mut select = Select {
            config: self.config,
            options: self.options,
            pushed_tags: Vec::new(),
            filtered: Vec::new(),
            selection,
            pointer: TypeaheadPointer::new(self.selectable.clone()),
            matcher,
            selectable: self.selectable,
            search: Property::new(String::new()),
            open: Property::new(false),
            composition: Composition::Idle,
            mousedown: false,
            loading: false,
            create_option: self.create_option,
            map_keydown: self.map_keydown,
            dropdown_should_open: self.dropdown_should_open,
            reset_policy,
            value_changed: Signal::new(),
            opened: Signal::new(),
            closed: Signal::new(),
            search_changed: Signal::new(),
            option_selecting: Signal::new(),
            option_selected: Signal::new(),
            option_deselecting: Signal::new(),
            option_deselected: Signal::new(),
            option_created: Signal::new(),
            search_focus: Signal::new(),
            search_blur: Signal::new(),
        };
        if let Some(value) = self.value {
            select.set_value(value);
        }
        select.refresh_filtered();
        select
    }
}

/// A headless select/combobox.
///
/// # Signals
///
/// - `value_changed(Value)`: the selection changed through user action; carries
///   the reduced value (`null` or one value in single mode, an array in multi mode)
/// - `opened()` / `closed()`: the open state changed
/// - `search_changed(String)`: the search text changed
/// - `option_selecting(Value)` / `option_selected(Value)`: before and after a selection
/// - `option_deselecting(Value)` / `option_deselected(Value)`: before and after a deselection
/// - `option_created(Value)`: a tag option was created from the search text
/// - `search_focus()` / `search_blur()`: the search input gained or lost focus
pub struct Select {
    config: SelectConfig,
    options: Vec<Value>,
    pushed_tags: Vec<Value>,
    filtered: Vec<Value>,
    selection: SelectionStore,
    pointer: TypeaheadPointer,
    matcher: Matcher,
    selectable: Selectable,
    search: Property<String>,
    open: Property<bool>,
    composition: Composition,
    /// A mouse button is held down inside the dropdown list.
    mousedown: bool,
    loading: bool,
    create_option: Option<CreateOptionFn>,
    map_keydown: Option<MapKeydownFn>,
    dropdown_should_open: Option<DropdownShouldOpenFn>,
    reset_policy: ResetPolicy,

    /// Emitted with the new reduced value after a user-driven change.
    pub value_changed: Signal<Value>,
    /// Emitted when the dropdown opens.
    pub opened: Signal<()>,
    /// Emitted when the dropdown closes.
    pub closed: Signal<()>,
    /// Emitted when the search text changes.
    pub search_changed: Signal<String>,
    /// Emitted before an option is selected.
    pub option_selecting: Signal<Value>,
    /// Emitted after an option is selected.
    pub option_selected: Signal<Value>,
    /// Emitted before an option is deselected.
    pub option_deselecting: Signal<Value>,
    /// Emitted after an option is deselected.
    pub option_deselected: Signal<Value>,
    /// Emitted when a tag option is created.
    pub option_created: Signal<Value>,
    /// Emitted when the search input gains focus.
    pub search_focus: Signal<()>,
    /// Emitted when the search input loses focus.
    pub search_blur: Signal<()>,
}

impl Select {
    /// An empty select with the default configuration.
    pub fn new() -> Self {
        SelectBuilder::new().assemble()
    }

    /// Start building a select.
    pub fn builder() -> SelectBuilder {
        SelectBuilder::new()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The plain-data configuration.
    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// The matcher used for filtering and equality.
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Whether several options can be selected.
    pub fn is_multiple(&self) -> bool {
        self.config.multiple
    }

    /// Switch between single and multi mode. Clears the selection.
    pub fn set_multiple(&mut self, multiple: bool) {
        if self.config.multiple != multiple {
            self.config.multiple = multiple;
            self.selection.set_multiple(multiple);
            self.emit_value();
        }
    }

    /// Whether a non-identity reducer is configured.
    pub fn is_reducing_values(&self) -> bool {
        self.matcher.reducer().is_reducing()
    }

    /// Whether the control ignores user interaction.
    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    /// Enable or disable the control. Disabling closes the dropdown.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        if disabled {
            self.set_open(false);
        }
    }

    /// Whether options are being loaded by the host.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mark options as loading; the dropdown list is hidden meanwhile.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    // =========================================================================
    // Options
    // =========================================================================

    /// The candidate options supplied by the host.
    pub fn options(&self) -> &[Value] {
        &self.options
    }

    /// Tag options created from search text, in creation order.
    pub fn pushed_tags(&self) -> &[Value] {
        &self.pushed_tags
    }

    /// Options offered in the list: the host options, plus created tags when
    /// `push_tags` is set.
    pub fn option_list(&self) -> Vec<Value> {
        let mut list = self.options.clone();
        if self.config.push_tags {
            list.extend(self.pushed_tags.iter().cloned());
        }
        list
    }

    /// Replace the candidate options.
    ///
    /// The selection is cleared if the reset policy asks for it (never in
    /// taggable mode); otherwise it is re-expanded against the new options.
    pub fn set_options(&mut self, options: Vec<Value>) {
        let old = std::mem::replace(&mut self.options, options);
        let reset = !self.config.taggable
            && self
                .reset_policy
                .should_reset(&self.options, &old, self.selection.items());
        if reset {
            tracing::debug!(target: targets::SELECT, "options changed, clearing selection");
            self.clear_selection();
        } else if !self.selection.is_empty() {
            self.resync_selection();
        }
        self.refresh_filtered();
    }

    /// Whether an option equal to `option` is in the option list.
    pub fn option_exists(&self, option: &Value) -> bool {
        self.matcher.contains(&self.option_list(), option)
    }

    /// Build a tag option from `text`.
    ///
    /// Without a custom factory this is `{<label key>: text}` when the first
    /// known option is an object, and the bare text otherwise.
    pub fn create_option(&self, text: &str) -> Value {
        if let Some(create) = &self.create_option {
            return create(text);
        }
        let first = self.options.first().or_else(|| self.pushed_tags.first());
        if matches!(first, Some(Value::Object(_))) {
            let key = self
                .matcher
                .label_rule()
                .label_key()
                .unwrap_or(self.config.label.as_str())
                .to_string();
            let mut map = Map::new();
            map.insert(key, Value::String(text.to_string()));
            Value::Object(map)
        } else {
            Value::String(text.to_string())
        }
    }

    /// Display label of `option`.
    pub fn option_label(&self, option: &Value) -> String {
        self.matcher.label(option)
    }

    /// The options currently offered, after filtering and tag creation.
    pub fn filtered_options(&self) -> &[Value] {
        &self.filtered
    }

    /// Recompute the filtered list and re-point the typeahead pointer.
    fn refresh_filtered(&mut self) {
        let _span = PerfSpan::new(span_names::FILTER);
        let search = self.search.get();
        let list = self.option_list();
        let mut filtered = if self.config.filterable {
            self.matcher.filter(&list, &search)
        } else {
            list
        };
        if self.config.taggable && !search.trim().is_empty() {
            let created = self.create_option(&search);
            if !self.option_exists(&created) {
                filtered.insert(0, created);
            }
        }
        tracing::trace!(target: targets::SELECT, count = filtered.len(), search = %search, "filtered options");
        self.filtered = filtered;
        self.reset_pointer();
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// The search text.
    pub fn search(&self) -> String {
        self.search.get()
    }

    /// Whether the search text is non-empty.
    pub fn is_searching(&self) -> bool {
        self.search.with(|s| !s.is_empty())
    }

    /// Set the search text, as typed into the search input.
    ///
    /// A select that is not `searchable` has no search input: typed text is
    /// ignored, and only clearing the search goes through.
    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !self.config.searchable && !text.is_empty() {
            tracing::trace!(target: targets::SELECT, "ignoring search on non-searchable select");
            return;
        }
        if self.search.set(text.clone()) {
            self.search_changed.emit(text);
            self.refresh_filtered();
        }
    }

    // =========================================================================
    // Open state
    // =========================================================================

    /// Whether the select is open (focused, list requested).
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Open or close the select.
    ///
    /// Opening points the typeahead pointer at the selected option.
    pub fn set_open(&mut self, open: bool) {
        if self.open.set(open) {
            tracing::debug!(target: targets::SELECT, open, "open state changed");
            if open {
                self.reset_pointer();
                self.opened.emit(());
            } else {
                self.closed.emit(());
            }
        }
    }

    /// Whether the dropdown list should be shown.
    pub fn is_dropdown_open(&self) -> bool {
        match &self.dropdown_should_open {
            Some(should_open) => should_open(self),
            None => !self.config.no_drop && self.is_open() && !self.loading,
        }
    }

    // =========================================================================
    // Value
    // =========================================================================

    /// The selected options, in selection order.
    pub fn selected(&self) -> &[Value] {
        self.selection.items()
    }

    /// Whether nothing is selected.
    pub fn is_value_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// The reduced model value: `null` or a value in single mode, an array
    /// in multi mode.
    ///
    /// Host values that matched no option are reported as they were given.
    pub fn value(&self) -> Value {
        self.selection.reduced_value()
    }

    /// Replace the selection from a host-supplied value.
    ///
    /// In multi mode the value is an array of values; in single mode it is
    /// one value. Each value is first taken as a model value and expanded to
    /// the first option reducing to it. Failing that, a value equal to one of
    /// the options selects that option. Anything else is kept as-is, except
    /// `null`, which means "nothing selected". No `value_changed` is emitted.
    pub fn set_value(&mut self, value: Value) {
        let _span = PerfSpan::new(span_names::EXPAND);
        let values = match value {
            Value::Array(values) if self.config.multiple => values,
            other => vec![other],
        };
        let candidates = self.expansion_candidates();
        let reducer = self.matcher.reducer();
        let entries: Vec<(Value, Value)> = values
            .into_iter()
            .filter_map(|v| {
                if let Some(option) = reducer.expand(&v, &candidates) {
                    Some((option.clone(), v))
                } else if candidates.contains(&v) {
                    let key = reducer.reduce(&v);
                    Some((v, key))
                } else if v.is_null() {
                    None
                } else {
                    Some((v.clone(), v))
                }
            })
            .collect();
        tracing::debug!(target: targets::SELECT, count = entries.len(), "value set by host");
        self.selection.replace_entries(entries);
        if self.is_open() {
            self.reset_pointer();
        }
    }

    /// Whether `option` is selected.
    ///
    /// `option` may be a selected entry, a known option, or a model value.
    pub fn is_option_selected(&self, option: &Value) -> bool {
        self.selection.is_key_selected(&self.selection_key(option))
    }

    /// The model value `value` stands for: the key of an identical selected
    /// entry, the reduced form of a known option, or `value` itself.
    fn selection_key(&self, value: &Value) -> Value {
        let exact = self
            .selection
            .items()
            .iter()
            .position(|item| item == value)
            .and_then(|i| self.selection.keys().get(i));
        if let Some(key) = exact {
            return key.clone();
        }
        if self.expansion_candidates().contains(value) {
            self.matcher.reducer().reduce(value)
        } else {
            value.clone()
        }
    }

    /// Whether choosing `option` from the dropdown would deselect it.
    pub fn is_option_deselectable(&self, option: &Value) -> bool {
        self.config.deselect_from_dropdown && self.is_option_selected(option)
    }

    /// Whether a clear button should be offered.
    pub fn show_clear_button(&self) -> bool {
        !self.config.multiple && self.config.clearable && !self.is_open() && !self.is_value_empty()
    }

    /// Find the option a reduced value stands for.
    pub fn find_option_from_reduced_value(&self, value: &Value) -> Option<Value> {
        let candidates = self.expansion_candidates();
        self.matcher.reducer().expand(value, &candidates).cloned()
    }

    fn expansion_candidates(&self) -> Vec<Value> {
        self.options.iter().chain(&self.pushed_tags).cloned().collect()
    }

    /// Re-expand the current selection against the current options.
    ///
    /// Entries whose model value matches no option are kept unchanged.
    fn resync_selection(&mut self) {
        let candidates = self.expansion_candidates();
        let reducer = self.matcher.reducer();
        let entries = self
            .selection
            .items()
            .iter()
            .zip(self.selection.keys())
            .map(|(item, key)| {
                let option = reducer.expand(key, &candidates).unwrap_or(item);
                (option.clone(), key.clone())
            })
            .collect();
        self.selection.replace_entries(entries);
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select `option`.
    ///
    /// Non-selectable options are ignored. Selecting a new tag records it
    /// and raises `option_created`. Selecting an already selected option
    /// deselects it when `deselect_from_dropdown` allows it. Afterwards the
    /// dropdown closes (single mode, or `close_on_select`) and the search is
    /// cleared if `clear_search_on_select`.
    pub fn select(&mut self, option: Value) {
        if !self.selectable.test(&option) {
            tracing::trace!(target: targets::SELECT, option = %option, "ignoring non-selectable option");
            return;
        }
        self.option_selecting.emit(option.clone());
        let is_new_tag = self.config.taggable && !self.option_exists(&option);

        match self.selection.select(option.clone()) {
            SelectOutcome::Selected => {
                if is_new_tag {
                    self.push_tag(option.clone());
                }
                self.emit_value();
                self.option_selected.emit(option);
            }
            SelectOutcome::AlreadySelected => {
                let multiple_left = self.config.multiple && self.selection.len() > 1;
                if self.config.deselect_from_dropdown && (self.config.clearable || multiple_left) {
                    self.deselect(&option);
                }
            }
            SelectOutcome::Deselected | SelectOutcome::AtCapacity | SelectOutcome::NotSelectable => {}
        }
        self.after_select();
    }

    /// Deselect `option`, given as a selected entry, a known option, or a
    /// model value. No-op if absent.
    pub fn deselect(&mut self, option: &Value) {
        let key = self.selection_key(option);
        if !self.selection.is_key_selected(&key) {
            return;
        }
        self.option_deselecting.emit(option.clone());
        if let Some(removed) = self.selection.deselect_key(&key) {
            self.emit_value();
            self.option_deselected.emit(removed);
        }
    }

    /// Deselect `option` if selected, otherwise select it.
    pub fn toggle(&mut self, option: Value) {
        if self.is_option_selected(&option) {
            self.deselect(&option);
        } else {
            self.select(option);
        }
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.emit_value();
    }

    /// Remove the last selected value if the search is empty and the
    /// select is clearable (backspace behavior).
    pub fn maybe_delete_value(&mut self) {
        if self.is_searching() || self.selection.is_empty() || !self.config.clearable {
            return;
        }
        if self.config.multiple {
            self.selection.pop();
        } else {
            self.selection.clear();
        }
        self.emit_value();
    }

    fn push_tag(&mut self, option: Value) {
        tracing::debug!(target: targets::SELECT, option = %option, "created tag option");
        self.pushed_tags.push(option.clone());
        self.option_created.emit(option);
        if self.config.push_tags {
            self.refresh_filtered();
        }
    }

    fn after_select(&mut self) {
        self.mousedown = false;
        if self.config.closes_on_select() {
            self.close_search_options();
        }
        if self.config.clear_search_on_select {
            self.set_search(String::new());
        }
    }

    fn emit_value(&mut self) {
        if self.is_open() {
            self.reset_pointer();
        }
        self.value_changed.emit(self.value());
    }

    // =========================================================================
    // Typeahead
    // =========================================================================

    /// Index of the highlighted option in the filtered list.
    pub fn pointer_index(&self) -> Option<usize> {
        self.pointer.index()
    }

    /// The highlighted option.
    pub fn highlighted_option(&self) -> Option<&Value> {
        self.pointer.current(&self.filtered)
    }

    /// Highlight the option at `index` of the filtered list (mouse hover).
    pub fn set_pointer(&mut self, index: usize) -> bool {
        self.pointer.set(index, &self.filtered)
    }

    /// Move the highlight up, skipping non-selectable options.
    pub fn type_ahead_up(&mut self) {
        self.pointer.retreat(&self.filtered);
    }

    /// Move the highlight down, skipping non-selectable options.
    pub fn type_ahead_down(&mut self) {
        self.pointer.advance(&self.filtered);
    }

    /// Select the highlighted option.
    ///
    /// Does nothing while a text composition is in progress, when nothing is
    /// highlighted, or when the highlighted option is not selectable.
    /// Returns whether a selection was attempted.
    pub fn type_ahead_select(&mut self) -> bool {
        if self.composition.is_composing() {
            tracing::trace!(target: targets::KEYMAP, "composing, not selecting");
            return false;
        }
        match self.pointer.current(&self.filtered) {
            Some(option) if self.selectable.test(option) => {
                let option = option.clone();
                self.select(option);
                true
            }
            _ => false,
        }
    }

    fn reset_pointer(&mut self) {
        self.pointer
            .reset(&self.filtered, self.selection.keys(), &self.matcher);
    }

    // =========================================================================
    // Input events
    // =========================================================================

    /// The search input gained focus.
    pub fn on_search_focus(&mut self) {
        if self.config.disabled {
            return;
        }
        self.set_open(true);
        self.search_focus.emit(());
    }

    /// The search input lost focus.
    ///
    /// A blur caused by pressing inside the dropdown list (with no search
    /// active) keeps the dropdown open.
    pub fn on_search_blur(&mut self) {
        if self.mousedown && !self.is_searching() {
            self.mousedown = false;
        } else {
            if self.config.clear_search_on_blur() {
                self.set_search(String::new());
            }
            self.close_search_options();
            return;
        }
        if !self.is_searching() && self.options.is_empty() {
            self.close_search_options();
        }
    }

    /// A mouse button went down inside the dropdown list.
    pub fn on_mousedown(&mut self) {
        self.mousedown = true;
    }

    /// A mouse button went up inside the dropdown list.
    pub fn on_mouseup(&mut self) {
        self.mousedown = false;
    }

    /// Escape: clear the search, or close when there is nothing to clear.
    pub fn on_escape(&mut self) {
        if self.is_searching() {
            self.set_search(String::new());
        } else {
            self.close_search_options();
        }
    }

    /// Tab: select the highlighted option when `select_on_tab` is set.
    pub fn on_tab(&mut self) {
        if !self.config.select_on_tab || self.composition.is_composing() {
            return;
        }
        self.type_ahead_select();
    }

    /// An input-method composition session started.
    pub fn on_composition_start(&mut self) {
        self.composition.start();
    }

    /// An input-method composition session ended.
    pub fn on_composition_end(&mut self) {
        self.composition.end();
    }

    /// Whether a composition session is in progress.
    pub fn is_composing(&self) -> bool {
        self.composition.is_composing()
    }

    /// A click on the control.
    ///
    /// Clicks on deselect and clear buttons are left to those buttons. A
    /// click outside the search input closes an open select; otherwise the
    /// select opens unless disabled.
    pub fn toggle_dropdown(&mut self, target: ClickTarget) {
        if matches!(target, ClickTarget::DeselectButton | ClickTarget::ClearButton) {
            return;
        }
        if self.is_open() && target != ClickTarget::SearchInput {
            self.on_search_blur();
        } else if !self.config.disabled && !self.is_open() {
            self.on_search_focus();
        }
    }

    /// The keydown map in effect: defaults, select codes, then the host hook.
    pub fn keydown_map(&self) -> KeydownMap {
        let map = KeydownMap::defaults(&self.config.select_on_key_codes);
        match &self.map_keydown {
            Some(hook) => hook(map),
            None => map,
        }
    }

    /// A key went down in the search input. Returns whether the key was
    /// handled (the host should then prevent its default action).
    pub fn on_search_keydown(&mut self, key_code: u32) -> bool {
        let Some(action) = self.keydown_map().get(key_code).cloned() else {
            return false;
        };
        tracing::trace!(target: targets::KEYMAP, key_code, ?action, "keydown");
        match action {
            KeyAction::DeleteLast => self.maybe_delete_value(),
            KeyAction::Tab => self.on_tab(),
            KeyAction::Escape => self.on_escape(),
            KeyAction::Up => {
                if self.is_open() {
                    self.type_ahead_up();
                } else {
                    self.set_open(true);
                }
            }
            KeyAction::Down => {
                if self.is_open() {
                    self.type_ahead_down();
                } else {
                    self.set_open(true);
                }
            }
            KeyAction::Select => {
                self.type_ahead_select();
            }
            KeyAction::Custom(handler) => handler(self),
        }
        true
    }

    fn close_search_options(&mut self) {
        self.set_open(false);
        self.search_blur.emit(());
    }
}

impl Default for Select {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("config", &self.config)
            .field("options", &self.options.len())
            .field("filtered", &self.filtered.len())
            .field("selected", &self.selection.items())
            .field("pointer", &self.pointer.state())
            .field("search", &self.search.get())
            .field("open", &self.open.get())
            .field("composition", &self.composition)
            .finish_non_exhaustive()
    }
}
