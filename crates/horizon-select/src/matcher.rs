//! Option matching against search text and against selected values.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::option::LabelRule;
use crate::reduce::Reducer;

type FilterByFn = Arc<dyn Fn(&Value, &str, &str) -> bool + Send + Sync>;

/// Decides whether an option matches a search string, and whether two
/// values denote the same option.
///
/// Option equality goes through the [`Reducer`]: two options are the same
/// when they reduce to the same model value. Model values are looked up with
/// [`Matcher::position_by_key`] and are never reduced themselves.
#[derive(Clone, Default)]
pub struct Matcher {
    reducer: Reducer,
    label: LabelRule,
    filter_by: Option<FilterByFn>,
}

impl Matcher {
    /// Create a matcher with the given reducer and label rule.
    pub fn new(reducer: Reducer, label: LabelRule) -> Self {
        Self {
            reducer,
            label,
            filter_by: None,
        }
    }

    /// Replace the search policy with `(option, label, search) -> bool`.
    ///
    /// The search text handed to the callback is already trimmed.
    pub fn with_filter_by<F>(mut self, filter_by: F) -> Self
    where
        F: Fn(&Value, &str, &str) -> bool + Send + Sync + 'static,
    {
        self.filter_by = Some(Arc::new(filter_by));
        self
    }

    /// The reducer used for equality.
    pub fn reducer(&self) -> &Reducer {
        &self.reducer
    }

    /// The label rule used for display and matching.
    pub fn label_rule(&self) -> &LabelRule {
        &self.label
    }

    /// Display label of `option`.
    pub fn label(&self, option: &Value) -> String {
        self.label.label(option)
    }

    /// Whether `option` matches `search`.
    ///
    /// By default this is a case-insensitive substring test of the option's
    /// label against the trimmed search text. Empty search matches everything.
    pub fn matches(&self, option: &Value, search: &str) -> bool {
        let search = search.trim();
        if search.is_empty() {
            return true;
        }
        let label = self.label(option);
        match &self.filter_by {
            Some(filter_by) => filter_by(option, &label, search),
            None => label.to_lowercase().contains(&search.to_lowercase()),
        }
    }

    /// The options of `options` matching `search`, in order.
    pub fn filter(&self, options: &[Value], search: &str) -> Vec<Value> {
        options
            .iter()
            .filter(|option| self.matches(option, search))
            .cloned()
            .collect()
    }

    /// Whether options `a` and `b` denote the same option.
    pub fn equals(&self, a: &Value, b: &Value) -> bool {
        a == b || self.reducer.reduce(a) == self.reducer.reduce(b)
    }

    /// Position of the first element of `list` equal to `option`.
    pub fn position(&self, list: &[Value], option: &Value) -> Option<usize> {
        list.iter().position(|candidate| self.equals(candidate, option))
    }

    /// Whether `list` contains an element equal to `option`.
    pub fn contains(&self, list: &[Value], option: &Value) -> bool {
        self.position(list, option).is_some()
    }

    /// Position of the first option of `list` whose model value is `key`.
    pub fn position_by_key(&self, list: &[Value], key: &Value) -> Option<usize> {
        list.iter().position(|candidate| self.reducer.reduce(candidate) == *key)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("reducer", &self.reducer)
            .field("label", &self.label)
            .field("custom_filter", &self.filter_by.is_some())
            .finish()
    }
}
