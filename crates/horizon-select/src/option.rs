//! Option labels and identity keys.
//!
//! An option is any [`serde_json::Value`]: a string, a number, `null`, or an
//! object carrying a label field. The [`LabelRule`] decides which text is
//! displayed for an option and matched against the search text.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use horizon_select_core::logging::targets;

/// Default object key holding an option's label.
pub const DEFAULT_LABEL_KEY: &str = "label";

type LabelFn = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// How to extract the display label of an option.
#[derive(Clone)]
pub enum LabelRule {
    /// Read the label from this key of object options.
    Key(String),
    /// Compute the label with a callback.
    Custom(LabelFn),
}

impl LabelRule {
    /// Label rule reading the given object key.
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    /// Label rule backed by a callback.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// The object key used by this rule, if any.
    pub fn label_key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key),
            Self::Custom(_) => None,
        }
    }

    /// Extract the display label of `option`.
    ///
    /// Non-object options are their own label. An object option missing the
    /// label key logs a warning and yields an empty label.
    pub fn label(&self, option: &Value) -> String {
        match self {
            Self::Custom(f) => f(option),
            Self::Key(key) => match option {
                Value::Object(map) => match map.get(key) {
                    Some(label) => scalar_text(label),
                    None => {
                        tracing::warn!(
                            target: targets::OPTION,
                            key = %key,
                            option = %option,
                            "label key does not exist in options object"
                        );
                        String::new()
                    }
                },
                other => scalar_text(other),
            },
        }
    }
}

impl Default for LabelRule {
    fn default() -> Self {
        Self::Key(DEFAULT_LABEL_KEY.to_string())
    }
}

impl fmt::Debug for LabelRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Render a value as label text: strings verbatim, `null` as empty.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A stable identity string for an option, for keyed rendering.
///
/// Non-objects use their text; objects use their `id` field when present,
/// otherwise their canonical JSON with sorted keys.
pub fn option_key(option: &Value) -> String {
    match option {
        Value::Object(map) => match map.get("id") {
            Some(id) => scalar_text(id),
            None => option.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
