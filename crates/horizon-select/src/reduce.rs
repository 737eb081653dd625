//! Value reduction and expansion.
//!
//! A select exposes its value to the host in a *reduced* form, for example
//! an option's `value` field instead of the whole option object. The
//! [`Reducer`] maps options to that form and [`Reducer::expand`] maps a
//! reduced value back to the option it came from.
//!
//! Reduction is only ever applied to options. A value that is already
//! reduced is compared as-is and never reduced a second time, so reducers
//! need not be idempotent. A reducer that does not apply to an option (the
//! field is missing, or a custom reducer returns `None`) reduces it to the
//! option itself.
//!
//! ```
//! use horizon_select::Reducer;
//! use serde_json::json;
//!
//! let reducer = Reducer::field("value");
//! let options = vec![
//!     json!({"value": 0, "label": "No"}),
//!     json!({"value": 1, "label": "Yes"}),
//! ];
//!
//! assert_eq!(reducer.reduce(&options[0]), json!(0));
//! assert_eq!(reducer.expand(&json!(0), &options), Some(&options[0]));
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

type ReduceFn = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// Maps options to the externally visible model value.
#[derive(Clone, Default)]
pub enum Reducer {
    /// The option itself is the model value.
    #[default]
    Identity,
    /// The model value is this field of object options.
    Field(String),
    /// The model value is computed by a callback; `None` means "not applicable".
    Custom(ReduceFn),
}

impl Reducer {
    /// Reducer extracting an object field.
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    /// Reducer backed by a callback.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Whether a non-identity reducer is configured.
    pub fn is_reducing(&self) -> bool {
        !matches!(self, Self::Identity)
    }

    /// Reduce an option to its model value.
    pub fn reduce(&self, option: &Value) -> Value {
        let reduced = match self {
            Self::Identity => None,
            Self::Field(name) => option.as_object().and_then(|map| map.get(name)).cloned(),
            Self::Custom(f) => f(option),
        };
        reduced.unwrap_or_else(|| option.clone())
    }

    /// Find the first candidate whose reduced form equals `reduced`.
    ///
    /// `reduced` is taken to be a model value and is not reduced again.
    /// Returns `None` when nothing matches; the caller decides whether to
    /// keep the raw value as a fallback. When the reducer maps several
    /// distinct options to the same value, the first one wins.
    pub fn expand<'a>(&self, reduced: &Value, candidates: &'a [Value]) -> Option<&'a Value> {
        candidates.iter().find(|option| self.reduce(option) == *reduced)
    }
}

impl fmt::Debug for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
