//! Behavior flags of a select.
//!
//! Everything that is plain data lives in [`SelectConfig`] and can be loaded
//! from TOML. Callbacks (selectable predicate, reducer, filter, key map
//! hooks) are supplied through [`SelectBuilder`](crate::SelectBuilder).
//!
//! ```
//! use horizon_select::SelectConfig;
//!
//! let config = SelectConfig::from_toml_str(r#"
//!     multiple = true
//!     close_on_select = false
//!     select_on_key_codes = [13, 32]
//! "#).unwrap();
//!
//! assert!(config.multiple);
//! assert!(config.clearable);
//! assert!(!config.clear_search_on_blur());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::keymap::codes;
use crate::option::DEFAULT_LABEL_KEY;

/// Plain-data configuration of a select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Allow selecting several options.
    pub multiple: bool,
    /// Allow clearing the selection (clear button, backspace).
    pub clearable: bool,
    /// Show a search input. When unset, typed search text is ignored.
    pub searchable: bool,
    /// Filter options by the search text.
    pub filterable: bool,
    /// Allow creating options from the search text.
    pub taggable: bool,
    /// Add created options to the option list.
    pub push_tags: bool,
    /// Close the dropdown after a selection in multi mode.
    ///
    /// Single mode always closes.
    pub close_on_select: bool,
    /// Clear the search text after a selection.
    pub clear_search_on_select: bool,
    /// Clear the search text when the input loses focus.
    ///
    /// Defaults to `clear_search_on_select && !multiple` when unset.
    pub clear_search_on_blur: Option<bool>,
    /// Selecting an already selected option deselects it.
    pub deselect_from_dropdown: bool,
    /// Clear the selection when the option list changes.
    pub reset_on_options_change: bool,
    /// Tab selects the highlighted option.
    pub select_on_tab: bool,
    /// Key codes that select the highlighted option.
    pub select_on_key_codes: Vec<u32>,
    /// Never show the dropdown list.
    pub no_drop: bool,
    /// Ignore user interaction.
    pub disabled: bool,
    /// Object key holding option labels.
    pub label: String,
    /// Upper bound on selected options in multi mode.
    pub max_selections: Option<usize>,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            multiple: false,
            clearable: true,
            searchable: true,
            filterable: true,
            taggable: false,
            push_tags: false,
            close_on_select: true,
            clear_search_on_select: true,
            clear_search_on_blur: None,
            deselect_from_dropdown: false,
            reset_on_options_change: false,
            select_on_tab: false,
            select_on_key_codes: vec![codes::ENTER],
            no_drop: false,
            disabled: false,
            label: DEFAULT_LABEL_KEY.to_string(),
            max_selections: None,
        }
    }
}

impl SelectConfig {
    /// Parse and validate a TOML configuration. Missing keys take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        if self.label.is_empty() {
            return Err(Error::invalid_config("label", "label key must not be empty"));
        }
        if self.max_selections == Some(0) {
            return Err(Error::invalid_config(
                "max_selections",
                "must be at least 1 when set",
            ));
        }
        Ok(())
    }

    /// Effective value of `clear_search_on_blur`.
    pub fn clear_search_on_blur(&self) -> bool {
        self.clear_search_on_blur
            .unwrap_or(self.clear_search_on_select && !self.multiple)
    }

    /// Whether a selection should close the dropdown.
    pub fn closes_on_select(&self) -> bool {
        !self.multiple || self.close_on_select
    }
}
