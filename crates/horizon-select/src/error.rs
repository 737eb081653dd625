//! Error types for the select engine.
//!
//! Selection, pointer movement and value expansion never fail: every
//! "failure" there is a defined no-op. Errors only arise while loading or
//! validating a [`SelectConfig`](crate::SelectConfig).

/// Result type alias for select operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring a select.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// TOML configuration could not be parsed.
    #[error("Failed to parse select configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML configuration could not be written.
    #[error("Failed to serialize select configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A configuration value is out of range.
    #[error("Invalid value for '{field}': {message}")]
    InvalidConfig { field: &'static str, message: String },
}

impl Error {
    /// Create an invalid configuration error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}
