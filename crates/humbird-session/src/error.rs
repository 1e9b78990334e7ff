//! Error types for session entry operations.

/// Error type for session entry operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A lifespan axis was given a value outside its valid range.
    #[error("{field} {reason}: {value}")]
    InvalidArgument {
        field: &'static str,
        value: i64,
        reason: &'static str,
    },

    /// Failed to parse a lifespan configuration document.
    #[error("failed to parse lifespan config: {0}")]
    Config(#[from] toml::de::Error),

    /// Failed to serialize a lifespan configuration.
    #[error("failed to serialize lifespan config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A configuration value is out of range.
    #[error("invalid lifespan config: {0}")]
    InvalidConfig(String),
}

/// Result type for session entry operations.
pub type Result<T> = std::result::Result<T, Error>;
