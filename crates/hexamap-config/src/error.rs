//! Configuration error types.

/// Errors raised while loading, saving, or parsing the layer configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read from disk.
    #[error("failed to read layer config: {0}")]
    Read(#[source] std::io::Error),

    /// The config file could not be written to disk.
    #[error("failed to write layer config: {0}")]
    Write(#[source] std::io::Error),

    /// The RON content did not parse.
    #[error("failed to parse layer config: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// The configuration did not serialize to RON.
    #[error("failed to serialize layer config: {0}")]
    Serialize(#[source] ron::Error),
}
