//! Configuration system for the hexamap layer.
//!
//! Provides runtime-configurable settings that persist to disk as RON files,
//! with hot-reload detection and forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, LayerConfig, PrecisionSetting, StyleConfig};
pub use error::ConfigError;
