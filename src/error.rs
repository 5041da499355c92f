//! Error types for simulator construction and map ingestion
//!
//! Sweeps themselves never fail; every degenerate case inside a sweep falls
//! back to a numeric answer

use thiserror::Error;

/// Errors raised while configuring the simulator or loading a map
#[derive(Debug, Error)]
pub enum SimError {
    /// A sensor parameter is out of its valid range
    #[error("invalid sensor config: {0}")]
    InvalidConfig(String),

    /// Raw map data does not match the declared grid dimensions
    #[error("map size mismatch: expected {expected} cells, got {actual}")]
    MapSizeMismatch {
        /// `rows * cols`
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },

    /// Grid dimensions or resolution cannot describe a map
    #[error("invalid map geometry: {0}")]
    InvalidMapGeometry(String),

    /// A geometry-preserving update was requested before any map was set
    #[error("no map has been set")]
    NoMap,

    /// Config file could not be parsed
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Creates an invalid map geometry error
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidMapGeometry(msg.into())
    }
}
