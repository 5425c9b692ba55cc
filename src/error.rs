use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation crate.
///
/// The simulation core recovers every degenerate numerical case locally
/// (distance floor, center reset); only configuration loading can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Propagated I/O errors from config loading.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed config file.
    #[error("malformed config file: {0}")]
    Toml(#[from] toml::de::Error),
}
