//! Error types for arbor_3d

use crate::draw::DrawPhase;
use std::path::PathBuf;
use thiserror::Error;

/// Rejected draw-session trigger
///
/// These are precondition failures reported back to the caller. The session
/// is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// A draw needs at least one participant
    #[error("cannot start a draw without participants")]
    NoParticipants,

    /// Trigger not valid in the current phase
    #[error("cannot {action} while the draw is {phase}")]
    InvalidTransition {
        phase: DrawPhase,
        action: &'static str,
    },
}

/// Failure loading or validating an [`ArborConfig`](crate::config::ArborConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML did not parse into the config tree
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be written back out as TOML
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Parsed, but a value is out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors that can occur in the choreography engine
#[derive(Error, Debug)]
pub enum ArborError {
    #[error(transparent)]
    Draw(#[from] DrawError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for arbor_3d operations
pub type Result<T> = std::result::Result<T, ArborError>;
