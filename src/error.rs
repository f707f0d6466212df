use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Crate-wide error type
// =============================================================================

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Invalid snapshot: expected a {expected} snapshot, got {found}")]
    InvalidSnapshot {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid reference: {holder} outlived its {target}")]
    DanglingReference {
        holder: &'static str,
        target: &'static str,
    },

    #[error("Context has no state; transition to an initial state first")]
    NoState,

    #[error("Adding this component would make it its own ancestor")]
    CycleDetected,

    #[error("Component already has a parent; remove it from there first")]
    AlreadyAttached,

    #[error("Unknown pattern '{0}'")]
    UnknownPattern(String),

    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl PatternError {
    pub fn dangling(holder: &'static str, target: &'static str) -> Self {
        Self::DanglingReference { holder, target }
    }
}

pub type Result<T> = std::result::Result<T, PatternError>;
