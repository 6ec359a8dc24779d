use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or validating a rules file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse rules toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid rules: {0}")]
    Invalid(String),
}

/// Why a summon or upgrade was refused.  Never fatal; the screen layer
/// reports it to the player and leaves the session untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EconomyError {
    #[error("not enough gold: need {cost}, have {available}")]
    InsufficientFunds { cost: u32, available: u32 },
    #[error("no unit in slot {index}")]
    NoSuchUnit { index: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown mode `{0}` (expected easy, hard, extreme or endless)")]
pub struct ParseModeError(pub String);
