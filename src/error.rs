//! Error taxonomy for the arena creature core.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArenaError {
    /// Rejected input: unknown status string, half a target, attack without a target.
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("attack sprite `{key}` has no registered {asset}")]
    AssetNotFound { key: String, asset: AssetKind },
    /// The node a mutation targeted has been torn down.
    /// Recovered inside the attack controller and never returned from it.
    #[error("rendering context is gone")]
    StaleContext,
    #[error("unknown creature `{0}`")]
    UnknownCreature(String),
    #[error("config: {0}")]
    Config(String),
}

/// Which registry lookup came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Clip,
    Scale,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Clip => write!(f, "animation clip"),
            AssetKind::Scale => write!(f, "scale entry"),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArenaError>;
