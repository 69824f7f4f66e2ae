use thiserror::Error;

use crate::core::types::{Millis, PostId};

/// Every refusal leaves the engine untouched; callers can retry once the
/// gating condition clears.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Not enough energy: need {needed}, have {available}")]
    InsufficientEnergy { needed: u32, available: u32 },

    #[error("Post cooldown active: {remaining_ms}ms remaining")]
    CooldownActive { remaining_ms: Millis },

    #[error("Post not found: {0:?}")]
    PostNotFound(PostId),

    #[error("Post {0:?} was already liked")]
    AlreadyLiked(PostId),

    #[error("Post {0:?} already has your comment")]
    AlreadyCommented(PostId),

    #[error("No unliked posts left to batch-like")]
    NothingToLike,

    #[error("Upgrade required: {0}")]
    PerkMissing(String),

    #[error("Unknown upgrade: {0}")]
    UnknownUpgrade(String),

    #[error("Upgrade {id} unlocks at {required}")]
    UpgradeLocked { id: String, required: String },

    #[error("Upgrade already owned: {0}")]
    UpgradeOwned(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl GameError {
    /// True for gating refusals, false for configuration and I/O failures
    pub fn is_refusal(&self) -> bool {
        !matches!(
            self,
            GameError::InvalidConfig(_)
                | GameError::IoError(_)
                | GameError::SerdeError(_)
                | GameError::TomlError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
