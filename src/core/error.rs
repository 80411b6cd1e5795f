use thiserror::Error;

use crate::core::types::CombatantId;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Combatant not found: {0}")]
    CombatantNotFound(CombatantId),

    #[error("Combatant name must not be empty")]
    EmptyName,

    #[error("Invalid roster order: {0}")]
    InvalidOrder(String),

    #[error("Roster cannot be reordered during combat")]
    ReorderLocked,

    #[error("No combatant is being edited")]
    NoEditTarget,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
