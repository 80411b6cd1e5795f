pub mod config;
pub mod error;
pub mod types;

pub use config::{DraftDefaults, TrackerConfig};
pub use error::{Result, TrackerError};
pub use types::{CombatantId, HitPoints};
