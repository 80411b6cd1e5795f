//! Initiative Tracker - combat roster and turn order for tabletop sessions

pub mod combatant;
pub mod core;
pub mod persistence;
pub mod tracker;

pub use crate::combatant::{Combatant, CombatantDraft, CombatantKind, Role};
pub use crate::core::{CombatantId, HitPoints, Result, TrackerConfig, TrackerError};
pub use crate::persistence::{JsonFileStore, MemoryStore, SnapshotStore, TrackerSnapshot};
pub use crate::tracker::{CombatTracker, Mode, Outcome, TrackerState};
