//! Tracker state - the aggregate that gets persisted

use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;
use crate::core::types::CombatantId;

/// Table mode; monsters only show up in combat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Exploration,
    Combat,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Exploration => Mode::Combat,
            Mode::Combat => Mode::Exploration,
        }
    }

    pub fn is_combat(self) -> bool {
        self == Mode::Combat
    }
}

/// Roster, mode and turn pointer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerState {
    /// Turn order, highest initiative first
    pub combatants: Vec<Combatant>,
    pub mode: Mode,
    /// Index into `combatants`; only meaningful in combat
    pub current_turn_index: usize,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn position(&self, id: CombatantId) -> Option<usize> {
        self.combatants.iter().position(|c| c.id == id)
    }

    /// Stable sort by descending initiative; ties keep insertion order
    pub(crate) fn sort_by_initiative(&mut self) {
        self.combatants.sort_by(|a, b| b.initiative.cmp(&a.initiative));
    }

    /// Keep the turn pointer inside the roster
    pub(crate) fn clamp_turn_index(&mut self) {
        let last = self.combatants.len().saturating_sub(1);
        self.current_turn_index = self.current_turn_index.min(last);
    }

    /// Repair a snapshot restored from storage
    pub(crate) fn sanitize(&mut self) {
        for combatant in &mut self.combatants {
            combatant.sanitize();
        }
        self.clamp_turn_index();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_toggle() {
        assert_eq!(Mode::default(), Mode::Exploration);
        assert_eq!(Mode::Exploration.toggled(), Mode::Combat);
        assert_eq!(Mode::Combat.toggled(), Mode::Exploration);
        assert!(Mode::Combat.is_combat());
    }

    #[test]
    fn test_missing_fields_default() {
        let state: TrackerState = serde_json::from_str(r#"{"mode":"combat"}"#).unwrap();
        assert!(state.combatants.is_empty());
        assert_eq!(state.mode, Mode::Combat);
        assert_eq!(state.current_turn_index, 0);
    }

    #[test]
    fn test_clamp_turn_index_on_empty_roster() {
        let mut state = TrackerState {
            current_turn_index: 4,
            ..TrackerState::new()
        };
        state.clamp_turn_index();
        assert_eq!(state.current_turn_index, 0);
    }
}
