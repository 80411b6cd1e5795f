//! Derived read-only views for the presentation layer

use crate::combatant::Combatant;
use crate::tracker::state::{Mode, TrackerState};

/// Combatants shown on the table: monsters are hidden while exploring
pub fn visible_roster(state: &TrackerState) -> Vec<&Combatant> {
    state
        .combatants
        .iter()
        .filter(|c| state.mode.is_combat() || !c.kind.hidden_in_exploration())
        .collect()
}

/// Position of the current combatant within the visible roster, 0 when
/// it is hidden or the pointer is off the end
pub fn visible_current_turn_index(state: &TrackerState) -> usize {
    let Some(current) = state.combatants.get(state.current_turn_index) else {
        return 0;
    };

    visible_roster(state)
        .iter()
        .position(|c| c.id == current.id)
        .unwrap_or(0)
}

pub fn alive_count(state: &TrackerState) -> usize {
    state.combatants.iter().filter(|c| c.is_alive()).count()
}

pub fn monster_count(state: &TrackerState) -> usize {
    state
        .combatants
        .iter()
        .filter(|c| c.kind.hidden_in_exploration())
        .count()
}

/// Monsters waiting off-table; the badge on the "add monster" button
pub fn hidden_monster_count(state: &TrackerState) -> usize {
    match state.mode {
        Mode::Exploration => monster_count(state),
        Mode::Combat => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{CombatantDraft, CombatantKind};
    use crate::core::config::DraftDefaults;
    use crate::core::types::CombatantId;

    fn make(name: &str, kind: CombatantKind) -> Combatant {
        let draft = CombatantDraft::new(name, kind)
            .resolve(&DraftDefaults::default())
            .unwrap();
        Combatant::from_draft(CombatantId::new(), draft)
    }

    fn state(mode: Mode, current: usize) -> TrackerState {
        TrackerState {
            combatants: vec![
                make("Aria", CombatantKind::Player),
                make("Goblin", CombatantKind::Monster),
                make("Tom", CombatantKind::Npc),
            ],
            mode,
            current_turn_index: current,
        }
    }

    #[test]
    fn test_exploration_hides_monsters() {
        let s = state(Mode::Exploration, 0);
        let names: Vec<&str> = visible_roster(&s).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Aria", "Tom"]);
    }

    #[test]
    fn test_combat_shows_everyone() {
        let s = state(Mode::Combat, 0);
        assert_eq!(visible_roster(&s).len(), 3);
    }

    #[test]
    fn test_visible_turn_index_maps_through_filter() {
        let s = state(Mode::Exploration, 2);
        assert_eq!(visible_current_turn_index(&s), 1);

        let s = state(Mode::Combat, 2);
        assert_eq!(visible_current_turn_index(&s), 2);
    }

    #[test]
    fn test_visible_turn_index_falls_back_to_zero() {
        // Current turn belongs to a hidden monster
        let s = state(Mode::Exploration, 1);
        assert_eq!(visible_current_turn_index(&s), 0);

        let s = state(Mode::Combat, 9);
        assert_eq!(visible_current_turn_index(&s), 0);
    }

    #[test]
    fn test_counts() {
        let mut s = state(Mode::Exploration, 0);
        s.combatants[2].is_defeated = true;
        assert_eq!(alive_count(&s), 2);
        assert_eq!(monster_count(&s), 1);
        assert_eq!(hidden_monster_count(&s), 1);

        s.mode = Mode::Combat;
        assert_eq!(hidden_monster_count(&s), 0);
    }
}
