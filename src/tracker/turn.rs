//! Turn advancement

use crate::combatant::Combatant;

/// Index of the next combatant still in the fight after `current`,
/// wrapping around the roster. Stays on `current` when nobody else is
/// alive, and does nothing at all when everybody is down.
pub fn next_turn_index(combatants: &[Combatant], current: usize) -> usize {
    let len = combatants.len();
    if !combatants.iter().any(Combatant::is_alive) {
        return current;
    }

    (1..=len)
        .map(|step| (current + step) % len)
        .find(|&idx| combatants[idx].is_alive() || idx == current)
        .unwrap_or(current)
}
