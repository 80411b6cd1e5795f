//! Manual reordering of the visible roster
//!
//! A drag happens on the visible list, which in exploration mode has the
//! monsters filtered out. The move is merged back into the full roster so
//! hidden combatants keep their relative places.

use std::collections::HashSet;

use crate::combatant::Combatant;
use crate::core::error::{Result, TrackerError};
use crate::core::types::CombatantId;

/// Merge a new ordering of the visible ids back into the full roster.
///
/// The visible set is exactly the ids in `visible_new_order`. Exactly one
/// of them may have moved; it is reinserted right after whichever visible
/// combatant now precedes it, or at the very front.
pub fn merge_reorder(
    full: &[Combatant],
    visible_new_order: &[CombatantId],
) -> Result<Vec<Combatant>> {
    let visible: HashSet<CombatantId> = visible_new_order.iter().copied().collect();
    if visible.len() != visible_new_order.len() {
        return Err(TrackerError::InvalidOrder("duplicate combatant in order".into()));
    }

    let old_order: Vec<CombatantId> = full
        .iter()
        .map(|c| c.id)
        .filter(|id| visible.contains(id))
        .collect();
    if old_order.len() != visible_new_order.len() {
        return Err(TrackerError::InvalidOrder(
            "order names a combatant that is not on the roster".into(),
        ));
    }

    match moved_combatant(&old_order, visible_new_order)? {
        Some(moved) => reinsert_moved(full, visible_new_order, moved),
        None => Ok(full.to_vec()),
    }
}

/// Move `moved` within the full roster so it sits right after the visible
/// combatant preceding it in `visible_new_order` (front if there is none).
/// Everyone else keeps their relative order.
pub fn reinsert_moved(
    full: &[Combatant],
    visible_new_order: &[CombatantId],
    moved: CombatantId,
) -> Result<Vec<Combatant>> {
    let mut merged = full.to_vec();
    let old_index = merged
        .iter()
        .position(|c| c.id == moved)
        .ok_or(TrackerError::CombatantNotFound(moved))?;
    let entry = merged.remove(old_index);

    let new_visible_index = visible_new_order
        .iter()
        .position(|id| *id == moved)
        .ok_or(TrackerError::CombatantNotFound(moved))?;

    let insert_at = match new_visible_index.checked_sub(1) {
        Some(prev) => {
            let before = visible_new_order[prev];
            merged
                .iter()
                .position(|c| c.id == before)
                .map(|idx| idx + 1)
                .ok_or(TrackerError::CombatantNotFound(before))?
        }
        None => 0,
    };
    merged.insert(insert_at, entry);

    Ok(merged)
}

/// Which single id moved between two orders of the same ids.
/// `None` when nothing changed. A swap of neighbours reads as the upper
/// one moving down.
fn moved_combatant(old: &[CombatantId], new: &[CombatantId]) -> Result<Option<CombatantId>> {
    let Some(first) = old.iter().zip(new).position(|(a, b)| a != b) else {
        return Ok(None);
    };
    let last = old
        .iter()
        .zip(new)
        .rposition(|(a, b)| a != b)
        .unwrap_or(first);

    // Shifted left at the first difference: the item there was dragged down
    let moved = if first + 1 < old.len() && new[first] == old[first + 1] {
        old[first]
    } else {
        new[first]
    };

    let mut replayed: Vec<CombatantId> = old.iter().copied().filter(|id| *id != moved).collect();
    let target = if moved == old[first] { last } else { first };
    replayed.insert(target.min(replayed.len()), moved);
    if replayed != new {
        return Err(TrackerError::InvalidOrder(
            "only one combatant can be moved at a time".into(),
        ));
    }

    Ok(Some(moved))
}

/// Move the item at `from` to `to` (clamped to the list), the way a
/// dragged card lands
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() {
        return;
    }
    let to = to.min(items.len() - 1);
    let item = items.remove(from);
    items.insert(to, item);
}
