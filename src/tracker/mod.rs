//! Combat tracker - roster, turn order and table mode
//!
//! [`CombatTracker`] owns the [`TrackerState`] and is the only thing that
//! mutates it. Every successful change is handed to the injected
//! [`SnapshotStore`]; a store failure is logged and otherwise ignored, the
//! in-memory state stays authoritative.

pub mod reorder;
pub mod state;
pub mod turn;
pub mod view;

pub use reorder::{merge_reorder, move_item, reinsert_moved};
pub use state::{Mode, TrackerState};
pub use turn::next_turn_index;

use std::collections::HashSet;

use crate::combatant::naming::next_duplicate_name;
use crate::combatant::{Combatant, CombatantDraft, CombatantKind};
use crate::core::config::DraftDefaults;
use crate::core::error::{Result, TrackerError};
use crate::core::types::{CombatantId, HitPoints};
use crate::persistence::{SnapshotStore, TrackerSnapshot};

/// Result of an operation that may legitimately do nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed
    Updated,
    /// Valid request with no effect (wrong kind, non-positive amount)
    Ignored,
}

pub struct CombatTracker {
    state: TrackerState,
    store: Box<dyn SnapshotStore>,
    defaults: DraftDefaults,
    editing: Option<CombatantId>,
}

impl CombatTracker {
    /// Open a tracker on `store`, restoring the saved snapshot if there
    /// is a usable one
    pub fn open(store: impl SnapshotStore + 'static) -> Self {
        let state = match store.load() {
            Some(mut snapshot) => {
                snapshot.sanitize();
                tracing::info!(
                    "Restored {} combatants ({:?} mode)",
                    snapshot.combatants.len(),
                    snapshot.mode
                );
                snapshot
            }
            None => TrackerState::new(),
        };

        Self {
            state,
            store: Box::new(store),
            defaults: DraftDefaults::default(),
            editing: None,
        }
    }

    /// Use these fallbacks for unreadable draft fields
    pub fn with_defaults(mut self, defaults: DraftDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    // === READ ACCESS ===

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        self.state.clone()
    }

    pub fn store(&self) -> &dyn SnapshotStore {
        self.store.as_ref()
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.state.combatants
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.state.combatants.iter().find(|c| c.id == id)
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn current_turn_index(&self) -> usize {
        self.state.current_turn_index
    }

    /// Whose turn it is, if the pointer is on the roster
    pub fn current_combatant(&self) -> Option<&Combatant> {
        self.state.combatants.get(self.state.current_turn_index)
    }

    pub fn visible_roster(&self) -> Vec<&Combatant> {
        view::visible_roster(&self.state)
    }

    pub fn visible_current_turn_index(&self) -> usize {
        view::visible_current_turn_index(&self.state)
    }

    pub fn alive_count(&self) -> usize {
        view::alive_count(&self.state)
    }

    pub fn monster_count(&self) -> usize {
        view::monster_count(&self.state)
    }

    pub fn hidden_monster_count(&self) -> usize {
        view::hidden_monster_count(&self.state)
    }

    /// Combatant currently open in the edit form
    pub fn editing(&self) -> Option<CombatantId> {
        self.editing
    }

    // === ROSTER ===

    /// Add a combatant and re-sort by initiative; returns its id
    pub fn add_combatant(&mut self, draft: &CombatantDraft) -> Result<CombatantId> {
        let resolved = draft.resolve(&self.defaults)?;
        let combatant = Combatant::from_draft(CombatantId::new(), resolved);
        let id = combatant.id;

        tracing::debug!(
            "Adding {} '{}' (initiative {})",
            combatant.kind.label(),
            combatant.name,
            combatant.initiative
        );
        self.state.combatants.push(combatant);
        self.state.sort_by_initiative();
        self.persist();
        Ok(id)
    }

    /// Replace a combatant's fields in place and re-sort
    pub fn edit_combatant(&mut self, id: CombatantId, draft: &CombatantDraft) -> Result<()> {
        let resolved = draft.resolve(&self.defaults)?;
        let combatant = self.find_mut(id)?;
        combatant.apply_draft(resolved);
        tracing::debug!("Edited '{}'", combatant.name);

        self.state.sort_by_initiative();
        self.persist();
        Ok(())
    }

    pub fn remove_combatant(&mut self, id: CombatantId) -> Result<()> {
        let idx = self
            .state
            .position(id)
            .ok_or(TrackerError::CombatantNotFound(id))?;
        let removed = self.state.combatants.remove(idx);
        tracing::debug!("Removed '{}'", removed.name);

        if self.editing == Some(id) {
            self.editing = None;
        }
        self.state.clamp_turn_index();
        self.persist();
        Ok(())
    }

    /// Spawn another numbered copy of a combatant ("Orc" -> "Orc 1")
    pub fn duplicate_combatant(&mut self, id: CombatantId) -> Result<CombatantId> {
        let source = self
            .combatant(id)
            .ok_or(TrackerError::CombatantNotFound(id))?;

        let monster_names = self
            .state
            .combatants
            .iter()
            .filter(|c| c.kind == CombatantKind::Monster)
            .map(|c| c.name.as_str());
        let name = next_duplicate_name(&source.name, monster_names);

        let copy = source.duplicate_as(name);
        let copy_id = copy.id;
        tracing::debug!("Duplicated '{}' as '{}'", source.name, copy.name);

        self.state.combatants.push(copy);
        self.state.sort_by_initiative();
        self.persist();
        Ok(copy_id)
    }

    // === HIT POINTS ===

    /// Damage an NPC or monster, after resistance if it is switched on.
    /// Players ignore damage; their health is tracked at the table.
    pub fn apply_damage(&mut self, id: CombatantId, amount: HitPoints) -> Result<Outcome> {
        let combatant = self.find_mut(id)?;
        if amount <= 0 || !combatant.kind.tracks_hit_points() {
            return Ok(Outcome::Ignored);
        }

        let lost = combatant.take_damage(amount);
        tracing::debug!(
            "'{}' takes {} damage and loses {} HP, {}/{} HP left",
            combatant.name,
            amount,
            lost,
            combatant.hit_points,
            combatant.max_hit_points
        );
        if combatant.is_defeated {
            tracing::info!("'{}' is defeated", combatant.name);
        }

        self.persist();
        Ok(Outcome::Updated)
    }

    /// Heal up to the maximum; brings anyone back into the fight
    pub fn apply_heal(&mut self, id: CombatantId, amount: HitPoints) -> Result<Outcome> {
        let combatant = self.find_mut(id)?;
        if amount <= 0 {
            return Ok(Outcome::Ignored);
        }

        combatant.heal(amount);
        tracing::debug!(
            "'{}' heals {}, {}/{} HP",
            combatant.name,
            amount,
            combatant.hit_points,
            combatant.max_hit_points
        );

        self.persist();
        Ok(Outcome::Updated)
    }

    /// Knock a player out or wake them up; other kinds are ignored
    pub fn toggle_unconscious(&mut self, id: CombatantId) -> Result<Outcome> {
        let combatant = self.find_mut(id)?;
        if combatant.kind != CombatantKind::Player {
            return Ok(Outcome::Ignored);
        }

        combatant.is_defeated = !combatant.is_defeated;
        tracing::debug!(
            "'{}' is {}",
            combatant.name,
            if combatant.is_defeated { "unconscious" } else { "conscious" }
        );

        self.persist();
        Ok(Outcome::Updated)
    }

    /// Switch an NPC's or monster's resistance on or off
    pub fn toggle_resistance(&mut self, id: CombatantId) -> Result<Outcome> {
        let combatant = self.find_mut(id)?;
        if !combatant.kind.tracks_hit_points() {
            return Ok(Outcome::Ignored);
        }

        let active = !combatant.resistance_active.unwrap_or(false);
        combatant.resistance_active = Some(active);
        tracing::debug!("'{}' resistance active: {}", combatant.name, active);

        self.persist();
        Ok(Outcome::Updated)
    }

    // === MODE & ORDER ===

    pub fn set_mode(&mut self, mode: Mode) {
        if self.state.mode != mode {
            tracing::info!("Switching to {:?} mode", mode);
        }
        self.state.mode = mode;
        self.persist();
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.set_mode(self.state.mode.toggled());
        self.state.mode
    }

    /// Replace the roster order; `order` must list every combatant once.
    /// Locked during combat, like dragging.
    pub fn reorder(&mut self, order: &[CombatantId]) -> Result<()> {
        if self.state.mode.is_combat() {
            return Err(TrackerError::ReorderLocked);
        }

        let unique: HashSet<CombatantId> = order.iter().copied().collect();
        if order.len() != self.state.combatants.len() || unique.len() != order.len() {
            return Err(TrackerError::InvalidOrder(format!(
                "expected each of the {} combatants exactly once",
                self.state.combatants.len()
            )));
        }

        let mut reordered = Vec::with_capacity(order.len());
        for id in order {
            let combatant = self
                .combatant(*id)
                .ok_or(TrackerError::CombatantNotFound(*id))?;
            reordered.push(combatant.clone());
        }

        self.state.combatants = reordered;
        self.persist();
        Ok(())
    }

    /// Drop the visible card at `from` onto position `to`. Only allowed
    /// outside combat; hidden monsters keep their places.
    pub fn move_visible(&mut self, from: usize, to: usize) -> Result<()> {
        if self.state.mode.is_combat() {
            return Err(TrackerError::ReorderLocked);
        }

        let mut order: Vec<CombatantId> = self.visible_roster().iter().map(|c| c.id).collect();
        if from >= order.len() {
            return Err(TrackerError::InvalidOrder(format!(
                "no visible combatant at position {}",
                from
            )));
        }
        let dragged = order[from];
        move_item(&mut order, from, to);

        let merged = reinsert_moved(&self.state.combatants, &order, dragged)?;
        let ids: Vec<CombatantId> = merged.iter().map(|c| c.id).collect();
        self.reorder(&ids)
    }

    // === TURNS ===

    /// Pass the turn to the next combatant still standing
    pub fn advance_turn(&mut self) -> usize {
        let next = next_turn_index(&self.state.combatants, self.state.current_turn_index);
        if next != self.state.current_turn_index {
            self.state.current_turn_index = next;
            if let Some(current) = self.current_combatant() {
                tracing::debug!("Turn passes to '{}'", current.name);
            }
            self.persist();
        }
        next
    }

    /// Back to the first turn with everybody at full health
    pub fn reset_combat(&mut self) {
        self.state.current_turn_index = 0;
        for combatant in &mut self.state.combatants {
            combatant.restore();
        }
        tracing::info!("Combat reset");
        self.persist();
    }

    /// Empty the table and forget the saved snapshot
    pub fn clear_all(&mut self) {
        self.state = TrackerState::new();
        self.editing = None;
        tracing::info!("Clearing the table");

        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear saved tracker state: {}", e);
        }
    }

    // === EDIT FORM ===

    /// Open a combatant in the edit form; returns the pre-filled draft
    pub fn begin_edit(&mut self, id: CombatantId) -> Result<CombatantDraft> {
        let combatant = self
            .combatant(id)
            .ok_or(TrackerError::CombatantNotFound(id))?;
        let draft = CombatantDraft::from_combatant(combatant);
        self.editing = Some(id);
        Ok(draft)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Save the edit form onto the combatant opened by [`Self::begin_edit`]
    pub fn commit_edit(&mut self, draft: &CombatantDraft) -> Result<()> {
        let id = self.editing.ok_or(TrackerError::NoEditTarget)?;
        self.edit_combatant(id, draft)?;
        self.editing = None;
        Ok(())
    }

    // === INTERNALS ===

    fn find_mut(&mut self, id: CombatantId) -> Result<&mut Combatant> {
        self.state
            .combatants
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(TrackerError::CombatantNotFound(id))
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.state) {
            tracing::warn!("Failed to save tracker state: {}", e);
        }
    }
}
