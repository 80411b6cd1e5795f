//! Combatants - one entry in the initiative roster
//!
//! `is_defeated` is stored for every kind but means two different things:
//! for NPCs and monsters it mirrors `hit_points == 0`; for players it is a
//! manual "unconscious" flag unrelated to hit points.

pub mod draft;
pub mod kind;
pub mod naming;

pub use draft::{parse_form_int, CombatantDraft};
pub use kind::{CombatantKind, Role};

use serde::{Deserialize, Serialize};

use crate::core::types::{CombatantId, HitPoints};
use draft::ResolvedDraft;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub kind: CombatantKind,
    pub role: Role,
    pub armor_class: i32,
    pub initiative: i32,
    pub hit_points: HitPoints,
    pub max_hit_points: HitPoints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance_active: Option<bool>,
    #[serde(default)]
    pub is_defeated: bool,
}

impl Combatant {
    pub(crate) fn from_draft(id: CombatantId, draft: ResolvedDraft) -> Self {
        let tracks_hp = draft.kind.tracks_hit_points();
        let hit_points = draft.hit_points.unwrap_or(draft.max_hit_points);
        Self {
            id,
            name: draft.name,
            kind: draft.kind,
            role: draft.role,
            armor_class: draft.armor_class,
            initiative: draft.initiative,
            hit_points,
            max_hit_points: draft.max_hit_points,
            resistance: draft.resistance,
            resistance_active: tracks_hp.then_some(false),
            is_defeated: tracks_hp && hit_points == 0,
        }
    }

    /// Replace the editable fields, keeping identity.
    ///
    /// NPCs and monsters come out of the form the way they went in on add:
    /// full health (unless the draft overrides it) and resistance switched
    /// off. Players keep their hit points and unconscious flag.
    pub(crate) fn apply_draft(&mut self, draft: ResolvedDraft) {
        let tracks_hp = draft.kind.tracks_hit_points();

        if tracks_hp {
            let hit_points = draft.hit_points.unwrap_or(draft.max_hit_points);
            self.max_hit_points = draft.max_hit_points;
            self.hit_points = hit_points;
            self.resistance_active = Some(false);
            self.is_defeated = hit_points == 0;
        } else {
            self.max_hit_points = self.max_hit_points.max(1);
            self.hit_points = self.hit_points.clamp(0, self.max_hit_points);
            self.resistance_active = None;
        }

        self.name = draft.name;
        self.kind = draft.kind;
        self.role = draft.role;
        self.armor_class = draft.armor_class;
        self.initiative = draft.initiative;
        self.resistance = draft.resistance;
    }

    /// Not defeated (or not unconscious, for players)
    pub fn is_alive(&self) -> bool {
        !self.is_defeated
    }

    /// Resistance currently reducing incoming damage, 0 when switched off
    pub fn active_resistance(&self) -> i32 {
        match (self.resistance, self.resistance_active) {
            (Some(resistance), Some(true)) => resistance,
            _ => 0,
        }
    }

    /// Damage left after flat resistance
    pub fn mitigate(&self, amount: HitPoints) -> HitPoints {
        amount.saturating_sub(self.active_resistance()).max(0)
    }

    /// Apply damage to an NPC or monster; returns the HP actually lost.
    /// Players and non-positive amounts are left alone.
    pub fn take_damage(&mut self, amount: HitPoints) -> HitPoints {
        if amount <= 0 || !self.kind.tracks_hit_points() {
            return 0;
        }

        let before = self.hit_points;
        self.hit_points = before.saturating_sub(self.mitigate(amount)).max(0);
        self.is_defeated = self.hit_points == 0;
        before - self.hit_points
    }

    /// Restore HP up to the maximum; any positive heal brings the
    /// combatant back into the fight. Returns the HP actually gained.
    pub fn heal(&mut self, amount: HitPoints) -> HitPoints {
        if amount <= 0 {
            return 0;
        }

        let before = self.hit_points;
        self.hit_points = before.saturating_add(amount).min(self.max_hit_points);
        self.is_defeated = false;
        self.hit_points - before
    }

    /// Full health, back in the fight
    pub fn restore(&mut self) {
        self.hit_points = self.max_hit_points;
        self.is_defeated = false;
    }

    /// Fresh copy under a new name: full health, resistance switched off
    pub fn duplicate_as(&self, name: String) -> Self {
        let mut copy = self.clone();
        copy.id = CombatantId::new();
        copy.name = name;
        copy.restore();
        if copy.resistance_active.is_some() {
            copy.resistance_active = Some(false);
        }
        copy
    }

    /// Bring a restored record back within its invariants
    pub(crate) fn sanitize(&mut self) {
        self.max_hit_points = self.max_hit_points.max(1);
        self.hit_points = self.hit_points.clamp(0, self.max_hit_points);
        self.armor_class = self.armor_class.max(0);

        if self.kind.tracks_hit_points() {
            self.role = Role::Warrior;
            self.resistance = Some(self.resistance.unwrap_or(0).max(0));
            self.resistance_active = Some(self.resistance_active.unwrap_or(false));
            self.is_defeated = self.hit_points == 0;
        } else {
            self.resistance = None;
            self.resistance_active = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DraftDefaults;

    fn build(draft: CombatantDraft) -> Combatant {
        let resolved = draft.resolve(&DraftDefaults::default()).unwrap();
        Combatant::from_draft(CombatantId::new(), resolved)
    }

    #[test]
    fn test_new_combatant_starts_at_full_health() {
        let player = build(CombatantDraft::player("Aria").max_hit_points(30));
        assert_eq!(player.hit_points, 30);
        assert!(!player.is_defeated);
        assert_eq!(player.resistance, None);
        assert_eq!(player.resistance_active, None);

        let monster = build(CombatantDraft::monster("Goblin").max_hit_points(7));
        assert_eq!(monster.hit_points, 7);
        assert_eq!(monster.resistance, Some(0));
        assert_eq!(monster.resistance_active, Some(false));
    }

    #[test]
    fn test_damage_without_resistance() {
        let mut goblin = build(CombatantDraft::monster("Goblin").max_hit_points(10));
        assert_eq!(goblin.take_damage(4), 4);
        assert_eq!(goblin.hit_points, 6);
        assert!(!goblin.is_defeated);
    }

    #[test]
    fn test_damage_with_active_resistance() {
        let mut golem = build(
            CombatantDraft::monster("Golem")
                .max_hit_points(30)
                .resistance(5),
        );

        // Resistance does nothing until switched on
        golem.take_damage(8);
        assert_eq!(golem.hit_points, 22);

        golem.resistance_active = Some(true);
        golem.take_damage(8);
        assert_eq!(golem.hit_points, 19);

        // Fully absorbed hits leave HP untouched
        assert_eq!(golem.take_damage(3), 0);
        assert_eq!(golem.hit_points, 19);
    }

    #[test]
    fn test_lethal_damage_defeats_and_floors_at_zero() {
        let mut goblin = build(CombatantDraft::monster("Goblin").max_hit_points(10));
        assert_eq!(goblin.take_damage(15), 10);
        assert_eq!(goblin.hit_points, 0);
        assert!(goblin.is_defeated);
    }

    #[test]
    fn test_players_ignore_damage() {
        let mut aria = build(CombatantDraft::player("Aria"));
        assert_eq!(aria.take_damage(50), 0);
        assert_eq!(aria.hit_points, 20);
        assert!(!aria.is_defeated);
    }

    #[test]
    fn test_non_positive_amounts_do_nothing() {
        let mut goblin = build(CombatantDraft::monster("Goblin").max_hit_points(10));
        goblin.take_damage(-5);
        goblin.heal(0);
        assert_eq!(goblin.hit_points, 10);
    }

    #[test]
    fn test_heal_caps_at_max_and_revives() {
        let mut goblin = build(CombatantDraft::monster("Goblin").max_hit_points(10));
        goblin.take_damage(10);
        assert!(goblin.is_defeated);

        assert_eq!(goblin.heal(25), 10);
        assert_eq!(goblin.hit_points, 10);
        assert!(!goblin.is_defeated);
    }

    #[test]
    fn test_heal_wakes_unconscious_player() {
        let mut aria = build(CombatantDraft::player("Aria"));
        aria.is_defeated = true;
        aria.heal(1);
        assert!(!aria.is_defeated);
    }

    #[test]
    fn test_duplicate_resets_state() {
        let mut orc = build(CombatantDraft::monster("Orc").max_hit_points(15).resistance(2));
        orc.resistance_active = Some(true);
        orc.take_damage(20);

        let copy = orc.duplicate_as("Orc 1".into());
        assert_ne!(copy.id, orc.id);
        assert_eq!(copy.name, "Orc 1");
        assert_eq!(copy.hit_points, 15);
        assert!(!copy.is_defeated);
        assert_eq!(copy.resistance, Some(2));
        assert_eq!(copy.resistance_active, Some(false));
    }

    #[test]
    fn test_sanitize_repairs_restored_record() {
        let mut orc = build(CombatantDraft::monster("Orc").max_hit_points(15));
        orc.hit_points = -3;
        orc.is_defeated = false;
        orc.resistance = None;
        orc.sanitize();

        assert_eq!(orc.hit_points, 0);
        assert!(orc.is_defeated);
        assert_eq!(orc.resistance, Some(0));

        let mut aria = build(CombatantDraft::player("Aria"));
        aria.hit_points = 99;
        aria.resistance = Some(3);
        aria.sanitize();
        assert_eq!(aria.hit_points, 20);
        assert_eq!(aria.resistance, None);
    }
}
