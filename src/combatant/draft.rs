//! Combatant drafts - the add/edit form as the tracker receives it
//!
//! Numeric fields stay as raw text until the tracker resolves the draft,
//! so an unreadable value can fall back to a configured default instead
//! of failing the whole submission.

use crate::combatant::kind::{CombatantKind, Role};
use crate::combatant::Combatant;
use crate::core::config::DraftDefaults;
use crate::core::error::{Result, TrackerError};
use crate::core::types::HitPoints;

/// Input for adding or editing a combatant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatantDraft {
    pub name: String,
    pub kind: CombatantKind,
    pub role: Role,
    pub armor_class: String,
    pub initiative: String,
    pub max_hit_points: String,
    pub resistance: String,
    /// Explicit current HP; `None` means full health on add and
    /// "keep what they have" on edit
    pub hit_points: Option<HitPoints>,
}

impl CombatantDraft {
    /// A blank form for the given kind, pre-filled like a fresh dialog
    pub fn new(name: impl Into<String>, kind: CombatantKind) -> Self {
        Self {
            name: name.into(),
            kind,
            role: Role::default(),
            armor_class: "10".into(),
            initiative: "10".into(),
            max_hit_points: "20".into(),
            resistance: "0".into(),
            hit_points: None,
        }
    }

    pub fn player(name: impl Into<String>) -> Self {
        Self::new(name, CombatantKind::Player)
    }

    pub fn npc(name: impl Into<String>) -> Self {
        Self::new(name, CombatantKind::Npc)
    }

    pub fn monster(name: impl Into<String>) -> Self {
        Self::new(name, CombatantKind::Monster)
    }

    /// Pre-fill a draft from an existing combatant (opening the edit dialog)
    pub fn from_combatant(combatant: &Combatant) -> Self {
        Self {
            name: combatant.name.clone(),
            kind: combatant.kind,
            role: combatant.role,
            armor_class: combatant.armor_class.to_string(),
            initiative: combatant.initiative.to_string(),
            max_hit_points: combatant.max_hit_points.to_string(),
            resistance: combatant.resistance.unwrap_or(0).to_string(),
            hit_points: None,
        }
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn armor_class(mut self, value: impl ToString) -> Self {
        self.armor_class = value.to_string();
        self
    }

    pub fn initiative(mut self, value: impl ToString) -> Self {
        self.initiative = value.to_string();
        self
    }

    pub fn max_hit_points(mut self, value: impl ToString) -> Self {
        self.max_hit_points = value.to_string();
        self
    }

    pub fn resistance(mut self, value: impl ToString) -> Self {
        self.resistance = value.to_string();
        self
    }

    pub fn hit_points(mut self, value: HitPoints) -> Self {
        self.hit_points = Some(value);
        self
    }

    /// Apply field rules and fallbacks
    pub(crate) fn resolve(&self, defaults: &DraftDefaults) -> Result<ResolvedDraft> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(TrackerError::EmptyName);
        }

        let tracks_hp = self.kind.tracks_hit_points();
        let max_hit_points = parse_form_int(&self.max_hit_points)
            .unwrap_or(defaults.max_hit_points)
            .max(1);

        Ok(ResolvedDraft {
            name: name.to_string(),
            kind: self.kind,
            role: if tracks_hp { Role::Warrior } else { self.role },
            armor_class: parse_form_int(&self.armor_class)
                .unwrap_or(defaults.armor_class)
                .max(0),
            initiative: parse_form_int(&self.initiative).unwrap_or(defaults.initiative),
            max_hit_points,
            resistance: tracks_hp.then(|| {
                parse_form_int(&self.resistance)
                    .unwrap_or(defaults.resistance)
                    .max(0)
            }),
            hit_points: self.hit_points.map(|hp| hp.clamp(0, max_hit_points)),
        })
    }
}

/// A draft after coercion; every field is within its allowed range
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedDraft {
    pub name: String,
    pub kind: CombatantKind,
    pub role: Role,
    pub armor_class: i32,
    pub initiative: i32,
    pub max_hit_points: HitPoints,
    pub resistance: Option<i32>,
    pub hit_points: Option<HitPoints>,
}

/// Read a number the way a form field does: leading whitespace skipped,
/// optional sign, then as many digits as are there. Trailing junk is
/// ignored; no digits at all (or overflow) yields `None`.
pub fn parse_form_int(text: &str) -> Option<i32> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}
