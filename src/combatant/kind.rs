//! Combatant kinds and player roles

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which side of the screen a combatant belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatantKind {
    Player,
    Npc,
    Monster,
}

impl CombatantKind {
    /// NPCs and monsters carry resistance and are defeated at 0 HP.
    /// Players are knocked unconscious by hand instead.
    pub fn tracks_hit_points(&self) -> bool {
        matches!(self, CombatantKind::Npc | CombatantKind::Monster)
    }

    /// Monsters stay off the table until combat starts
    pub fn hidden_in_exploration(&self) -> bool {
        matches!(self, CombatantKind::Monster)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CombatantKind::Player => "player",
            CombatantKind::Npc => "npc",
            CombatantKind::Monster => "monster",
        }
    }
}

impl FromStr for CombatantKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "player" | "pc" => Ok(CombatantKind::Player),
            "npc" => Ok(CombatantKind::Npc),
            "monster" => Ok(CombatantKind::Monster),
            other => Err(format!(
                "Unknown combatant kind: '{}'. Valid kinds: player, npc, monster",
                other
            )),
        }
    }
}

/// Player class archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Warrior,
    Mage,
    Rogue,
    Cleric,
    Ranger,
    Paladin,
    Bard,
    Barbarian,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Warrior,
        Role::Mage,
        Role::Rogue,
        Role::Cleric,
        Role::Ranger,
        Role::Paladin,
        Role::Bard,
        Role::Barbarian,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Warrior => "warrior",
            Role::Mage => "mage",
            Role::Rogue => "rogue",
            Role::Cleric => "cleric",
            Role::Ranger => "ranger",
            Role::Paladin => "paladin",
            Role::Bard => "bard",
            Role::Barbarian => "barbarian",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.label() == wanted)
            .ok_or_else(|| format!("Unknown role: '{}'", s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_npcs_and_monsters_track_hit_points() {
        assert!(!CombatantKind::Player.tracks_hit_points());
        assert!(CombatantKind::Npc.tracks_hit_points());
        assert!(CombatantKind::Monster.tracks_hit_points());
    }

    #[test]
    fn test_only_monsters_hidden_in_exploration() {
        assert!(CombatantKind::Monster.hidden_in_exploration());
        assert!(!CombatantKind::Npc.hidden_in_exploration());
        assert!(!CombatantKind::Player.hidden_in_exploration());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Monster".parse::<CombatantKind>(), Ok(CombatantKind::Monster));
        assert_eq!(" npc ".parse::<CombatantKind>(), Ok(CombatantKind::Npc));
        assert!("dragon".parse::<CombatantKind>().is_err());
    }

    #[test]
    fn test_role_labels_parse_back() {
        for role in Role::ALL {
            assert_eq!(role.label().parse::<Role>(), Ok(role));
        }
        assert_eq!(Role::default(), Role::Warrior);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&CombatantKind::Npc).unwrap();
        assert_eq!(json, "\"npc\"");
    }
}
