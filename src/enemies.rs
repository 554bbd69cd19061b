//! Enemy roster.
//!
//! Enemies are static records, not stored entities: a fight snapshots one at
//! full HP and nothing is written back. `reward_xp` feeds the progression
//! engine directly; gold is derived from the enemy level with the record's
//! multiplier applied.

use serde::{Deserialize, Serialize};

/// A static enemy definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyRecord {
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub crit_chance: f64,
    pub attack_speed: f64,
    pub reward_xp: u64,
    /// Scales the level-derived gold payout. 1.0 for ordinary enemies.
    pub reward_gold_multiplier: f64,
}

impl EnemyRecord {
    #[allow(clippy::too_many_arguments)]
    fn new(
        name: &str,
        level: u32,
        hp: u32,
        attack: u32,
        defense: u32,
        crit_chance: f64,
        attack_speed: f64,
        reward_xp: u64,
        reward_gold_multiplier: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            level,
            hp,
            attack,
            defense,
            crit_chance,
            attack_speed,
            reward_xp,
            reward_gold_multiplier,
        }
    }
}

/// The full enemy roster, ordered by level.
pub fn roster() -> Vec<EnemyRecord> {
    vec![
        EnemyRecord::new("Giant Rat", 1, 120, 12, 5, 5.0, 1.2, 80, 1.0),
        EnemyRecord::new("Cave Bat", 2, 150, 15, 8, 10.0, 1.5, 120, 1.0),
        EnemyRecord::new("Bandit", 3, 220, 22, 15, 12.0, 1.0, 180, 1.2),
        EnemyRecord::new("Skeleton Warrior", 5, 300, 28, 25, 10.0, 0.9, 280, 1.0),
        EnemyRecord::new("Orc Raider", 7, 420, 35, 30, 15.0, 1.0, 400, 1.2),
        EnemyRecord::new("Stone Golem", 10, 700, 40, 60, 5.0, 0.6, 650, 1.0),
        EnemyRecord::new("Shadow Assassin", 13, 550, 60, 20, 30.0, 1.8, 900, 1.3),
        EnemyRecord::new("Frost Wyvern", 16, 900, 70, 45, 20.0, 1.1, 1300, 1.5),
        EnemyRecord::new("Dread Knight", 20, 1200, 85, 70, 18.0, 1.0, 1900, 1.5),
        EnemyRecord::new("Lich King", 25, 1600, 110, 80, 25.0, 1.2, 2800, 2.0),
    ]
}

/// Look up an enemy by exact name.
pub fn find(name: &str) -> Option<EnemyRecord> {
    roster().into_iter().find(|e| e.name == name)
}

/// The highest-level enemy at or below the given level, falling back to the
/// weakest entry for fresh characters.
pub fn for_level(level: u32) -> EnemyRecord {
    let roster = roster();
    roster
        .iter()
        .rev()
        .find(|e| e.level <= level)
        .cloned()
        .unwrap_or_else(|| roster[0].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_is_level_ordered() {
        let roster = roster();
        assert!(!roster.is_empty());
        for pair in roster.windows(2) {
            assert!(
                pair[0].level < pair[1].level,
                "{} should be below {}",
                pair[0].name,
                pair[1].name
            );
        }
    }

    #[test]
    fn test_find_by_name() {
        assert!(find("Giant Rat").is_some());
        assert!(find("giant rat").is_none());
        assert!(find("Nonexistent").is_none());
    }

    #[test]
    fn test_for_level_picks_strongest_eligible() {
        assert_eq!(for_level(1).name, "Giant Rat");
        assert_eq!(for_level(4).name, "Bandit");
        assert_eq!(for_level(12).name, "Stone Golem");
        assert_eq!(for_level(99).name, "Lich King");
    }
}
