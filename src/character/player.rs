//! Persistent player record and its typed partial update.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::character::archetype::Archetype;
use crate::character::stats::derive_base_stats;
use crate::constants::ATTRIBUTE_POINTS_PER_LEVEL;

/// A player as held by the backing store. Created on first login (name is
/// the identity key), mutated by combat, spending and level-ups, never
/// deleted by the engine itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub physical_defense: u32,
    pub crit_chance: f64,
    pub attack_speed: f64,
    pub xp: u64,
    pub xp_to_next_level: u64,
    pub gold: u64,
    pub attribute_points: u32,
    pub ranked_points: u32,
    pub archetype: Archetype,
    pub premium: bool,
}

impl Player {
    /// Fresh level-1 player with baseline stats and the starting point budget.
    pub fn new(name: impl Into<String>, archetype: Archetype) -> Self {
        let base = derive_base_stats(1);
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            level: 1,
            hp: base.hp,
            max_hp: base.hp,
            attack: base.attack,
            physical_defense: base.physical_defense,
            crit_chance: base.crit_chance,
            attack_speed: base.attack_speed,
            xp: 0,
            xp_to_next_level: base.xp_to_next_level,
            gold: 0,
            attribute_points: ATTRIBUTE_POINTS_PER_LEVEL,
            ranked_points: 0,
            archetype,
            premium: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Restore current HP to max.
    pub fn restore_hp(&mut self) {
        self.hp = self.max_hp;
    }
}

/// Enumerated partial update. Only the fields listed here may be mutated
/// through a store; anything else is unrepresentable by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerUpdate {
    pub level: Option<u32>,
    pub hp: Option<u32>,
    pub max_hp: Option<u32>,
    pub attack: Option<u32>,
    pub physical_defense: Option<u32>,
    pub crit_chance: Option<f64>,
    pub attack_speed: Option<f64>,
    pub xp: Option<u64>,
    pub xp_to_next_level: Option<u64>,
    pub gold: Option<u64>,
    pub attribute_points: Option<u32>,
    pub ranked_points: Option<u32>,
    pub premium: Option<bool>,
}

impl PlayerUpdate {
    /// Snapshot every mutable field of a player. Handy after the progression
    /// engine has rewritten the record in place.
    pub fn from_player(player: &Player) -> Self {
        Self {
            level: Some(player.level),
            hp: Some(player.hp),
            max_hp: Some(player.max_hp),
            attack: Some(player.attack),
            physical_defense: Some(player.physical_defense),
            crit_chance: Some(player.crit_chance),
            attack_speed: Some(player.attack_speed),
            xp: Some(player.xp),
            xp_to_next_level: Some(player.xp_to_next_level),
            gold: Some(player.gold),
            attribute_points: Some(player.attribute_points),
            ranked_points: Some(player.ranked_points),
            premium: Some(player.premium),
        }
    }

    /// Apply the set fields to a player record.
    pub fn apply_to(&self, player: &mut Player) {
        if let Some(level) = self.level {
            player.level = level;
        }
        if let Some(hp) = self.hp {
            player.hp = hp;
        }
        if let Some(max_hp) = self.max_hp {
            player.max_hp = max_hp;
        }
        if let Some(attack) = self.attack {
            player.attack = attack;
        }
        if let Some(physical_defense) = self.physical_defense {
            player.physical_defense = physical_defense;
        }
        if let Some(crit_chance) = self.crit_chance {
            player.crit_chance = crit_chance;
        }
        if let Some(attack_speed) = self.attack_speed {
            player.attack_speed = attack_speed;
        }
        if let Some(xp) = self.xp {
            player.xp = xp;
        }
        if let Some(xp_to_next_level) = self.xp_to_next_level {
            player.xp_to_next_level = xp_to_next_level;
        }
        if let Some(gold) = self.gold {
            player.gold = gold;
        }
        if let Some(attribute_points) = self.attribute_points {
            player.attribute_points = attribute_points;
        }
        if let Some(ranked_points) = self.ranked_points {
            player.ranked_points = ranked_points;
        }
        if let Some(premium) = self.premium {
            player.premium = premium;
        }
    }
}
