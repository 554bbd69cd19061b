//! Character archetypes.
//!
//! Four fixed classes. Each class caps how far attack speed can be pushed
//! with attribute points, how much percent-defense mitigation the bracket
//! formula will honor, and carries a crit damage multiplier.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Archetype {
    Knight,
    Berserker,
    Assassin,
    Templar,
}

impl Archetype {
    pub fn all() -> [Archetype; 4] {
        [
            Archetype::Knight,
            Archetype::Berserker,
            Archetype::Assassin,
            Archetype::Templar,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Knight => "Knight",
            Archetype::Berserker => "Berserker",
            Archetype::Assassin => "Assassin",
            Archetype::Templar => "Templar",
        }
    }

    /// Attack speed ceiling for attribute spending.
    pub fn max_attack_speed(&self) -> f64 {
        match self {
            Archetype::Knight | Archetype::Templar => 3.0,
            Archetype::Berserker | Archetype::Assassin => 5.0,
        }
    }

    /// Percent-defense mitigation ceiling used by the bracket formula.
    pub fn max_defense_reduction(&self) -> u32 {
        match self {
            Archetype::Knight | Archetype::Templar => 50,
            Archetype::Berserker | Archetype::Assassin => 30,
        }
    }

    /// Class crit damage multiplier. Carried as data; the two combat
    /// strategies apply their own fixed multipliers (see combat::engine).
    pub fn crit_multiplier(&self) -> u32 {
        match self {
            Archetype::Knight | Archetype::Berserker => 2,
            Archetype::Assassin | Archetype::Templar => 3,
        }
    }
}

impl Default for Archetype {
    fn default() -> Self {
        Archetype::Knight
    }
}
