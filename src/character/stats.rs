//! Level-derived base stats.
//!
//! The combat baseline is intentionally flat across levels: only the XP
//! requirement for the next level scales. Stat growth comes from attribute
//! points, not from the level formula.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Baseline stats for a character at a given level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub crit_chance: f64,
    pub attack_speed: f64,
    pub physical_defense: u32,
    pub xp_to_next_level: u64,
}

/// Derive the baseline stats for a level.
///
/// Combat stats are constant; `xp_to_next_level = 250 + 50 * level`.
pub fn derive_base_stats(level: u32) -> BaseStats {
    BaseStats {
        hp: BASE_HP,
        attack: BASE_ATTACK,
        crit_chance: BASE_CRIT_CHANCE,
        attack_speed: BASE_ATTACK_SPEED,
        physical_defense: BASE_PHYSICAL_DEFENSE,
        xp_to_next_level: xp_for_next_level(level),
    }
}

/// XP required to advance past the given level.
pub fn xp_for_next_level(level: u32) -> u64 {
    XP_CURVE_BASE + XP_CURVE_PER_LEVEL * level as u64
}
