//! Shared balance constants used by the engine, the ladder and the simulator.
//!
//! All core balance numbers are defined here. Change once, test everywhere.

// =============================================================================
// BASE STATS - level-derived combatant baseline
// =============================================================================

/// Base max HP at every level.
pub const BASE_HP: u32 = 250;

/// Base attack at every level.
pub const BASE_ATTACK: u32 = 20;

/// Base critical-hit chance percent at every level.
pub const BASE_CRIT_CHANCE: f64 = 15.0;

/// Base attack speed at every level (log-playback pacing only).
pub const BASE_ATTACK_SPEED: f64 = 1.0;

/// Base flat physical defense at every level.
pub const BASE_PHYSICAL_DEFENSE: u32 = 30;

// =============================================================================
// LEVELING & PROGRESSION
// =============================================================================

/// Flat part of the XP requirement for the next level.
pub const XP_CURVE_BASE: u64 = 250;

/// Per-level part of the XP requirement for the next level.
pub const XP_CURVE_PER_LEVEL: u64 = 50;

/// Growth factor applied to the XP threshold on each level-up (floored).
pub const XP_THRESHOLD_GROWTH: f64 = 1.2;

/// Attribute points granted per level gained.
pub const ATTRIBUTE_POINTS_PER_LEVEL: u32 = 3;

/// Gold reward per enemy level before the random bonus roll.
pub const GOLD_PER_ENEMY_LEVEL: u32 = 10;

/// Upper bound (exclusive) of the random gold bonus fraction.
pub const GOLD_BONUS_MAX: f64 = 0.5;

// =============================================================================
// ATTRIBUTE SPENDING - fixed increment per point
// =============================================================================

/// Attack gained per attribute point.
pub const ATTACK_PER_POINT: u32 = 2;

/// Physical defense gained per attribute point.
pub const DEFENSE_PER_POINT: u32 = 5;

/// Max HP (and current HP) gained per attribute point.
pub const HP_PER_POINT: u32 = 10;

/// Crit chance percent gained per attribute point.
pub const CRIT_PER_POINT: f64 = 1.0;

/// Attack speed gained per attribute point, clamped at the class cap.
pub const SPEED_PER_POINT: f64 = 0.1;

// =============================================================================
// COMBAT
// =============================================================================

/// Crit damage multiplier on the flat-defense (player-vs-enemy) path.
pub const FLAT_CRIT_MULTIPLIER: f64 = 1.5;

/// Crit damage multiplier on the percent-defense (bracket) path.
pub const BRACKET_CRIT_MULTIPLIER: f64 = 2.0;

/// Round cap for bracket simulations; exhaustion forces a random decision.
pub const MAX_BRACKET_ROUNDS: u32 = 50;

// =============================================================================
// TOURNAMENT
// =============================================================================

/// Match wins required to take a best-of-5 bracket node.
pub const WINS_NEEDED: u32 = 3;

/// Standard bracket size.
pub const BRACKET_SIZE: usize = 32;

// =============================================================================
// RANKED LADDER
// =============================================================================

/// Ranked points awarded to the winner of a recorded battle.
pub const RANKED_WIN_POINTS: u32 = 30;

/// Ranked points taken from the loser, floored at zero.
pub const RANKED_LOSS_POINTS: u32 = 10;

/// Size of the nearest-score pool opponents are drawn from.
pub const NEARBY_POOL_SIZE: usize = 13;

/// Size of the arbitrary fallback pool when no nearby players exist.
pub const FALLBACK_POOL_SIZE: usize = 20;

// =============================================================================
// PASSIVE REGENERATION
// =============================================================================

/// Time units between regeneration heals.
pub const REGEN_INTERVAL: f64 = 60.0;

/// Fraction of max HP healed per regeneration wake, rounded up.
pub const REGEN_FRACTION: f64 = 0.02;
