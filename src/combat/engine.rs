//! Turn-based combat resolution.
//!
//! A fight is a strictly alternating round loop: the attacker always swings
//! first, then the defender, until one side's HP reaches zero. Two damage
//! formulas coexist as named strategies:
//!
//! - `FlatDefense` - the direct player-vs-enemy path. Defense is subtracted
//!   flat from attack (floor 1), crits deal 1.5x. No round cap: both hits
//!   are at least 1, so the loop always terminates.
//! - `PercentDefense` - the bracket-simulation path. Defense mitigates as a
//!   percentage, crits deal 2x, and the fight is capped at 50 rounds; on
//!   exhaustion the winner is drawn uniformly at random and a narrative
//!   decision entry is appended. The random call is the tie-break policy,
//!   not a fallback.
//!
//! Resolution is pure given its RNG: combatant snapshots are cloned and no
//! persistent state is touched. The progression engine consumes the outcome.

use rand::Rng;
use thiserror::Error;

use crate::combat::types::{CombatLogEntry, CombatOutcome, Combatant, LogKind, Winner};
use crate::constants::{BRACKET_CRIT_MULTIPLIER, FLAT_CRIT_MULTIPLIER, MAX_BRACKET_ROUNDS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CombatError {
    /// A side was missing or not fight-ready (hp or max_hp of zero).
    #[error("no combatant on the {0} side")]
    NoCombatant(&'static str),
}

/// The damage strategy a fight is resolved under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageFormula {
    /// Flat defense subtraction, 1.5x crits, uncapped rounds.
    FlatDefense,
    /// Percent defense mitigation, 2x crits, 50-round cap.
    PercentDefense,
}

impl DamageFormula {
    fn crit_multiplier(&self) -> f64 {
        match self {
            DamageFormula::FlatDefense => FLAT_CRIT_MULTIPLIER,
            DamageFormula::PercentDefense => BRACKET_CRIT_MULTIPLIER,
        }
    }

    fn round_cap(&self) -> Option<u32> {
        match self {
            DamageFormula::FlatDefense => None,
            DamageFormula::PercentDefense => Some(MAX_BRACKET_ROUNDS),
        }
    }

    /// Pre-crit damage of one hit. Never below 1.
    pub fn raw_damage(&self, attack: u32, defense: u32) -> u32 {
        match self {
            DamageFormula::FlatDefense => attack.saturating_sub(defense).max(1),
            DamageFormula::PercentDefense => {
                let mitigated = attack as f64 * (1.0 - defense as f64 * 0.01);
                (mitigated.floor() as i64).max(1) as u32
            }
        }
    }
}

/// One swing, after the crit roll.
#[derive(Debug, Clone, Copy)]
pub struct HitResult {
    pub damage: u32,
    pub is_crit: bool,
}

/// Roll a critical hit: uniform [0, 100) against the actor's crit chance.
pub fn roll_crit(crit_chance: f64, rng: &mut impl Rng) -> bool {
    rng.gen_range(0.0..100.0) < crit_chance
}

/// Calculate one hit of `attacker` against `defender` under `formula`.
pub fn calculate_hit(
    attacker: &Combatant,
    defender: &Combatant,
    formula: DamageFormula,
    rng: &mut impl Rng,
) -> HitResult {
    let raw = formula.raw_damage(attacker.attack, defender.defense);
    let is_crit = roll_crit(attacker.crit_chance, rng);
    let damage = if is_crit {
        (raw as f64 * formula.crit_multiplier()).floor() as u32
    } else {
        raw
    };
    HitResult { damage, is_crit }
}

/// Resolve a full fight with the thread RNG.
pub fn resolve_combat(
    attacker: &Combatant,
    defender: &Combatant,
    formula: DamageFormula,
) -> Result<CombatOutcome, CombatError> {
    let mut rng = rand::thread_rng();
    resolve_combat_with_rng(attacker, defender, formula, &mut rng)
}

/// Resolve a full fight with a provided RNG (for deterministic testing).
pub fn resolve_combat_with_rng(
    attacker: &Combatant,
    defender: &Combatant,
    formula: DamageFormula,
    rng: &mut impl Rng,
) -> Result<CombatOutcome, CombatError> {
    if attacker.hp == 0 || attacker.max_hp == 0 {
        return Err(CombatError::NoCombatant("attacker"));
    }
    if defender.hp == 0 || defender.max_hp == 0 {
        return Err(CombatError::NoCombatant("defender"));
    }

    let mut attacker = attacker.clone();
    let mut defender = defender.clone();
    let mut log = Vec::new();
    let mut round: u32 = 1;

    let winner = loop {
        log.push(CombatLogEntry::system(format!("--- Round {round} ---")));

        // Attacker always acts first in a round.
        let hit = calculate_hit(&attacker, &defender, formula, rng);
        defender.take_damage(hit.damage);
        log.push(hit_entry(LogKind::Player, &attacker, &defender, hit));

        if !defender.is_alive() {
            log.push(CombatLogEntry::system(format!(
                "{} is defeated!",
                defender.name
            )));
            break Winner::Player;
        }

        let hit = calculate_hit(&defender, &attacker, formula, rng);
        attacker.take_damage(hit.damage);
        log.push(hit_entry(LogKind::Enemy, &defender, &attacker, hit));

        if !attacker.is_alive() {
            log.push(CombatLogEntry::system(format!(
                "{} is defeated!",
                attacker.name
            )));
            break Winner::Enemy;
        }

        if let Some(cap) = formula.round_cap() {
            if round >= cap {
                // Nobody dropped within the cap: coin-flip decision.
                let winner = if rng.gen_bool(0.5) {
                    Winner::Player
                } else {
                    Winner::Enemy
                };
                let name = match winner {
                    Winner::Player => &attacker.name,
                    _ => &defender.name,
                };
                log.push(CombatLogEntry::system(format!(
                    "Neither fighter falls after {cap} rounds - the judges hand {name} the decision!"
                )));
                break winner;
            }
        }

        round += 1;
    };

    Ok(CombatOutcome { winner, rounds: round, log })
}

fn hit_entry(
    kind: LogKind,
    actor: &Combatant,
    target: &Combatant,
    hit: HitResult,
) -> CombatLogEntry {
    let message = if hit.is_crit {
        format!(
            "{} lands a CRITICAL hit on {} for {} damage!",
            actor.name, target.name, hit.damage
        )
    } else {
        format!(
            "{} hits {} for {} damage",
            actor.name, target.name, hit.damage
        )
    };
    CombatLogEntry::hit(kind, message, actor.attack_speed)
}
