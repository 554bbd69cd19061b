//! Combat resolution: fight-ready snapshots, the round loop and the two
//! damage strategies.

pub mod engine;
pub mod types;

pub use engine::{
    calculate_hit, resolve_combat, resolve_combat_with_rng, CombatError, DamageFormula, HitResult,
};
pub use types::{CombatLogEntry, CombatOutcome, Combatant, LogKind, Winner};
