//! Gauntlet is a turn-based combat and progression engine: a stat model with
//! four archetypes, a round-loop combat resolver with two damage strategies,
//! XP/gold progression with an attribute point economy, best-of-5
//! single-elimination tournaments, a ranked ladder and tick-driven passive
//! regeneration, all persisted through pluggable stores.
//!
//! The engines are pure over their inputs (combat and progression mutate
//! nothing but the records handed to them); persistence goes through the
//! [`store::PlayerStore`] and [`store::BattleLedger`] traits.

pub mod character;
pub mod combat;
pub mod constants;
pub mod enemies;
pub mod missions;
pub mod progression;
pub mod ranking;
pub mod regen;
pub mod store;
pub mod tournament;

pub use character::{derive_base_stats, Archetype, Player, PlayerUpdate};
pub use combat::{
    resolve_combat, resolve_combat_with_rng, CombatError, CombatLogEntry, CombatOutcome,
    Combatant, DamageFormula, Winner,
};
pub use enemies::EnemyRecord;
pub use missions::{MissionLog, MissionRecord};
pub use progression::{
    apply_outcome, reset_attribute_points, spend_attribute_points, Attribute, ProgressionReport,
    SpendReport,
};
pub use ranking::Ladder;
pub use regen::RegenScheduler;
pub use store::{
    BattleLedger, BattleRecord, JsonFileStore, MemoryLedger, MemoryStore, PlayerStore, StoreError,
};
pub use tournament::{MatchNode, Side, Tournament, TournamentError};
