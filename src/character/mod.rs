//! Character data: archetypes, the level-derived stat model and the
//! persistent player record.

pub mod archetype;
pub mod player;
pub mod stats;

pub use archetype::Archetype;
pub use player::{Player, PlayerUpdate};
pub use stats::{derive_base_stats, xp_for_next_level, BaseStats};
