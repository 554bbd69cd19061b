//! Passive HP regeneration.
//!
//! Tick-driven: the caller owns the clock and feeds elapsed time into
//! [`RegenScheduler::tick`]. One task per player id. Starting a task for a
//! player who already has one supersedes it and resets the timer, so a fresh
//! fight never compounds heals. A task cancels itself silently once the
//! player is back at full HP or no longer exists.

use std::collections::HashMap;

use tracing::debug;

use crate::character::PlayerUpdate;
use crate::constants::{REGEN_FRACTION, REGEN_INTERVAL};
use crate::store::{PlayerStore, StoreError};

#[derive(Debug, Default)]
pub struct RegenScheduler {
    /// Player id to time accumulated since the last heal.
    tasks: HashMap<String, f64>,
}

impl RegenScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule regeneration for a player, superseding any existing task.
    pub fn start(&mut self, player_id: impl Into<String>) {
        let id = player_id.into();
        debug!(player = %id, "regen task started");
        self.tasks.insert(id, 0.0);
    }

    /// Drop a player's task if one exists.
    pub fn cancel(&mut self, player_id: &str) {
        if self.tasks.remove(player_id).is_some() {
            debug!(player = %player_id, "regen task cancelled");
        }
    }

    pub fn is_active(&self, player_id: &str) -> bool {
        self.tasks.contains_key(player_id)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// Advance every task by `delta` time units. Each full interval heals
    /// 2% of max HP (rounded up, clamped to max) through the store.
    pub fn tick(&mut self, delta: f64, store: &mut impl PlayerStore) -> Result<(), StoreError> {
        let ids: Vec<String> = self.tasks.keys().cloned().collect();

        for id in ids {
            let mut elapsed = self.tasks[&id] + delta;

            while elapsed >= REGEN_INTERVAL {
                elapsed -= REGEN_INTERVAL;

                // Reload on every heal: the record may have changed since.
                let player = store.list()?.into_iter().find(|p| p.id == id);
                let Some(player) = player else {
                    self.tasks.remove(&id);
                    break;
                };

                let heal = (player.max_hp as f64 * REGEN_FRACTION).ceil() as u32;
                let hp = (player.hp + heal).min(player.max_hp);
                store.update(
                    &id,
                    &PlayerUpdate {
                        hp: Some(hp),
                        ..PlayerUpdate::default()
                    },
                )?;
                debug!(player = %player.name, hp, "regen heal applied");

                if hp >= player.max_hp {
                    self.tasks.remove(&id);
                    break;
                }
            }

            if let Some(timer) = self.tasks.get_mut(&id) {
                *timer = elapsed;
            }
        }

        Ok(())
    }
}
