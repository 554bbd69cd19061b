//! Ranked ladder: opponent matchmaking and point settlement.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::character::{Player, PlayerUpdate};
use crate::combat::{CombatLogEntry, Winner};
use crate::constants::{
    FALLBACK_POOL_SIZE, NEARBY_POOL_SIZE, RANKED_LOSS_POINTS, RANKED_WIN_POINTS,
};
use crate::store::{BattleLedger, BattleRecord, PlayerStore, StoreError};

/// Ladder operations over a player store and a battle ledger.
pub struct Ladder<'a, S: PlayerStore, L: BattleLedger> {
    store: &'a mut S,
    ledger: &'a mut L,
}

impl<'a, S: PlayerStore, L: BattleLedger> Ladder<'a, S, L> {
    pub fn new(store: &'a mut S, ledger: &'a mut L) -> Self {
        Self { store, ledger }
    }

    /// Pick a ranked opponent with the thread RNG.
    pub fn find_opponent(&self, player: &Player) -> Result<Option<Player>, StoreError> {
        let mut rng = rand::thread_rng();
        self.find_opponent_with_rng(player, &mut rng)
    }

    /// Pick a ranked opponent: uniform among the 13 players closest in
    /// ranked points. When fewer than 13 others exist the pool widens to up
    /// to 20 arbitrary players, which over a full listing is the same set.
    /// `None` when nobody else is registered.
    pub fn find_opponent_with_rng(
        &self,
        player: &Player,
        rng: &mut impl Rng,
    ) -> Result<Option<Player>, StoreError> {
        let mut others: Vec<Player> = self
            .store
            .list()?
            .into_iter()
            .filter(|p| p.id != player.id)
            .collect();
        if others.is_empty() {
            return Ok(None);
        }

        others.sort_by_key(|p| p.ranked_points.abs_diff(player.ranked_points));
        let pool_size = if others.len() >= NEARBY_POOL_SIZE {
            NEARBY_POOL_SIZE
        } else {
            others.len().min(FALLBACK_POOL_SIZE)
        };
        Ok(others[..pool_size].choose(rng).cloned())
    }

    /// Settle a finished ranked fight: winner +30 points, loser -10 floored
    /// at 0, a draw moves nothing. Both records are written back and the
    /// fight is appended to the ledger. Returns the updated pair.
    pub fn settle(
        &mut self,
        challenger: &Player,
        opponent: &Player,
        winner: Winner,
        log: &[CombatLogEntry],
    ) -> Result<(Player, Player), StoreError> {
        let (challenger_points, opponent_points, winner_id) = match winner {
            Winner::Player => (
                challenger.ranked_points + RANKED_WIN_POINTS,
                opponent.ranked_points.saturating_sub(RANKED_LOSS_POINTS),
                Some(challenger.id.as_str()),
            ),
            Winner::Enemy => (
                challenger.ranked_points.saturating_sub(RANKED_LOSS_POINTS),
                opponent.ranked_points + RANKED_WIN_POINTS,
                Some(opponent.id.as_str()),
            ),
            Winner::Draw => (challenger.ranked_points, opponent.ranked_points, None),
        };

        let challenger = self.store.update(
            &challenger.id,
            &PlayerUpdate {
                ranked_points: Some(challenger_points),
                ..PlayerUpdate::default()
            },
        )?;
        let opponent = self.store.update(
            &opponent.id,
            &PlayerUpdate {
                ranked_points: Some(opponent_points),
                ..PlayerUpdate::default()
            },
        )?;

        self.ledger
            .record(BattleRecord::new(&challenger.id, &opponent.id, winner_id, log)?)?;
        info!(
            challenger = %challenger.name,
            opponent = %opponent.name,
            ?winner,
            "ranked fight settled"
        );

        Ok((challenger, opponent))
    }
}
