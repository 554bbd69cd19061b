//! Single-elimination tournament bracket.
//!
//! Participants are fight-ready snapshots; each bracket node is a best-of-5
//! series (first to 3 wins). Bot-vs-bot nodes are simulated with the
//! percent-defense formula, HP reset to max between matches. A node holding
//! the human player is never auto-simulated; its matches are fought through
//! the regular combat path and reported back with [`Tournament::record_match`].
//! A round only advances once every node in it is decided.

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::combat::{
    resolve_combat_with_rng, CombatError, CombatOutcome, Combatant, DamageFormula,
};
use crate::constants::WINS_NEEDED;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TournamentError {
    #[error("a bracket needs at least two participants, got {0}")]
    TooFewParticipants(usize),

    #[error("cannot pair an odd number of participants ({0})")]
    OddParticipantCount(usize),

    #[error("bracket size must be a power of two, got {0}")]
    FieldNotPowerOfTwo(usize),

    #[error("{undecided} node(s) in the current round are still undecided")]
    RoundIncomplete { undecided: usize },

    #[error("the tournament already has a champion")]
    AlreadyComplete,

    #[error("no bracket node at index {0}")]
    NodeNotFound(usize),

    #[error("the series in node {0} is already decided")]
    SeriesDecided(usize),

    #[error(transparent)]
    Combat(#[from] CombatError),
}

/// Which seat of a node won a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One best-of-5 series between two bracket seats.
#[derive(Debug, Clone)]
pub struct MatchNode {
    pub left: Combatant,
    pub right: Combatant,
    pub left_wins: u32,
    pub right_wins: u32,
    /// Every match fought in this series, in order.
    pub matches: Vec<CombatOutcome>,
}

impl MatchNode {
    fn new(left: Combatant, right: Combatant) -> Self {
        Self {
            left,
            right,
            left_wins: 0,
            right_wins: 0,
            matches: Vec::new(),
        }
    }

    pub fn is_decided(&self) -> bool {
        self.left_wins >= WINS_NEEDED || self.right_wins >= WINS_NEEDED
    }

    /// The series winner, once a seat has three wins.
    pub fn winner(&self) -> Option<&Combatant> {
        if self.left_wins >= WINS_NEEDED {
            Some(&self.left)
        } else if self.right_wins >= WINS_NEEDED {
            Some(&self.right)
        } else {
            None
        }
    }

    fn score(&mut self, side: Side, outcome: CombatOutcome) {
        match side {
            Side::Left => self.left_wins += 1,
            Side::Right => self.right_wins += 1,
        }
        self.matches.push(outcome);
    }
}

/// Bracket state for one tournament.
#[derive(Debug, Clone)]
pub struct Tournament {
    nodes: Vec<MatchNode>,
    round: u32,
    /// Name of the human participant, exempt from auto-simulation.
    human: Option<String>,
}

impl Tournament {
    /// Seed the opening round by pairing participants in order. The count
    /// must be a power of two and at least two; there are no byes. Even
    /// counts that do not halve cleanly (6, 12, ...) are rejected up front,
    /// since they would strand an unpairable winner in a later round.
    pub fn seed(participants: Vec<Combatant>) -> Result<Self, TournamentError> {
        if participants.len() < 2 {
            return Err(TournamentError::TooFewParticipants(participants.len()));
        }
        if participants.len() % 2 != 0 {
            return Err(TournamentError::OddParticipantCount(participants.len()));
        }
        if !participants.len().is_power_of_two() {
            return Err(TournamentError::FieldNotPowerOfTwo(participants.len()));
        }

        let mut nodes = Vec::with_capacity(participants.len() / 2);
        let mut iter = participants.into_iter();
        while let (Some(left), Some(right)) = (iter.next(), iter.next()) {
            nodes.push(MatchNode::new(left, right));
        }
        info!(nodes = nodes.len(), "tournament seeded");

        Ok(Self {
            nodes,
            round: 1,
            human: None,
        })
    }

    /// Mark a participant name as the human player.
    pub fn with_human(mut self, name: impl Into<String>) -> Self {
        self.human = Some(name.into());
        self
    }

    pub fn nodes(&self) -> &[MatchNode] {
        &self.nodes
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// The node the human currently sits in, if any.
    pub fn human_node(&self) -> Option<usize> {
        let name = self.human.as_deref()?;
        self.nodes
            .iter()
            .position(|n| n.left.name == name || n.right.name == name)
    }

    pub fn round_complete(&self) -> bool {
        self.nodes.iter().all(MatchNode::is_decided)
    }

    pub fn is_complete(&self) -> bool {
        self.nodes.len() == 1 && self.nodes[0].is_decided()
    }

    /// The tournament winner, once the final series is decided.
    pub fn champion(&self) -> Option<&Combatant> {
        if self.nodes.len() == 1 {
            self.nodes[0].winner()
        } else {
            None
        }
    }

    /// Report an externally fought match into a node's series.
    pub fn record_match(
        &mut self,
        node: usize,
        side: Side,
        outcome: CombatOutcome,
    ) -> Result<(), TournamentError> {
        let entry = self
            .nodes
            .get_mut(node)
            .ok_or(TournamentError::NodeNotFound(node))?;
        if entry.is_decided() {
            return Err(TournamentError::SeriesDecided(node));
        }
        entry.score(side, outcome);
        Ok(())
    }

    /// Auto-simulate every undecided bot-vs-bot node in the current round.
    pub fn simulate_round(&mut self) -> Result<(), TournamentError> {
        let mut rng = rand::thread_rng();
        self.simulate_round_with_rng(&mut rng)
    }

    /// Auto-simulate with a provided RNG. Nodes containing the human player
    /// are left untouched.
    pub fn simulate_round_with_rng(&mut self, rng: &mut impl Rng) -> Result<(), TournamentError> {
        let human_idx = self.human_node();
        for idx in 0..self.nodes.len() {
            if Some(idx) == human_idx {
                continue;
            }
            while !self.nodes[idx].is_decided() {
                let node = &mut self.nodes[idx];
                // Every match in a series starts from full HP.
                node.left.reset_hp();
                node.right.reset_hp();
                let outcome = resolve_combat_with_rng(
                    &node.left,
                    &node.right,
                    DamageFormula::PercentDefense,
                    rng,
                )?;
                let side = if outcome.player_won() {
                    Side::Left
                } else {
                    Side::Right
                };
                node.score(side, outcome);
            }
            debug!(
                node = idx,
                left = %self.nodes[idx].left.name,
                right = %self.nodes[idx].right.name,
                score = format!("{}-{}", self.nodes[idx].left_wins, self.nodes[idx].right_wins),
                "series decided"
            );
        }
        Ok(())
    }

    /// Pair the round's winners into the next round. Fails without touching
    /// state while any series is undecided.
    pub fn advance_round(&mut self) -> Result<(), TournamentError> {
        if self.is_complete() {
            return Err(TournamentError::AlreadyComplete);
        }
        let undecided = self.nodes.iter().filter(|n| !n.is_decided()).count();
        if undecided > 0 {
            return Err(TournamentError::RoundIncomplete { undecided });
        }

        let mut winners: Vec<Combatant> = self
            .nodes
            .iter()
            .filter_map(|n| n.winner().cloned())
            .collect();
        for winner in &mut winners {
            winner.reset_hp();
        }

        let mut nodes = Vec::with_capacity(winners.len() / 2);
        let mut iter = winners.into_iter();
        while let (Some(left), Some(right)) = (iter.next(), iter.next()) {
            nodes.push(MatchNode::new(left, right));
        }

        self.nodes = nodes;
        self.round += 1;
        info!(round = self.round, nodes = self.nodes.len(), "round advanced");
        Ok(())
    }
}
