//! Combat data types: fight-ready snapshots, the narrated log and the
//! outcome consumed by the progression engine.

use serde::{Deserialize, Serialize};

use crate::character::Player;
use crate::enemies::EnemyRecord;

/// Which side of a fight an entry or outcome refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Enemy,
    Draw,
}

/// Attribution of a combat log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    System,
    Player,
    Enemy,
}

/// One line of fight narration. The message text is for display playback
/// only and is never reparsed for logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatLogEntry {
    pub kind: LogKind,
    pub message: String,
    /// Actor attack speed, carried so playback can pace hit entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_speed: Option<f64>,
}

impl CombatLogEntry {
    pub fn system(message: impl Into<String>) -> Self {
        Self {
            kind: LogKind::System,
            message: message.into(),
            attack_speed: None,
        }
    }

    pub fn hit(kind: LogKind, message: impl Into<String>, attack_speed: f64) -> Self {
        Self {
            kind,
            message: message.into(),
            attack_speed: Some(attack_speed),
        }
    }
}

/// Result of a resolved fight. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatOutcome {
    pub winner: Winner,
    pub rounds: u32,
    pub log: Vec<CombatLogEntry>,
}

impl CombatOutcome {
    pub fn player_won(&self) -> bool {
        self.winner == Winner::Player
    }
}

/// A transient fight-ready snapshot of one side of a battle.
///
/// `defense` is interpreted by the active damage formula: flat subtraction
/// on the player-combat path, percent mitigation on the bracket path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub crit_chance: f64,
    pub attack_speed: f64,
}

impl Combatant {
    /// Snapshot a player for a direct (flat-defense) fight, carrying live HP.
    pub fn from_player(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            level: player.level,
            hp: player.hp,
            max_hp: player.max_hp,
            attack: player.attack,
            defense: player.physical_defense,
            crit_chance: player.crit_chance,
            attack_speed: player.attack_speed,
        }
    }

    /// Snapshot a player for the bracket (percent-defense) formula: the
    /// mitigation percentage is clamped at the archetype cap.
    pub fn bracket_from_player(player: &Player) -> Self {
        let cap = player.archetype.max_defense_reduction();
        Self {
            defense: player.physical_defense.min(cap),
            ..Self::from_player(player)
        }
    }

    /// Snapshot an enemy record at full HP.
    pub fn from_enemy(enemy: &EnemyRecord) -> Self {
        Self {
            name: enemy.name.clone(),
            level: enemy.level,
            hp: enemy.hp,
            max_hp: enemy.hp,
            attack: enemy.attack,
            defense: enemy.defense,
            crit_chance: enemy.crit_chance,
            attack_speed: enemy.attack_speed,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn reset_hp(&mut self) {
        self.hp = self.max_hp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Archetype;

    #[test]
    fn test_take_damage_no_underflow() {
        let mut bot = Combatant {
            name: "Test".to_string(),
            level: 1,
            hp: 50,
            max_hp: 50,
            attack: 10,
            defense: 0,
            crit_chance: 0.0,
            attack_speed: 1.0,
        };
        bot.take_damage(80);
        assert_eq!(bot.hp, 0);
        assert!(!bot.is_alive());
        bot.reset_hp();
        assert_eq!(bot.hp, 50);
    }

    #[test]
    fn test_bracket_snapshot_clamps_defense_to_class_cap() {
        let mut player = Player::new("Tank", Archetype::Berserker); // cap 30
        player.physical_defense = 80;

        let direct = Combatant::from_player(&player);
        let bracket = Combatant::bracket_from_player(&player);

        assert_eq!(direct.defense, 80);
        assert_eq!(bracket.defense, 30);
    }

    #[test]
    fn test_player_snapshot_carries_live_hp() {
        let mut player = Player::new("Wounded", Archetype::Knight);
        player.hp = 17;
        let snapshot = Combatant::from_player(&player);
        assert_eq!(snapshot.hp, 17);
        assert_eq!(snapshot.max_hp, 250);
    }
}
