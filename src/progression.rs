//! Progression: XP awards, the level-up cascade, gold payouts and the
//! attribute point economy.
//!
//! All entry points mutate a `Player` in place and return a report of what
//! changed; writing the record back through a store is the caller's job.

use rand::Rng;
use tracing::debug;

use crate::character::{derive_base_stats, Player};
use crate::combat::CombatOutcome;
use crate::constants::{
    ATTACK_PER_POINT, ATTRIBUTE_POINTS_PER_LEVEL, CRIT_PER_POINT, DEFENSE_PER_POINT,
    GOLD_BONUS_MAX, GOLD_PER_ENEMY_LEVEL, HP_PER_POINT, SPEED_PER_POINT, XP_THRESHOLD_GROWTH,
};
use crate::enemies::EnemyRecord;

/// What a resolved fight did to the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressionReport {
    pub victory: bool,
    pub xp_gained: u64,
    pub gold_gained: u64,
    pub levels_gained: u32,
    /// True when the player ends the fight below max HP and passive
    /// regeneration should be (re)started.
    pub regen_needed: bool,
}

impl ProgressionReport {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// A spendable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Attack,
    Defense,
    Hp,
    CritChance,
    AttackSpeed,
}

/// Outcome of an attribute spend. `consumed` can be below `requested` only
/// on the attack-speed cap path; the difference is never deducted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpendReport {
    pub requested: u32,
    pub consumed: u32,
}

/// Apply a fight outcome to the player with the thread RNG.
pub fn apply_outcome(
    player: &mut Player,
    outcome: &CombatOutcome,
    enemy: &EnemyRecord,
) -> ProgressionReport {
    let mut rng = rand::thread_rng();
    apply_outcome_with_rng(player, outcome, enemy, &mut rng)
}

/// Apply a fight outcome with a provided RNG (the gold bonus roll).
///
/// Victory grants the enemy's XP (cascading level-ups included) and a gold
/// payout. Defeat grants nothing and clamps HP to 1; a defeated player is
/// wounded, never dead.
pub fn apply_outcome_with_rng(
    player: &mut Player,
    outcome: &CombatOutcome,
    enemy: &EnemyRecord,
    rng: &mut impl Rng,
) -> ProgressionReport {
    if !outcome.player_won() {
        player.hp = 1;
        return ProgressionReport {
            victory: false,
            xp_gained: 0,
            gold_gained: 0,
            levels_gained: 0,
            regen_needed: true,
        };
    }

    let levels_gained = grant_xp(player, enemy.reward_xp);
    let gold_gained = roll_gold(enemy, rng);
    player.gold += gold_gained;

    ProgressionReport {
        victory: true,
        xp_gained: enemy.reward_xp,
        gold_gained,
        levels_gained,
        regen_needed: player.hp < player.max_hp,
    }
}

/// Add XP and resolve every level-up it pays for. Each level grants the
/// attribute point allowance and a full heal; the XP threshold grows by
/// 20% per level, floored. Returns the number of levels gained.
pub fn grant_xp(player: &mut Player, amount: u64) -> u32 {
    player.xp += amount;
    let mut levels = 0;

    while player.xp >= player.xp_to_next_level {
        player.xp -= player.xp_to_next_level;
        player.xp_to_next_level =
            (player.xp_to_next_level as f64 * XP_THRESHOLD_GROWTH).floor() as u64;
        player.level += 1;
        player.attribute_points += ATTRIBUTE_POINTS_PER_LEVEL;
        player.restore_hp();
        levels += 1;
        debug!(name = %player.name, level = player.level, "level up");
    }

    levels
}

/// Gold for a kill: `floor(enemy_level * 10 * multiplier * (1 + bonus))`
/// with a uniform bonus in [0, 0.5).
pub fn roll_gold(enemy: &EnemyRecord, rng: &mut impl Rng) -> u64 {
    let bonus = rng.gen_range(0.0..GOLD_BONUS_MAX);
    let base = enemy.level as f64 * GOLD_PER_ENEMY_LEVEL as f64 * enemy.reward_gold_multiplier;
    (base * (1.0 + bonus)).floor() as u64
}

/// Spend attribute points on one attribute.
///
/// If the player does not hold `requested` points the call is a no-op and
/// consumes nothing. Attack speed additionally clamps at the archetype cap:
/// only the points that fit under the cap are consumed, the rest stay with
/// the player.
pub fn spend_attribute_points(
    player: &mut Player,
    attribute: Attribute,
    requested: u32,
) -> SpendReport {
    if requested == 0 || player.attribute_points < requested {
        return SpendReport { requested, consumed: 0 };
    }

    let consumed = match attribute {
        Attribute::Attack => {
            player.attack += ATTACK_PER_POINT * requested;
            requested
        }
        Attribute::Defense => {
            player.physical_defense += DEFENSE_PER_POINT * requested;
            requested
        }
        Attribute::Hp => {
            player.max_hp += HP_PER_POINT * requested;
            player.hp += HP_PER_POINT * requested;
            requested
        }
        Attribute::CritChance => {
            player.crit_chance += CRIT_PER_POINT * requested as f64;
            requested
        }
        Attribute::AttackSpeed => {
            let cap = player.archetype.max_attack_speed();
            // Work in tenths so 0.1 steps stay exact.
            let headroom = ((cap - player.attack_speed) * 10.0).round().max(0.0) as u32;
            let consumed = requested.min(headroom);
            player.attack_speed += SPEED_PER_POINT * consumed as f64;
            consumed
        }
    };

    player.attribute_points -= consumed;
    SpendReport { requested, consumed }
}

/// Revert every spent point: stats back to the level baseline, the full
/// allowance of `3 * level` points restored. Idempotent.
pub fn reset_attribute_points(player: &mut Player) {
    let base = derive_base_stats(player.level);
    player.attack = base.attack;
    player.physical_defense = base.physical_defense;
    player.max_hp = base.hp;
    player.hp = player.hp.min(player.max_hp);
    player.crit_chance = base.crit_chance;
    player.attack_speed = base.attack_speed;
    player.attribute_points = ATTRIBUTE_POINTS_PER_LEVEL * player.level;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Archetype;
    use crate::combat::{CombatOutcome, Winner};
    use crate::enemies;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn won() -> CombatOutcome {
        CombatOutcome {
            winner: Winner::Player,
            rounds: 3,
            log: Vec::new(),
        }
    }

    fn lost() -> CombatOutcome {
        CombatOutcome {
            winner: Winner::Enemy,
            rounds: 3,
            log: Vec::new(),
        }
    }

    #[test]
    fn test_xp_cascade_trace() {
        // 700 XP at level 1: pass 300 (to level 2), then 360 (to level 3),
        // leaving 40 with the next threshold at floor(360 * 1.2) = 432.
        let mut player = Player::new("Orion", Archetype::Knight);
        let levels = grant_xp(&mut player, 700);

        assert_eq!(levels, 2);
        assert_eq!(player.level, 3);
        assert_eq!(player.xp, 40);
        assert_eq!(player.xp_to_next_level, 432);
        assert_eq!(player.attribute_points, 3 + 6);
    }

    #[test]
    fn test_level_up_heals_fully() {
        let mut player = Player::new("Orion", Archetype::Knight);
        player.hp = 5;
        grant_xp(&mut player, 300);
        assert_eq!(player.level, 2);
        assert_eq!(player.hp, player.max_hp);
    }

    #[test]
    fn test_xp_below_threshold_accumulates() {
        let mut player = Player::new("Orion", Archetype::Knight);
        grant_xp(&mut player, 299);
        assert_eq!(player.level, 1);
        assert_eq!(player.xp, 299);
        assert_eq!(player.xp_to_next_level, 300);
    }

    #[test]
    fn test_defeat_clamps_hp_to_one() {
        let mut player = Player::new("Orion", Archetype::Knight);
        player.hp = 0;
        let enemy = enemies::find("Bandit").unwrap();
        let report = apply_outcome(&mut player, &lost(), &enemy);

        assert!(!report.victory);
        assert_eq!(player.hp, 1);
        assert_eq!(report.xp_gained, 0);
        assert_eq!(report.gold_gained, 0);
        assert!(report.regen_needed);
        assert_eq!(player.gold, 0);
    }

    #[test]
    fn test_victory_grants_rewards() {
        let mut player = Player::new("Orion", Archetype::Knight);
        let enemy = enemies::find("Bandit").unwrap(); // level 3, 180 xp, x1.2 gold
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let report = apply_outcome_with_rng(&mut player, &won(), &enemy, &mut rng);

        assert!(report.victory);
        assert_eq!(report.xp_gained, 180);
        assert_eq!(player.xp, 180);
        // base 3 * 10 * 1.2 = 36, bonus in [0, 50%): payout in [36, 54)
        assert!(report.gold_gained >= 36 && report.gold_gained < 54);
        assert_eq!(player.gold, report.gold_gained);
    }

    #[test]
    fn test_regen_needed_when_wounded_after_victory() {
        let mut player = Player::new("Orion", Archetype::Knight);
        player.hp = 100;
        let enemy = enemies::find("Giant Rat").unwrap(); // 80 xp, no level up
        let report = apply_outcome(&mut player, &won(), &enemy);
        assert!(report.regen_needed);
    }

    #[test]
    fn test_gold_roll_bounds() {
        let enemy = enemies::find("Lich King").unwrap(); // level 25, x2.0
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            let gold = roll_gold(&enemy, &mut rng);
            assert!((500..750).contains(&gold), "gold {gold} out of range");
        }
    }

    #[test]
    fn test_spend_attack_and_defense() {
        let mut player = Player::new("Orion", Archetype::Knight);
        player.attribute_points = 5;

        let report = spend_attribute_points(&mut player, Attribute::Attack, 2);
        assert_eq!(report.consumed, 2);
        assert_eq!(player.attack, 20 + 4);

        let report = spend_attribute_points(&mut player, Attribute::Defense, 3);
        assert_eq!(report.consumed, 3);
        assert_eq!(player.physical_defense, 30 + 15);
        assert_eq!(player.attribute_points, 0);
    }

    #[test]
    fn test_spend_hp_raises_current_and_max() {
        let mut player = Player::new("Orion", Archetype::Knight);
        player.attribute_points = 2;
        spend_attribute_points(&mut player, Attribute::Hp, 2);
        assert_eq!(player.max_hp, 270);
        assert_eq!(player.hp, 270);
    }

    #[test]
    fn test_insufficient_points_is_a_noop() {
        let mut player = Player::new("Orion", Archetype::Knight);
        player.attribute_points = 2;
        let report = spend_attribute_points(&mut player, Attribute::Attack, 5);

        assert_eq!(report.consumed, 0);
        assert_eq!(player.attack, 20);
        assert_eq!(player.attribute_points, 2);
    }

    #[test]
    fn test_speed_spend_clamps_at_class_cap() {
        // Knight caps at 3.0. From 2.9 a request of 10 fits one point only;
        // the other nine stay with the player.
        let mut player = Player::new("Orion", Archetype::Knight);
        player.attack_speed = 2.9;
        player.attribute_points = 10;

        let report = spend_attribute_points(&mut player, Attribute::AttackSpeed, 10);
        assert_eq!(report.requested, 10);
        assert_eq!(report.consumed, 1);
        assert!((player.attack_speed - 3.0).abs() < 1e-9);
        assert_eq!(player.attribute_points, 9);
    }

    #[test]
    fn test_speed_spend_at_cap_consumes_nothing() {
        let mut player = Player::new("Orion", Archetype::Berserker);
        player.attack_speed = player.archetype.max_attack_speed();
        player.attribute_points = 4;

        let report = spend_attribute_points(&mut player, Attribute::AttackSpeed, 4);
        assert_eq!(report.consumed, 0);
        assert_eq!(player.attribute_points, 4);
    }

    #[test]
    fn test_reset_restores_baseline_and_allowance() {
        let mut player = Player::new("Orion", Archetype::Knight);
        grant_xp(&mut player, 700); // level 3, 9 points banked
        spend_attribute_points(&mut player, Attribute::Attack, 4);
        spend_attribute_points(&mut player, Attribute::Hp, 2);

        reset_attribute_points(&mut player);

        assert_eq!(player.attack, 20);
        assert_eq!(player.max_hp, 250);
        assert!(player.hp <= player.max_hp);
        assert_eq!(player.attribute_points, 9);

        // A second reset changes nothing.
        let before = player.clone();
        reset_attribute_points(&mut player);
        assert_eq!(player, before);
    }
}
