//! Integration test: ranked ladder
//!
//! A resolved fight flowing through matchmaking, settlement and the ledger.

use gauntlet::{
    resolve_combat_with_rng, Archetype, BattleLedger, Combatant, DamageFormula, Ladder,
    MemoryLedger, MemoryStore, Player, PlayerStore, Winner,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn populated_store(count: usize) -> MemoryStore {
    let mut store = MemoryStore::new();
    for i in 0..count {
        let mut player = Player::new(format!("Fighter{i}"), Archetype::Berserker);
        player.ranked_points = (i as u32) * 15;
        store.insert(player);
    }
    store
}

#[test]
fn test_matchmaking_prefers_similar_scores() {
    let mut store = populated_store(40);
    let mut ledger = MemoryLedger::new();
    let me = store.get("Fighter20").unwrap().unwrap(); // 300 points
    let ladder = Ladder::new(&mut store, &mut ledger);

    let mut rng = ChaCha8Rng::seed_from_u64(12);
    for _ in 0..100 {
        let opponent = ladder.find_opponent_with_rng(&me, &mut rng).unwrap().unwrap();
        let gap = opponent.ranked_points.abs_diff(me.ranked_points);
        // 13 nearest out of a 15-point grid: never more than 7 steps away.
        assert!(gap <= 105, "drew {} at gap {gap}", opponent.name);
    }
}

#[test]
fn test_full_ranked_fight_flow() {
    let mut store = populated_store(5);
    let mut ledger = MemoryLedger::new();
    let challenger = store.get("Fighter0").unwrap().unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let opponent = {
        let ladder = Ladder::new(&mut store, &mut ledger);
        ladder
            .find_opponent_with_rng(&challenger, &mut rng)
            .unwrap()
            .unwrap()
    };

    let outcome = resolve_combat_with_rng(
        &Combatant::from_player(&challenger),
        &Combatant::from_player(&opponent),
        DamageFormula::FlatDefense,
        &mut rng,
    )
    .unwrap();

    let points_before = (challenger.ranked_points, opponent.ranked_points);
    let mut ladder = Ladder::new(&mut store, &mut ledger);
    let (challenger, opponent) = ladder
        .settle(&challenger, &opponent, outcome.winner, &outcome.log)
        .unwrap();

    match outcome.winner {
        Winner::Player => {
            assert_eq!(challenger.ranked_points, points_before.0 + 30);
            assert_eq!(opponent.ranked_points, points_before.1.saturating_sub(10));
        }
        Winner::Enemy => {
            assert_eq!(challenger.ranked_points, points_before.0.saturating_sub(10));
            assert_eq!(opponent.ranked_points, points_before.1 + 30);
        }
        Winner::Draw => unreachable!("flat-defense fights always produce a winner"),
    }

    // The ledger holds a replayable record.
    let records = ledger.all().unwrap();
    assert_eq!(records.len(), 1);
    assert!(!records[0].id.is_empty());
    let log: Vec<gauntlet::CombatLogEntry> = serde_json::from_str(&records[0].log).unwrap();
    assert_eq!(log.len(), outcome.log.len());
}

#[test]
fn test_settled_points_persist_in_the_store() {
    let mut store = populated_store(2);
    let mut ledger = MemoryLedger::new();
    let p1 = store.get("Fighter0").unwrap().unwrap();
    let p2 = store.get("Fighter1").unwrap().unwrap();

    {
        let mut ladder = Ladder::new(&mut store, &mut ledger);
        ladder.settle(&p1, &p2, Winner::Player, &[]).unwrap();
    }

    assert_eq!(store.get("Fighter0").unwrap().unwrap().ranked_points, 30);
    assert_eq!(store.get("Fighter1").unwrap().unwrap().ranked_points, 5);
}

#[test]
fn test_repeated_losses_floor_at_zero() {
    let mut store = populated_store(2);
    let mut ledger = MemoryLedger::new();

    for _ in 0..5 {
        let p1 = store.get("Fighter0").unwrap().unwrap();
        let p2 = store.get("Fighter1").unwrap().unwrap();
        let mut ladder = Ladder::new(&mut store, &mut ledger);
        ladder.settle(&p1, &p2, Winner::Enemy, &[]).unwrap();
    }

    assert_eq!(store.get("Fighter0").unwrap().unwrap().ranked_points, 0);
    assert_eq!(ledger.for_player(&store.get("Fighter1").unwrap().unwrap().id).unwrap().len(), 5);
}
