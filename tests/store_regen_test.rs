//! Integration test: file-backed persistence and passive regeneration
//!
//! The JSON file store exercised against a real directory, and the regen
//! scheduler driving heals through a store.

use gauntlet::{
    Archetype, JsonFileStore, Player, PlayerStore, PlayerUpdate, RegenScheduler, StoreError,
};

fn temp_store() -> (tempfile::TempDir, JsonFileStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::with_dir(dir.path()).unwrap();
    (dir, store)
}

// =============================================================================
// JSON file store
// =============================================================================

#[test]
fn test_create_writes_a_readable_save_file() {
    let (dir, mut store) = temp_store();
    let created = store.create("Orion", Archetype::Templar).unwrap();

    // Filenames are sanitized; the record keeps the display name.
    let path = dir.path().join("orion.json");
    assert!(path.exists());

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"version\""));
    assert!(raw.contains("\"last_save_time\""));
    assert!(raw.contains("\"Templar\""));

    let loaded = store.get("Orion").unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn test_update_persists_across_store_instances() {
    let (dir, mut store) = temp_store();
    let player = store.create("Orion", Archetype::Knight).unwrap();

    store
        .update(
            &player.id,
            &PlayerUpdate {
                gold: Some(777),
                level: Some(4),
                ..PlayerUpdate::default()
            },
        )
        .unwrap();

    // A new store over the same directory sees the update.
    let reopened = JsonFileStore::with_dir(dir.path()).unwrap();
    let loaded = reopened.get("Orion").unwrap().unwrap();
    assert_eq!(loaded.gold, 777);
    assert_eq!(loaded.level, 4);
    assert_eq!(loaded.id, player.id);
}

#[test]
fn test_duplicate_create_is_rejected() {
    let (_dir, mut store) = temp_store();
    store.create("Orion", Archetype::Knight).unwrap();
    assert!(matches!(
        store.create("Orion", Archetype::Assassin),
        Err(StoreError::DuplicateName(_))
    ));
}

#[test]
fn test_corrupted_save_is_flagged_on_get_and_skipped_on_list() {
    let (dir, mut store) = temp_store();
    store.create("Good", Archetype::Knight).unwrap();
    std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

    assert!(matches!(store.get("Bad"), Err(StoreError::Corrupted(_))));

    // Listing survives the bad file and still returns the good one.
    let players = store.list().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].name, "Good");
}

#[test]
fn test_delete_removes_the_file() {
    let (dir, mut store) = temp_store();
    store.create("Orion", Archetype::Knight).unwrap();

    assert!(store.delete("Orion").unwrap());
    assert!(!dir.path().join("orion.json").exists());
    assert!(!store.delete("Orion").unwrap());
}

#[test]
fn test_path_traversal_names_never_reach_the_filesystem() {
    let (dir, mut store) = temp_store();

    let err = store.create("../escaped", Archetype::Knight).unwrap_err();
    assert!(matches!(err, StoreError::InvalidName(_)));

    // Nothing was written next to the store directory.
    assert!(!dir.path().parent().unwrap().join("escaped.json").exists());
    assert!(store.list().unwrap().is_empty());

    // Lookups with hostile names stay inside the base directory too.
    assert!(store.get("../../etc/passwd").unwrap().is_none());
    assert!(!store.delete("../escaped").unwrap());
}

// =============================================================================
// Regen over a file store
// =============================================================================

#[test]
fn test_regen_heals_a_persisted_player_to_full() {
    let (_dir, mut store) = temp_store();
    let player = store.create("Orion", Archetype::Knight).unwrap();
    store
        .update(
            &player.id,
            &PlayerUpdate {
                hp: Some(240),
                ..PlayerUpdate::default()
            },
        )
        .unwrap();

    let mut scheduler = RegenScheduler::new();
    scheduler.start(&player.id);

    // 5 hp per interval: two intervals reach 250 and the task retires.
    scheduler.tick(120.0, &mut store).unwrap();

    let healed = store.get("Orion").unwrap().unwrap();
    assert_eq!(healed.hp, 250);
    assert!(!scheduler.is_active(&player.id));
}

#[test]
fn test_starting_regen_twice_does_not_double_heal() {
    let (_dir, mut store) = temp_store();
    let player = store.create("Orion", Archetype::Knight).unwrap();
    store
        .update(
            &player.id,
            &PlayerUpdate {
                hp: Some(100),
                ..PlayerUpdate::default()
            },
        )
        .unwrap();

    let mut scheduler = RegenScheduler::new();
    scheduler.start(&player.id);
    scheduler.start(&player.id);
    assert_eq!(scheduler.active_count(), 1);

    scheduler.tick(60.0, &mut store).unwrap();
    assert_eq!(store.get("Orion").unwrap().unwrap().hp, 105);
}

fn player_with_hp(store: &mut impl PlayerStore, name: &str, hp: u32) -> Player {
    let player = store.create(name, Archetype::Knight).unwrap();
    store
        .update(
            &player.id,
            &PlayerUpdate {
                hp: Some(hp),
                ..PlayerUpdate::default()
            },
        )
        .unwrap()
}

#[test]
fn test_regen_runs_many_players_independently() {
    let (_dir, mut store) = temp_store();
    let a = player_with_hp(&mut store, "A", 100);
    let b = player_with_hp(&mut store, "B", 249);

    let mut scheduler = RegenScheduler::new();
    scheduler.start(&a.id);
    scheduler.start(&b.id);

    scheduler.tick(60.0, &mut store).unwrap();

    assert_eq!(store.get("A").unwrap().unwrap().hp, 105);
    assert_eq!(store.get("B").unwrap().unwrap().hp, 250);
    assert!(scheduler.is_active(&a.id));
    assert!(!scheduler.is_active(&b.id));
}
