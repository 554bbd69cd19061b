//! Missions: static kill-count objectives and the per-player progress log.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// What a mission counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionTarget {
    /// Any victory qualifies.
    Any,
    /// Only victories over the named enemy qualify.
    Enemy(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

/// A static mission definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionRecord {
    pub id: u32,
    pub name: String,
    pub target: MissionTarget,
    pub target_count: u32,
    pub reward_xp: u64,
    pub reward_gold: u64,
    pub difficulty: Difficulty,
}

/// The full mission table.
pub fn catalog() -> Vec<MissionRecord> {
    use Difficulty::*;
    use MissionTarget::*;

    vec![
        MissionRecord {
            id: 1,
            name: "First Blood".to_string(),
            target: Any,
            target_count: 1,
            reward_xp: 100,
            reward_gold: 50,
            difficulty: Easy,
        },
        MissionRecord {
            id: 2,
            name: "Pest Control".to_string(),
            target: Enemy("Giant Rat".to_string()),
            target_count: 5,
            reward_xp: 250,
            reward_gold: 100,
            difficulty: Easy,
        },
        MissionRecord {
            id: 3,
            name: "Veteran".to_string(),
            target: Any,
            target_count: 25,
            reward_xp: 1500,
            reward_gold: 600,
            difficulty: Normal,
        },
        MissionRecord {
            id: 4,
            name: "Bone Collector".to_string(),
            target: Enemy("Skeleton Warrior".to_string()),
            target_count: 10,
            reward_xp: 2000,
            reward_gold: 800,
            difficulty: Normal,
        },
        MissionRecord {
            id: 5,
            name: "Regicide".to_string(),
            target: Enemy("Lich King".to_string()),
            target_count: 1,
            reward_xp: 5000,
            reward_gold: 3000,
            difficulty: Hard,
        },
    ]
}

/// Per-player mission progress. Counters only advance while a mission is
/// incomplete; rewards are applied by the caller through the progression
/// engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionLog {
    counts: HashMap<u32, u32>,
    completed: HashSet<u32>,
}

impl MissionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self, mission_id: u32) -> u32 {
        self.counts.get(&mission_id).copied().unwrap_or(0)
    }

    pub fn is_completed(&self, mission_id: u32) -> bool {
        self.completed.contains(&mission_id)
    }

    /// Count a victory over the named enemy against every qualifying
    /// mission. Returns the missions this victory completed.
    pub fn record_victory(&mut self, enemy_name: &str) -> Vec<MissionRecord> {
        let mut newly_completed = Vec::new();

        for mission in catalog() {
            if self.completed.contains(&mission.id) {
                continue;
            }
            let qualifies = match &mission.target {
                MissionTarget::Any => true,
                MissionTarget::Enemy(name) => name == enemy_name,
            };
            if !qualifies {
                continue;
            }

            let count = self.counts.entry(mission.id).or_insert(0);
            *count += 1;
            if *count >= mission.target_count {
                self.completed.insert(mission.id);
                newly_completed.push(mission);
            }
        }

        newly_completed
    }
}
