//! Backing stores.
//!
//! `PlayerStore` is the persistence contract the engines write through;
//! `BattleLedger` records finished ranked fights. The file-backed store keeps
//! one pretty-printed JSON file per player under `~/.gauntlet/`, wrapped in a
//! versioned save struct so older files can be detected. The in-memory
//! implementations back the tests and the simulator.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::character::{Archetype, Player, PlayerUpdate};
use crate::combat::CombatLogEntry;

/// Save format version, bumped on incompatible layout changes.
const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("save file {0} is corrupted or has an unsupported version")]
    Corrupted(String),

    #[error("player '{0}' already exists")]
    DuplicateName(String),

    #[error("player '{0}' not found")]
    NotFound(String),

    #[error("invalid player name: {0}")]
    InvalidName(String),

    #[error("could not locate a home directory")]
    NoHomeDir,
}

/// Persistence contract for player records.
pub trait PlayerStore {
    /// Look up a player by name (the identity key).
    fn get(&self, name: &str) -> Result<Option<Player>, StoreError>;

    /// Create a fresh level-1 player. Fails on a duplicate name.
    fn create(&mut self, name: &str, archetype: Archetype) -> Result<Player, StoreError>;

    /// Apply a partial update to the player with the given id and return the
    /// updated record.
    fn update(&mut self, id: &str, update: &PlayerUpdate) -> Result<Player, StoreError>;

    /// Every stored player, in no particular order.
    fn list(&self) -> Result<Vec<Player>, StoreError>;

    /// Delete by name. Returns whether a record existed.
    fn delete(&mut self, name: &str) -> Result<bool, StoreError>;
}

/// One finished ranked fight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleRecord {
    pub id: String,
    pub attacker_id: String,
    pub defender_id: String,
    /// `None` on a draw.
    pub winner_id: Option<String>,
    /// The combat log, serialized as JSON for playback.
    pub log: String,
    pub fought_at: DateTime<Utc>,
}

impl BattleRecord {
    pub fn new(
        attacker_id: &str,
        defender_id: &str,
        winner_id: Option<&str>,
        log: &[CombatLogEntry],
    ) -> Result<Self, StoreError> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            attacker_id: attacker_id.to_string(),
            defender_id: defender_id.to_string(),
            winner_id: winner_id.map(str::to_string),
            log: serde_json::to_string(log)?,
            fought_at: Utc::now(),
        })
    }
}

/// Append-only record of ranked fights.
pub trait BattleLedger {
    fn record(&mut self, record: BattleRecord) -> Result<(), StoreError>;

    /// All records in insertion order.
    fn all(&self) -> Result<Vec<BattleRecord>, StoreError>;

    /// Records involving the given player id, in insertion order.
    fn for_player(&self, player_id: &str) -> Result<Vec<BattleRecord>, StoreError>;
}

/// Check a proposed player name before it reaches the filesystem.
pub fn validate_name(name: &str) -> Result<(), StoreError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(StoreError::InvalidName("name cannot be empty".to_string()));
    }

    if trimmed.len() > 16 {
        return Err(StoreError::InvalidName(
            "name must be 16 characters or less".to_string(),
        ));
    }

    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_');

    if !valid_chars {
        return Err(StoreError::InvalidName(
            "name can only contain letters, numbers, spaces, hyphens, and underscores".to_string(),
        ));
    }

    Ok(())
}

/// Map a player name onto a safe save filename.
pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// On-disk save wrapper.
#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    version: u32,
    last_save_time: DateTime<Utc>,
    player: Player,
}

/// One pretty-JSON file per player under the base directory.
pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    /// Store under `~/.gauntlet/`, creating the directory if needed.
    pub fn new() -> Result<Self, StoreError> {
        let home = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
        Self::with_dir(home.join(".gauntlet"))
    }

    /// Store under an explicit directory (tests use a temp dir).
    pub fn with_dir(base_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", sanitize_name(name)))
    }

    fn load(&self, path: &Path) -> Result<Player, StoreError> {
        let data = fs::read_to_string(path)?;
        let save: SaveFile = serde_json::from_str(&data)
            .map_err(|_| StoreError::Corrupted(path.display().to_string()))?;
        if save.version != SAVE_VERSION {
            return Err(StoreError::Corrupted(path.display().to_string()));
        }
        Ok(save.player)
    }

    fn save(&self, player: &Player) -> Result<(), StoreError> {
        let save = SaveFile {
            version: SAVE_VERSION,
            last_save_time: Utc::now(),
            player: player.clone(),
        };
        let path = self.path_for(&player.name);
        fs::write(&path, serde_json::to_string_pretty(&save)?)?;
        info!(name = %player.name, path = %path.display(), "saved player");
        Ok(())
    }
}

impl PlayerStore for JsonFileStore {
    fn get(&self, name: &str) -> Result<Option<Player>, StoreError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Ok(None);
        }
        self.load(&path).map(Some)
    }

    fn create(&mut self, name: &str, archetype: Archetype) -> Result<Player, StoreError> {
        validate_name(name)?;
        if self.path_for(name).exists() {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        let player = Player::new(name, archetype);
        self.save(&player)?;
        Ok(player)
    }

    fn update(&mut self, id: &str, update: &PlayerUpdate) -> Result<Player, StoreError> {
        let mut player = self
            .list()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        update.apply_to(&mut player);
        self.save(&player)?;
        Ok(player)
    }

    fn list(&self) -> Result<Vec<Player>, StoreError> {
        let mut players = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.load(&path) {
                Ok(player) => players.push(player),
                Err(StoreError::Corrupted(p)) => {
                    warn!(path = %p, "skipping corrupted save file");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(players)
    }

    fn delete(&mut self, name: &str) -> Result<bool, StoreError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        info!(name, "deleted player");
        Ok(true)
    }
}

/// HashMap-backed store, keyed by player name.
#[derive(Debug, Default)]
pub struct MemoryStore {
    players: HashMap<String, Player>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a pre-built player record (tests and the simulator).
    pub fn insert(&mut self, player: Player) {
        self.players.insert(player.name.clone(), player);
    }
}

impl PlayerStore for MemoryStore {
    fn get(&self, name: &str) -> Result<Option<Player>, StoreError> {
        Ok(self.players.get(name).cloned())
    }

    fn create(&mut self, name: &str, archetype: Archetype) -> Result<Player, StoreError> {
        if self.players.contains_key(name) {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        let player = Player::new(name, archetype);
        self.players.insert(name.to_string(), player.clone());
        Ok(player)
    }

    fn update(&mut self, id: &str, update: &PlayerUpdate) -> Result<Player, StoreError> {
        let player = self
            .players
            .values_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        update.apply_to(player);
        Ok(player.clone())
    }

    fn list(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.players.values().cloned().collect())
    }

    fn delete(&mut self, name: &str) -> Result<bool, StoreError> {
        Ok(self.players.remove(name).is_some())
    }
}

/// Vec-backed ledger, insertion-ordered.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    records: Vec<BattleRecord>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BattleLedger for MemoryLedger {
    fn record(&mut self, record: BattleRecord) -> Result<(), StoreError> {
        self.records.push(record);
        Ok(())
    }

    fn all(&self) -> Result<Vec<BattleRecord>, StoreError> {
        Ok(self.records.clone())
    }

    fn for_player(&self, player_id: &str) -> Result<Vec<BattleRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.attacker_id == player_id || r.defender_id == player_id)
            .cloned()
            .collect())
    }
}
