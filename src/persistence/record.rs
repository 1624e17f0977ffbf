//! Versioned save record and its checksummed byte framing.
//!
//! Every field of [`SaveRecord`] is required: a payload missing any key is
//! rejected instead of being filled with defaults.
//!
//! Byte layout:
//! - Version magic (8 bytes, LE)
//! - Payload length (4 bytes, LE)
//! - JSON payload (variable length)
//! - SHA256 checksum over the three parts above (32 bytes)

use crate::achievements::{get_achievement_def, Achievements};
use crate::combat::{CooldownTable, PlayerState};
use crate::concepts::{get_ability, get_concept};
use crate::core::config::LevelCurve;
use crate::core::constants::{SAVE_SCHEMA_VERSION, SAVE_VERSION_MAGIC, STARTING_LEVEL_ID};
use crate::core::error::{EngineError, Result};
use crate::progression::{
    get_level, unlocked_abilities_for, BattleStats, LevelUnlocks, ProgressionState,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

const MAGIC_LEN: usize = 8;
const LENGTH_LEN: usize = 4;
const CHECKSUM_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRecord {
    pub id: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    pub schema_version: u32,
    pub experience: u64,
    pub level: u32,
    pub learned_concepts: Vec<String>,
    pub cooldowns: BTreeMap<String, u32>,
    pub achievements: Vec<AchievementRecord>,
    pub unlocked_levels: Vec<u32>,
    pub health: u32,
    pub max_health: u32,
    pub stats: BattleStats,
}

impl SaveRecord {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Frames the record as magic, length, JSON payload and checksum.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let data = serde_json::to_vec(self)?;
        let data_len = u32::try_from(data.len()).map_err(|_| {
            EngineError::InvariantViolation("save payload exceeds 4 GiB".to_string())
        })?;

        // Compute checksum over version + length + data
        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut bytes = Vec::with_capacity(MAGIC_LEN + LENGTH_LEN + data.len() + CHECKSUM_LEN);
        bytes.extend_from_slice(&SAVE_VERSION_MAGIC.to_le_bytes());
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.extend_from_slice(&data);
        bytes.extend_from_slice(&checksum);
        Ok(bytes)
    }

    /// Parses framed bytes, verifying magic, length and checksum.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (version_bytes, rest) = split(bytes, MAGIC_LEN, "version magic")?;
        let mut magic = [0u8; MAGIC_LEN];
        magic.copy_from_slice(version_bytes);
        let version = u64::from_le_bytes(magic);
        if version != SAVE_VERSION_MAGIC {
            return Err(EngineError::Deserialization(format!(
                "invalid save version: expected 0x{SAVE_VERSION_MAGIC:016X}, got 0x{version:016X}"
            )));
        }

        let (length_bytes, rest) = split(rest, LENGTH_LEN, "payload length")?;
        let mut length = [0u8; LENGTH_LEN];
        length.copy_from_slice(length_bytes);
        let data_len = u32::from_le_bytes(length) as usize;

        let (data, rest) = split(rest, data_len, "payload")?;
        let (stored_checksum, trailing) = split(rest, CHECKSUM_LEN, "checksum")?;
        if !trailing.is_empty() {
            return Err(EngineError::Deserialization(format!(
                "{} unexpected bytes after checksum",
                trailing.len()
            )));
        }

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(data);
        let computed_checksum = hasher.finalize();
        if stored_checksum != computed_checksum.as_slice() {
            return Err(EngineError::Deserialization(
                "checksum verification failed".to_string(),
            ));
        }

        Ok(serde_json::from_slice(data)?)
    }
}

fn split<'b>(bytes: &'b [u8], len: usize, what: &str) -> Result<(&'b [u8], &'b [u8])> {
    if bytes.len() < len {
        return Err(EngineError::Deserialization(format!(
            "save truncated while reading {what}"
        )));
    }
    Ok(bytes.split_at(len))
}

/// Captures the persistent parts of the game.
pub fn serialize(
    player: &PlayerState,
    progression: &ProgressionState,
    levels: &LevelUnlocks,
) -> SaveRecord {
    SaveRecord {
        schema_version: SAVE_SCHEMA_VERSION,
        experience: progression.experience,
        level: progression.level,
        learned_concepts: progression.learned_concepts.iter().cloned().collect(),
        cooldowns: player
            .cooldowns
            .iter()
            .map(|(id, turns)| (id.to_string(), turns))
            .collect(),
        achievements: progression
            .achievements
            .iter()
            .map(|(id, earned)| AchievementRecord {
                id: id.to_string(),
                timestamp: earned.earned_at,
            })
            .collect(),
        unlocked_levels: levels.iter().collect(),
        health: player.health,
        max_health: player.max_health,
        stats: progression.stats.clone(),
    }
}

/// Restores state from a record using the default level curve.
pub fn deserialize(record: SaveRecord) -> Result<(PlayerState, ProgressionState, LevelUnlocks)> {
    deserialize_with_curve(record, &LevelCurve::default())
}

/// Restores state from a record, rejecting anything the game could not
/// have produced.
pub fn deserialize_with_curve(
    record: SaveRecord,
    curve: &LevelCurve,
) -> Result<(PlayerState, ProgressionState, LevelUnlocks)> {
    if record.schema_version != SAVE_SCHEMA_VERSION {
        return Err(EngineError::Deserialization(format!(
            "unsupported schema version {} (expected {SAVE_SCHEMA_VERSION})",
            record.schema_version
        )));
    }
    let expected_level = curve.level_for_experience(record.experience);
    if record.level != expected_level {
        return Err(EngineError::Deserialization(format!(
            "level {} does not match {} experience (expected {expected_level})",
            record.level, record.experience
        )));
    }
    if record.max_health == 0 {
        return Err(EngineError::Deserialization(
            "max health must be positive".to_string(),
        ));
    }
    if record.health > record.max_health {
        return Err(EngineError::Deserialization(format!(
            "health {} exceeds max health {}",
            record.health, record.max_health
        )));
    }

    let mut learned = BTreeSet::new();
    for id in record.learned_concepts {
        get_concept(&id).map_err(|_| unknown("concept", &id))?;
        if learned.contains(&id) {
            return Err(duplicate("concept", &id));
        }
        learned.insert(id);
    }
    let unlocked_abilities = unlocked_abilities_for(&learned)?;

    let mut cooldowns = CooldownTable::new();
    for (id, turns) in record.cooldowns {
        get_ability(&id).map_err(|_| unknown("ability", &id))?;
        cooldowns.set(id, turns);
    }

    let mut achievements = Achievements::default();
    for earned in record.achievements {
        let def = get_achievement_def(&earned.id)
            .ok_or_else(|| unknown("achievement", &earned.id))?;
        if !achievements.earn(def.id, earned.timestamp) {
            return Err(duplicate("achievement", &earned.id));
        }
    }

    let mut levels = BTreeSet::new();
    for id in record.unlocked_levels {
        get_level(id).ok_or_else(|| unknown("level", &id.to_string()))?;
        if !levels.insert(id) {
            return Err(duplicate("level", &id.to_string()));
        }
    }
    if !levels.contains(&STARTING_LEVEL_ID) {
        return Err(EngineError::Deserialization(format!(
            "starting level {STARTING_LEVEL_ID} missing from unlocked levels"
        )));
    }
    let levels: LevelUnlocks = levels.into_iter().collect();

    for id in record.stats.abilities_used.iter() {
        get_ability(id).map_err(|_| unknown("ability", id))?;
    }

    let player = PlayerState {
        health: record.health,
        max_health: record.max_health,
        cooldowns,
    };
    let progression = ProgressionState {
        experience: record.experience,
        level: record.level,
        learned_concepts: learned,
        unlocked_abilities,
        achievements,
        stats: record.stats,
    };
    Ok((player, progression, levels))
}

fn unknown(kind: &str, id: &str) -> EngineError {
    EngineError::Deserialization(format!("unknown {kind} id {id}"))
}

fn duplicate(kind: &str, id: &str) -> EngineError {
    EngineError::Deserialization(format!("duplicate {kind} id {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::EnemyKind;

    fn sample() -> (PlayerState, ProgressionState, LevelUnlocks) {
        let mut player = PlayerState::new(100);
        player.take_damage(35);
        player.cooldowns.set("data_backup", 2);

        let mut progression = ProgressionState {
            experience: 250,
            level: 3,
            ..ProgressionState::default()
        };
        progression.learned_concepts.insert("s3_storage".to_string());
        progression.unlocked_abilities.insert("data_backup".to_string());
        progression.achievements.earn("first_concept", 1_700_000_000);
        progression.stats.record_defeat(EnemyKind::DataLossDemon);
        progression.stats.battles_won = 1;

        let mut levels = LevelUnlocks::default();
        levels.unlock(2);
        (player, progression, levels)
    }

    #[test]
    fn test_round_trip() {
        let (player, progression, levels) = sample();
        let record = serialize(&player, &progression, &levels);
        let restored = deserialize(record).unwrap();
        assert_eq!(restored, (player, progression, levels));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let (player, progression, levels) = sample();
        let json = serialize(&player, &progression, &levels).to_json().unwrap();
        assert!(json.contains("\"schemaVersion\""));
        assert!(json.contains("\"learnedConcepts\""));
        assert!(json.contains("\"unlockedLevels\""));
        assert!(json.contains("\"maxHealth\""));
    }

    #[test]
    fn test_missing_field_rejected() {
        let (player, progression, levels) = sample();
        let json = serialize(&player, &progression, &levels).to_json().unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value.as_object_mut().unwrap().remove("cooldowns");

        let result = SaveRecord::from_json(&value.to_string());
        assert!(matches!(result, Err(EngineError::Deserialization(_))));
    }

    #[test]
    fn test_wrong_schema_version_rejected() {
        let (player, progression, levels) = sample();
        let mut record = serialize(&player, &progression, &levels);
        record.schema_version = 99;
        assert!(matches!(
            deserialize(record),
            Err(EngineError::Deserialization(_))
        ));
    }

    #[test]
    fn test_inconsistent_level_rejected() {
        let (player, progression, levels) = sample();
        let mut record = serialize(&player, &progression, &levels);
        record.level = 7;
        assert!(matches!(
            deserialize(record),
            Err(EngineError::Deserialization(_))
        ));
    }

    #[test]
    fn test_duplicate_concept_rejected() {
        let (player, progression, levels) = sample();
        let mut record = serialize(&player, &progression, &levels);
        record.learned_concepts.push("s3_storage".to_string());
        assert!(matches!(
            deserialize(record),
            Err(EngineError::Deserialization(_))
        ));
    }

    #[test]
    fn test_duplicate_achievement_rejected() {
        let (player, progression, levels) = sample();
        let mut record = serialize(&player, &progression, &levels);
        record.achievements.push(AchievementRecord {
            id: "first_concept".to_string(),
            timestamp: 1_800_000_000,
        });
        assert!(matches!(
            deserialize(record),
            Err(EngineError::Deserialization(_))
        ));
    }

    #[test]
    fn test_duplicate_level_rejected() {
        let (player, progression, levels) = sample();
        let mut record = serialize(&player, &progression, &levels);
        record.unlocked_levels.push(2);
        assert!(deserialize(record).is_err());
    }

    #[test]
    fn test_missing_starting_level_rejected() {
        let (player, progression, levels) = sample();
        let mut record = serialize(&player, &progression, &levels);
        record.unlocked_levels.retain(|id| *id != STARTING_LEVEL_ID);
        assert_eq!(record.unlocked_levels, vec![2]);
        assert!(matches!(
            deserialize(record),
            Err(EngineError::Deserialization(_))
        ));
    }

    #[test]
    fn test_unknown_ids_rejected() {
        let (player, progression, levels) = sample();
        let base = serialize(&player, &progression, &levels);

        let mut record = base.clone();
        record.learned_concepts.push("mainframe".to_string());
        assert!(deserialize(record).is_err());

        let mut record = base.clone();
        record.cooldowns.insert("fork_bomb".to_string(), 1);
        assert!(deserialize(record).is_err());

        let mut record = base.clone();
        record.achievements.push(AchievementRecord {
            id: "speed_runner".to_string(),
            timestamp: 0,
        });
        assert!(deserialize(record).is_err());

        let mut record = base;
        record.unlocked_levels.push(12);
        assert!(deserialize(record).is_err());
    }

    #[test]
    fn test_health_above_max_rejected() {
        let (player, progression, levels) = sample();
        let mut record = serialize(&player, &progression, &levels);
        record.health = 101;
        assert!(deserialize(record.clone()).is_err());
        record.health = 0;
        record.max_health = 0;
        assert!(deserialize(record).is_err());
    }

    #[test]
    fn test_bytes_round_trip() {
        let (player, progression, levels) = sample();
        let record = serialize(&player, &progression, &levels);
        let bytes = record.to_bytes().unwrap();
        assert_eq!(&bytes[..8], &SAVE_VERSION_MAGIC.to_le_bytes());
        assert_eq!(SaveRecord::from_bytes(&bytes).unwrap(), record);
    }

    #[test]
    fn test_corrupted_bytes_rejected() {
        let (player, progression, levels) = sample();
        let mut bytes = serialize(&player, &progression, &levels)
            .to_bytes()
            .unwrap();
        let middle = bytes.len() / 2;
        bytes[middle] ^= 0xFF;
        assert!(matches!(
            SaveRecord::from_bytes(&bytes),
            Err(EngineError::Deserialization(_))
        ));
    }

    #[test]
    fn test_truncated_bytes_rejected() {
        let (player, progression, levels) = sample();
        let bytes = serialize(&player, &progression, &levels)
            .to_bytes()
            .unwrap();
        assert!(SaveRecord::from_bytes(&bytes[..bytes.len() - 1]).is_err());
        assert!(SaveRecord::from_bytes(&bytes[..4]).is_err());
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let (player, progression, levels) = sample();
        let mut bytes = serialize(&player, &progression, &levels)
            .to_bytes()
            .unwrap();
        bytes[0] ^= 0x01;
        assert!(SaveRecord::from_bytes(&bytes).is_err());
    }
}
