//! Integration test: saving and restoring a game on disk

use cloud_quest::persistence::{LoadSource, SaveManager, SaveRecord};
use cloud_quest::{Enemy, EnemyKind, EngineError, GameState, PlayerAction};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

fn temp_save_path() -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let dir = std::env::temp_dir().join(format!(
        "cloud-quest-it-{}-{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    fs::create_dir_all(&dir).unwrap();
    dir.join("save.dat")
}

fn played_game() -> GameState {
    let mut game = GameState::default();
    game.ledger.learn_concept("iam_security").unwrap();
    game.ledger.learn_concept("s3_storage").unwrap();

    let mut session = game
        .start_battle(vec![Enemy::spawn(EnemyKind::SecurityBreach, 1)])
        .unwrap();
    while !session.is_over() {
        let ability = if session.player().cooldowns.is_ready("access_control") {
            "access_control"
        } else {
            "basic_attack"
        };
        session
            .submit(PlayerAction::use_ability(ability, 1))
            .unwrap();
    }
    let summary = session.finish().unwrap();
    game.record_battle(&summary).unwrap();
    game
}

// =============================================================================
// Round trip
// =============================================================================

#[test]
fn test_save_and_load_restores_everything() {
    let path = temp_save_path();
    let manager = SaveManager::with_path(&path);
    let game = played_game();
    assert_eq!(game.ledger.stats().battles_won, 1);

    manager.save(&game).unwrap();
    assert!(manager.save_exists());

    let loaded = manager.load().unwrap();
    assert_eq!(loaded, game);
    assert_eq!(loaded.player.cooldowns, game.player.cooldowns);
    assert!(loaded.ledger.achievements().is_earned("first_victory"));

    manager.delete().unwrap();
    assert!(!manager.save_exists());
}

#[test]
fn test_load_or_default_without_save() {
    let manager = SaveManager::with_path(temp_save_path());
    let outcome = manager.load_or_default();
    assert_eq!(
        outcome.source,
        LoadSource::FreshDefault {
            reason: "no save file".to_string()
        }
    );
    assert_eq!(outcome.state, GameState::default());
}

#[test]
fn test_corrupted_save_starts_fresh() {
    let path = temp_save_path();
    let manager = SaveManager::with_path(&path);
    manager.save(&played_game()).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0xFF;
    fs::write(&path, bytes).unwrap();

    assert!(matches!(manager.load(), Err(EngineError::Deserialization(_))));
    let outcome = manager.load_or_default();
    assert!(matches!(outcome.source, LoadSource::FreshDefault { .. }));
    assert_eq!(outcome.state.ledger.experience(), 0);
}

// =============================================================================
// Record validation
// =============================================================================

#[test]
fn test_record_missing_field_rejected() {
    let json = played_game().save_record().to_json().unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value.as_object_mut().unwrap().remove("learnedConcepts");

    let err = SaveRecord::from_json(&value.to_string()).unwrap_err();
    assert!(matches!(err, EngineError::Deserialization(_)));
}

#[test]
fn test_framed_record_with_unknown_concept_rejected() {
    let path = temp_save_path();
    let mut record = played_game().save_record();
    record.learned_concepts.push("mainframe".to_string());
    fs::write(&path, record.to_bytes().unwrap()).unwrap();

    let err = SaveManager::with_path(&path).load().unwrap_err();
    assert!(matches!(err, EngineError::Deserialization(_)));
}
