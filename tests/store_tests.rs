//! Persistence tests - high scores, custom block sets and the file store

use std::path::PathBuf;

use blockfit::core::{BlockSetRegistry, Figure, GameSession, SessionConfig};
use blockfit::store::{
    ActiveBlockSet, CustomSetStore, FileStore, FixedClock, HighScoreStore, KeyValueStore,
    MemoryStore, ShapeInput, ShapeInputError, CUSTOM_BLOCK_SETS_KEY, HIGH_SCORES_KEY,
    LEGACY_HIGH_SCORE_KEY,
};
use blockfit::types::{Anchor, CoordinatePair};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("blockfit-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn blueprint(label: &str, text: &str) -> ShapeInput {
    ShapeInput {
        label: label.to_string(),
        blueprint: Some(text.to_string()),
        ..ShapeInput::default()
    }
}

#[test]
fn test_legacy_high_score_migrates_once() {
    let mut mem = MemoryStore::new();
    mem.set(LEGACY_HIGH_SCORE_KEY, "340").unwrap();

    let mut scores = HighScoreStore::new(mem.clone());
    let snap = scores.get_snapshot();
    assert_eq!(snap.overall, 340);
    assert_eq!(snap.get_for_set("classic"), 340);
    assert_eq!(mem.get(LEGACY_HIGH_SCORE_KEY).unwrap(), None);
    assert!(mem.get(HIGH_SCORES_KEY).unwrap().is_some());

    // a second read comes from the new key
    assert_eq!(scores.get_for_set("classic"), 340);
}

#[test]
fn test_malformed_high_scores_read_as_empty() {
    let mut mem = MemoryStore::new();
    mem.set(HIGH_SCORES_KEY, "{not json").unwrap();

    let mut scores = HighScoreStore::new(mem.clone());
    assert_eq!(scores.get_overall(), 0);

    // next write heals the document
    scores.update_if_greater("classic", 50);
    let raw = mem.get(HIGH_SCORES_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["overall"], 50);
}

#[test]
fn test_high_scores_are_monotonic() {
    let mut scores = HighScoreStore::new(MemoryStore::new());
    let updates = [
        ("classic", 30),
        ("expanded", 80),
        ("classic", 20),
        ("classic", 90),
        ("expanded", 10),
        ("custom-x", 0),
    ];

    let mut prev = scores.get_snapshot();
    for (id, score) in updates {
        let next = scores.update_if_greater(id, score);
        assert!(next.overall >= prev.overall);
        for (set, &best) in &prev.per_set {
            assert!(next.get_for_set(set) >= best);
        }
        assert!(next.per_set.values().all(|&v| v <= next.overall));
        prev = next;
    }
    assert_eq!(prev.overall, 90);
    assert_eq!(prev.get_for_set("expanded"), 80);
    assert_eq!(prev.get_for_set("custom-x"), 0);
}

#[test]
fn test_file_store_round_trip() {
    let dir = temp_dir("kv");
    let mut store = FileStore::new(&dir);
    assert_eq!(store.get("blockgame.highScores").unwrap(), None);

    store.set("blockgame.highScores", r#"{"overall":5}"#).unwrap();
    assert!(dir.exists());

    let reopened = FileStore::new(&dir);
    assert_eq!(
        reopened.get("blockgame.highScores").unwrap().as_deref(),
        Some(r#"{"overall":5}"#)
    );

    store.remove("blockgame.highScores").unwrap();
    store.remove("blockgame.highScores").unwrap();
    assert_eq!(reopened.get("blockgame.highScores").unwrap(), None);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_session_high_score_survives_restart() {
    let dir = temp_dir("session");
    let play = || {
        let mut s = GameSession::new(
            SessionConfig::default(),
            BlockSetRegistry::new(),
            Box::new(HighScoreStore::new(FileStore::new(&dir))),
        );
        s.set_tray(vec![Figure::unit(), Figure::unit()]);
        assert!(s.attempt_placement(0, Anchor::new(0, 0)).is_placed());
        assert!(s.attempt_placement(1, Anchor::new(0, 1)).is_placed());
        s.high_score()
    };

    assert_eq!(play(), 20);
    let mut scores = HighScoreStore::new(FileStore::new(&dir));
    assert_eq!(scores.get_for_set("classic"), 20);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_custom_set_rejects_rotated_duplicate() {
    let mut sets = CustomSetStore::with_clock(MemoryStore::new(), FixedClock::new(1_000));
    let set = sets.create("  Tetrominoes ", "").unwrap();
    assert_eq!(set.name, "Tetrominoes");

    sets.add_shape(&set.id, &blueprint("L", "#.\n#.\n##")).unwrap();

    // the L turned a quarter
    let err = sets
        .add_shape(&set.id, &blueprint("L again", "###\n#.."))
        .unwrap_err();
    assert!(matches!(err, ShapeInputError::Collision));
    assert_eq!(err.code(), "shape_collision");

    let err = sets.add_shape(&set.id, &blueprint("", "...")).unwrap_err();
    assert_eq!(err.code(), "no_filled_cells");

    let err = sets.add_shape("custom-missing", &blueprint("I", "####")).unwrap_err();
    assert!(matches!(err, ShapeInputError::UnknownSet(_)));

    let shape = sets
        .add_shape(
            &set.id,
            &ShapeInput {
                label: String::new(),
                coordinates: Some(vec![CoordinatePair::new(3, 3), CoordinatePair::new(4, 3)]),
                ..ShapeInput::default()
            },
        )
        .unwrap();
    assert_eq!(shape.label, "Custom Shape");
    assert_eq!(shape.blueprint, "##");
    assert_eq!(sets.get(&set.id).unwrap().shapes.len(), 2);
}

#[test]
fn test_custom_sets_sync_into_registry() {
    let mem = MemoryStore::new();
    let mut sets = CustomSetStore::with_clock(mem.clone(), FixedClock::new(5_000));
    let set = sets.create("Bars", "long pieces").unwrap();
    let mut input = blueprint("I", "####");
    input.rotation_angles = Some(vec![0, 90]);
    let shape = sets.add_shape(&set.id, &input).unwrap();
    assert_eq!(shape.rotation_angles, vec![0, 90]);

    let mut registry = BlockSetRegistry::new();
    sets.sync_registry(&mut registry);
    assert!(registry.contains(&set.id));
    assert_eq!(registry.roster(&set.id).len(), 2);

    // the stored selection resolves while the set exists
    let mut active = ActiveBlockSet::new(mem.clone(), "classic");
    active.set(&set.id).unwrap();
    assert_eq!(active.resolve(&registry), set.id);

    assert!(sets.delete(&set.id).unwrap());
    sets.sync_registry(&mut registry);
    assert!(!registry.contains(&set.id));
    assert_eq!(active.resolve(&registry), "classic");
}

#[test]
fn test_toggle_rotation_keeps_zero() {
    let mut sets = CustomSetStore::with_clock(MemoryStore::new(), FixedClock::new(0));
    let set = sets.create("", "").unwrap();
    assert_eq!(set.name, "Custom Block Set");
    let shape = sets.add_shape(&set.id, &blueprint("S", ".##\n##.")).unwrap();

    assert_eq!(
        sets.toggle_rotation(&set.id, &shape.id, 90).unwrap(),
        Some(vec![0, 90])
    );
    assert_eq!(
        sets.toggle_rotation(&set.id, &shape.id, 0).unwrap(),
        Some(vec![0, 90])
    );
    assert_eq!(
        sets.toggle_rotation(&set.id, &shape.id, -270).unwrap(),
        Some(vec![0])
    );
    assert_eq!(sets.toggle_rotation(&set.id, "shape-none", 90).unwrap(), None);
}

#[test]
fn test_corrupt_custom_sets_are_ignored() {
    let mut mem = MemoryStore::new();
    mem.set(CUSTOM_BLOCK_SETS_KEY, "[{\"id\": 7}, 12, ").unwrap();
    let mut sets = CustomSetStore::new(mem.clone());
    assert!(sets.list().is_empty());

    mem.set(CUSTOM_BLOCK_SETS_KEY, "{\"id\": \"x\"}").unwrap();
    assert!(sets.list().is_empty());
}
