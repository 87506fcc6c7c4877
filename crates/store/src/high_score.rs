//! Persistent high scores
//!
//! Stored as `{"overall": n, "perSet": {"<blockSetId>": n}}` under
//! [`HIGH_SCORES_KEY`]. Reads tolerate anything: garbage entries are dropped and
//! `overall` is healed to at least the best per-set score. A scalar score left under
//! [`LEGACY_HIGH_SCORE_KEY`] is migrated once into the default block set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use blockfit_core::HighScoreBook;
use blockfit_types::{HighScoreSnapshot, DEFAULT_BLOCK_SET_ID};

use crate::kv::{KeyValueStore, StoreError};

pub const HIGH_SCORES_KEY: &str = "blockgame.highScores";
pub const LEGACY_HIGH_SCORE_KEY: &str = "blockgame.highScore";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredHighScores {
    overall: u32,
    per_set: BTreeMap<String, u32>,
}

impl From<&HighScoreSnapshot> for StoredHighScores {
    fn from(value: &HighScoreSnapshot) -> Self {
        Self {
            overall: value.overall,
            per_set: value.per_set.clone(),
        }
    }
}

/// Positive whole score from an arbitrary JSON value, else 0
fn score_from_value(value: &Value) -> u32 {
    match value.as_f64() {
        Some(v) if v.is_finite() && v > 0.0 => v.floor().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// Rebuild a snapshot from any JSON document
pub fn normalize_snapshot_value(value: &Value) -> HighScoreSnapshot {
    let overall = score_from_value(&value["overall"]);
    let mut per_set = BTreeMap::new();
    if let Some(entries) = value["perSet"].as_object() {
        for (key, raw) in entries {
            let score = score_from_value(raw);
            if !key.is_empty() && score > 0 {
                per_set.insert(key.clone(), score);
            }
        }
    }
    HighScoreSnapshot { overall, per_set }.normalized()
}

/// Leading-integer parse: optional sign then digits, anything after is ignored
fn parse_leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

pub struct HighScoreStore<S> {
    store: S,
}

impl<S: KeyValueStore> HighScoreStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_snapshot(&mut self) -> HighScoreSnapshot {
        self.read_snapshot()
    }

    pub fn get_for_set(&mut self, block_set_id: &str) -> u32 {
        self.read_snapshot().get_for_set(block_set_id)
    }

    pub fn get_overall(&mut self) -> u32 {
        self.read_snapshot().overall
    }

    /// Record `score` for `block_set_id` if it strictly beats the stored value.
    ///
    /// Only writes when something changed. Returns the resulting snapshot.
    pub fn update_if_greater(&mut self, block_set_id: &str, score: u32) -> HighScoreSnapshot {
        let mut snapshot = self.read_snapshot();
        if snapshot.record(block_set_id, score) {
            self.write_snapshot(&snapshot);
        }
        snapshot
    }

    fn read_snapshot(&mut self) -> HighScoreSnapshot {
        match self.store.get(HIGH_SCORES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(value) => return normalize_snapshot_value(&value),
                Err(e) => eprintln!("[Store] ignoring malformed high scores: {}", e),
            },
            Ok(None) => {}
            Err(e) => eprintln!("[Store] failed to read high scores: {}", e),
        }

        if let Some(migrated) = self.migrate_legacy() {
            return migrated;
        }
        HighScoreSnapshot::default()
    }

    fn migrate_legacy(&mut self) -> Option<HighScoreSnapshot> {
        let raw = self.store.get(LEGACY_HIGH_SCORE_KEY).ok().flatten()?;
        let legacy = parse_leading_int(&raw).filter(|&n| n > 0)?;
        let legacy = legacy.min(u32::MAX as i64) as u32;

        let mut snapshot = HighScoreSnapshot {
            overall: legacy,
            per_set: BTreeMap::new(),
        };
        snapshot
            .per_set
            .insert(DEFAULT_BLOCK_SET_ID.to_string(), legacy);

        self.write_snapshot(&snapshot);
        if let Err(e) = self.store.remove(LEGACY_HIGH_SCORE_KEY) {
            eprintln!("[Store] failed to remove legacy high score: {}", e);
        }
        eprintln!("[Store] migrated legacy high score {}", legacy);
        Some(snapshot)
    }

    fn write_snapshot(&mut self, snapshot: &HighScoreSnapshot) {
        let result = serde_json::to_string(&StoredHighScores::from(snapshot))
            .map_err(StoreError::from)
            .and_then(|json| self.store.set(HIGH_SCORES_KEY, &json));
        if let Err(e) = result {
            eprintln!("[Store] failed to write high scores: {}", e);
        }
    }
}

impl<S: KeyValueStore> HighScoreBook for HighScoreStore<S> {
    fn snapshot(&mut self) -> HighScoreSnapshot {
        self.get_snapshot()
    }

    fn update_if_greater(&mut self, block_set_id: &str, score: u32) -> HighScoreSnapshot {
        HighScoreStore::update_if_greater(self, block_set_id, score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int(" 17abc"), Some(17));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn test_normalize_drops_garbage() {
        let value: Value = serde_json::from_str(
            r#"{"overall": "lots", "perSet": {"classic": 40.7, "": 99, "neg": -5, "str": "7", "expanded": 12}}"#,
        )
        .unwrap();
        let s = normalize_snapshot_value(&value);
        assert_eq!(s.overall, 40);
        assert_eq!(s.get_for_set("classic"), 40);
        assert_eq!(s.get_for_set("expanded"), 12);
        assert_eq!(s.per_set.len(), 2);
    }

    #[test]
    fn test_non_object_document_is_empty() {
        let s = normalize_snapshot_value(&Value::from(5));
        assert_eq!(s, HighScoreSnapshot::default());
    }

    #[test]
    fn test_update_writes_camel_case() {
        let mem = MemoryStore::new();
        let mut store = HighScoreStore::new(mem.clone());
        store.update_if_greater("classic", 30);
        let raw = mem.get(HIGH_SCORES_KEY).unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["overall"], 30);
        assert_eq!(value["perSet"]["classic"], 30);
    }
}
