//! High-score bookkeeping seam
//!
//! The session only needs "read the snapshot" and "record this score". Persistent
//! implementations live outside the engine; [`InMemoryHighScores`] backs tests and
//! throwaway sessions.

use crate::types::HighScoreSnapshot;

pub trait HighScoreBook {
    /// Current snapshot, normalized so that `overall >= max(per_set)`
    fn snapshot(&mut self) -> HighScoreSnapshot;

    /// Store `score` for `block_set_id` only if it strictly beats the stored value.
    /// Returns the snapshot after the update.
    fn update_if_greater(&mut self, block_set_id: &str, score: u32) -> HighScoreSnapshot;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryHighScores {
    snapshot: HighScoreSnapshot,
}

impl InMemoryHighScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: HighScoreSnapshot) -> Self {
        Self {
            snapshot: snapshot.normalized(),
        }
    }
}

impl HighScoreBook for InMemoryHighScores {
    fn snapshot(&mut self) -> HighScoreSnapshot {
        self.snapshot.clone()
    }

    fn update_if_greater(&mut self, block_set_id: &str, score: u32) -> HighScoreSnapshot {
        self.snapshot.record(block_set_id, score);
        self.snapshot.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_never_decreases() {
        let mut book = InMemoryHighScores::new();
        book.update_if_greater("classic", 30);
        let s = book.update_if_greater("classic", 20);
        assert_eq!(s.get_for_set("classic"), 30);
        let s = book.update_if_greater("expanded", 50);
        assert_eq!(s.overall, 50);
        assert_eq!(book.snapshot().get_for_set("classic"), 30);
    }

    #[test]
    fn test_with_snapshot_heals_overall() {
        let mut raw = HighScoreSnapshot::default();
        raw.per_set.insert("classic".into(), 80);
        let mut book = InMemoryHighScores::with_snapshot(raw);
        assert_eq!(book.snapshot().overall, 80);
    }
}
