//! Persistence for the block placement engine
//!
//! Everything is stored as JSON strings in a [`KeyValueStore`]:
//!
//! | Key | Document |
//! |-----|----------|
//! | `blockgame.highScores` | `{"overall": n, "perSet": {...}}` |
//! | `blockgame.highScore` | legacy scalar, migrated on first read |
//! | `blockgame.customBlockSets` | array of custom block set records |
//! | `blockgame.activeBlockSet` | bare block set id |
//!
//! Corrupt documents never fail a read; they log a `[Store]` line on stderr and
//! read as empty.

pub mod active;
pub mod clock;
pub mod config;
pub mod custom_sets;
pub mod high_score;
pub mod kv;

pub use active::{ActiveBlockSet, ACTIVE_BLOCK_SET_KEY};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::StoreConfig;
pub use custom_sets::{
    CustomBlockSetRecord, CustomSetStore, CustomShapeRecord, PointRecord, ShapeInput,
    ShapeInputError, CUSTOM_BLOCK_SETS_KEY,
};
pub use high_score::{HighScoreStore, HIGH_SCORES_KEY, LEGACY_HIGH_SCORE_KEY};
pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
