//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the block-placement engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, persistence, rendering adapters).
//!
//! # Coordinate Spaces
//!
//! Two integer coordinate spaces meet in this crate:
//!
//! - **Figure space**: [`CoordinatePair`] `(x, y)` where `x` is the column offset and
//!   `y` the row offset inside a polyomino's bounding box.
//! - **Board space**: [`Anchor`] / [`CellPos`] `(row, col)` on the square board.
//!
//! A figure point `p` placed at anchor `a` lands on `(a.row + p.y, a.col + p.x)`.
//!
//! # Engine Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_SIZE` | 10 | Board is N x N |
//! | `MAX_BOARD_SIZE` | 16 | Upper bound accepted for N |
//! | `TRAY_SIZE` | 3 | Pieces offered at a time |
//! | `PLACEMENT_POINTS` | 10 | Flat score per successful placement |
//! | `BLUEPRINT_MAX_DIMENSION` | 8 | Max rows / row width of a blueprint |
//!
//! # Examples
//!
//! ```
//! use blockfit_types::{Anchor, CoordinatePair, HighScoreSnapshot};
//!
//! let p = CoordinatePair::new(2, 1);
//! let target = Anchor::new(3, 4).offset(p);
//! assert_eq!(target, Some(Anchor::new(4, 6)));
//! assert_eq!(Anchor::new(i32::MAX, 0).offset(p), None);
//!
//! let mut scores = HighScoreSnapshot::default();
//! assert!(scores.record("classic", 40));
//! assert!(!scores.record("classic", 30));
//! assert_eq!(scores.overall, 40);
//! ```

use std::collections::BTreeMap;
use std::fmt;

/// Default board dimension (10 x 10)
pub const DEFAULT_BOARD_SIZE: usize = 10;

/// Largest supported board dimension.
///
/// Bounds the fixed-capacity line buffers used by the completeness scans.
pub const MAX_BOARD_SIZE: usize = 16;

/// Number of pieces offered to the player at once
pub const TRAY_SIZE: usize = 3;

/// Points awarded for every successful placement, regardless of piece size or clears
pub const PLACEMENT_POINTS: u32 = 10;

/// Maximum number of rows, and maximum characters per row, in a shape blueprint
pub const BLUEPRINT_MAX_DIMENSION: usize = 8;

/// Block set used when none is requested or the requested one cannot be resolved
pub const DEFAULT_BLOCK_SET_ID: &str = "classic";

/// The four clockwise rotation angles, in scan order
pub const QUARTER_TURN_ANGLES: [i32; 4] = [0, 90, 180, 270];

/// Integer point of a polyomino: `x` is the column offset, `y` the row offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CoordinatePair {
    pub x: i32,
    pub y: i32,
}

impl CoordinatePair {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for CoordinatePair {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CoordinatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Board position a figure's local origin is placed at.
///
/// Signed so that callers (pointer mapping, scans) can express off-board anchors;
/// the board treats any out-of-range position as "no cell".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Anchor {
    pub row: i32,
    pub col: i32,
}

impl Anchor {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Board position of figure point `p` when the figure sits at this anchor.
    ///
    /// None when the sum leaves the `i32` range; such a target is off every board.
    #[inline]
    pub const fn offset(self, p: CoordinatePair) -> Option<Self> {
        match (self.row.checked_add(p.y), self.col.checked_add(p.x)) {
            (Some(row), Some(col)) => Some(Self { row, col }),
            _ => None,
        }
    }
}

/// In-bounds board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<CellPos> for Anchor {
    fn from(pos: CellPos) -> Self {
        Anchor::new(pos.row as i32, pos.col as i32)
    }
}

/// Neighbor direction on the board grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction pointing back at the origin cell
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// `(row, col)` step for this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Display colour of an occupied cell, as 24-bit RGB.
///
/// The engine never interprets this value; it is carried from the placed piece to
/// the board cells for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellColor(pub u32);

impl CellColor {
    pub const RED: CellColor = CellColor(0xFF0000);
    pub const BLUE: CellColor = CellColor(0x0000FF);
    pub const GREEN: CellColor = CellColor(0x008000);
    pub const YELLOW: CellColor = CellColor(0xFFFF00);
    pub const BLACK: CellColor = CellColor(0x000000);
    pub const WHITE: CellColor = CellColor(0xFFFFFF);

    /// Named palette
    pub const PALETTE: [(&'static str, CellColor); 6] = [
        ("red", CellColor::RED),
        ("blue", CellColor::BLUE),
        ("green", CellColor::GREEN),
        ("yellow", CellColor::YELLOW),
        ("black", CellColor::BLACK),
        ("white", CellColor::WHITE),
    ];

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Look up a palette colour by name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfit_types::CellColor;
    ///
    /// assert_eq!(CellColor::from_name("Red"), Some(CellColor::RED));
    /// assert_eq!(CellColor::from_name("mauve"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::PALETTE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }

    /// `#rrggbb` form
    pub fn to_hex(&self) -> String {
        format!("#{:06x}", self.0 & 0xFF_FFFF)
    }
}

/// Best scores, overall and per block set.
///
/// Invariant: `overall >= max(per_set.values())`. [`HighScoreSnapshot::normalized`]
/// restores it for snapshots read from untrusted storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighScoreSnapshot {
    pub overall: u32,
    pub per_set: BTreeMap<String, u32>,
}

impl HighScoreSnapshot {
    /// Best score for `block_set_id` (0 when never recorded)
    pub fn get_for_set(&self, block_set_id: &str) -> u32 {
        self.per_set.get(block_set_id).copied().unwrap_or(0)
    }

    /// Record `score` for a block set if it strictly beats the stored value.
    ///
    /// Returns true when the snapshot changed. Never lowers any entry.
    pub fn record(&mut self, block_set_id: &str, score: u32) -> bool {
        if score <= self.get_for_set(block_set_id) {
            return false;
        }
        self.per_set.insert(block_set_id.to_string(), score);
        self.overall = self.overall.max(score);
        true
    }

    /// Drop empty keys and zero entries, then recompute `overall = max(overall, per_set..., 0)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfit_types::HighScoreSnapshot;
    ///
    /// let mut s = HighScoreSnapshot::default();
    /// s.per_set.insert("classic".into(), 90);
    /// s.overall = 10; // hand-edited
    /// assert_eq!(s.normalized().overall, 90);
    /// ```
    pub fn normalized(mut self) -> Self {
        self.per_set.retain(|k, v| !k.is_empty() && *v > 0);
        let best = self.per_set.values().copied().max().unwrap_or(0);
        self.overall = self.overall.max(best);
        self
    }
}
