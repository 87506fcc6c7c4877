//! Figure module - normalized polyomino geometry
//!
//! A figure is a non-empty list of integer points whose minimum x and minimum y are
//! both exactly 0. The constructor validates that invariant; it never normalizes on
//! the caller's behalf. Use [`normalize`] first when the input may be offset.

use thiserror::Error;

use crate::types::{Anchor, CellPos, CoordinatePair};

/// Figure construction / mapping failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FigureError {
    #[error("a figure needs at least one point")]
    Empty,
    #[error("invalid figure: minimum point is ({min_x},{min_y}), expected (0,0)")]
    NotNormalized { min_x: i32, min_y: i32 },
    #[error("invalid figure and offset combination: ({row},{col}) is outside a {size}x{size} grid")]
    OutOfBounds { row: i32, col: i32, size: usize },
}

impl FigureError {
    pub fn code(&self) -> &'static str {
        match self {
            FigureError::Empty => "empty_figure",
            FigureError::NotNormalized { .. } => "invalid_figure",
            FigureError::OutOfBounds { .. } => "figure_out_of_bounds",
        }
    }
}

/// Translate `points` so that min x and min y become 0.
///
/// Pure; the input is left untouched. An empty input yields an empty output.
/// Offsets wider than `i32::MAX` saturate; check [`extent`] first for untrusted input.
pub fn normalize(points: &[CoordinatePair]) -> Vec<CoordinatePair> {
    let Some(min_x) = points.iter().map(|p| p.x).min() else {
        return Vec::new();
    };
    let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
    points
        .iter()
        .map(|p| CoordinatePair::new(p.x.saturating_sub(min_x), p.y.saturating_sub(min_y)))
        .collect()
}

/// Bounding-box `(width, height)` of `points`, computed without overflow.
///
/// None for an empty input.
pub fn extent(points: &[CoordinatePair]) -> Option<(u64, u64)> {
    let min_x = points.iter().map(|p| p.x).min()?;
    let max_x = points.iter().map(|p| p.x).max()?;
    let min_y = points.iter().map(|p| p.y).min()?;
    let max_y = points.iter().map(|p| p.y).max()?;
    let width = (max_x as i64 - min_x as i64 + 1) as u64;
    let height = (max_y as i64 - min_y as i64 + 1) as u64;
    Some((width, height))
}

/// Screen-space rectangle for one figure cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Immutable normalized polyomino
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Figure {
    points: Vec<CoordinatePair>,
    max_x: i32,
    max_y: i32,
}

impl Figure {
    /// Validate and wrap an already-normalized point list.
    pub fn new(points: Vec<CoordinatePair>) -> Result<Self, FigureError> {
        if points.is_empty() {
            return Err(FigureError::Empty);
        }

        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;
        for p in &points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        if min_x != 0 || min_y != 0 {
            return Err(FigureError::NotNormalized { min_x, min_y });
        }

        Ok(Self {
            points,
            max_x,
            max_y,
        })
    }

    /// The single-cell figure
    pub fn unit() -> Self {
        Self {
            points: vec![CoordinatePair::new(0, 0)],
            max_x: 0,
            max_y: 0,
        }
    }

    /// Normalize then construct. Fails only for empty input.
    pub fn from_points(points: &[CoordinatePair]) -> Result<Self, FigureError> {
        Self::new(normalize(points))
    }

    /// Points in construction order
    pub fn points(&self) -> &[CoordinatePair] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn width(&self) -> usize {
        self.max_x as usize + 1
    }

    pub fn height(&self) -> usize {
        self.max_y as usize + 1
    }

    /// Always 0 for a constructed figure
    pub fn min_x(&self) -> i32 {
        0
    }

    /// Always 0 for a constructed figure
    pub fn min_y(&self) -> i32 {
        0
    }

    pub fn max_x(&self) -> i32 {
        self.max_x
    }

    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    /// Canonical rotation-equivalence key of this figure's point set
    pub fn key(&self) -> String {
        crate::rotation::canonical_key(&self.points)
    }

    /// Grid cells covered when the figure's origin sits at `anchor` on an `n x n` grid.
    ///
    /// Fails if any covered cell falls outside the grid.
    pub fn grid_cells(&self, n: usize, anchor: Anchor) -> Result<Vec<CellPos>, FigureError> {
        self.points
            .iter()
            .map(|&p| {
                let target = anchor.offset(p).ok_or(FigureError::OutOfBounds {
                    row: anchor.row.saturating_add(p.y),
                    col: anchor.col.saturating_add(p.x),
                    size: n,
                })?;
                if target.row < 0
                    || target.col < 0
                    || target.row as usize >= n
                    || target.col as usize >= n
                {
                    return Err(FigureError::OutOfBounds {
                        row: target.row,
                        col: target.col,
                        size: n,
                    });
                }
                Ok(CellPos::new(target.row as usize, target.col as usize))
            })
            .collect()
    }

    /// Map each point into a `board_size`-pixel square split into `n` cells.
    ///
    /// `world = (grid + offset) / n * board_size`; each rectangle is `cell_size` wide.
    pub fn to_game_cells(
        &self,
        board_size: f32,
        n: usize,
        cell_size: f32,
        offset: CoordinatePair,
    ) -> Result<Vec<GameRect>, FigureError> {
        let anchor = Anchor::new(offset.y, offset.x);
        let cells = self.grid_cells(n, anchor)?;
        Ok(cells
            .into_iter()
            .map(|pos| GameRect {
                x: pos.col as f32 / n as f32 * board_size,
                y: pos.row as f32 / n as f32 * board_size,
                width: cell_size,
                height: cell_size,
            })
            .collect())
    }
}
