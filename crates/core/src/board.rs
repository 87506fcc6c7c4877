//! Board module - manages the N x N placement grid
//!
//! Cells live in a flat row-major vector (`row * size + col`). Every query here is
//! side-effect free; the only mutators are [`Board::occupy_cells`],
//! [`Board::clear_cells`] and [`Board::clear`], which the session calls explicitly
//! after a successful intersection query.
//!
//! Coordinates: `(row, col)` with `0 <= row, col < size`. Unlike a falling-block
//! well, clearing a line never shifts other cells.

use arrayvec::ArrayVec;

use crate::figure::Figure;
use crate::types::{Anchor, CellColor, CellPos, Direction, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};

/// Indices of complete rows or columns, ascending
pub type LineIndices = ArrayVec<usize, MAX_BOARD_SIZE>;

/// One board position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub occupied: bool,
    pub color: Option<CellColor>,
}

impl Cell {
    fn empty(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            occupied: false,
            color: None,
        }
    }

    pub fn pos(&self) -> CellPos {
        CellPos::new(self.row, self.col)
    }
}

/// The game board - `size` x `size` cells
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board. `size` is clamped to `1..=MAX_BOARD_SIZE`.
    pub fn new(size: usize) -> Self {
        let size = size.clamp(1, MAX_BOARD_SIZE);
        let cells = (0..size * size)
            .map(|i| Cell::empty(i / size, i % size))
            .collect();
        Self { size, cells }
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        let n = self.size as i32;
        if row < 0 || row >= n || col < 0 || col >= n {
            return None;
        }
        Some(row as usize * self.size + col as usize)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at `(row, col)`, or None when out of bounds
    pub fn get_cell(&self, row: i32, col: i32) -> Option<&Cell> {
        self.index(row, col).map(|idx| &self.cells[idx])
    }

    pub fn cell(&self, pos: CellPos) -> Option<&Cell> {
        self.get_cell(pos.row as i32, pos.col as i32)
    }

    /// Adjacent cell in `dir`, or None at the board edge
    pub fn neighbor(&self, pos: CellPos, dir: Direction) -> Option<&Cell> {
        let (dr, dc) = dir.delta();
        self.get_cell(pos.row as i32 + dr, pos.col as i32 + dc)
    }

    /// True if `(row, col)` is in bounds and free
    #[inline]
    pub fn is_free(&self, row: i32, col: i32) -> bool {
        matches!(self.get_cell(row, col), Some(c) if !c.occupied)
    }

    /// True if `(row, col)` is in bounds and occupied
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get_cell(row, col), Some(c) if c.occupied)
    }

    /// Target cells for `figure` placed at `anchor`, in the figure's point order.
    ///
    /// Returns None when any target is out of bounds or already occupied.
    /// Never mutates the board.
    pub fn find_figure_intersection(&self, figure: &Figure, anchor: Anchor) -> Option<Vec<CellPos>> {
        let mut cells = Vec::with_capacity(figure.len());
        for &p in figure.points() {
            let target = anchor.offset(p)?;
            let cell = self.get_cell(target.row, target.col)?;
            if cell.occupied {
                return None;
            }
            cells.push(cell.pos());
        }
        Some(cells)
    }

    /// Allocation-free form of [`Board::find_figure_intersection`]
    #[inline]
    pub fn fits(&self, figure: &Figure, anchor: Anchor) -> bool {
        figure.points().iter().all(|&p| {
            anchor
                .offset(p)
                .is_some_and(|target| self.is_free(target.row, target.col))
        })
    }

    /// Every anchor at which `figure` fits, row-major
    pub fn fit_positions(&self, figure: &Figure) -> Vec<Anchor> {
        let n = self.size as i32;
        let mut out = Vec::new();
        for row in 0..n {
            for col in 0..n {
                let anchor = Anchor::new(row, col);
                if self.fits(figure, anchor) {
                    out.push(anchor);
                }
            }
        }
        out
    }

    /// True if `figure` fits at any anchor. Stops at the first hit.
    pub fn has_fit(&self, figure: &Figure) -> bool {
        let n = self.size as i32;
        (0..n).any(|row| (0..n).any(|col| self.fits(figure, Anchor::new(row, col))))
    }

    /// Check if a row is completely occupied
    pub fn is_row_complete(&self, row: usize) -> bool {
        if row >= self.size {
            return false;
        }
        let start = row * self.size;
        self.cells[start..start + self.size]
            .iter()
            .all(|cell| cell.occupied)
    }

    /// Check if a column is completely occupied
    pub fn is_column_complete(&self, col: usize) -> bool {
        if col >= self.size {
            return false;
        }
        self.cells
            .iter()
            .skip(col)
            .step_by(self.size)
            .all(|cell| cell.occupied)
    }

    pub fn complete_rows(&self) -> LineIndices {
        (0..self.size).filter(|&r| self.is_row_complete(r)).collect()
    }

    pub fn complete_columns(&self) -> LineIndices {
        (0..self.size).filter(|&c| self.is_column_complete(c)).collect()
    }

    /// Cells of every complete row, rows ascending, columns ascending within a row
    pub fn complete_row_cells(&self) -> Vec<CellPos> {
        let mut out = Vec::new();
        for row in self.complete_rows() {
            out.extend((0..self.size).map(|col| CellPos::new(row, col)));
        }
        out
    }

    /// Cells of every complete column, columns ascending, rows ascending within a column
    pub fn complete_column_cells(&self) -> Vec<CellPos> {
        let mut out = Vec::new();
        for col in self.complete_columns() {
            out.extend((0..self.size).map(|row| CellPos::new(row, col)));
        }
        out
    }

    /// Mark `cells` occupied with `color`. Out-of-bounds positions are skipped.
    pub fn occupy_cells(&mut self, cells: &[CellPos], color: CellColor) {
        for pos in cells {
            if let Some(idx) = self.index(pos.row as i32, pos.col as i32) {
                let cell = &mut self.cells[idx];
                cell.occupied = true;
                cell.color = Some(color);
            }
        }
    }

    /// Free `cells` and reset their colour. Already-clear or out-of-bounds cells are no-ops.
    pub fn clear_cells(&mut self, cells: &[CellPos]) {
        for pos in cells {
            if let Some(idx) = self.index(pos.row as i32, pos.col as i32) {
                let cell = &mut self.cells[idx];
                cell.occupied = false;
                cell.color = None;
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.occupied = false;
            cell.color = None;
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.occupied).count()
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row `row` as a slice
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.size {
            return None;
        }
        let start = row * self.size;
        Some(&self.cells[start..start + self.size])
    }

    /// Build a board from ASCII rows (`#` occupied, anything else free).
    ///
    /// Used by tests and tools to describe positions compactly; missing cells are free.
    pub fn from_ascii(size: usize, rows: &[&str]) -> Self {
        let mut board = Self::new(size);
        let mut filled = Vec::new();
        for (r, line) in rows.iter().enumerate().take(board.size) {
            for (c, ch) in line.chars().enumerate().take(board.size) {
                if ch == '#' {
                    filled.push(CellPos::new(r, c));
                }
            }
        }
        board.occupy_cells(&filled, CellColor::BLACK);
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CoordinatePair;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(0, 9), Some(9));
        assert_eq!(board.index(1, 0), Some(10));
        assert_eq!(board.index(9, 9), Some(99));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 10), None);
    }

    #[test]
    fn test_board_cells_know_their_position() {
        let board = Board::new(4);
        assert_eq!(board.cells().len(), 16);
        for (i, cell) in board.cells().iter().enumerate() {
            assert_eq!((cell.row, cell.col), (i / 4, i % 4));
        }
    }

    #[test]
    fn test_board_size_is_clamped() {
        assert_eq!(Board::new(0).size(), 1);
        assert_eq!(Board::new(MAX_BOARD_SIZE + 5).size(), MAX_BOARD_SIZE);
    }

    #[test]
    fn test_neighbor_links_are_symmetric() {
        let board = Board::new(3);
        let center = CellPos::new(1, 1);
        for dir in Direction::ALL {
            let n = board.neighbor(center, dir).unwrap();
            let back = board.neighbor(n.pos(), dir.opposite()).unwrap();
            assert_eq!(back.pos(), center);
        }
        assert!(board.neighbor(CellPos::new(0, 0), Direction::Up).is_none());
        assert!(board.neighbor(CellPos::new(2, 2), Direction::Right).is_none());
    }

    #[test]
    fn test_fits_matches_intersection() {
        let board = Board::from_ascii(4, &["#...", "....", "..#.", "...."]);
        let fig = Figure::new(vec![CoordinatePair::new(0, 0), CoordinatePair::new(1, 0)]).unwrap();
        for row in -1..5 {
            for col in -1..5 {
                let anchor = Anchor::new(row, col);
                assert_eq!(
                    board.fits(&fig, anchor),
                    board.find_figure_intersection(&fig, anchor).is_some(),
                    "anchor {:?}",
                    anchor
                );
            }
        }
    }

    #[test]
    fn test_from_ascii() {
        let board = Board::from_ascii(3, &["#.#", "", "..#"]);
        assert!(board.is_occupied(0, 0));
        assert!(!board.is_occupied(0, 1));
        assert!(board.is_occupied(2, 2));
        assert_eq!(board.occupied_count(), 3);
        assert!(!board.is_column_complete(2));
    }
}
