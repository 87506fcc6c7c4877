use crate::session::{GameSession, SessionState, TrayPiece};
use crate::types::{CellColor, CoordinatePair};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraySnapshot {
    pub points: Vec<CoordinatePair>,
    pub width: usize,
    pub height: usize,
    pub color: CellColor,
}

impl From<&TrayPiece> for TraySnapshot {
    fn from(value: &TrayPiece) -> Self {
        Self {
            points: value.figure.points().to_vec(),
            width: value.figure.width(),
            height: value.figure.height(),
            color: value.color,
        }
    }
}

/// Read-only view of a session for renderers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub size: usize,
    /// Row-major; `Some(color)` for occupied cells
    pub cells: Vec<Option<CellColor>>,
    pub tray: Vec<Option<TraySnapshot>>,
    pub block_set_id: String,
    pub session_id: u32,
    pub placements: u32,
    pub score: u32,
    pub high_score: u32,
    pub overall_high_score: u32,
    pub game_over: bool,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[row * self.size + col].is_some()
    }

    /// `#`/`.` rows, top to bottom
    pub fn board_rows(&self) -> Vec<String> {
        if self.size == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|c| if c.is_some() { '#' } else { '.' }).collect())
            .collect()
    }
}

impl GameSession {
    /// Fill `out` in place, reusing its buffers
    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        let board = self.board();
        out.size = board.size();
        out.cells.clear();
        out.cells.extend(
            board
                .cells()
                .iter()
                .map(|c| if c.occupied { c.color } else { None }),
        );
        out.tray.clear();
        out.tray
            .extend(self.tray().iter().map(|slot| slot.as_ref().map(TraySnapshot::from)));
        out.block_set_id.clear();
        out.block_set_id.push_str(self.block_set_id());
        out.session_id = self.session_id();
        out.placements = self.placements();
        out.score = self.score();
        out.high_score = self.high_score();
        out.overall_high_score = self.high_scores().overall;
        out.game_over = self.state() == SessionState::GameOver;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
