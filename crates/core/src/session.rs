//! Session module - the stateful game controller
//!
//! A session owns the board, the tray of offered pieces, the score and the seeded
//! RNG. Everything happens inside [`GameSession::attempt_placement`], which runs a
//! whole turn to completion: occupy, score, clear, refill, game-over scan.
//!
//! States: `InPlay` until no offered piece fits anywhere, then `GameOver` until
//! [`GameSession::new_session`] resets the board and score.

use std::collections::BTreeSet;

use crate::block_set::BlockSetRegistry;
use crate::board::{Board, LineIndices};
use crate::figure::Figure;
use crate::high_score::HighScoreBook;
use crate::rng::SimpleRng;
use crate::types::{
    Anchor, CellColor, CellPos, HighScoreSnapshot, DEFAULT_BLOCK_SET_ID, DEFAULT_BOARD_SIZE,
    PLACEMENT_POINTS, TRAY_SIZE,
};

/// Session parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Board is `board_size x board_size`, clamped to `1..=MAX_BOARD_SIZE`
    pub board_size: usize,
    /// Pieces offered at once (at least 1)
    pub tray_size: usize,
    /// Flat score per successful placement
    pub placement_points: u32,
    pub seed: u32,
    pub block_set_id: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            tray_size: TRAY_SIZE,
            placement_points: PLACEMENT_POINTS,
            seed: 1,
            block_set_id: DEFAULT_BLOCK_SET_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    InPlay,
    GameOver,
}

/// One offered piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayPiece {
    pub figure: Figure,
    pub color: CellColor,
}

/// Why a placement attempt changed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Slot index out of range or already used this round
    EmptySlot,
    /// Some target cell is off the board or occupied
    NoFit,
    GameOver,
}

impl RejectReason {
    pub fn code(self) -> &'static str {
        match self {
            RejectReason::EmptySlot => "empty_slot",
            RejectReason::NoFit => "no_fit",
            RejectReason::GameOver => "game_over",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RejectReason::EmptySlot => "no piece in the requested slot",
            RejectReason::NoFit => "piece does not fit at the requested anchor",
            RejectReason::GameOver => "session is over",
        }
    }
}

/// Everything a successful placement changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub slot: usize,
    pub anchor: Anchor,
    pub color: CellColor,
    /// Cells the piece occupied, in figure point order
    pub placed: Vec<CellPos>,
    /// Completed rows at the time of the clear
    pub rows: LineIndices,
    /// Completed columns at the time of the clear
    pub columns: LineIndices,
    /// Union of the cleared row and column cells, each cell once, row-major
    pub cleared: Vec<CellPos>,
    pub points: u32,
    /// Score after this placement
    pub score: u32,
    /// True if the tray emptied and was refilled
    pub refilled: bool,
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Placed(PlacementOutcome),
    Rejected(RejectReason),
}

impl Placement {
    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed(_))
    }

    pub fn outcome(&self) -> Option<&PlacementOutcome> {
        match self {
            Placement::Placed(o) => Some(o),
            Placement::Rejected(_) => None,
        }
    }
}

/// Notifications for effect layers, consumed with [`GameSession::take_last_event`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started { block_set_id: String },
    Placed(PlacementOutcome),
}

pub struct GameSession {
    config: SessionConfig,
    registry: BlockSetRegistry,
    high_scores: Box<dyn HighScoreBook>,
    best: HighScoreSnapshot,
    block_set_id: String,
    board: Board,
    tray: Vec<Option<TrayPiece>>,
    rng: SimpleRng,
    score: u32,
    state: SessionState,
    /// Monotonic id, increments on every new session
    session_id: u32,
    placements: u32,
    last_event: Option<SessionEvent>,
}

impl GameSession {
    /// Build a session and deal the first tray
    pub fn new(
        config: SessionConfig,
        registry: BlockSetRegistry,
        mut high_scores: Box<dyn HighScoreBook>,
    ) -> Self {
        let block_set_id = registry.resolve(&config.block_set_id).id.clone();
        let best = high_scores.snapshot();
        let tray_size = config.tray_size.max(1);
        let mut session = Self {
            board: Board::new(config.board_size),
            rng: SimpleRng::new(config.seed),
            tray: vec![None; tray_size],
            config,
            registry,
            high_scores,
            best,
            block_set_id,
            score: 0,
            state: SessionState::InPlay,
            session_id: 0,
            placements: 0,
            last_event: None,
        };
        session.new_session();
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scenario setup; follow with [`GameSession::check_game_over`]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn registry(&self) -> &BlockSetRegistry {
        &self.registry
    }

    /// Custom sets can be registered mid-session; the active set is only re-resolved
    /// by [`GameSession::set_block_set`]
    pub fn registry_mut(&mut self) -> &mut BlockSetRegistry {
        &mut self.registry
    }

    pub fn block_set_id(&self) -> &str {
        &self.block_set_id
    }

    pub fn tray(&self) -> &[Option<TrayPiece>] {
        &self.tray
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn placements(&self) -> u32 {
        self.placements
    }

    pub fn high_scores(&self) -> &HighScoreSnapshot {
        &self.best
    }

    /// Best score recorded for the active block set
    pub fn high_score(&self) -> u32 {
        self.best.get_for_set(&self.block_set_id)
    }

    /// Clear the board, zero the score and deal a fresh tray.
    ///
    /// High scores are kept.
    pub fn new_session(&mut self) {
        self.board.clear();
        self.score = 0;
        self.placements = 0;
        self.session_id = self.session_id.wrapping_add(1);
        self.tray.iter_mut().for_each(|slot| *slot = None);
        self.refill_tray();
        self.state = SessionState::InPlay;
        self.check_game_over();
        self.last_event = Some(SessionEvent::Started {
            block_set_id: self.block_set_id.clone(),
        });
    }

    /// Switch to another block set and start over.
    ///
    /// Returns false (and does nothing) when `id` resolves to the active set.
    pub fn set_block_set(&mut self, id: &str) -> bool {
        let resolved = self.registry.resolve(id).id.clone();
        if resolved == self.block_set_id {
            return false;
        }
        self.block_set_id = resolved;
        self.best = self.high_scores.snapshot();
        self.new_session();
        true
    }

    /// Replace the tray contents, in slot order. Extra slots are left empty.
    ///
    /// Colours are drawn from the session RNG. An empty `figures` deals a fresh
    /// random tray, so the tray is never left with nothing to place.
    pub fn set_tray(&mut self, figures: Vec<Figure>) {
        let mut figures = figures.into_iter();
        for slot in self.tray.iter_mut() {
            *slot = figures.next().map(|figure| TrayPiece {
                figure,
                color: self.rng.next_color(),
            });
        }
        if self.tray_is_empty() {
            self.refill_tray();
        }
    }

    fn refill_tray(&mut self) {
        for i in 0..self.tray.len() {
            let figure = self.registry.random_shape_for(&self.block_set_id, &mut self.rng);
            let color = self.rng.next_color();
            self.tray[i] = Some(TrayPiece { figure, color });
        }
    }

    fn tray_is_empty(&self) -> bool {
        self.tray.iter().all(Option::is_none)
    }

    /// Every anchor at which the piece in `slot` fits, row-major. Empty for an empty slot.
    pub fn fit_positions(&self, slot: usize) -> Vec<Anchor> {
        match self.tray.get(slot) {
            Some(Some(piece)) => self.board.fit_positions(&piece.figure),
            _ => Vec::new(),
        }
    }

    /// True if at least one offered piece fits somewhere
    pub fn can_play(&self) -> bool {
        self.tray
            .iter()
            .flatten()
            .any(|piece| self.board.has_fit(&piece.figure))
    }

    /// Run the exhaustive fit scan and update the state. Returns true when over.
    pub fn check_game_over(&mut self) -> bool {
        self.state = if self.can_play() {
            SessionState::InPlay
        } else {
            SessionState::GameOver
        };
        self.is_game_over()
    }

    /// Try to drop the piece in `slot` with its origin at `anchor`.
    ///
    /// A rejection leaves the session untouched.
    pub fn attempt_placement(&mut self, slot: usize, anchor: Anchor) -> Placement {
        if self.is_game_over() {
            return Placement::Rejected(RejectReason::GameOver);
        }
        let Some(Some(piece)) = self.tray.get(slot) else {
            return Placement::Rejected(RejectReason::EmptySlot);
        };
        let Some(placed) = self.board.find_figure_intersection(&piece.figure, anchor) else {
            return Placement::Rejected(RejectReason::NoFit);
        };

        let color = piece.color;
        self.board.occupy_cells(&placed, color);
        self.tray[slot] = None;
        self.placements += 1;

        let points = self.config.placement_points;
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score() {
            self.best = self
                .high_scores
                .update_if_greater(&self.block_set_id, self.score);
        }

        let rows = self.board.complete_rows();
        let columns = self.board.complete_columns();
        let cleared: Vec<CellPos> = self
            .board
            .complete_row_cells()
            .into_iter()
            .chain(self.board.complete_column_cells())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        self.board.clear_cells(&cleared);

        let refilled = self.tray_is_empty();
        if refilled {
            self.refill_tray();
        }

        let game_over = self.check_game_over();

        let outcome = PlacementOutcome {
            slot,
            anchor,
            color,
            placed,
            rows,
            columns,
            cleared,
            points,
            score: self.score,
            refilled,
            game_over,
        };
        self.last_event = Some(SessionEvent::Placed(outcome.clone()));
        Placement::Placed(outcome)
    }

    pub fn take_last_event(&mut self) -> Option<SessionEvent> {
        self.last_event.take()
    }
}
