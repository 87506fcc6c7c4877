//! Block placement engine - pure, deterministic, and testable
//!
//! This crate contains every rule of the game: polyomino geometry, the board,
//! rotation variants, blueprint parsing, block sets and the session controller.
//! It has **no** dependencies on rendering, input handling or storage:
//!
//! - **Deterministic**: Same seed produces the same tray sequence
//! - **Side-effect free queries**: fit tests never mutate the board
//! - **Portable**: Runs headless (CLI autoplay, benches, tests)
//!
//! # Module Structure
//!
//! - [`figure`]: normalized polyominoes and grid/pixel mapping
//! - [`board`]: N x N grid with intersection and line-completion scans
//! - [`rotation`]: quarter-turn variants and canonical keys
//! - [`blueprint`]: ASCII shape authoring format
//! - [`shapes`] / [`block_set`]: built-in definitions and the registry
//! - [`session`]: tray, scoring, clears and game-over detection
//! - [`high_score`]: the high-score seam used by sessions
//!
//! # Game Rules
//!
//! - Three pieces are offered at a time; the tray refills once all three are placed
//! - Every placement scores a flat 10 points
//! - Full rows and full columns clear together; a cell on both counts once
//! - The game ends when no offered piece fits anywhere
//!
//! # Example
//!
//! ```
//! use blockfit_core::{BlockSetRegistry, GameSession, InMemoryHighScores, SessionConfig};
//! use blockfit_core::types::Anchor;
//!
//! let mut session = GameSession::new(
//!     SessionConfig::default(),
//!     BlockSetRegistry::new(),
//!     Box::new(InMemoryHighScores::new()),
//! );
//!
//! let anchor = session.fit_positions(0)[0];
//! let placement = session.attempt_placement(0, anchor);
//! assert!(placement.is_placed());
//! assert_eq!(session.score(), 10);
//! assert_eq!(anchor, Anchor::new(0, 0));
//! ```

pub mod block_set;
pub mod blueprint;
pub mod board;
pub mod figure;
pub mod high_score;
pub mod rng;
pub mod rotation;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use blockfit_types as types;

// Re-export commonly used types for convenience
pub use block_set::{append_shape_keys, has_shape_collision, shape_key_set, BlockSet, BlockSetRegistry};
pub use blueprint::{parse_shape_blueprint, shape_to_blueprint, BlueprintError, ParsedBlueprint};
pub use board::{Board, Cell, LineIndices};
pub use figure::{extent, normalize, Figure, FigureError, GameRect};
pub use high_score::{HighScoreBook, InMemoryHighScores};
pub use rng::SimpleRng;
pub use rotation::{
    canonical_key, describe_shape_rotations, ensure_rotation_angles, generate_rotations,
    rotation_keys, RotationDescriptor,
};
pub use session::{
    GameSession, Placement, PlacementOutcome, RejectReason, SessionConfig, SessionEvent,
    SessionState, TrayPiece,
};
pub use shapes::{BlockSetDefinition, ShapeDefinition};
pub use snapshot::{SessionSnapshot, TraySnapshot};
