//! Skippity engine core.
//!
//! Board simulation, jump rules, scoring, undo/redo history, the turn state
//! machine and the minimax computer player. Nothing in this crate performs I/O;
//! save files, prompts and reports belong to the caller.

pub mod engine;
pub mod logic;

pub use engine::config::EngineConfig;
pub use engine::search::AlphaBetaEngine;
pub use engine::{Difficulty, GameMode, Move, SearchStats};
pub use logic::board::{Board, BoardCoordinate, PieceKind};
pub use logic::codec::{decode, encode, DecodeError, SavedGame};
pub use logic::game::{ConfigError, GameSession, MoveOutcome, SessionConfig, TurnPhase, Winner};
pub use logic::lifecycle::{Lifecycle, LifecycleError, LifecycleState};
pub use logic::player::{Player, PlayerState, ScoreSummary};
pub use logic::rules::{ChainRule, MoveError};
