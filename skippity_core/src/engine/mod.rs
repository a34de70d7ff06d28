use crate::logic::board::{Board, BoardCoordinate, PieceKind};
use crate::logic::player::PlayerState;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod eval;
pub mod search;

/// One jump: `from` to `to` over the captured piece at the midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: BoardCoordinate,
    pub to: BoardCoordinate,
    pub captured: PieceKind,
}

impl Move {
    #[must_use]
    pub const fn new(from: BoardCoordinate, to: BoardCoordinate, captured: PieceKind) -> Self {
        Self { from, to, captured }
    }

    #[must_use]
    pub const fn midpoint(&self) -> BoardCoordinate {
        self.from.midpoint(self.to)
    }

    #[allow(clippy::cast_possible_wrap)]
    pub const fn displacement_between(from: BoardCoordinate, to: BoardCoordinate) -> (isize, isize) {
        (
            to.row as isize - from.row as isize,
            to.col as isize - from.col as isize,
        )
    }

    /// `(d_row, d_col)` from source to destination.
    pub const fn displacement(&self) -> (isize, isize) {
        Self::displacement_between(self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} x{}", self.from, self.to, self.captured.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Extreme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    HumanVsHuman,
    #[default]
    HumanVsComputer,
    /// Both sides searched by the engine. `batch` marks unattended bulk runs,
    /// which use the shallow fallback depth.
    ComputerVsComputer { batch: bool },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    /// Positions visited by the recursive search.
    pub nodes: u64,
    /// Static evaluations performed.
    pub evaluations: u64,
    /// Root candidates scored.
    pub root_moves: u32,
}

impl SearchStats {
    pub fn accumulate(&mut self, other: &Self) {
        self.depth = self.depth.max(other.depth);
        self.nodes += other.nodes;
        self.evaluations += other.evaluations;
        self.root_moves += other.root_moves;
    }
}

/// Static evaluation from `me`'s point of view.
pub trait Evaluator {
    fn evaluate(&self, board: &Board, me: &PlayerState, opponent: &PlayerState) -> i32;
}
