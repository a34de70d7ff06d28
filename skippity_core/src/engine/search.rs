//! Depth-limited minimax with alpha-beta pruning.
//!
//! The board and both players' counters are mutated in place and restored on
//! the way back up, so a search borrows them exclusively for its duration.
//! Chained jumps are not part of a ply: each level considers single jumps and
//! chain continuation is handled by the caller re-running the root selection.

use crate::engine::eval::PresetEvaluator;
use crate::engine::{Evaluator, Move, SearchStats};
use crate::logic::board::Board;
use crate::logic::player::PlayerState;
use crate::logic::rules::{is_terminal, legal_jumps_into};

pub struct AlphaBetaEngine<E: Evaluator = PresetEvaluator> {
    evaluator: E,
    nodes_searched: u64,
    evaluations: u64,
    root_moves: u32,
}

impl<E: Evaluator> AlphaBetaEngine<E> {
    pub const fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            nodes_searched: 0,
            evaluations: 0,
            root_moves: 0,
        }
    }

    /// Counters accumulated since construction.
    pub const fn stats(&self, depth: u8) -> SearchStats {
        SearchStats {
            depth,
            nodes: self.nodes_searched,
            evaluations: self.evaluations,
            root_moves: self.root_moves,
        }
    }

    /// Scores the position for `me`.
    ///
    /// `maximizing` tells whose jump comes next: `me` when true, `opponent`
    /// otherwise. Each jump credits the captured piece to the player making it.
    #[allow(clippy::too_many_arguments)]
    pub fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        me: &mut PlayerState,
        opponent: &mut PlayerState,
    ) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 || is_terminal(board) {
            self.evaluations += 1;
            return self.evaluator.evaluate(board, me, opponent);
        }

        let mut moves = Vec::with_capacity(16);
        legal_jumps_into(board, &mut moves);

        if maximizing {
            let mut best = i32::MIN;
            for mv in moves {
                board.apply_jump(&mv);
                me.record_capture(mv.captured);

                let score = self.alpha_beta(board, depth - 1, alpha, beta, false, me, opponent);

                board.undo_jump(&mv);
                me.revert_capture(mv.captured);

                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break; // Beta cutoff
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for mv in moves {
                board.apply_jump(&mv);
                opponent.record_capture(mv.captured);

                let score = self.alpha_beta(board, depth - 1, alpha, beta, true, me, opponent);

                board.undo_jump(&mv);
                opponent.revert_capture(mv.captured);

                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break; // Alpha cutoff
                }
            }
            best
        }
    }

    /// Picks the candidate with the highest search score for `me`.
    ///
    /// Every candidate is played, searched `depth` plies deep with the
    /// opponent to move, and taken back. Ties keep the earliest candidate.
    pub fn best_of(
        &mut self,
        board: &mut Board,
        candidates: &[Move],
        depth: u8,
        me: &mut PlayerState,
        opponent: &mut PlayerState,
    ) -> Option<(Move, i32)> {
        let mut best: Option<(Move, i32)> = None;

        for &mv in candidates {
            board.apply_jump(&mv);
            me.record_capture(mv.captured);
            self.root_moves += 1;

            let score = self.alpha_beta(board, depth, i32::MIN, i32::MAX, false, me, opponent);

            board.undo_jump(&mv);
            me.revert_capture(mv.captured);

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        if let Some((mv, score)) = best {
            log::debug!(
                "root pick {mv} score {score} ({} candidates, depth {depth}, {} nodes, {} evals)",
                candidates.len(),
                self.nodes_searched,
                self.evaluations
            );
        }
        best
    }

    /// Searches every legal jump on the board.
    pub fn pick_best_move(
        &mut self,
        board: &mut Board,
        depth: u8,
        me: &mut PlayerState,
        opponent: &mut PlayerState,
    ) -> Option<(Move, i32)> {
        let mut candidates = Vec::with_capacity(16);
        legal_jumps_into(board, &mut candidates);
        self.best_of(board, &candidates, depth, me, opponent)
    }
}
