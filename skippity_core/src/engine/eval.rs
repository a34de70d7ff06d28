use crate::engine::config::{EngineConfig, EvalWeights};
use crate::engine::{Difficulty, Evaluator, GameMode};
use crate::logic::board::Board;
use crate::logic::player::PlayerState;
use crate::logic::rules::count_vulnerable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvalPreset {
    Medium,
    Extreme,
    /// Used when the engine plays both sides.
    Ai,
}

impl EvalPreset {
    pub const fn select(mode: GameMode, difficulty: Difficulty) -> Self {
        match (mode, difficulty) {
            (GameMode::ComputerVsComputer { .. }, _) => Self::Ai,
            (_, Difficulty::Extreme) => Self::Extreme,
            (_, Difficulty::Medium | Difficulty::Easy) => Self::Medium,
        }
    }
}

/// The heuristic evaluation with one preset's weights, fixed for a whole search.
///
/// Trusts the incrementally maintained capture counters; only the vulnerability
/// term looks at the board.
#[derive(Debug, Clone, Copy)]
pub struct PresetEvaluator {
    preset: EvalPreset,
    weights: EvalWeights,
}

impl PresetEvaluator {
    pub const fn new(preset: EvalPreset, weights: EvalWeights) -> Self {
        Self { preset, weights }
    }

    pub const fn from_config(config: &EngineConfig, preset: EvalPreset) -> Self {
        Self::new(preset, *config.weights(preset))
    }

    pub const fn preset(&self) -> EvalPreset {
        self.preset
    }
}

fn to_i32<T: TryInto<i32>>(value: T) -> i32 {
    value.try_into().unwrap_or(i32::MAX)
}

impl Evaluator for PresetEvaluator {
    /// Weighted sum of the terms. Saturates, so scaled weights cannot overflow.
    fn evaluate(&self, board: &Board, me: &PlayerState, opponent: &PlayerState) -> i32 {
        let w = &self.weights;

        let my_total = to_i32(me.total_captured());
        let opp_total = to_i32(opponent.total_captured());
        let score_diff = to_i32(me.score()).saturating_sub(to_i32(opponent.score()));

        let gains = [
            (w.score_difference, score_diff),
            (w.set_potential, my_total),
            (w.min_counter, to_i32(me.min_count())),
            (w.extra_pieces, to_i32(me.extra_pieces())),
            (w.capture_balance, my_total.saturating_sub(opp_total)),
        ];
        let vulnerable = if w.vulnerable == 0 {
            0
        } else {
            to_i32(count_vulnerable(board))
        };
        let losses = [
            (w.opponent_set_potential, opp_total),
            (w.opponent_min_counter, to_i32(opponent.min_count())),
            (w.vulnerable, vulnerable),
        ];

        let weighted = |acc: i32, &(weight, term): &(i32, i32)| {
            acc.saturating_add(weight.saturating_mul(term))
        };
        let gained = gains.iter().fold(0, weighted);
        let lost = losses.iter().fold(0, weighted);
        gained.saturating_sub(lost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_board() -> Board {
        Board::new(6)
    }

    #[test]
    fn test_preset_selection() {
        let hvc = GameMode::HumanVsComputer;
        assert_eq!(EvalPreset::select(hvc, Difficulty::Extreme), EvalPreset::Extreme);
        assert_eq!(EvalPreset::select(hvc, Difficulty::Medium), EvalPreset::Medium);
        assert_eq!(EvalPreset::select(hvc, Difficulty::Easy), EvalPreset::Medium);
        let cvc = GameMode::ComputerVsComputer { batch: true };
        assert_eq!(EvalPreset::select(cvc, Difficulty::Extreme), EvalPreset::Ai);
    }

    #[test]
    fn test_medium_terms() {
        let eval = PresetEvaluator::new(EvalPreset::Medium, EvalWeights::MEDIUM);
        let me = PlayerState::with_pieces([1, 1, 1, 1, 2]);
        let opp = PlayerState::with_pieces([0, 0, 1, 0, 0]);
        // (101 - 1) + 100*6 + 1*1 - 100*1
        assert_eq!(eval.evaluate(&empty_board(), &me, &opp), 601);
    }

    #[test]
    fn test_extreme_terms() {
        let eval = PresetEvaluator::new(EvalPreset::Extreme, EvalWeights::EXTREME);
        let me = PlayerState::with_pieces([1, 1, 1, 1, 2]);
        let opp = PlayerState::with_pieces([0, 0, 1, 0, 0]);
        // diff 100, set potential 1200, min 400, extra 10, balance 500,
        // opponent potential -200, opponent min 0
        assert_eq!(eval.evaluate(&empty_board(), &me, &opp), 2010);
    }

    #[test]
    fn test_vulnerable_pieces_penalised() {
        let eval = PresetEvaluator::new(EvalPreset::Extreme, EvalWeights::EXTREME);
        let board = Board::from_rows(&["AB****", "******", "******", "******", "******", "******"])
            .unwrap();
        let p = PlayerState::new();
        assert_eq!(eval.evaluate(&board, &p, &p), -10);
    }

    #[test]
    fn test_mirrored_terms_cancel() {
        let config = EngineConfig::default();
        let eval = PresetEvaluator::from_config(&config, EvalPreset::Ai);
        assert_eq!(eval.preset(), EvalPreset::Ai);
        let p = PlayerState::with_pieces([1, 1, 1, 1, 1]);
        assert_eq!(eval.evaluate(&empty_board(), &p, &p), 0);
        // own extra pieces have no opponent counterpart
        let q = PlayerState::with_pieces([2, 1, 0, 3, 1]);
        assert_eq!(eval.evaluate(&empty_board(), &q, &q), 70);
    }

    #[test]
    fn test_huge_scale_saturates() {
        let config = EngineConfig::load_from_json(r#"{"extreme_scale": 1e9}"#).unwrap();
        let eval = PresetEvaluator::from_config(&config, EvalPreset::Extreme);
        let me = PlayerState::with_pieces([9, 9, 9, 9, 9]);
        let opp = PlayerState::new();
        assert_eq!(eval.evaluate(&empty_board(), &me, &opp), i32::MAX);
        assert_eq!(eval.evaluate(&empty_board(), &opp, &me), i32::MIN);
    }
}
