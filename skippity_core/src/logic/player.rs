use crate::logic::board::PieceKind;
use serde::{Deserialize, Serialize};

pub const SET_VALUE: u32 = 100;
pub const EXTRA_PIECE_VALUE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// 1 or 2, as shown to users and written to save files.
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            _ => None,
        }
    }
}

/// Score figures derived from a player's five capture counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub sets: u32,
    pub extra_pieces: u32,
    pub score: u32,
}

/// A set is one capture of every kind; everything beyond complete sets is an extra piece.
///
/// Saturates rather than wrapping on absurd counters.
#[must_use]
pub fn calculate_score(pieces: &[u32; PieceKind::COUNT]) -> ScoreSummary {
    let sets = pieces.iter().copied().min().unwrap_or(0);
    let extra_pieces = pieces
        .iter()
        .fold(0u32, |acc, &p| acc.saturating_add(p - sets));
    ScoreSummary {
        sets,
        extra_pieces,
        score: sets
            .saturating_mul(SET_VALUE)
            .saturating_add(extra_pieces.saturating_mul(EXTRA_PIECE_VALUE)),
    }
}

/// Captures made by one player plus their per-turn undo/redo flags.
///
/// Sets, extra pieces and score are never stored; they are derived from the
/// counters on every read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pieces: [u32; PieceKind::COUNT],
    pub undo_used: bool,
    pub redo_used: bool,
}

impl PlayerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pieces(pieces: [u32; PieceKind::COUNT]) -> Self {
        Self {
            pieces,
            ..Self::default()
        }
    }

    pub const fn pieces(&self) -> &[u32; PieceKind::COUNT] {
        &self.pieces
    }

    pub fn count(&self, kind: PieceKind) -> u32 {
        self.pieces.get(kind.index()).copied().unwrap_or(0)
    }

    pub fn record_capture(&mut self, kind: PieceKind) {
        if let Some(slot) = self.pieces.get_mut(kind.index()) {
            *slot = slot.saturating_add(1);
        }
    }

    pub fn revert_capture(&mut self, kind: PieceKind) {
        if let Some(slot) = self.pieces.get_mut(kind.index()) {
            *slot = slot.saturating_sub(1);
        }
    }

    pub fn summary(&self) -> ScoreSummary {
        calculate_score(&self.pieces)
    }

    pub fn score(&self) -> u32 {
        self.summary().score
    }

    pub fn sets(&self) -> u32 {
        self.summary().sets
    }

    pub fn extra_pieces(&self) -> u32 {
        self.summary().extra_pieces
    }

    /// Total captures, complete sets included.
    pub fn total_captured(&self) -> u32 {
        self.pieces.iter().fold(0, |acc, &p| acc.saturating_add(p))
    }

    pub fn min_count(&self) -> u32 {
        self.pieces.iter().copied().min().unwrap_or(0)
    }

    pub fn reset_rights(&mut self) {
        self.undo_used = false;
        self.redo_used = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_player_scores_zero() {
        let p = PlayerState::new();
        assert_eq!(p.summary(), ScoreSummary::default());
    }

    #[test]
    fn test_single_capture_is_extra_piece() {
        let mut p = PlayerState::new();
        p.record_capture(PieceKind::B);
        assert_eq!(
            p.summary(),
            ScoreSummary {
                sets: 0,
                extra_pieces: 1,
                score: 1
            }
        );
    }

    #[test]
    fn test_sets_and_extras() {
        let p = PlayerState::with_pieces([3, 2, 2, 4, 2]);
        assert_eq!(p.sets(), 2);
        assert_eq!(p.extra_pieces(), 3);
        assert_eq!(p.score(), 203);
        assert_eq!(p.total_captured(), 13);
    }

    #[test]
    fn test_calculate_score_is_idempotent() {
        let pieces = [5, 1, 0, 7, 3];
        let first = calculate_score(&pieces);
        for _ in 0..3 {
            assert_eq!(calculate_score(&pieces), first);
        }
        let p = PlayerState::with_pieces(pieces);
        assert_eq!(p.summary(), p.summary());
    }

    #[test]
    fn test_revert_capture_restores_summary() {
        let mut p = PlayerState::with_pieces([1, 1, 1, 1, 0]);
        let before = p.summary();
        p.record_capture(PieceKind::E);
        assert_eq!(p.sets(), 1);
        p.revert_capture(PieceKind::E);
        assert_eq!(p.summary(), before);
        // never goes below zero
        p.revert_capture(PieceKind::E);
        assert_eq!(p.count(PieceKind::E), 0);
    }

    #[test]
    fn test_huge_counters_saturate() {
        let summary = calculate_score(&[u32::MAX, u32::MAX, 0, 0, 0]);
        assert_eq!(summary.sets, 0);
        assert_eq!(summary.extra_pieces, u32::MAX);
        assert_eq!(summary.score, u32::MAX);

        let all = calculate_score(&[u32::MAX; PieceKind::COUNT]);
        assert_eq!(all.sets, u32::MAX);
        assert_eq!(all.extra_pieces, 0);
        assert_eq!(all.score, u32::MAX);
    }

    #[test]
    fn test_player_numbers() {
        assert_eq!(Player::One.other(), Player::Two);
        assert_eq!(Player::from_number(2), Some(Player::Two));
        assert_eq!(Player::from_number(3), None);
        assert_eq!(Player::Two.number(), 2);
    }
}
