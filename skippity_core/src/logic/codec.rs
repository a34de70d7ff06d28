//! Plain-text save format.
//!
//! ```text
//! 6
//! A B C D E A
//! ...
//! 101 1 1 1 1 2 1 1
//! 0 0 0 0 0 0 0 0
//! 2
//! ```
//!
//! The board size, one line per row with `'*'` for empty cells, one line of
//! eight integers per player (score, the five counters, sets, extra pieces)
//! and the player to move. Decoding reads whitespace-separated tokens, so row
//! padding and trailing spaces are accepted.

use crate::logic::board::{Board, BoardCoordinate, PieceKind, EMPTY_SYMBOL};
use crate::logic::player::{calculate_score, Player, PlayerState};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("corrupt save state: {0}")]
    CorruptSaveState(String),
    #[error("save state ends early")]
    Truncated,
}

fn corrupt(reason: impl Into<String>) -> DecodeError {
    DecodeError::CorruptSaveState(reason.into())
}

/// Everything a save file holds: enough to resume play, but no history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub board: Board,
    pub players: [PlayerState; 2],
    pub current: Player,
}

#[must_use]
pub fn encode(saved: &SavedGame) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", saved.board.size());
    for row in saved.board.rows() {
        let _ = writeln!(out, "{row}");
    }
    for player in &saved.players {
        let summary = player.summary();
        let counters = player
            .pieces()
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            out,
            "{} {counters} {} {}",
            summary.score, summary.sets, summary.extra_pieces
        );
    }
    let _ = writeln!(out, "{}", saved.current.number());
    out
}

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    fn next(&mut self) -> Result<&'a str, DecodeError> {
        self.inner.next().ok_or(DecodeError::Truncated)
    }

    fn number<T: std::str::FromStr>(&mut self, what: &str) -> Result<T, DecodeError> {
        let token = self.next()?;
        token
            .parse()
            .map_err(|_| corrupt(format!("{what}: expected a number, found {token:?}")))
    }

    fn rest_is_empty(&mut self) -> bool {
        self.inner.next().is_none()
    }
}

/// Parses and validates a save.
///
/// Besides syntax, the decoded state must be reachable: the size is within
/// bounds, each player's stored score figures agree with their counters, and
/// for every piece kind the pieces left on the board plus both players'
/// captures add up to the starting distribution.
pub fn decode(text: &str) -> Result<SavedGame, DecodeError> {
    let mut tokens = Tokens::new(text);

    let size: usize = tokens.number("board size")?;
    if !Board::is_valid_size(size) {
        return Err(corrupt(format!("board size {size} is out of range")));
    }

    let mut board = Board::new(size);
    for row in 0..size {
        for col in 0..size {
            let token = tokens.next()?;
            let mut chars = token.chars();
            let cell = match (chars.next(), chars.next()) {
                (Some(EMPTY_SYMBOL), None) => None,
                (Some(symbol), None) => Some(PieceKind::from_symbol(symbol).ok_or_else(|| {
                    corrupt(format!("unknown cell symbol {symbol:?} at row {}", row + 1))
                })?),
                _ => return Err(corrupt(format!("bad cell token {token:?}"))),
            };
            board.set(BoardCoordinate::new(row, col), cell);
        }
    }

    let expected = Board::initial_distribution(size);
    let players = [
        decode_player(&mut tokens, Player::One, &expected)?,
        decode_player(&mut tokens, Player::Two, &expected)?,
    ];

    let current_number: u8 = tokens.number("current player")?;
    let current = Player::from_number(current_number)
        .ok_or_else(|| corrupt(format!("current player {current_number} is not 1 or 2")))?;

    if !tokens.rest_is_empty() {
        return Err(corrupt("unexpected data after the current player"));
    }

    let on_board = board.piece_counts();
    for ((kind, &left), &dealt) in PieceKind::ALL.iter().zip(&on_board).zip(&expected) {
        let captured: usize = players
            .iter()
            .map(|p| p.count(*kind) as usize)
            .sum();
        if left + captured != dealt {
            return Err(corrupt(format!(
                "piece {} accounts for {} pieces, a {size}x{size} board starts with {dealt}",
                kind.symbol(),
                left + captured,
            )));
        }
    }

    Ok(SavedGame {
        board,
        players,
        current,
    })
}

/// Reads one player line. No counter may exceed the number of pieces of that
/// kind the board started with.
fn decode_player(
    tokens: &mut Tokens<'_>,
    player: Player,
    starting: &[usize; PieceKind::COUNT],
) -> Result<PlayerState, DecodeError> {
    let label = format!("player {}", player.number());
    let score: u32 = tokens.number(&label)?;
    let mut pieces = [0u32; PieceKind::COUNT];
    for ((slot, kind), &limit) in pieces.iter_mut().zip(PieceKind::ALL).zip(starting) {
        *slot = tokens.number(&label)?;
        if *slot as usize > limit {
            return Err(corrupt(format!(
                "{label}: {} captures of {} but only {limit} were dealt",
                *slot,
                kind.symbol()
            )));
        }
    }
    let sets: u32 = tokens.number(&label)?;
    let extra_pieces: u32 = tokens.number(&label)?;

    let summary = calculate_score(&pieces);
    if (summary.score, summary.sets, summary.extra_pieces) != (score, sets, extra_pieces) {
        return Err(corrupt(format!(
            "{label}: stored score {score}/{sets}/{extra_pieces} does not match counters ({}/{}/{})",
            summary.score, summary.sets, summary.extra_pieces
        )));
    }
    Ok(PlayerState::with_pieces(pieces))
}
