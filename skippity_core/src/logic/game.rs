use crate::engine::config::EngineConfig;
use crate::engine::eval::{EvalPreset, PresetEvaluator};
use crate::engine::search::AlphaBetaEngine;
use crate::engine::{Difficulty, GameMode, Move, SearchStats};
use crate::logic::board::{Board, BoardCoordinate, PieceKind, MAX_SIZE, MIN_SIZE};
use crate::logic::codec::SavedGame;
use crate::logic::history::MoveLog;
use crate::logic::player::{Player, PlayerState};
use crate::logic::rules::{is_terminal, legal_jumps, validate_jump, ChainRule, MoveError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size must be between {min} and {max}, got {0}", min = MIN_SIZE, max = MAX_SIZE)]
    InvalidBoardSize(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub size: usize,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub chain_rule: ChainRule,
    /// Board fill seed; the wall clock when absent.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            size: 8,
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            chain_rule: ChainRule::default(),
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Board::is_valid_size(self.size) {
            Ok(())
        } else {
            Err(ConfigError::InvalidBoardSize(self.size))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingSource,
    AwaitingDestination { from: BoardCoordinate },
    /// The mover may jump again from `last.to`, undo, or pass.
    ChainPending { last: Move },
    /// No jump is left from `last.to`; the mover may undo, redo or pass.
    AwaitingPass { last: Move },
    GameOver,
}

impl TurnPhase {
    /// The latest jump of a turn that is still open.
    pub const fn pending_move(self) -> Option<Move> {
        match self {
            Self::ChainPending { last } | Self::AwaitingPass { last } => Some(last),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The jump captured this piece and no further jump follows. The turn
    /// stays open until [`GameSession::pass`] unless the game is over.
    Committed(PieceKind),
    /// The jump captured this piece and the mover may continue the chain.
    ChainAvailable(PieceKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player1,
    Player2,
    Draw,
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// Splits the two player states into (`me`, `opponent`).
fn split_players(players: &mut [PlayerState; 2], me: Player) -> (&mut PlayerState, &mut PlayerState) {
    let [one, two] = players;
    match me {
        Player::One => (one, two),
        Player::Two => (two, one),
    }
}

/// One game from the first jump to game over.
///
/// All board mutation goes through the session; the search borrows the board
/// mutably for the length of a computer turn and hands it back unchanged.
pub struct GameSession {
    board: Board,
    players: [PlayerState; 2],
    logs: [MoveLog; 2],
    current: Player,
    phase: TurnPhase,
    /// Jumps committed by `current` since the turn began.
    turn_moves: Vec<Move>,
    config: SessionConfig,
    engine_config: Arc<EngineConfig>,
    rng: StdRng,
    search_stats: [SearchStats; 2],
}

impl GameSession {
    pub fn new(config: SessionConfig, engine_config: Arc<EngineConfig>) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(wall_clock_seed));
        let board = Board::filled(config.size, &mut rng);
        Ok(Self::assemble(
            board,
            [PlayerState::new(), PlayerState::new()],
            Player::One,
            config,
            engine_config,
            rng,
        ))
    }

    /// Resumes a saved game. Move history is not part of a save, so there is
    /// nothing to undo until the next jump.
    pub fn from_saved(
        saved: SavedGame,
        config: SessionConfig,
        engine_config: Arc<EngineConfig>,
    ) -> Self {
        let config = SessionConfig {
            size: saved.board.size(),
            ..config
        };
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(wall_clock_seed));
        Self::assemble(
            saved.board,
            saved.players,
            saved.current,
            config,
            engine_config,
            rng,
        )
    }

    fn assemble(
        board: Board,
        players: [PlayerState; 2],
        current: Player,
        config: SessionConfig,
        engine_config: Arc<EngineConfig>,
        rng: StdRng,
    ) -> Self {
        let size = board.size();
        let phase = if is_terminal(&board) {
            TurnPhase::GameOver
        } else {
            TurnPhase::AwaitingSource
        };
        Self {
            board,
            players,
            logs: [MoveLog::for_board(size), MoveLog::for_board(size)],
            current,
            phase,
            turn_moves: Vec::new(),
            config,
            engine_config,
            rng,
            search_stats: [SearchStats::default(); 2],
        }
    }

    /// Starts over on a freshly filled board of the same size, drawing from
    /// the session's generator.
    pub fn restart(&mut self) {
        self.board = Board::filled(self.config.size, &mut self.rng);
        self.players = [PlayerState::new(), PlayerState::new()];
        for log in &mut self.logs {
            log.clear();
        }
        self.current = Player::One;
        self.phase = TurnPhase::AwaitingSource;
        self.turn_moves.clear();
        self.search_stats = [SearchStats::default(); 2];
    }

    #[must_use]
    pub fn to_saved(&self) -> SavedGame {
        SavedGame {
            board: self.board.clone(),
            players: self.players.clone(),
            current: self.current,
        }
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    pub const fn player(&self, player: Player) -> &PlayerState {
        let [one, two] = &self.players;
        match player {
            Player::One => one,
            Player::Two => two,
        }
    }

    fn player_mut(&mut self, player: Player) -> &mut PlayerState {
        split_players(&mut self.players, player).0
    }

    fn log_mut(&mut self, player: Player) -> &mut MoveLog {
        let [one, two] = &mut self.logs;
        match player {
            Player::One => one,
            Player::Two => two,
        }
    }

    pub const fn current_player(&self) -> Player {
        self.current
    }

    pub const fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub const fn move_log(&self, player: Player) -> &MoveLog {
        let [one, two] = &self.logs;
        match player {
            Player::One => one,
            Player::Two => two,
        }
    }

    /// Search totals for the computer moves `player` has made.
    pub const fn search_stats(&self, player: Player) -> &SearchStats {
        let [one, two] = &self.search_stats;
        match player {
            Player::One => one,
            Player::Two => two,
        }
    }

    pub const fn evaluations(&self, player: Player) -> u64 {
        self.search_stats(player).evaluations
    }

    /// Whether `player` is driven by the engine in this session's mode.
    pub const fn is_computer(&self, player: Player) -> bool {
        match self.config.mode {
            GameMode::HumanVsHuman => false,
            GameMode::HumanVsComputer => matches!(player, Player::Two),
            GameMode::ComputerVsComputer { .. } => true,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    /// Strictly higher score wins. Meaningful once the game is over; before
    /// that it names the current leader.
    pub fn winner(&self) -> Winner {
        let one = self.player(Player::One).score();
        let two = self.player(Player::Two).score();
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Winner::Player1,
            std::cmp::Ordering::Less => Winner::Player2,
            std::cmp::Ordering::Equal => Winner::Draw,
        }
    }

    fn ensure_playing(&self) -> Result<(), MoveError> {
        if self.is_game_over() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }

    /// Picks the piece to move. Not available once the turn has a capture,
    /// since any further jump must start from the landing cell.
    pub fn select_source(&mut self, from: BoardCoordinate) -> Result<(), MoveError> {
        self.ensure_playing()?;
        if self.phase.pending_move().is_some() {
            return Err(MoveError::ChainPending);
        }
        if !self.board.contains(from) {
            return Err(MoveError::OutOfBounds);
        }
        if !self.board.is_occupied(from) {
            return Err(MoveError::EmptySourceCell);
        }
        self.phase = TurnPhase::AwaitingDestination { from };
        Ok(())
    }

    /// Completes the move started by [`select_source`](Self::select_source),
    /// or continues a pending chain. A rejected destination abandons the
    /// selection; a pending chain stays pending.
    pub fn attempt_destination(&mut self, to: BoardCoordinate) -> Result<MoveOutcome, MoveError> {
        match self.phase {
            TurnPhase::AwaitingDestination { from } => {
                let result = self.attempt_move(from, to);
                if result.is_err() {
                    self.phase = TurnPhase::AwaitingSource;
                }
                result
            }
            TurnPhase::ChainPending { last } | TurnPhase::AwaitingPass { last } => {
                self.attempt_move(last.to, to)
            }
            TurnPhase::AwaitingSource => Err(MoveError::NoSourceSelected),
            TurnPhase::GameOver => Err(MoveError::GameOver),
        }
    }

    /// Plays one jump for the current player. Nothing is mutated unless the
    /// jump is legal.
    ///
    /// The turn stays open after the capture so it can be undone; it ends on
    /// [`pass`](Self::pass), or at once if the board has no jump left.
    pub fn attempt_move(
        &mut self,
        from: BoardCoordinate,
        to: BoardCoordinate,
    ) -> Result<MoveOutcome, MoveError> {
        self.ensure_playing()?;

        if let Some(last) = self.phase.pending_move() {
            if from != last.to {
                return Err(MoveError::MustContinueFromLanding(last.to));
            }
            validate_jump(&self.board, from, to)?;
            if !self.config.chain_rule.allows(&last, from, to) {
                return Err(MoveError::IllegalJumpGeometry);
            }
        }

        let captured = validate_jump(&self.board, from, to)?;
        let mv = Move::new(from, to, captured);
        self.commit(mv);

        if is_terminal(&self.board) {
            self.end_turn();
            return Ok(MoveOutcome::Committed(captured));
        }
        self.phase = self.open_phase(mv);
        Ok(match self.phase {
            TurnPhase::ChainPending { .. } => MoveOutcome::ChainAvailable(captured),
            _ => MoveOutcome::Committed(captured),
        })
    }

    /// Phase of a turn whose latest jump is `last`.
    fn open_phase(&self, last: Move) -> TurnPhase {
        if self.config.chain_rule.continuations(&self.board, &last).is_empty() {
            TurnPhase::AwaitingPass { last }
        } else {
            TurnPhase::ChainPending { last }
        }
    }

    /// Ends the current player's turn. Only allowed after at least one capture.
    pub fn pass(&mut self) -> Result<(), MoveError> {
        self.ensure_playing()?;
        if self.phase.pending_move().is_none() {
            return Err(MoveError::NoChainPending);
        }
        self.end_turn();
        Ok(())
    }

    /// Takes back the current player's latest jump of this turn.
    ///
    /// One undo per player until the next capture by anyone.
    pub fn undo(&mut self) -> Result<Move, MoveError> {
        self.ensure_playing()?;
        let current = self.current;
        if self.player(current).undo_used {
            return Err(MoveError::UndoRightExhausted);
        }
        if self.turn_moves.is_empty() {
            return Err(MoveError::NothingToUndo);
        }
        let mv = self
            .log_mut(current)
            .take_undo()
            .ok_or(MoveError::NothingToUndo)?;
        self.turn_moves.pop();

        self.board.undo_jump(&mv);
        let state = self.player_mut(current);
        state.revert_capture(mv.captured);
        state.undo_used = true;

        self.phase = self
            .turn_moves
            .last()
            .map_or(TurnPhase::AwaitingSource, |&last| self.open_phase(last));
        log::debug!("player {} undid {mv}", self.current.number());
        Ok(mv)
    }

    /// Replays the jump taken back by [`undo`](Self::undo).
    pub fn redo(&mut self) -> Result<Move, MoveError> {
        self.ensure_playing()?;
        let current = self.current;
        let state = self.player(current);
        if !state.undo_used {
            return Err(MoveError::RedoWithoutPriorUndo);
        }
        if state.redo_used {
            return Err(MoveError::RedoRightExhausted);
        }
        let mv = *self
            .move_log(current)
            .redo_stack()
            .peek()
            .ok_or(MoveError::NothingToRedo)?;
        if validate_jump(&self.board, mv.from, mv.to) != Ok(mv.captured) {
            return Err(MoveError::NothingToRedo);
        }
        self.log_mut(current).take_redo();

        self.board.apply_jump(&mv);
        let state = self.player_mut(current);
        state.record_capture(mv.captured);
        state.redo_used = true;
        self.turn_moves.push(mv);

        self.phase = self.open_phase(mv);
        log::debug!("player {} redid {mv}", self.current.number());
        Ok(mv)
    }

    /// Plays the current player's whole turn with the engine and returns the
    /// jumps made, in order.
    ///
    /// Each jump of a chain is chosen by a fresh search over the jumps the
    /// chain rule allows from the landing cell. The depth follows the
    /// session's mode and `difficulty` unless overridden.
    pub fn request_computer_move(
        &mut self,
        difficulty: Difficulty,
        depth_override: Option<u8>,
    ) -> Result<Vec<Move>, MoveError> {
        self.ensure_playing()?;
        if matches!(self.phase, TurnPhase::AwaitingPass { .. }) {
            return Err(MoveError::ChainPending);
        }

        let mode = self.config.mode;
        let preset = EvalPreset::select(mode, difficulty);
        let depth =
            depth_override.unwrap_or_else(|| self.engine_config.search_depth(mode, difficulty));
        let mut engine =
            AlphaBetaEngine::new(PresetEvaluator::from_config(&self.engine_config, preset));

        let mut candidates = match self.phase.pending_move() {
            Some(last) => self.config.chain_rule.continuations(&self.board, &last),
            None => legal_jumps(&self.board),
        };
        if candidates.is_empty() {
            return Err(MoveError::NoLegalMove);
        }

        let mut played = Vec::new();
        loop {
            let (me, opponent) = split_players(&mut self.players, self.current);
            let Some((mv, score)) =
                engine.best_of(&mut self.board, &candidates, depth, me, opponent)
            else {
                break;
            };
            log::debug!(
                "player {} plays {mv} (score {score}, {preset:?}, depth {depth})",
                self.current.number()
            );
            self.commit(mv);
            played.push(mv);

            candidates = self.config.chain_rule.continuations(&self.board, &mv);
            if candidates.is_empty() {
                break;
            }
        }

        let [one, two] = &mut self.search_stats;
        let stats = match self.current {
            Player::One => one,
            Player::Two => two,
        };
        stats.accumulate(&engine.stats(depth));
        self.end_turn();
        Ok(played)
    }

    /// Makes a jump permanent. A capture by anyone restores both players'
    /// undo and redo rights.
    fn commit(&mut self, mv: Move) {
        let current = self.current;
        self.board.apply_jump(&mv);
        self.player_mut(current).record_capture(mv.captured);
        self.log_mut(current).record(mv);
        self.turn_moves.push(mv);
        for player in &mut self.players {
            player.reset_rights();
        }
    }

    fn end_turn(&mut self) {
        self.turn_moves.clear();
        self.current = self.current.other();

        if is_terminal(&self.board) {
            self.phase = TurnPhase::GameOver;
            log::info!(
                "game over: {:?} ({} - {})",
                self.winner(),
                self.player(Player::One).score(),
                self.player(Player::Two).score()
            );
        } else {
            self.phase = TurnPhase::AwaitingSource;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_from_rows(rows: &[&str], chain_rule: ChainRule) -> GameSession {
        let board = Board::from_rows(rows).unwrap();
        let saved = SavedGame {
            board,
            players: [PlayerState::new(), PlayerState::new()],
            current: Player::One,
        };
        let config = SessionConfig {
            mode: GameMode::HumanVsHuman,
            chain_rule,
            ..SessionConfig::default()
        };
        GameSession::from_saved(saved, config, Arc::new(EngineConfig::default()))
    }

    fn c(row: usize, col: usize) -> BoardCoordinate {
        BoardCoordinate::new(row, col)
    }

    // A-over-B on the first row, plus a far-away pair so the game goes on.
    const SINGLE_JUMP: [&str; 6] = ["AB****", "******", "******", "******", "******", "CD****"];

    #[test]
    fn test_new_session_validates_size() {
        let engine = Arc::new(EngineConfig::default());
        let small = SessionConfig {
            size: 5,
            ..SessionConfig::default()
        };
        assert!(matches!(
            GameSession::new(small, Arc::clone(&engine)),
            Err(ConfigError::InvalidBoardSize(5))
        ));

        let config = SessionConfig {
            size: 6,
            seed: Some(3),
            ..SessionConfig::default()
        };
        let session = GameSession::new(config, engine).unwrap();
        assert_eq!(session.board().empty_count(), 4);
        assert_eq!(session.current_player(), Player::One);
        assert_eq!(session.phase(), TurnPhase::AwaitingSource);
        assert!(session.is_computer(Player::Two));
        assert!(!session.is_computer(Player::One));
    }

    #[test]
    fn test_same_seed_same_board() {
        let engine = Arc::new(EngineConfig::default());
        let config = SessionConfig {
            size: 10,
            seed: Some(99),
            ..SessionConfig::default()
        };
        let a = GameSession::new(config, Arc::clone(&engine)).unwrap();
        let b = GameSession::new(config, engine).unwrap();
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_single_jump_scores_one_extra_piece() {
        let mut session = session_from_rows(&SINGLE_JUMP, ChainRule::AnyDirection);
        let outcome = session.attempt_move(c(0, 0), c(0, 2)).unwrap();
        assert_eq!(outcome, MoveOutcome::Committed(PieceKind::B));

        let p1 = session.player(Player::One);
        assert_eq!(p1.count(PieceKind::B), 1);
        assert_eq!(p1.score(), 1);
        assert_eq!(p1.sets(), 0);
        assert_eq!(p1.extra_pieces(), 1);

        assert_eq!(session.board().get(c(0, 0)), None);
        assert_eq!(session.board().get(c(0, 1)), None);
        assert_eq!(session.board().get(c(0, 2)), Some(PieceKind::A));
        assert_eq!(session.current_player(), Player::One);
        session.pass().unwrap();
        assert_eq!(session.current_player(), Player::Two);
    }

    #[test]
    fn test_capture_without_continuation_can_be_undone() {
        let mut session = session_from_rows(&SINGLE_JUMP, ChainRule::AnyDirection);
        let board_before = session.board().clone();

        let outcome = session.attempt_move(c(0, 0), c(0, 2)).unwrap();
        assert_eq!(outcome, MoveOutcome::Committed(PieceKind::B));
        let jump = Move::new(c(0, 0), c(0, 2), PieceKind::B);
        assert_eq!(session.phase(), TurnPhase::AwaitingPass { last: jump });
        assert_eq!(session.select_source(c(5, 0)), Err(MoveError::ChainPending));
        assert_eq!(
            session.request_computer_move(Difficulty::Easy, None),
            Err(MoveError::ChainPending)
        );

        assert_eq!(session.undo(), Ok(jump));
        assert_eq!(session.board(), &board_before);
        assert_eq!(session.player(Player::One).total_captured(), 0);
        assert_eq!(session.phase(), TurnPhase::AwaitingSource);
        assert_eq!(session.current_player(), Player::One);

        assert_eq!(session.redo(), Ok(jump));
        assert_eq!(session.phase(), TurnPhase::AwaitingPass { last: jump });
        assert_eq!(session.player(Player::One).score(), 1);

        session.pass().unwrap();
        assert_eq!(session.current_player(), Player::Two);
        assert_eq!(session.phase(), TurnPhase::AwaitingSource);
        assert_eq!(session.undo(), Err(MoveError::NothingToUndo));
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut session = session_from_rows(&SINGLE_JUMP, ChainRule::AnyDirection);
        let before = session.board().clone();
        assert_eq!(
            session.attempt_move(c(0, 0), c(0, 1)),
            Err(MoveError::OccupiedDestination)
        );
        assert_eq!(
            session.attempt_move(c(0, 0), c(1, 1)),
            Err(MoveError::IllegalJumpGeometry)
        );
        assert_eq!(
            session.attempt_move(c(0, 0), c(0, 9)),
            Err(MoveError::OutOfBounds)
        );
        assert_eq!(session.board(), &before);
        assert_eq!(session.current_player(), Player::One);
    }

    #[test]
    fn test_source_then_destination() {
        let mut session = session_from_rows(&SINGLE_JUMP, ChainRule::AnyDirection);
        assert_eq!(
            session.attempt_destination(c(0, 2)),
            Err(MoveError::NoSourceSelected)
        );
        assert_eq!(session.select_source(c(2, 2)), Err(MoveError::EmptySourceCell));

        session.select_source(c(0, 0)).unwrap();
        assert_eq!(
            session.phase(),
            TurnPhase::AwaitingDestination { from: c(0, 0) }
        );
        // A bad destination drops the selection.
        assert!(session.attempt_destination(c(0, 3)).is_err());
        assert_eq!(session.phase(), TurnPhase::AwaitingSource);

        session.select_source(c(0, 0)).unwrap();
        assert_eq!(
            session.attempt_destination(c(0, 2)),
            Ok(MoveOutcome::Committed(PieceKind::B))
        );
    }

    // B takes C landing on (0,3), from where D can be taken next.
    const OPEN_CHAIN: [&str; 6] = ["ABC***", "***D**", "******", "******", "******", "DE****"];

    #[test]
    fn test_undo_restores_and_is_limited() {
        let mut session = session_from_rows(&OPEN_CHAIN, ChainRule::AnyDirection);
        let board_before = session.board().clone();
        let p1_before = session.player(Player::One).clone();

        let outcome = session.attempt_move(c(0, 1), c(0, 3)).unwrap();
        assert_eq!(outcome, MoveOutcome::ChainAvailable(PieceKind::C));

        let undone = session.undo().unwrap();
        assert_eq!(undone.captured, PieceKind::C);
        assert_eq!(session.board(), &board_before);
        assert_eq!(session.player(Player::One).pieces(), p1_before.pieces());
        assert!(session.player(Player::One).undo_used);
        assert_eq!(session.phase(), TurnPhase::AwaitingSource);
        assert_eq!(session.current_player(), Player::One);

        assert_eq!(session.undo(), Err(MoveError::UndoRightExhausted));
    }

    #[test]
    fn test_redo_round_trip() {
        let mut session = session_from_rows(&OPEN_CHAIN, ChainRule::AnyDirection);
        assert_eq!(session.redo(), Err(MoveError::RedoWithoutPriorUndo));

        session.attempt_move(c(0, 1), c(0, 3)).unwrap();
        let board_after = session.board().clone();
        let p1_after = session.player(Player::One).clone();

        session.undo().unwrap();
        let redone = session.redo().unwrap();
        assert_eq!(redone.to, c(0, 3));
        assert_eq!(session.board(), &board_after);
        assert_eq!(session.player(Player::One).pieces(), p1_after.pieces());
        assert_eq!(session.phase(), TurnPhase::ChainPending { last: redone });
        assert_eq!(session.redo(), Err(MoveError::RedoRightExhausted));
    }

    #[test]
    fn test_capture_restores_rights() {
        let mut session = session_from_rows(&OPEN_CHAIN, ChainRule::AnyDirection);
        session.attempt_move(c(0, 1), c(0, 3)).unwrap();
        session.undo().unwrap();
        assert!(session.player(Player::One).undo_used);

        session.attempt_move(c(0, 1), c(0, 3)).unwrap();
        assert!(!session.player(Player::One).undo_used);
        assert!(!session.player(Player::One).redo_used);
        assert!(session.move_log(Player::One).redo_stack().is_empty());
    }

    #[test]
    fn test_undo_inside_chain_returns_to_previous_landing() {
        let rows = ["ABC***", "***D**", "******", "***E**", "******", "DE****"];
        let mut session = session_from_rows(&rows, ChainRule::AnyDirection);
        let first = Move::new(c(0, 1), c(0, 3), PieceKind::C);

        session.attempt_move(c(0, 1), c(0, 3)).unwrap();
        let after_first = session.board().clone();
        assert_eq!(
            session.attempt_move(c(0, 3), c(2, 3)),
            Ok(MoveOutcome::ChainAvailable(PieceKind::D))
        );
        assert_eq!(session.move_log(Player::One).undo_stack().len(), 2);

        session.undo().unwrap();
        assert_eq!(session.board(), &after_first);
        assert_eq!(session.phase(), TurnPhase::ChainPending { last: first });
        assert_eq!(session.move_log(Player::One).undo_stack().peek(), Some(&first));
    }

    #[test]
    fn test_nothing_to_undo_at_turn_start() {
        let mut session = session_from_rows(&SINGLE_JUMP, ChainRule::AnyDirection);
        assert_eq!(session.undo(), Err(MoveError::NothingToUndo));
    }

    #[test]
    fn test_chain_must_continue_from_landing() {
        // A jumps B to (0,2), then can jump C down to (2,2).
        let rows = ["AB****", "**C***", "******", "******", "******", "DE****"];
        let mut session = session_from_rows(&rows, ChainRule::AnyDirection);
        let outcome = session.attempt_move(c(0, 0), c(0, 2)).unwrap();
        assert_eq!(outcome, MoveOutcome::ChainAvailable(PieceKind::B));
        assert_eq!(session.select_source(c(5, 0)), Err(MoveError::ChainPending));
        assert_eq!(
            session.attempt_move(c(5, 0), c(5, 2)),
            Err(MoveError::MustContinueFromLanding(c(0, 2)))
        );
        assert_eq!(
            session.attempt_destination(c(2, 2)),
            Ok(MoveOutcome::Committed(PieceKind::C))
        );
        assert_eq!(session.player(Player::One).total_captured(), 2);
        // Nothing left to jump from (2,2).
        assert_eq!(
            session.attempt_destination(c(4, 2)),
            Err(MoveError::NoMidpointPiece)
        );
        session.pass().unwrap();
        assert_eq!(session.current_player(), Player::Two);
    }

    #[test]
    fn test_same_direction_chain_rule() {
        let rows = ["AB****", "**C***", "******", "******", "******", "DE****"];
        let mut session = session_from_rows(&rows, ChainRule::SameDirection);
        // Turning down is not a continuation under this rule.
        let outcome = session.attempt_move(c(0, 0), c(0, 2)).unwrap();
        assert_eq!(outcome, MoveOutcome::Committed(PieceKind::B));

        let rows = ["ABC*E*", "***D**", "******", "******", "******", "DE****"];
        let mut session = session_from_rows(&rows, ChainRule::SameDirection);
        assert_eq!(
            session.attempt_move(c(0, 1), c(0, 3)),
            Ok(MoveOutcome::ChainAvailable(PieceKind::C))
        );
        assert_eq!(
            session.attempt_move(c(0, 3), c(2, 3)),
            Err(MoveError::IllegalJumpGeometry)
        );
        assert_eq!(
            session.attempt_move(c(0, 3), c(0, 5)),
            Ok(MoveOutcome::Committed(PieceKind::E))
        );
    }

    #[test]
    fn test_pass_ends_chain() {
        let rows = ["AB****", "**C***", "******", "******", "******", "DE****"];
        let mut session = session_from_rows(&rows, ChainRule::AnyDirection);
        assert_eq!(session.pass(), Err(MoveError::NoChainPending));
        session.attempt_move(c(0, 0), c(0, 2)).unwrap();
        session.pass().unwrap();
        assert_eq!(session.current_player(), Player::Two);
        assert_eq!(session.phase(), TurnPhase::AwaitingSource);
    }

    #[test]
    fn test_game_over_and_winner() {
        let rows = ["AB****", "******", "******", "******", "******", "******"];
        let mut session = session_from_rows(&rows, ChainRule::AnyDirection);
        assert_eq!(session.winner(), Winner::Draw);
        session.attempt_move(c(0, 0), c(0, 2)).unwrap();
        assert!(session.is_game_over());
        assert_eq!(session.winner(), Winner::Player1);
        assert_eq!(session.attempt_move(c(0, 2), c(0, 4)), Err(MoveError::GameOver));
        assert_eq!(
            session.request_computer_move(Difficulty::Easy, None),
            Err(MoveError::GameOver)
        );
    }

    #[test]
    fn test_computer_plays_whole_chain() {
        // The only sensible start is A over B, after which C can be taken.
        let rows = ["AB****", "**C***", "******", "******", "******", "******"];
        let mut session = session_from_rows(&rows, ChainRule::AnyDirection);
        let played = session
            .request_computer_move(Difficulty::Medium, Some(1))
            .unwrap();
        assert_eq!(played.len(), 2);
        assert_eq!(played[0].captured, PieceKind::B);
        assert_eq!(played[1].captured, PieceKind::C);
        assert_eq!(session.player(Player::One).total_captured(), 2);
        assert!(session.is_game_over());
        assert!(session.evaluations(Player::One) > 0);
        assert_eq!(session.evaluations(Player::Two), 0);
    }

    #[test]
    fn test_computer_respects_same_direction_rule() {
        let rows = ["AB****", "**C***", "******", "******", "******", "******"];
        let mut session = session_from_rows(&rows, ChainRule::SameDirection);
        let played = session
            .request_computer_move(Difficulty::Easy, None)
            .unwrap();
        assert_eq!(played.len(), 1);
        assert_eq!(session.current_player(), Player::Two);
    }

    #[test]
    fn test_restart_refills_board() {
        let config = SessionConfig {
            size: 6,
            seed: Some(1),
            mode: GameMode::HumanVsHuman,
            ..SessionConfig::default()
        };
        let mut session = GameSession::new(config, Arc::new(EngineConfig::default())).unwrap();
        let first = legal_jumps(session.board());
        let mv = first[0];
        session.attempt_move(mv.from, mv.to).unwrap();
        session.restart();
        assert_eq!(session.board().empty_count(), 4);
        assert_eq!(session.player(Player::One).total_captured(), 0);
        assert_eq!(session.current_player(), Player::One);
    }
}
