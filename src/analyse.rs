use crate::cli::{AnalyseArgs, JumpArg};
use anyhow::{Context, Result};
use skippity_core::{
    decode, BoardCoordinate, Difficulty, EngineConfig, GameMode, GameSession, Player,
    SessionConfig,
};
use std::sync::Arc;
use tracing::info;

pub fn run(args: &AnalyseArgs, engine_config: Arc<EngineConfig>) -> Result<()> {
    let text = std::fs::read_to_string(&args.save_file)
        .with_context(|| format!("reading save {}", args.save_file.display()))?;
    let saved = decode(&text)
        .with_context(|| format!("loading save {}", args.save_file.display()))?;

    let difficulty = Difficulty::from(args.difficulty);
    let config = SessionConfig {
        mode: GameMode::HumanVsComputer,
        difficulty,
        chain_rule: args.chain_rule.into(),
        ..SessionConfig::default()
    };
    let mut session = GameSession::from_saved(saved, config, engine_config);
    play_jumps(&mut session, &args.jumps)?;

    print!("{}", session.board());
    print_scores(&session);

    if session.is_game_over() {
        println!("game over: {:?}", session.winner());
        return Ok(());
    }

    let mover = session.current_player();
    let played = session.request_computer_move(difficulty, args.depth)?;
    println!("player {} plays:", mover.number());
    for mv in &played {
        println!("  {mv}");
    }

    let stats = session.search_stats(mover);
    info!(
        depth = stats.depth,
        nodes = stats.nodes,
        evaluations = stats.evaluations,
        "search finished"
    );
    print_scores(&session);
    Ok(())
}

/// Plays the given jumps in order, passing between turns, and leaves the
/// session at the start of a turn.
fn play_jumps(session: &mut GameSession, jumps: &[JumpArg]) -> Result<()> {
    let size = session.board().size();
    for jump in jumps {
        let from = BoardCoordinate::from_user(jump.from.0, jump.from.1, size)?;
        let to = BoardCoordinate::from_user(jump.to.0, jump.to.1, size)?;
        if session
            .phase()
            .pending_move()
            .is_some_and(|last| last.to != from)
        {
            session.pass()?;
        }
        let mover = session.current_player();
        session
            .attempt_move(from, to)
            .with_context(|| format!("jump {from} to {to}"))?;
        info!(player = mover.number(), %from, %to, "jump played");
    }
    if session.phase().pending_move().is_some() {
        session.pass()?;
    }
    Ok(())
}

fn print_scores(session: &GameSession) {
    for player in [Player::One, Player::Two] {
        let summary = session.player(player).summary();
        println!(
            "player {}: score {} ({} sets, {} extra)",
            player.number(),
            summary.score,
            summary.sets,
            summary.extra_pieces
        );
    }
}
