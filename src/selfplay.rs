use crate::cli::SelfplayArgs;
use anyhow::{ensure, Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use skippity_core::{
    encode, Difficulty, EngineConfig, GameMode, GameSession, Lifecycle, Player, SessionConfig,
    Winner,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;
use tracing::{debug, info};

/// One line of the JSON report.
#[derive(Debug, Serialize)]
struct GameReport {
    game: u32,
    size: usize,
    seed: u64,
    scores: [u32; 2],
    sets: [u32; 2],
    extra_pieces: [u32; 2],
    winner: Winner,
    turns: u32,
    evaluations: [u64; 2],
}

#[derive(Debug, Default)]
struct Tally {
    player1: u32,
    player2: u32,
    draws: u32,
}

impl Tally {
    fn record(&mut self, winner: Winner) {
        match winner {
            Winner::Player1 => self.player1 += 1,
            Winner::Player2 => self.player2 += 1,
            Winner::Draw => self.draws += 1,
        }
    }
}

pub fn run(args: &SelfplayArgs, engine_config: Arc<EngineConfig>) -> Result<()> {
    ensure!(
        args.min_size <= args.max_size,
        "--min-size {} is larger than --max-size {}",
        args.min_size,
        args.max_size
    );

    let mut rng = args
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let mut report = args
        .report
        .as_ref()
        .map(|path| {
            File::create(path)
                .map(BufWriter::new)
                .with_context(|| format!("creating report {}", path.display()))
        })
        .transpose()?;

    let difficulty = Difficulty::from(args.difficulty);
    let mut lifecycle = Lifecycle::new();
    lifecycle.configure()?;

    let mut tally = Tally::default();
    let mut last_session = None;

    for game in 1..=args.games {
        let config = SessionConfig {
            size: rng.gen_range(args.min_size..=args.max_size),
            mode: GameMode::ComputerVsComputer { batch: args.batch },
            difficulty,
            chain_rule: args.chain_rule.into(),
            seed: Some(rng.gen()),
        };
        lifecycle.start(config)?;

        let mut session = GameSession::new(config, Arc::clone(&engine_config))?;
        let turns = play_out(&mut session, difficulty)?;

        let winner = session.winner();
        lifecycle.finish(winner)?;
        tally.record(winner);

        let line = game_report(game, &config, &session, turns);
        let [score1, score2] = line.scores;
        info!(
            game,
            size = line.size,
            turns,
            score1,
            score2,
            winner = ?winner,
            "game finished"
        );
        if let Some(out) = report.as_mut() {
            serde_json::to_writer(&mut *out, &line).context("writing report")?;
            writeln!(out).context("writing report")?;
        }
        last_session = Some(session);
    }

    lifecycle.back_to_menu()?;

    if let Some(out) = report.as_mut() {
        out.flush().context("flushing report")?;
    }

    if let (Some(path), Some(session)) = (&args.save_final, &last_session) {
        std::fs::write(path, encode(&session.to_saved()))
            .with_context(|| format!("writing save {}", path.display()))?;
        info!(path = %path.display(), "final position saved");
    }

    println!(
        "{} games: player 1 won {}, player 2 won {}, {} draws",
        args.games, tally.player1, tally.player2, tally.draws
    );
    Ok(())
}

fn play_out(session: &mut GameSession, difficulty: Difficulty) -> Result<u32> {
    let mut turns = 0;
    while !session.is_game_over() {
        let player = session.current_player();
        let played = session.request_computer_move(difficulty, None)?;
        turns += 1;
        debug!(turn = turns, player = player.number(), jumps = played.len(), "turn played");
    }
    Ok(turns)
}

fn game_report(game: u32, config: &SessionConfig, session: &GameSession, turns: u32) -> GameReport {
    let summary = |p: Player| session.player(p).summary();
    let (one, two) = (summary(Player::One), summary(Player::Two));
    GameReport {
        game,
        size: config.size,
        seed: config.seed.unwrap_or_default(),
        scores: [one.score, two.score],
        sets: [one.sets, two.sets],
        extra_pieces: [one.extra_pieces, two.extra_pieces],
        winner: session.winner(),
        turns,
        evaluations: [
            session.evaluations(Player::One),
            session.evaluations(Player::Two),
        ],
    }
}
