use clap::{Args, Parser, Subcommand, ValueEnum};
use skippity_core::{ChainRule, Difficulty};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Skippity engine driver", long_about = None)]
pub struct Cli {
    /// Engine configuration (JSON): weight scale factors and search depths.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Let the engine play against itself.
    Selfplay(SelfplayArgs),
    /// Load a save file and show the move the engine would play.
    Analyse(AnalyseArgs),
}

#[derive(Args, Debug)]
pub struct SelfplayArgs {
    #[arg(short, long, default_value_t = 100)]
    pub games: u32,

    #[arg(long, default_value_t = 6)]
    pub min_size: usize,

    #[arg(long, default_value_t = 15)]
    pub max_size: usize,

    /// Unattended bulk run at the shallow fallback depth.
    #[arg(long)]
    pub batch: bool,

    #[arg(long, value_enum, default_value_t = DifficultyArg::Extreme)]
    pub difficulty: DifficultyArg,

    #[arg(long, value_enum, default_value_t = ChainRuleArg::Any)]
    pub chain_rule: ChainRuleArg,

    /// Seed for board sizes and fills; the clock when absent.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Append one JSON line per finished game to this file.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Write the final position of the last game in save format.
    #[arg(long)]
    pub save_final: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct AnalyseArgs {
    pub save_file: PathBuf,

    #[arg(long, value_enum, default_value_t = DifficultyArg::Extreme)]
    pub difficulty: DifficultyArg,

    #[arg(long, value_enum, default_value_t = ChainRuleArg::Any)]
    pub chain_rule: ChainRuleArg,

    /// Search depth; follows the difficulty when absent.
    #[arg(long)]
    pub depth: Option<u8>,

    /// Jump to play before the engine moves, 1-based. Repeatable; a jump
    /// that does not start from the previous landing cell passes first.
    #[arg(long = "jump", value_name = "ROW,COL,ROW,COL", value_parser = parse_jump)]
    pub jumps: Vec<JumpArg>,
}

/// A jump as typed on the command line, not yet checked against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpArg {
    pub from: (i64, i64),
    pub to: (i64, i64),
}

fn parse_jump(s: &str) -> Result<JumpArg, String> {
    let numbers = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map_err(|e| format!("{part:?} is not a number: {e}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    match *numbers.as_slice() {
        [r1, c1, r2, c2] => Ok(JumpArg {
            from: (r1, c1),
            to: (r2, c2),
        }),
        _ => Err(format!("expected ROW,COL,ROW,COL, got {s:?}")),
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Extreme,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Extreme => Self::Extreme,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ChainRuleArg {
    /// Any jump from the landing cell.
    Any,
    /// Only a jump continuing in the same direction.
    Same,
}

impl From<ChainRuleArg> for ChainRule {
    fn from(arg: ChainRuleArg) -> Self {
        match arg {
            ChainRuleArg::Any => Self::AnyDirection,
            ChainRuleArg::Same => Self::SameDirection,
        }
    }
}
