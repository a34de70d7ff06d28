use crate::engine::eval::EvalPreset;
use crate::engine::{Difficulty, GameMode};
use serde::{Deserialize, Serialize};

/// Term weights of the heuristic evaluation. Each is multiplied with the
/// matching feature; the `opponent_*` and `vulnerable` terms are subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalWeights {
    pub score_difference: i32,
    pub set_potential: i32,
    pub min_counter: i32,
    pub extra_pieces: i32,
    pub capture_balance: i32,
    pub opponent_set_potential: i32,
    pub opponent_min_counter: i32,
    pub vulnerable: i32,
}

impl EvalWeights {
    pub const MEDIUM: Self = Self {
        score_difference: 1,
        set_potential: 100,
        min_counter: 0,
        extra_pieces: 1,
        capture_balance: 0,
        opponent_set_potential: 100,
        opponent_min_counter: 0,
        vulnerable: 1,
    };

    pub const EXTREME: Self = Self {
        score_difference: 1,
        set_potential: 200,
        min_counter: 400,
        extra_pieces: 10,
        capture_balance: 100,
        opponent_set_potential: 200,
        opponent_min_counter: 400,
        vulnerable: 10,
    };

    #[must_use]
    fn scaled(self, scale: Option<f32>) -> Self {
        Self {
            score_difference: apply_scale(self.score_difference, scale),
            set_potential: apply_scale(self.set_potential, scale),
            min_counter: apply_scale(self.min_counter, scale),
            extra_pieces: apply_scale(self.extra_pieces, scale),
            capture_balance: apply_scale(self.capture_balance, scale),
            opponent_set_potential: apply_scale(self.opponent_set_potential, scale),
            opponent_min_counter: apply_scale(self.opponent_min_counter, scale),
            vulnerable: apply_scale(self.vulnerable, scale),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation presets
    pub medium: EvalWeights,
    pub extreme: EvalWeights,
    pub ai: EvalWeights,

    // Search depth policy
    pub depth_extreme: u8,
    pub depth_medium: u8,
    pub depth_ai_match: u8,
    pub depth_fallback: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            medium: EvalWeights::MEDIUM,
            extreme: EvalWeights::EXTREME,
            // The self-play preset mirrors extreme
            ai: EvalWeights::EXTREME,

            depth_extreme: 4,
            depth_medium: 2,
            depth_ai_match: 3,
            depth_fallback: 1,
        }
    }
}

/// Relative overrides: weight presets are multiplied by a scale factor,
/// depths replace the defaults.
#[derive(Deserialize)]
struct EngineConfigJson {
    medium_scale: Option<f32>,
    extreme_scale: Option<f32>,
    ai_scale: Option<f32>,

    depth_extreme: Option<u8>,
    depth_medium: Option<u8>,
    depth_ai_match: Option<u8>,
    depth_fallback: Option<u8>,
}

impl EngineConfig {
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            medium: default.medium.scaled(json_config.medium_scale),
            extreme: default.extreme.scaled(json_config.extreme_scale),
            ai: default.ai.scaled(json_config.ai_scale),

            depth_extreme: json_config.depth_extreme.unwrap_or(default.depth_extreme),
            depth_medium: json_config.depth_medium.unwrap_or(default.depth_medium),
            depth_ai_match: json_config.depth_ai_match.unwrap_or(default.depth_ai_match),
            depth_fallback: json_config.depth_fallback.unwrap_or(default.depth_fallback),
        })
    }

    pub const fn weights(&self, preset: EvalPreset) -> &EvalWeights {
        match preset {
            EvalPreset::Medium => &self.medium,
            EvalPreset::Extreme => &self.extreme,
            EvalPreset::Ai => &self.ai,
        }
    }

    /// Nominal search depth for a computer player.
    pub const fn search_depth(&self, mode: GameMode, difficulty: Difficulty) -> u8 {
        match (mode, difficulty) {
            (GameMode::ComputerVsComputer { batch: false }, _) => self.depth_ai_match,
            (GameMode::ComputerVsComputer { batch: true }, _) => self.depth_fallback,
            (_, Difficulty::Extreme) => self.depth_extreme,
            (_, Difficulty::Medium) => self.depth_medium,
            (_, Difficulty::Easy) => self.depth_fallback,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn apply_scale(default_val: i32, scale: Option<f32>) -> i32 {
    scale.map_or(default_val, |s| (default_val as f32 * s) as i32)
}
