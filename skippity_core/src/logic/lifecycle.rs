//! Where the program is between games: menu, setup, play, result.

use crate::logic::game::{ConfigError, SessionConfig, Winner};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifecycleState {
    #[default]
    MainMenu,
    Configuring,
    InGame { config: SessionConfig },
    GameOver { config: SessionConfig, winner: Winner },
}

impl LifecycleState {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MainMenu => "main menu",
            Self::Configuring => "configuring",
            Self::InGame { .. } => "in game",
            Self::GameOver { .. } => "game over",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("cannot {action} from {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    state: LifecycleState,
}

impl Lifecycle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn state(&self) -> &LifecycleState {
        &self.state
    }

    fn invalid(&self, action: &'static str) -> LifecycleError {
        LifecycleError::InvalidTransition {
            from: self.state.name(),
            action,
        }
    }

    /// Main menu to game setup.
    pub fn configure(&mut self) -> Result<(), LifecycleError> {
        match self.state {
            LifecycleState::MainMenu => {
                self.state = LifecycleState::Configuring;
                Ok(())
            }
            _ => Err(self.invalid("configure")),
        }
    }

    /// Starts a game once setup is done, or a rematch with the same settings
    /// straight from the result screen.
    pub fn start(&mut self, config: SessionConfig) -> Result<(), LifecycleError> {
        match self.state {
            LifecycleState::Configuring | LifecycleState::GameOver { .. } => {
                config.validate()?;
                log::debug!("starting {}x{} game, {:?}", config.size, config.size, config.mode);
                self.state = LifecycleState::InGame { config };
                Ok(())
            }
            _ => Err(self.invalid("start a game")),
        }
    }

    pub fn finish(&mut self, winner: Winner) -> Result<(), LifecycleError> {
        match self.state {
            LifecycleState::InGame { config } => {
                self.state = LifecycleState::GameOver { config, winner };
                Ok(())
            }
            _ => Err(self.invalid("finish a game")),
        }
    }

    /// Abandons setup or a running game, or leaves the result screen.
    pub fn back_to_menu(&mut self) -> Result<(), LifecycleError> {
        match self.state {
            LifecycleState::MainMenu => Err(self.invalid("return to the menu")),
            _ => {
                self.state = LifecycleState::MainMenu;
                Ok(())
            }
        }
    }
}
