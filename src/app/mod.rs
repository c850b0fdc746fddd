//! Screen state machine
//!
//! Every screen is a long-lived `AppState` registered once at startup. The
//! `StateMachine` owns them together with the `AppContext` they share and
//! guarantees at most one screen is active at a time.

mod context;
mod games;
mod machine;
mod screens;
mod view;

use std::fmt;

use thiserror::Error;

use crate::sim::LevelError;

pub use context::AppContext;
pub use games::{BlockBreakerState, PlatformerState};
pub use machine::{AppState, StateMachine};
pub use screens::{ConsoleState, LeaderboardState, MenuState, PauseState, SavePromptState, SettingsState};
pub use view::{MenuEntry, View};

/// Identifies a registered screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    Menu,
    Platformer,
    BlockBreaker,
    Pause,
    Settings,
    Console,
    Leaderboard,
    SavePrompt,
}

impl StateId {
    pub const ALL: [StateId; 8] = [
        StateId::Menu,
        StateId::Platformer,
        StateId::BlockBreaker,
        StateId::Pause,
        StateId::Settings,
        StateId::Console,
        StateId::Leaderboard,
        StateId::SavePrompt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StateId::Menu => "MENU",
            StateId::Platformer => "PLATFORMER",
            StateId::BlockBreaker => "BLOCKBREAKER",
            StateId::Pause => "PAUSE",
            StateId::Settings => "SETTINGS",
            StateId::Console => "CONSOLE",
            StateId::Leaderboard => "LEADERBOARD",
            StateId::SavePrompt => "SAVE_PROMPT",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == name)
    }

    /// Screens that run a game session
    pub fn is_game(&self) -> bool {
        matches!(self, StateId::Platformer | StateId::BlockBreaker)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a screen asks the machine to do once its tick has finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateCommand {
    #[default]
    None,
    Change(StateId),
    /// Return to the last non-console screen
    Back,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("state {0} is already registered")]
    DuplicateState(StateId),
    #[error("failed to build platformer level: {0}")]
    Level(#[from] LevelError),
}

/// Register every screen and enter the menu
pub fn build_app(ctx: AppContext) -> Result<StateMachine, AppError> {
    let mut machine = StateMachine::new(ctx);
    machine.register(Box::new(MenuState::new()))?;
    machine.register(Box::new(PlatformerState::new()?))?;
    machine.register(Box::new(BlockBreakerState::new()))?;
    machine.register(Box::new(PauseState::new()))?;
    machine.register(Box::new(SettingsState::new()))?;
    machine.register(Box::new(ConsoleState::new()))?;
    machine.register(Box::new(LeaderboardState::new()))?;
    machine.register(Box::new(SavePromptState::new()))?;
    machine.change_state(StateId::Menu);
    Ok(machine)
}
