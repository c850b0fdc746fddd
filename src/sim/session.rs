//! Types shared by the session controllers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Current phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Ball resting on the paddle, waiting for launch
    Ready,
    /// Active gameplay
    Playing,
    /// Every destructible brick is gone, waiting for confirm
    LevelDone,
    /// Death animation running; gameplay input ignored
    Dying,
    /// Run ended
    GameOver,
}

impl SessionPhase {
    /// Once a terminal sequence starts, pause and quit are disabled so the
    /// save prompt is always reached.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Dying | SessionPhase::GameOver)
    }
}

/// Score-persistence request raised after a terminal game event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub game: String,
    pub value: u32,
    /// What `value` measures ("Points", "Distance", ...)
    pub label: String,
}

impl SaveRequest {
    pub fn new(game: impl Into<String>, value: u32, label: impl Into<String>) -> Self {
        Self {
            game: game.into(),
            value,
            label: label.into(),
        }
    }
}

/// What a session asks of the application after a tick
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionSignal {
    #[default]
    None,
    Pause,
    ExitToMenu,
    SavePrompt(SaveRequest),
}

/// How the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Fell,
    Spiked,
    Enemy,
}

/// How an enemy was defeated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatKind {
    Stomp,
    Slide,
}

/// Notable things that happened during a tick, drained by the app for the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Reset { game: &'static str },
    Resumed { game: &'static str },
    EnemyDefeated(DefeatKind),
    PlayerKilled(DeathCause),
    BallLost { lives: u32 },
    LevelCleared { level: usize },
    LevelStarted { level: usize },
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEvent::Reset { game } => write!(f, "{game}: Reset"),
            SessionEvent::Resumed { game } => write!(f, "{game}: Resume"),
            SessionEvent::EnemyDefeated(DefeatKind::Stomp) => write!(f, "Enemy Defeated (Stomp)"),
            SessionEvent::EnemyDefeated(DefeatKind::Slide) => write!(f, "Enemy Defeated (Slide)"),
            SessionEvent::PlayerKilled(DeathCause::Fell) => write!(f, "Fell out of the world"),
            SessionEvent::PlayerKilled(DeathCause::Spiked) => write!(f, "Spiked!"),
            SessionEvent::PlayerKilled(DeathCause::Enemy) => write!(f, "Player Killed"),
            SessionEvent::BallLost { lives } => write!(f, "Ball Lost. Lives: {lives}"),
            SessionEvent::LevelCleared { level } => write!(f, "Level {} cleared", level + 1),
            SessionEvent::LevelStarted { level } => write!(f, "Level {}", level + 1),
        }
    }
}
