//! Read-only screen content handed to the renderer

use super::StateId;
use crate::highscores::ScoreEntry;
use crate::settings::Sensitivity;
use crate::sim::{BlockBreakerGame, PlatformerGame, SaveRequest};

/// Main menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Platformer,
    BlockBreaker,
    Leaderboard,
    Settings,
    Console,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 5] = [
        MenuEntry::Platformer,
        MenuEntry::BlockBreaker,
        MenuEntry::Leaderboard,
        MenuEntry::Settings,
        MenuEntry::Console,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::Platformer => "Platformer",
            MenuEntry::BlockBreaker => "Block Breaker",
            MenuEntry::Leaderboard => "Leaderboard",
            MenuEntry::Settings => "Settings",
            MenuEntry::Console => "Console",
        }
    }

    pub fn target(&self) -> StateId {
        match self {
            MenuEntry::Platformer => StateId::Platformer,
            MenuEntry::BlockBreaker => StateId::BlockBreaker,
            MenuEntry::Leaderboard => StateId::Leaderboard,
            MenuEntry::Settings => StateId::Settings,
            MenuEntry::Console => StateId::Console,
        }
    }
}

/// What the active screen wants drawn
#[derive(Debug)]
pub enum View<'a> {
    /// Nothing entered yet
    Blank,
    Menu {
        entries: &'static [MenuEntry],
        cursor: usize,
    },
    Platformer(&'a PlatformerGame),
    BlockBreaker(&'a BlockBreakerGame),
    Pause {
        paused: Option<StateId>,
    },
    Settings {
        sensitivity: Sensitivity,
    },
    Console {
        lines: Vec<&'a str>,
        scroll: usize,
    },
    Leaderboard {
        game: &'static str,
        entries: Vec<ScoreEntry>,
    },
    SavePrompt(Option<&'a SaveRequest>),
}
