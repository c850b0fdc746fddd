//! Services shared by every screen

use std::path::PathBuf;

use crate::console::ConsoleLog;
use crate::highscores::{MemoryScoreStore, ScoreStore};
use crate::settings::Settings;
use crate::sim::SaveRequest;

/// Passed by `&mut` to every screen hook
pub struct AppContext {
    pub console: ConsoleLog,
    pub scores: Box<dyn ScoreStore>,
    pub settings: Settings,
    /// Where settings are written when the settings screen closes
    pub settings_path: Option<PathBuf>,
    /// Raised by a game session, consumed by the save prompt
    pub pending_save: Option<SaveRequest>,
    /// Game the leaderboard should open on
    pub leaderboard_focus: Option<String>,
}

impl AppContext {
    pub fn new(scores: Box<dyn ScoreStore>, settings: Settings) -> Self {
        Self {
            console: ConsoleLog::new(),
            scores,
            settings,
            settings_path: None,
            pending_save: None,
            leaderboard_focus: None,
        }
    }

    /// Nothing touches the disk
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryScoreStore::new()), Settings::default())
    }

    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Write settings if a path is configured. Failures are reported, never fatal.
    pub fn save_settings(&mut self) {
        let Some(path) = self.settings_path.as_deref() else {
            return;
        };
        if let Err(e) = self.settings.save(path) {
            log::warn!("Failed to save settings: {}", e);
            self.console.log(format!("Settings not saved: {e}"));
        }
    }
}
