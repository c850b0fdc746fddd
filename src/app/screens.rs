//! Menu, pause, settings, console, leaderboard and save prompt screens

use super::context::AppContext;
use super::machine::AppState;
use super::view::{MenuEntry, View};
use super::{StateCommand, StateId};
use crate::input::{Button, InputSnapshot};
use crate::sim::SaveRequest;

/// Console lines visible at once
pub const CONSOLE_VISIBLE: usize = 12;

/// Games with a leaderboard, as named in save requests
pub const LEADERBOARD_GAMES: [&str; 2] = ["Mario", "Block Breaker"];

#[derive(Debug, Default)]
pub struct MenuState {
    cursor: usize,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AppState for MenuState {
    fn id(&self) -> StateId {
        StateId::Menu
    }

    fn tick(&mut self, _ctx: &mut AppContext, input: &InputSnapshot, _dt: f32) -> StateCommand {
        let count = MenuEntry::ALL.len();
        if input.was_just_pressed(Button::Up) {
            self.cursor = (self.cursor + count - 1) % count;
        }
        if input.was_just_pressed(Button::Down) {
            self.cursor = (self.cursor + 1) % count;
        }

        if input.was_just_pressed(Button::A) {
            return StateCommand::Change(MenuEntry::ALL[self.cursor].target());
        }
        if input.was_just_pressed(Button::Sel) {
            return StateCommand::Change(StateId::Settings);
        }
        StateCommand::None
    }

    fn view<'a>(&'a self, _ctx: &'a AppContext) -> View<'a> {
        View::Menu {
            entries: &MenuEntry::ALL,
            cursor: self.cursor,
        }
    }
}

#[derive(Debug, Default)]
pub struct PauseState {
    /// Screen that was paused
    paused: Option<StateId>,
}

impl PauseState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AppState for PauseState {
    fn id(&self) -> StateId {
        StateId::Pause
    }

    fn enter(&mut self, ctx: &mut AppContext, from: Option<StateId>) {
        // Back from the console keeps the original target
        if from != Some(StateId::Console) {
            self.paused = from;
            ctx.console.log("Paused");
        }
    }

    fn tick(&mut self, _ctx: &mut AppContext, input: &InputSnapshot, _dt: f32) -> StateCommand {
        if input.was_just_pressed(Button::A) || input.was_just_pressed(Button::Sel) {
            return StateCommand::Change(self.paused.unwrap_or(StateId::Menu));
        }
        if input.was_just_pressed(Button::B) {
            return StateCommand::Change(StateId::Menu);
        }
        if input.was_just_pressed(Button::X) {
            return StateCommand::Change(StateId::Console);
        }
        StateCommand::None
    }

    fn view<'a>(&'a self, _ctx: &'a AppContext) -> View<'a> {
        View::Pause { paused: self.paused }
    }
}

#[derive(Debug, Default)]
pub struct SettingsState;

impl SettingsState {
    pub fn new() -> Self {
        Self
    }
}

impl AppState for SettingsState {
    fn id(&self) -> StateId {
        StateId::Settings
    }

    fn tick(&mut self, ctx: &mut AppContext, input: &InputSnapshot, _dt: f32) -> StateCommand {
        if input.was_just_pressed(Button::X) {
            ctx.settings.toggle_sensitivity();
            let label = ctx.settings.sensitivity.as_str();
            ctx.console.log(format!("Sensitivity: {label}"));
        }
        if input.was_just_pressed(Button::B) {
            ctx.save_settings();
            return StateCommand::Change(StateId::Menu);
        }
        StateCommand::None
    }

    fn view<'a>(&'a self, ctx: &'a AppContext) -> View<'a> {
        View::Settings {
            sensitivity: ctx.settings.sensitivity,
        }
    }
}

#[derive(Debug, Default)]
pub struct ConsoleState {
    /// Lines scrolled back from the newest
    scroll: usize,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AppState for ConsoleState {
    fn id(&self) -> StateId {
        StateId::Console
    }

    fn enter(&mut self, _ctx: &mut AppContext, _from: Option<StateId>) {
        self.scroll = 0;
    }

    fn tick(&mut self, ctx: &mut AppContext, input: &InputSnapshot, _dt: f32) -> StateCommand {
        let max_scroll = ctx.console.len().saturating_sub(CONSOLE_VISIBLE);
        if input.was_just_pressed(Button::Up) {
            self.scroll = (self.scroll + 1).min(max_scroll);
        }
        if input.was_just_pressed(Button::Down) {
            self.scroll = self.scroll.saturating_sub(1);
        }
        if input.was_just_pressed(Button::B) {
            return StateCommand::Back;
        }
        StateCommand::None
    }

    fn view<'a>(&'a self, ctx: &'a AppContext) -> View<'a> {
        View::Console {
            lines: ctx.console.window(CONSOLE_VISIBLE, self.scroll),
            scroll: self.scroll,
        }
    }
}

#[derive(Debug, Default)]
pub struct LeaderboardState {
    selected: usize,
}

impl LeaderboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game(&self) -> &'static str {
        LEADERBOARD_GAMES[self.selected]
    }
}

impl AppState for LeaderboardState {
    fn id(&self) -> StateId {
        StateId::Leaderboard
    }

    fn enter(&mut self, ctx: &mut AppContext, _from: Option<StateId>) {
        if let Some(focus) = ctx.leaderboard_focus.take() {
            if let Some(i) = LEADERBOARD_GAMES.iter().position(|g| *g == focus) {
                self.selected = i;
            }
        }
    }

    fn tick(&mut self, _ctx: &mut AppContext, input: &InputSnapshot, _dt: f32) -> StateCommand {
        let count = LEADERBOARD_GAMES.len();
        if input.was_just_pressed(Button::Left) {
            self.selected = (self.selected + count - 1) % count;
        }
        if input.was_just_pressed(Button::Right) {
            self.selected = (self.selected + 1) % count;
        }
        if input.was_just_pressed(Button::B) {
            return StateCommand::Change(StateId::Menu);
        }
        StateCommand::None
    }

    fn view<'a>(&'a self, ctx: &'a AppContext) -> View<'a> {
        View::Leaderboard {
            game: self.game(),
            entries: ctx.scores.top_scores(self.game()),
        }
    }
}

/// Offers to record the score of a finished run
#[derive(Debug, Default)]
pub struct SavePromptState {
    request: Option<SaveRequest>,
}

impl SavePromptState {
    pub fn new() -> Self {
        Self::default()
    }

    fn save(ctx: &mut AppContext, request: SaveRequest) {
        match ctx.scores.save_score(&request.game, request.value) {
            Ok(Some(rank)) => {
                ctx.console.log(format!("New high score #{rank}: {} {}", request.value, request.label));
            }
            Ok(None) => {
                ctx.console.log(format!("{} {} did not place", request.value, request.label));
            }
            Err(e) => {
                log::warn!("Failed to save score for {}: {}", request.game, e);
                ctx.console.log(format!("Score not saved: {e}"));
            }
        }
        ctx.leaderboard_focus = Some(request.game);
    }
}

impl AppState for SavePromptState {
    fn id(&self) -> StateId {
        StateId::SavePrompt
    }

    fn enter(&mut self, ctx: &mut AppContext, _from: Option<StateId>) {
        self.request = ctx.pending_save.take();
        if self.request.is_none() {
            log::warn!("Save prompt opened without a score");
            ctx.console.log("No score to save");
        }
    }

    fn exit(&mut self, _ctx: &mut AppContext) {
        self.request = None;
    }

    fn tick(&mut self, ctx: &mut AppContext, input: &InputSnapshot, _dt: f32) -> StateCommand {
        if self.request.is_none() {
            return StateCommand::Change(StateId::Menu);
        }

        if input.was_just_pressed(Button::A) {
            if let Some(request) = self.request.take() {
                Self::save(ctx, request);
            }
            return StateCommand::Change(StateId::Leaderboard);
        }
        if input.was_just_pressed(Button::B) {
            self.request = None;
            ctx.console.log("Score discarded");
            return StateCommand::Change(StateId::Menu);
        }
        StateCommand::None
    }

    fn view<'a>(&'a self, _ctx: &'a AppContext) -> View<'a> {
        View::SavePrompt(self.request.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::{ScoreEntry, ScoreStore};
    use crate::persistence::StoreError;
    use std::cell::Cell;
    use std::io;
    use std::rc::Rc;

    const DT: f32 = 1.0 / 60.0;

    fn press(b: Button) -> InputSnapshot {
        InputSnapshot::new().with_press(b)
    }

    /// Counts saves and can be told to fail
    #[derive(Default)]
    struct CountingStore {
        saves: Rc<Cell<usize>>,
        fail: bool,
    }

    impl ScoreStore for CountingStore {
        fn save_score(&mut self, _game: &str, _value: u32) -> Result<Option<usize>, StoreError> {
            self.saves.set(self.saves.get() + 1);
            if self.fail {
                return Err(StoreError::Io(io::Error::other("disk full")));
            }
            Ok(Some(1))
        }

        fn top_scores(&self, _game: &str) -> Vec<ScoreEntry> {
            Vec::new()
        }
    }

    fn ctx_with(store: CountingStore) -> AppContext {
        AppContext::new(Box::new(store), Default::default())
    }

    #[test]
    fn test_menu_cursor_wraps() {
        let mut ctx = AppContext::in_memory();
        let mut menu = MenuState::new();
        menu.tick(&mut ctx, &press(Button::Up), DT);
        assert_eq!(menu.cursor, MenuEntry::ALL.len() - 1);
        menu.tick(&mut ctx, &press(Button::Down), DT);
        assert_eq!(menu.cursor, 0);
        assert_eq!(
            menu.tick(&mut ctx, &press(Button::A), DT),
            StateCommand::Change(StateId::Platformer)
        );
        assert_eq!(
            menu.tick(&mut ctx, &press(Button::Sel), DT),
            StateCommand::Change(StateId::Settings)
        );
    }

    #[test]
    fn test_pause_remembers_game_across_console() {
        let mut ctx = AppContext::in_memory();
        let mut pause = PauseState::new();
        pause.enter(&mut ctx, Some(StateId::BlockBreaker));
        pause.enter(&mut ctx, Some(StateId::Console));
        assert_eq!(
            pause.tick(&mut ctx, &press(Button::Sel), DT),
            StateCommand::Change(StateId::BlockBreaker)
        );
        assert_eq!(
            pause.tick(&mut ctx, &press(Button::X), DT),
            StateCommand::Change(StateId::Console)
        );
        assert_eq!(pause.tick(&mut ctx, &press(Button::B), DT), StateCommand::Change(StateId::Menu));
    }

    #[test]
    fn test_console_scroll_is_bounded() {
        let mut ctx = AppContext::in_memory();
        for i in 0..(CONSOLE_VISIBLE + 3) {
            ctx.console.log(format!("{i}"));
        }
        let mut console = ConsoleState::new();
        console.enter(&mut ctx, Some(StateId::Menu));
        for _ in 0..10 {
            console.tick(&mut ctx, &press(Button::Up), DT);
        }
        assert_eq!(console.scroll, 3);
        match console.view(&ctx) {
            View::Console { lines, .. } => assert_eq!(lines.first(), Some(&"0")),
            other => panic!("unexpected view {other:?}"),
        }
        assert_eq!(console.tick(&mut ctx, &press(Button::B), DT), StateCommand::Back);
    }

    #[test]
    fn test_leaderboard_focus_and_switch() {
        let mut ctx = AppContext::in_memory();
        ctx.leaderboard_focus = Some("Block Breaker".to_string());
        let mut board = LeaderboardState::new();
        board.enter(&mut ctx, Some(StateId::SavePrompt));
        assert_eq!(board.game(), "Block Breaker");
        board.tick(&mut ctx, &press(Button::Right), DT);
        assert_eq!(board.game(), "Mario");
        assert!(ctx.leaderboard_focus.is_none());
    }

    #[test]
    fn test_save_prompt_saves_exactly_once() {
        let saves = Rc::new(Cell::new(0));
        let mut ctx = ctx_with(CountingStore {
            saves: Rc::clone(&saves),
            fail: false,
        });
        ctx.pending_save = Some(SaveRequest::new("Mario", 77, "Distance"));
        let mut prompt = SavePromptState::new();
        prompt.enter(&mut ctx, Some(StateId::Platformer));
        assert!(ctx.pending_save.is_none());

        assert_eq!(
            prompt.tick(&mut ctx, &press(Button::A), DT),
            StateCommand::Change(StateId::Leaderboard)
        );
        // Nothing left to save on a repeated confirm
        assert_eq!(prompt.tick(&mut ctx, &press(Button::A), DT), StateCommand::Change(StateId::Menu));
        assert_eq!(saves.get(), 1);
        assert_eq!(ctx.leaderboard_focus.as_deref(), Some("Mario"));
        assert_eq!(ctx.console.last(), Some("New high score #1: 77 Distance"));
    }

    #[test]
    fn test_save_failure_is_logged_and_flow_continues() {
        let mut ctx = ctx_with(CountingStore {
            saves: Rc::default(),
            fail: true,
        });
        ctx.pending_save = Some(SaveRequest::new("Block Breaker", 40, "Points"));
        let mut prompt = SavePromptState::new();
        prompt.enter(&mut ctx, Some(StateId::BlockBreaker));
        assert_eq!(
            prompt.tick(&mut ctx, &press(Button::A), DT),
            StateCommand::Change(StateId::Leaderboard)
        );
        assert!(ctx.console.last().is_some_and(|l| l.starts_with("Score not saved")));
    }

    #[test]
    fn test_save_prompt_without_request_returns_to_menu() {
        let mut ctx = AppContext::in_memory();
        let mut prompt = SavePromptState::new();
        prompt.enter(&mut ctx, Some(StateId::Menu));
        assert_eq!(ctx.console.last(), Some("No score to save"));
        assert_eq!(prompt.tick(&mut ctx, &InputSnapshot::new(), DT), StateCommand::Change(StateId::Menu));
    }
}
