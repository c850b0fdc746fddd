//! Screens that host a game session

use super::context::AppContext;
use super::machine::AppState;
use super::view::View;
use super::{StateCommand, StateId};
use crate::input::InputSnapshot;
use crate::sim::{BlockBreakerGame, LevelError, PlatformerGame, SessionEvent, SessionSignal};

/// Coming back from these keeps the session, anything else starts a new one
fn is_resume(from: Option<StateId>) -> bool {
    matches!(from, Some(StateId::Pause | StateId::Console))
}

fn flush_events(ctx: &mut AppContext, events: Vec<SessionEvent>) {
    for event in events {
        ctx.console.log(event.to_string());
    }
}

/// Turn a session signal into a screen transition
fn route(ctx: &mut AppContext, signal: SessionSignal) -> StateCommand {
    match signal {
        SessionSignal::None => StateCommand::None,
        SessionSignal::Pause => StateCommand::Change(StateId::Pause),
        SessionSignal::ExitToMenu => StateCommand::Change(StateId::Menu),
        SessionSignal::SavePrompt(request) => {
            ctx.console.log(format!("Game over: {} {}", request.value, request.label));
            ctx.pending_save = Some(request);
            StateCommand::Change(StateId::SavePrompt)
        }
    }
}

pub struct PlatformerState {
    game: PlatformerGame,
}

impl PlatformerState {
    pub fn new() -> Result<Self, LevelError> {
        Ok(Self {
            game: PlatformerGame::new()?,
        })
    }
}

impl AppState for PlatformerState {
    fn id(&self) -> StateId {
        StateId::Platformer
    }

    fn enter(&mut self, ctx: &mut AppContext, from: Option<StateId>) {
        if is_resume(from) {
            self.game.resume();
        } else {
            self.game.reset();
        }
        flush_events(ctx, self.game.drain_events());
    }

    fn tick(&mut self, ctx: &mut AppContext, input: &InputSnapshot, dt: f32) -> StateCommand {
        let signal = self.game.update(input, dt);
        flush_events(ctx, self.game.drain_events());
        route(ctx, signal)
    }

    fn view<'a>(&'a self, _ctx: &'a AppContext) -> View<'a> {
        View::Platformer(&self.game)
    }
}

#[derive(Default)]
pub struct BlockBreakerState {
    game: BlockBreakerGame,
}

impl BlockBreakerState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AppState for BlockBreakerState {
    fn id(&self) -> StateId {
        StateId::BlockBreaker
    }

    fn enter(&mut self, ctx: &mut AppContext, from: Option<StateId>) {
        if is_resume(from) {
            self.game.resume();
        } else {
            self.game.reset();
        }
        flush_events(ctx, self.game.drain_events());
    }

    fn tick(&mut self, ctx: &mut AppContext, input: &InputSnapshot, dt: f32) -> StateCommand {
        let signal = self.game.update(input, dt);
        flush_events(ctx, self.game.drain_events());
        route(ctx, signal)
    }

    fn view<'a>(&'a self, _ctx: &'a AppContext) -> View<'a> {
        View::BlockBreaker(&self.game)
    }
}
