//! Registry of screens and the transitions between them

use std::collections::HashMap;

use super::context::AppContext;
use super::view::View;
use super::{AppError, StateCommand, StateId};
use crate::input::{AxisShaping, InputSnapshot};

/// One screen of the application
pub trait AppState {
    fn id(&self) -> StateId;

    /// Called when the screen becomes active. `from` is the screen that was left.
    fn enter(&mut self, _ctx: &mut AppContext, _from: Option<StateId>) {}

    fn exit(&mut self, _ctx: &mut AppContext) {}

    fn tick(&mut self, ctx: &mut AppContext, input: &InputSnapshot, dt: f32) -> StateCommand;

    fn view<'a>(&'a self, ctx: &'a AppContext) -> View<'a>;
}

/// Which screen's content is on the display
#[derive(Debug, Default)]
struct Display {
    shown: Option<StateId>,
    swaps: u32,
}

impl Display {
    fn swap_to(&mut self, id: StateId) {
        self.shown = Some(id);
        self.swaps += 1;
    }
}

pub struct StateMachine {
    states: HashMap<StateId, Box<dyn AppState>>,
    ctx: AppContext,
    current: Option<StateId>,
    previous: Option<StateId>,
    display: Display,
}

impl StateMachine {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            states: HashMap::new(),
            ctx,
            current: None,
            previous: None,
            display: Display::default(),
        }
    }

    pub fn register(&mut self, state: Box<dyn AppState>) -> Result<(), AppError> {
        let id = state.id();
        if self.states.contains_key(&id) {
            return Err(AppError::DuplicateState(id));
        }
        self.states.insert(id, state);
        Ok(())
    }

    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    /// Last screen left that was not the console
    pub fn previous(&self) -> Option<StateId> {
        self.previous
    }

    /// Screen whose content is on the display
    pub fn shown(&self) -> Option<StateId> {
        self.display.shown
    }

    /// Number of display swaps so far
    pub fn swaps(&self) -> u32 {
        self.display.swaps
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.ctx
    }

    /// Stick shaping from the live settings, re-read by the driver every frame
    pub fn axis_shaping(&self) -> AxisShaping {
        self.ctx.settings.axis_shaping()
    }

    /// Switch screens. Unregistered ids are logged and ignored.
    pub fn change_state(&mut self, id: StateId) -> bool {
        if !self.states.contains_key(&id) {
            log::warn!("Unknown state: {}", id);
            self.ctx.console.log(format!("Unknown state: {id}"));
            return false;
        }

        let from = self.current;
        if let Some(old) = from {
            if let Some(state) = self.states.get_mut(&old) {
                state.exit(&mut self.ctx);
            }
            if old != StateId::Console {
                self.previous = Some(old);
            }
        }

        self.current = Some(id);
        self.display.swap_to(id);
        if let Some(state) = self.states.get_mut(&id) {
            state.enter(&mut self.ctx, from);
        }
        log::debug!("State {:?} -> {}", from, id);
        true
    }

    pub fn change_state_by_name(&mut self, name: &str) -> bool {
        match StateId::from_name(name) {
            Some(id) => self.change_state(id),
            None => {
                log::warn!("Unknown state: {}", name);
                self.ctx.console.log(format!("Unknown state: {name}"));
                false
            }
        }
    }

    /// Tick the active screen, then apply the transition it asked for
    pub fn tick(&mut self, input: &InputSnapshot, dt: f32) {
        let Some(id) = self.current else {
            return;
        };
        let command = match self.states.get_mut(&id) {
            Some(state) => state.tick(&mut self.ctx, input, dt),
            None => StateCommand::None,
        };

        match command {
            StateCommand::None => {}
            StateCommand::Change(next) => {
                self.change_state(next);
            }
            StateCommand::Back => match self.previous {
                Some(prev) => {
                    self.change_state(prev);
                }
                None => log::warn!("No previous state to return to"),
            },
        }
    }

    pub fn view(&self) -> View<'_> {
        self.current
            .and_then(|id| self.states.get(&id))
            .map(|state| state.view(&self.ctx))
            .unwrap_or(View::Blank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Hook {
        Enter(StateId, Option<StateId>),
        Exit(StateId),
    }

    type Journal = Rc<RefCell<Vec<Hook>>>;

    /// Records its hooks and returns a scripted command from `tick`
    struct Probe {
        id: StateId,
        journal: Journal,
        next: StateCommand,
    }

    impl Probe {
        fn boxed(id: StateId, journal: &Journal) -> Box<dyn AppState> {
            Box::new(Self {
                id,
                journal: Rc::clone(journal),
                next: StateCommand::None,
            })
        }
    }

    impl AppState for Probe {
        fn id(&self) -> StateId {
            self.id
        }

        fn enter(&mut self, _ctx: &mut AppContext, from: Option<StateId>) {
            self.journal.borrow_mut().push(Hook::Enter(self.id, from));
        }

        fn exit(&mut self, _ctx: &mut AppContext) {
            self.journal.borrow_mut().push(Hook::Exit(self.id));
        }

        fn tick(&mut self, _ctx: &mut AppContext, _input: &InputSnapshot, _dt: f32) -> StateCommand {
            std::mem::take(&mut self.next)
        }

        fn view<'a>(&'a self, _ctx: &'a AppContext) -> View<'a> {
            View::Blank
        }
    }

    fn machine(ids: &[StateId]) -> (StateMachine, Journal) {
        let journal: Journal = Rc::default();
        let mut machine = StateMachine::new(AppContext::in_memory());
        for &id in ids {
            machine.register(Probe::boxed(id, &journal)).unwrap();
        }
        (machine, journal)
    }

    /// Screens entered more recently than they were exited
    fn active(journal: &Journal) -> Vec<StateId> {
        let mut active = Vec::new();
        for hook in journal.borrow().iter() {
            match hook {
                Hook::Enter(id, _) => active.push(*id),
                Hook::Exit(id) => active.retain(|a| a != id),
            }
        }
        active
    }

    #[test]
    fn test_exit_runs_before_enter() {
        let (mut m, journal) = machine(&[StateId::Menu, StateId::Settings]);
        m.change_state(StateId::Menu);
        m.change_state(StateId::Settings);
        assert_eq!(
            *journal.borrow(),
            vec![
                Hook::Enter(StateId::Menu, None),
                Hook::Exit(StateId::Menu),
                Hook::Enter(StateId::Settings, Some(StateId::Menu)),
            ]
        );
        assert_eq!(m.shown(), Some(StateId::Settings));
        assert_eq!(m.swaps(), 2);
    }

    #[test]
    fn test_exactly_one_state_active() {
        let ids = [StateId::Menu, StateId::Platformer, StateId::Pause, StateId::Console];
        let (mut m, journal) = machine(&ids);
        for step in 0..40 {
            m.change_state(ids[(step * 7 + 3) % ids.len()]);
            assert_eq!(active(&journal), vec![m.current().unwrap()]);
        }
    }

    #[test]
    fn test_unknown_name_changes_nothing() {
        let (mut m, journal) = machine(&[StateId::Menu]);
        m.change_state(StateId::Menu);
        let hooks = journal.borrow().len();

        assert!(!m.change_state_by_name("DOES_NOT_EXIST"));
        assert!(!m.change_state(StateId::Leaderboard));

        assert_eq!(m.current(), Some(StateId::Menu));
        assert_eq!(m.previous(), None);
        assert_eq!(journal.borrow().len(), hooks);
        assert_eq!(m.swaps(), 1);
    }

    #[test]
    fn test_console_never_becomes_previous() {
        let (mut m, _journal) = machine(&[StateId::Menu, StateId::Pause, StateId::Console]);
        m.change_state(StateId::Menu);
        m.change_state(StateId::Pause);
        m.change_state(StateId::Console);
        assert_eq!(m.previous(), Some(StateId::Pause));
        m.change_state(StateId::Menu);
        assert_eq!(m.previous(), Some(StateId::Pause));
    }

    #[test]
    fn test_command_applied_after_tick() {
        let journal: Journal = Rc::default();
        let mut m = StateMachine::new(AppContext::in_memory());
        m.register(Box::new(Probe {
            id: StateId::Menu,
            journal: Rc::clone(&journal),
            next: StateCommand::Change(StateId::Settings),
        }))
        .unwrap();
        m.register(Box::new(Probe {
            id: StateId::Settings,
            journal: Rc::clone(&journal),
            next: StateCommand::Back,
        }))
        .unwrap();

        m.change_state_by_name("MENU");
        m.tick(&InputSnapshot::new(), 0.016);
        assert_eq!(m.current(), Some(StateId::Settings));
        m.tick(&InputSnapshot::new(), 0.016);
        assert_eq!(m.current(), Some(StateId::Menu));
    }

    #[test]
    fn test_tick_without_state_is_noop() {
        let (mut m, journal) = machine(&[StateId::Menu]);
        m.tick(&InputSnapshot::new(), 0.016);
        assert!(journal.borrow().is_empty());
        assert!(matches!(m.view(), View::Blank));
    }
}
