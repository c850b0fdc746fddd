//! Handheld Arcade headless demo
//!
//! Runs the game core without a display: an auto-pilot picks games from the
//! menu and plays them (like the attract mode on the device), scores go
//! through the normal save prompt, and every screen change is logged.
//!
//! Data lives in `$HANDHELD_ARCADE_DATA` (default `./arcade-data`).

use std::path::PathBuf;

use glam::Vec2;

use handheld_arcade::app::{MenuEntry, StateId, StateMachine, View, build_app};
use handheld_arcade::consts::*;
use handheld_arcade::input::{Button, ButtonTracker};
use handheld_arcade::sim::SessionPhase;
use handheld_arcade::{AppContext, JsonScoreStore, ScoreStore, Settings};

/// Nominal frame time of the demo loop
const FRAME_DT: f32 = 1.0 / 30.0;
/// Hard stop for the demo
const MAX_FRAMES: u64 = 60_000;
/// Games to play before exiting
const DEMO_RUNS: u32 = 4;
/// Give up on a run that goes nowhere (frames)
const GIVE_UP_FRAMES: u32 = 2_700;

/// Attract-mode player: reads the current view and decides what to hold
#[derive(Debug, Default)]
struct Autopilot {
    frame: u64,
    state_frames: u32,
    last_state: Option<StateId>,
    runs: u32,
}

impl Autopilot {
    /// Raw stick and held buttons for this frame
    fn drive(&mut self, machine: &StateMachine) -> (Vec2, Vec<Button>) {
        self.frame += 1;
        self.track(machine.current());

        // Buttons are held on alternate frames so every hold is a fresh press
        let pulse = self.frame % 2 == 0;
        let tap = |b: Button| if pulse { vec![b] } else { Vec::new() };

        match machine.view() {
            View::Menu { entries, cursor } => {
                let wanted = if self.runs % 2 == 0 {
                    MenuEntry::Platformer
                } else {
                    MenuEntry::BlockBreaker
                };
                if entries[cursor] == wanted {
                    (Vec2::ZERO, tap(Button::A))
                } else {
                    (Vec2::ZERO, tap(Button::Down))
                }
            }
            View::BlockBreaker(game) => {
                if self.state_frames > GIVE_UP_FRAMES {
                    return (Vec2::ZERO, tap(Button::B));
                }
                let ball_x = game.ball.pos.x + game.ball.size / 2.0;
                let steer = ((ball_x - game.paddle.center_x()) / 16.0).clamp(-1.0, 1.0);
                let launch = matches!(game.phase(), SessionPhase::Ready | SessionPhase::LevelDone);
                (Vec2::new(steer, 0.0), if launch { tap(Button::A) } else { Vec::new() })
            }
            View::Platformer(_) => {
                if self.state_frames > GIVE_UP_FRAMES {
                    return (Vec2::ZERO, tap(Button::B));
                }
                // Run right, hop every 40 frames, slide now and then
                let mut held = Vec::new();
                if (self.state_frames / 20) % 2 == 0 {
                    held.push(Button::A);
                }
                if self.state_frames % 150 == 75 {
                    held.push(Button::Y);
                }
                (Vec2::new(1.0, 0.0), held)
            }
            View::SavePrompt(_) | View::Pause { .. } => (Vec2::ZERO, tap(Button::A)),
            View::Leaderboard { .. } | View::Settings { .. } | View::Console { .. } | View::Blank => {
                (Vec2::ZERO, tap(Button::B))
            }
        }
    }

    fn track(&mut self, current: Option<StateId>) {
        if current == self.last_state {
            self.state_frames += 1;
            return;
        }
        let left_game = self.last_state.is_some_and(|s| s.is_game());
        let interrupted = matches!(current, Some(StateId::Pause | StateId::Console));
        if left_game && !interrupted {
            self.runs += 1;
        }
        self.last_state = current;
        self.state_frames = 0;
    }

    fn done(&self) -> bool {
        self.runs >= DEMO_RUNS || self.frame >= MAX_FRAMES
    }
}

/// Frame time as the device would measure it, with the occasional stall
fn frame_time(frame: u64) -> f32 {
    if frame % 500 == 499 { 0.4 } else { FRAME_DT }
}

fn main() {
    env_logger::init();
    log::info!("Handheld Arcade (headless) starting...");

    let data_dir = std::env::var_os("HANDHELD_ARCADE_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("arcade-data"));
    let settings_path = data_dir.join("settings.json");
    let settings = Settings::load(&settings_path);

    let ctx = AppContext::new(Box::new(JsonScoreStore::load(data_dir.join("scores.json"))), settings)
        .with_settings_path(settings_path);
    let mut machine = match build_app(ctx) {
        Ok(machine) => machine,
        Err(e) => {
            log::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    let mut tracker = ButtonTracker::new();
    let mut pilot = Autopilot::default();
    let mut shown = machine.current();

    while !pilot.done() {
        let (raw, mut held) = pilot.drive(&machine);
        // Settings can change sensitivity mid-run
        let shaping = machine.axis_shaping();
        let axis = shaping.apply(raw);
        for (button, on) in shaping.directions(axis) {
            if on && !held.contains(&button) {
                held.push(button);
            }
        }

        let input = tracker.sample(axis, &held);
        let dt = frame_time(pilot.frame).min(MAX_FRAME_DT);
        machine.tick(&input, dt);

        if machine.current() != shown {
            shown = machine.current();
            if let Some(id) = shown {
                log::info!("Screen: {}", id);
            }
        }
    }

    log::info!("Demo finished after {} frames, {} runs", pilot.frame, pilot.runs);
    let scores: &dyn ScoreStore = machine.context().scores.as_ref();
    for game in ["Mario", "Block Breaker"] {
        let values: Vec<String> = scores.top_scores(game).iter().map(|e| e.value.to_string()).collect();
        log::info!("{} top scores: [{}]", game, values.join(", "));
    }
}
