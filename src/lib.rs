//! Handheld Arcade - game core for a small handheld console
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (tile worlds, collision, bodies, session controllers)
//! - `app`: Screen state machine and the context shared by every screen
//! - `input`: Normalized per-tick input snapshot
//! - `highscores`: Per-game leaderboard and score persistence
//! - `persistence`: Atomic JSON files on disk
//! - `settings`: User preferences
//! - `console`: Bounded log shown on the console screen

pub mod app;
pub mod console;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use app::{AppContext, AppState, StateCommand, StateId, StateMachine, View};
pub use console::ConsoleLog;
pub use highscores::{JsonScoreStore, MemoryScoreStore, ScoreEntry, ScoreStore};
pub use persistence::StoreError;
pub use input::{Button, InputSnapshot};
pub use settings::{Sensitivity, Settings};

/// Game configuration constants
pub mod consts {
    /// Display resolution
    pub const SCREEN_W: f32 = 320.0;
    pub const SCREEN_H: f32 = 240.0;

    /// Largest frame delta handed to the core (bounds physics error after a stall)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Platformer tiles
    pub const TILE_SIZE: f32 = 16.0;
    /// Per-axis displacement cap for platformer bodies (units per tick)
    pub const MAX_STEP: f32 = 14.0;
    /// Gap left between a body and the wall it was snapped against
    pub const WALL_EPSILON: f32 = 0.01;
    /// Bodies below this depth are out of the world
    pub const DEATH_DEPTH: f32 = 300.0;

    /// Platformer physics
    pub const GRAVITY: f32 = 600.0;
    pub const WALK_ACCEL: f32 = 300.0;
    pub const MAX_SPEED: f32 = 80.0;
    pub const FRICTION: f32 = 600.0;
    pub const MAX_FALL_SPEED: f32 = 300.0;
    pub const JUMP_FORCE: f32 = -260.0;
    pub const JUMP_CUT: f32 = 0.5;
    pub const SLIDE_SPEED: f32 = 240.0;
    pub const SLIDE_FRICTION: f32 = 250.0;
    pub const SLIDE_COOLDOWN: f32 = 2.0;
    pub const STOMP_BOUNCE: f32 = -150.0;

    /// Player box and spawn
    pub const PLAYER_W: f32 = 12.0;
    pub const PLAYER_H: f32 = 16.0;
    pub const PLAYER_SPAWN: (f32, f32) = (50.0, 50.0);

    /// Seconds between death and the save prompt
    pub const DEATH_DELAY: f32 = 2.0;

    /// Camera dead zone (screen space)
    pub const CAMERA_LEFT: f32 = 100.0;
    pub const CAMERA_RIGHT: f32 = 220.0;

    /// Brick breaker paddle
    pub const PADDLE_W: f32 = 48.0;
    pub const PADDLE_H: f32 = 8.0;
    pub const PADDLE_Y: f32 = 220.0;
    pub const PADDLE_SPEED: f32 = 260.0;
    /// Horizontal velocity added for an edge hit (offset of +/-1)
    pub const PADDLE_ENGLISH: f32 = 100.0;
    /// Speed boost when ball hits paddle (multiplicative)
    pub const PADDLE_BOOST: f32 = 1.05;

    /// Brick breaker ball
    pub const BALL_SIZE: f32 = 6.0;
    pub const BALL_SPEED_BASE: f32 = 140.0;
    pub const BALL_SPEED_MAX: f32 = 240.0;
    /// Longest ball movement between two brick queries
    pub const BALL_MAX_SUBSTEP: f32 = 2.0;

    /// Brick grid
    pub const BRICK_W: f32 = 32.0;
    pub const BRICK_H: f32 = 12.0;
    pub const GRID_COLS: usize = 10;
    pub const GRID_ROWS: usize = 10;

    pub const STARTING_LIVES: u32 = 3;

    /// Dead zone under which stick deflection counts as centered
    pub const STICK_THRESHOLD: f32 = 0.1;
}
