//! Deterministic gameplay module
//!
//! All game logic lives here. This module must stay pure:
//! - Driven by `update(input, dt)` only
//! - No rendering, storage or platform dependencies
//! - Sessions report outcomes through `SessionSignal` and drained `SessionEvent`s

pub mod block_breaker;
pub mod breakout;
pub mod bricks;
pub mod collision;
pub mod enemy;
pub mod platformer;
pub mod player;
pub mod session;
pub mod world;

pub use block_breaker::BlockBreakerGame;
pub use breakout::{Ball, BallStatus, BallStep, Paddle, paddle_offset};
pub use bricks::{BrickGrid, BrickHit, INDESTRUCTIBLE};
pub use collision::{Aabb, Body, Contacts, move_and_collide};
pub use enemy::{Enemy, EnemyMode, EnemyTuning};
pub use platformer::PlatformerGame;
pub use player::{AnimState, Player};
pub use session::{DeathCause, DefeatKind, SaveRequest, SessionEvent, SessionPhase, SessionSignal};
pub use world::{Level, LevelError, TileWorld};
