//! Walking enemies with a two-state chase AI
//!
//! Chase when the player is within vision range, otherwise brake to a stop.
//! A grounded enemy looks ahead for a wall or a gap and hops over it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Body, move_and_collide};
use super::player::approach_zero;
use super::world::TileWorld;
use crate::consts::{DEATH_DEPTH, GRAVITY, TILE_SIZE};

/// Steering and edge-detection thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyTuning {
    /// Horizontal distance at which the enemy starts chasing
    pub vision: f32,
    /// Target chase speed
    pub speed: f32,
    pub accel: f32,
    pub friction: f32,
    pub jump_force: f32,
    /// How far past the leading edge the look-ahead probe reaches
    pub probe_reach: f32,
    /// Minimum speed before an obstacle triggers a jump
    pub jump_min_speed: f32,
    /// Horizontal velocity at spawn and after every reset
    pub initial_vx: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            vision: 150.0,
            speed: 25.0,
            accel: 300.0,
            friction: 600.0,
            jump_force: -220.0,
            probe_reach: 10.0,
            jump_min_speed: 10.0,
            initial_vx: -30.0,
        }
    }
}

/// Steering mode, derived from distance to the player each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyMode {
    Chase,
    Idle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub alive: bool,
    pub mode: EnemyMode,
    spawn: Vec2,
}

impl Enemy {
    pub fn new(spawn: Vec2, tuning: &EnemyTuning) -> Self {
        let mut enemy = Self {
            body: Body::new(spawn, Vec2::splat(TILE_SIZE)),
            alive: true,
            mode: EnemyMode::Idle,
            spawn,
        };
        enemy.reset(tuning);
        enemy
    }

    /// Back to the spawn anchor, alive and walking at `initial_vx`
    pub fn reset(&mut self, tuning: &EnemyTuning) {
        self.body.place(self.spawn);
        self.body.vel.x = tuning.initial_vx;
        self.alive = true;
        self.mode = EnemyMode::Idle;
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    pub fn facing_right(&self) -> bool {
        self.body.vel.x > 0.0
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn update<W: TileWorld + ?Sized>(&mut self, dt: f32, world: &W, player_x: f32, tuning: &EnemyTuning) {
        if !self.alive {
            return;
        }

        let dist = player_x - self.body.pos.x;
        if dist.abs() < tuning.vision {
            self.mode = EnemyMode::Chase;
            let target = if dist > 0.0 { tuning.speed } else { -tuning.speed };
            if self.body.vel.x < target {
                self.body.vel.x += tuning.accel * dt;
            } else if self.body.vel.x > target {
                self.body.vel.x -= tuning.accel * dt;
            }
        } else {
            self.mode = EnemyMode::Idle;
            self.body.vel.x = approach_zero(self.body.vel.x, tuning.friction * dt);
        }

        if self.body.on_ground && self.obstacle_ahead(world, tuning) && self.body.vel.x.abs() > tuning.jump_min_speed {
            self.body.vel.y = tuning.jump_force;
            self.body.on_ground = false;
        }

        self.body.vel.y += GRAVITY * dt;
        move_and_collide(&mut self.body, world, dt);

        if self.body.pos.y > DEATH_DEPTH {
            log::debug!("Enemy from {:?} fell out of the world", self.spawn);
            self.alive = false;
        }
    }

    /// Wall at body height or no floor just past the leading edge
    pub fn obstacle_ahead<W: TileWorld + ?Sized>(&self, world: &W, tuning: &EnemyTuning) -> bool {
        let Body { pos, size, .. } = self.body;
        let check_x = if self.body.vel.x > 0.0 {
            pos.x + size.x + tuning.probe_reach
        } else {
            pos.x - tuning.probe_reach
        };
        let wall = world.is_solid(check_x, pos.y + size.y * 0.5);
        let gap = !world.is_solid(check_x, pos.y + size.y + 2.0);
        wall || gap
    }
}
