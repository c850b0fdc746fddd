//! Ball and paddle for the brick breaker
//!
//! The ball moves in sub-steps of at most `BALL_MAX_SUBSTEP` units so a fast
//! ball cannot skip over a 12-unit brick within one tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bricks::BrickGrid;
use super::collision::Aabb;
use crate::consts::*;
use crate::input::InputSnapshot;

/// The player's paddle (y is fixed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub width: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: ((SCREEN_W - PADDLE_W) / 2.0).floor(),
            width: PADDLE_W,
        }
    }
}

impl Paddle {
    pub fn y(&self) -> f32 {
        PADDLE_Y
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.x, PADDLE_Y, self.width, PADDLE_H)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Back to the middle of the screen
    pub fn recenter(&mut self) {
        self.x = ((SCREEN_W - self.width) / 2.0).floor();
    }

    /// Follow the stick, clamped to the screen
    pub fn update(&mut self, input: &InputSnapshot, dt: f32) {
        let ax = input.axis().x;
        if ax.abs() > STICK_THRESHOLD {
            self.x += ax * PADDLE_SPEED * dt;
        }
        self.x = self.x.clamp(0.0, SCREEN_W - self.width);
    }
}

/// Outcome of moving the ball for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallStatus {
    InPlay,
    /// Fell below the bottom of the screen
    Lost,
}

/// Result of one ball tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallStep {
    pub status: BallStatus,
    pub score: u32,
    pub bricks_hit: u32,
    pub paddle_hit: bool,
    /// Sub-steps taken, including any re-split after a paddle bounce
    pub substeps: u32,
}

impl BallStep {
    fn idle() -> Self {
        Self {
            status: BallStatus::InPlay,
            score: 0,
            bricks_hit: 0,
            paddle_hit: false,
            substeps: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// False while resting on the paddle before launch
    pub active: bool,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: BALL_SIZE,
            active: false,
        }
    }
}

impl Ball {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    /// Park on top of the paddle
    pub fn reset(&mut self, paddle: &Paddle) {
        self.active = false;
        self.vel = Vec2::ZERO;
        self.follow(paddle);
    }

    fn follow(&mut self, paddle: &Paddle) {
        self.pos.x = paddle.x + (paddle.width / 2.0).floor() - (self.size / 2.0).floor();
        self.pos.y = paddle.y() - self.size - 2.0;
    }

    /// Leave the paddle straight up
    pub fn launch(&mut self) {
        self.active = true;
        self.vel = Vec2::new(0.0, -BALL_SPEED_BASE);
    }

    /// Advance one tick against the paddle and the brick grid.
    ///
    /// A paddle bounce changes the ball's speed, so whatever is left of the
    /// tick is split again at the new speed.
    pub fn update(&mut self, dt: f32, paddle: &Paddle, bricks: &mut BrickGrid) -> BallStep {
        let mut step = BallStep::idle();
        if !self.active {
            self.follow(paddle);
            return step;
        }

        let mut remaining = dt;
        'tick: while remaining > 0.0 {
            let distance = (self.vel * remaining).length();
            let steps = ((distance / BALL_MAX_SUBSTEP).ceil() as u32).max(1);
            let step_dt = remaining / steps as f32;

            for i in 1..=steps {
                remaining = step_dt * (steps - i) as f32;
                step.substeps += 1;
                self.sub_step(step_dt, bricks, &mut step);

                if self.vel.y > 0.0 && self.touches_paddle(paddle) {
                    self.bounce_off_paddle(paddle);
                    step.paddle_hit = true;
                    continue 'tick;
                }

                if self.pos.y > SCREEN_H {
                    step.status = BallStatus::Lost;
                    break 'tick;
                }
            }
        }

        step
    }

    /// Move one sub-step, x then y, reflecting off walls and bricks
    fn sub_step(&mut self, step_dt: f32, bricks: &mut BrickGrid, step: &mut BallStep) {
        // Reflections take effect on the very next sub-step
        let delta = self.vel * step_dt;

        // X axis
        let prev_x = self.pos.x;
        self.pos.x += delta.x;
        if self.pos.x <= 0.0 {
            self.pos.x = 0.0;
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x >= SCREEN_W - self.size {
            self.pos.x = SCREEN_W - self.size;
            self.vel.x = -self.vel.x.abs();
        }
        let hit = bricks.resolve_collision(&self.aabb());
        if hit.hit {
            self.vel.x = -self.vel.x;
            self.pos.x = prev_x;
            step.score += hit.score;
            step.bricks_hit += 1;
        }

        // Y axis
        let prev_y = self.pos.y;
        self.pos.y += delta.y;
        if self.pos.y <= 0.0 {
            self.pos.y = 0.0;
            self.vel.y = self.vel.y.abs();
        }
        let hit = bricks.resolve_collision(&self.aabb());
        if hit.hit {
            self.vel.y = -self.vel.y;
            self.pos.y = prev_y;
            step.score += hit.score;
            step.bricks_hit += 1;
        }
    }

    /// Inclusive overlap with the paddle box
    fn touches_paddle(&self, paddle: &Paddle) -> bool {
        let p = paddle.aabb();
        self.pos.y + self.size >= p.top()
            && self.pos.y < p.bottom()
            && self.pos.x + self.size >= p.left()
            && self.pos.x < p.right()
    }

    /// Reflect upward, steer by hit offset and speed up
    pub fn bounce_off_paddle(&mut self, paddle: &Paddle) {
        self.vel.y = -self.vel.y.abs();
        self.pos.y = paddle.y() - self.size - 0.1;

        let offset = paddle_offset(self.pos.x + self.size / 2.0, paddle);
        self.vel.x += offset * PADDLE_ENGLISH;
        self.vel.y = (self.vel.y * PADDLE_BOOST).max(-BALL_SPEED_MAX);
    }
}

/// Where along the paddle a point lies: -1 left edge, 0 centre, +1 right edge
pub fn paddle_offset(x: f32, paddle: &Paddle) -> f32 {
    ((x - paddle.center_x()) / (paddle.width / 2.0)).clamp(-1.0, 1.0)
}
