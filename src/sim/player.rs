//! Platformer player: walking, jumping, sliding and dying

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Contacts, move_and_collide};
use super::world::TileWorld;
use crate::consts::*;
use crate::input::{Button, InputSnapshot};

/// Coarse animation label for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimState {
    Run,
    Jump,
    Slide,
    Death,
}

impl AnimState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimState::Run => "run",
            AnimState::Jump => "jump",
            AnimState::Slide => "slide",
            AnimState::Death => "death",
        }
    }

    pub fn frame_count(&self) -> usize {
        match self {
            AnimState::Run => 8,
            AnimState::Jump => 3,
            AnimState::Slide => 3,
            AnimState::Death => 6,
        }
    }

    /// Seconds per frame
    fn frame_time(&self) -> f32 {
        match self {
            AnimState::Run => 0.1,
            AnimState::Jump => 0.15,
            AnimState::Slide => 0.08,
            AnimState::Death => 0.2,
        }
    }

    /// Run loops, everything else holds on its last frame
    fn loops(&self) -> bool {
        matches!(self, AnimState::Run)
    }
}

/// Current animation and frame
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Animation {
    pub state: AnimState,
    pub frame: usize,
    timer: f32,
}

impl Animation {
    fn new(state: AnimState) -> Self {
        Self {
            state,
            frame: 0,
            timer: 0.0,
        }
    }

    fn set(&mut self, state: AnimState) {
        if self.state != state {
            *self = Self::new(state);
        }
    }

    fn advance(&mut self, dt: f32) {
        self.timer += dt;
        if self.timer > self.state.frame_time() {
            self.timer = 0.0;
            let last = self.state.frame_count() - 1;
            self.frame = if self.state.loops() {
                (self.frame + 1) % self.state.frame_count()
            } else {
                (self.frame + 1).min(last)
            };
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub facing_right: bool,
    pub sliding: bool,
    slide_cooldown: f32,
    dead: bool,
    anim: Animation,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vec2::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1))
    }
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            body: Body::new(spawn, Vec2::new(PLAYER_W, PLAYER_H)),
            facing_right: true,
            sliding: false,
            slide_cooldown: 0.0,
            dead: false,
            anim: Animation::new(AnimState::Run),
        }
    }

    /// Reinitialise in place at `spawn`
    pub fn reset(&mut self, spawn: Vec2) {
        self.body.place(spawn);
        self.facing_right = true;
        self.sliding = false;
        self.slide_cooldown = 0.0;
        self.dead = false;
        self.anim = Animation::new(AnimState::Run);
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn anim(&self) -> AnimState {
        self.anim.state
    }

    pub fn frame(&self) -> usize {
        self.anim.frame
    }

    pub fn die(&mut self) {
        if self.dead {
            return;
        }
        self.dead = true;
        self.sliding = false;
        self.body.vel = Vec2::ZERO;
        self.anim = Animation::new(AnimState::Death);
    }

    /// Advance one tick. A dead player ignores input but keeps falling and animating.
    pub fn update<W: TileWorld + ?Sized>(&mut self, input: &InputSnapshot, dt: f32, world: &W) -> Contacts {
        if self.dead {
            self.anim.advance(dt);
            self.body.vel.x = 0.0;
            self.apply_gravity(dt);
            return move_and_collide(&mut self.body, world, dt);
        }

        let ax = input.axis().x;
        if self.slide_cooldown > 0.0 {
            self.slide_cooldown -= dt;
        }

        if input.was_just_pressed(Button::Y)
            && self.body.on_ground
            && !self.sliding
            && self.slide_cooldown <= 0.0
        {
            self.sliding = true;
            self.slide_cooldown = SLIDE_COOLDOWN;
            let direction = if self.facing_right { 1.0 } else { -1.0 };
            self.body.vel.x = direction * SLIDE_SPEED;
        }

        if self.sliding {
            self.body.vel.x = approach_zero(self.body.vel.x, SLIDE_FRICTION * dt);
            if self.body.vel.x.abs() < 5.0 || !self.body.on_ground {
                self.sliding = false;
            }
        } else {
            if ax.abs() > STICK_THRESHOLD {
                self.body.vel.x += ax * WALK_ACCEL * dt;
                self.facing_right = ax > 0.0;
            } else {
                self.body.vel.x = approach_zero(self.body.vel.x, FRICTION * dt);
            }
            self.body.vel.x = self.body.vel.x.clamp(-MAX_SPEED, MAX_SPEED);
        }

        if input.was_just_pressed(Button::A) && self.body.on_ground && !self.sliding {
            self.body.vel.y = JUMP_FORCE;
            self.body.on_ground = false;
        }
        if input.was_just_released(Button::A) && self.body.vel.y < 0.0 {
            self.body.vel.y *= JUMP_CUT;
        }

        self.apply_gravity(dt);
        let contacts = move_and_collide(&mut self.body, world, dt);
        if contacts.wall() {
            self.sliding = false;
        }

        if self.body.pos.y > DEATH_DEPTH {
            self.die();
            return contacts;
        }

        self.update_animation(dt);
        contacts
    }

    fn apply_gravity(&mut self, dt: f32) {
        self.body.vel.y = (self.body.vel.y + GRAVITY * dt).min(MAX_FALL_SPEED);
    }

    fn update_animation(&mut self, dt: f32) {
        let next = if self.sliding {
            AnimState::Slide
        } else if !self.body.on_ground {
            AnimState::Jump
        } else {
            AnimState::Run
        };
        self.anim.set(next);

        if next == AnimState::Run && self.body.vel.x.abs() <= 10.0 {
            // Standing still shows the first run frame
            self.anim.frame = 0;
            self.anim.timer = 0.0;
        } else {
            self.anim.advance(dt);
        }
    }
}

/// Move `v` toward zero by `amount` without crossing it
#[inline]
pub fn approach_zero(v: f32, amount: f32) -> f32 {
    if v > 0.0 {
        (v - amount).max(0.0)
    } else if v < 0.0 {
        (v + amount).min(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::world::Level;

    const DT: f32 = 1.0 / 60.0;

    fn flat() -> Level {
        Level::parse(&[
            "#                              #",
            "#                              #",
            "#                              #",
            "#                              #",
            "################################",
        ])
        .unwrap()
    }

    fn grounded_player(level: &Level) -> Player {
        let mut player = Player::new(Vec2::new(100.0, 40.0));
        for _ in 0..30 {
            player.update(&InputSnapshot::new(), DT, level);
        }
        assert!(player.body.on_ground);
        player
    }

    #[test]
    fn test_player_settles_on_floor() {
        let level = flat();
        let player = grounded_player(&level);
        assert_eq!(player.pos().y, 64.0 - PLAYER_H);
        assert_eq!(player.anim(), AnimState::Run);
    }

    #[test]
    fn test_jump_and_cut() {
        let level = flat();
        let mut player = grounded_player(&level);

        player.update(&InputSnapshot::new().with_press(Button::A), DT, &level);
        assert!(!player.body.on_ground);
        let rising = player.body.vel.y;
        assert!(rising < 0.0);

        player.update(&InputSnapshot::new().with_release(Button::A), DT, &level);
        // Cut halves upward speed before gravity is applied
        assert!((player.body.vel.y - (rising * JUMP_CUT + GRAVITY * DT)).abs() < 1e-3);
        assert_eq!(player.anim(), AnimState::Jump);
    }

    #[test]
    fn test_walk_speed_is_capped() {
        let level = flat();
        let mut player = grounded_player(&level);
        let right = InputSnapshot::new().with_axis(1.0, 0.0);
        for _ in 0..120 {
            player.update(&right, DT, &level);
            assert!(player.body.vel.x <= MAX_SPEED);
        }
        assert!(player.facing_right);
    }

    #[test]
    fn test_slide_has_cooldown() {
        let level = flat();
        let mut player = grounded_player(&level);
        player.update(&InputSnapshot::new().with_press(Button::Y), DT, &level);
        assert!(player.sliding);
        assert_eq!(player.anim(), AnimState::Slide);
        assert!(player.body.vel.x > 200.0);

        // Let the slide run out, then try again before the cooldown expires
        for _ in 0..60 {
            player.update(&InputSnapshot::new(), DT, &level);
        }
        assert!(!player.sliding);
        player.update(&InputSnapshot::new().with_press(Button::Y), DT, &level);
        assert!(!player.sliding);
    }

    #[test]
    fn test_dead_player_ignores_input_and_animates() {
        let level = flat();
        let mut player = grounded_player(&level);
        player.die();
        let x = player.pos().x;
        for _ in 0..60 {
            player.update(&InputSnapshot::new().with_axis(1.0, 0.0).with_press(Button::A), DT, &level);
        }
        assert_eq!(player.pos().x, x);
        assert!(player.body.on_ground);
        assert_eq!(player.anim(), AnimState::Death);
        assert!(player.frame() > 0);
    }

    #[test]
    fn test_falling_out_of_world_kills() {
        let level = Level::parse(&["#    #", "#    #"]).unwrap();
        let mut player = Player::new(Vec2::new(20.0, 0.0));
        for _ in 0..300 {
            player.update(&InputSnapshot::new(), DT, &level);
        }
        assert!(player.is_dead());
    }

    #[test]
    fn test_approach_zero() {
        assert_eq!(approach_zero(5.0, 2.0), 3.0);
        assert_eq!(approach_zero(-1.0, 2.0), 0.0);
        assert_eq!(approach_zero(0.0, 2.0), 0.0);
    }
}
