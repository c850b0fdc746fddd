//! Platformer session: one level, a player, enemies and spikes
//!
//! The run ends on the first death. After the death animation has played for
//! `DEATH_DELAY` seconds the session asks once for the distance to be saved.

use glam::Vec2;

use super::collision::Aabb;
use super::enemy::{Enemy, EnemyTuning};
use super::player::Player;
use super::session::{DeathCause, DefeatKind, SaveRequest, SessionEvent, SessionPhase, SessionSignal};
use super::world::{Level, LevelError};
use crate::consts::*;
use crate::input::{Button, InputSnapshot};

pub const GAME_NAME: &str = "Platformer";

/// Spike hitbox inset from its tile origin
const SPIKE_INSET: Vec2 = Vec2::new(3.0, 6.0);
const SPIKE_SIZE: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct PlatformerGame {
    level: Level,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    spikes: Vec<Aabb>,
    pub tuning: EnemyTuning,
    camera_x: f32,
    phase: SessionPhase,
    death_timer: f32,
    score: u32,
    events: Vec<SessionEvent>,
}

impl PlatformerGame {
    /// Session on the built-in level
    pub fn new() -> Result<Self, LevelError> {
        Ok(Self::with_level(Level::builtin()?, EnemyTuning::default()))
    }

    pub fn with_level(level: Level, tuning: EnemyTuning) -> Self {
        let enemies = level
            .enemy_spawns()
            .iter()
            .map(|&spawn| Enemy::new(spawn, &tuning))
            .collect();
        let spikes = level
            .spike_spawns()
            .iter()
            .map(|&origin| {
                let corner = origin + SPIKE_INSET;
                Aabb::new(corner.x, corner.y, SPIKE_SIZE, SPIKE_SIZE)
            })
            .collect();

        let mut game = Self {
            level,
            player: Player::default(),
            enemies,
            spikes,
            tuning,
            camera_x: 0.0,
            phase: SessionPhase::Playing,
            death_timer: 0.0,
            score: 0,
            events: Vec::new(),
        };
        game.reset();
        game
    }

    /// Start a fresh run in place
    pub fn reset(&mut self) {
        self.player.reset(Vec2::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1));
        for enemy in &mut self.enemies {
            enemy.reset(&self.tuning);
        }
        self.camera_x = 0.0;
        self.phase = SessionPhase::Playing;
        self.death_timer = 0.0;
        self.score = 0;
        self.events.push(SessionEvent::Reset { game: GAME_NAME });
        log::info!("Platformer reset: {} enemies, {} spikes", self.enemies.len(), self.spikes.len());
    }

    /// Note a resume from pause or the console
    pub fn resume(&mut self) {
        self.events.push(SessionEvent::Resumed { game: GAME_NAME });
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn spikes(&self) -> &[Aabb] {
        &self.spikes
    }

    pub fn camera_x(&self) -> f32 {
        self.camera_x
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Enemies defeated x 100
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance one tick
    pub fn update(&mut self, input: &InputSnapshot, dt: f32) -> SessionSignal {
        match self.phase {
            SessionPhase::Playing => self.update_playing(input, dt),
            SessionPhase::Dying => self.update_dying(input, dt),
            _ => SessionSignal::None,
        }
    }

    fn update_playing(&mut self, input: &InputSnapshot, dt: f32) -> SessionSignal {
        if input.was_just_pressed(Button::Sel) {
            return SessionSignal::Pause;
        }
        if input.was_just_pressed(Button::B) {
            return SessionSignal::ExitToMenu;
        }

        self.player.update(input, dt, &self.level);
        if self.player.is_dead() {
            self.start_dying(DeathCause::Fell);
            return SessionSignal::None;
        }

        let player_x = self.player.pos().x;
        for enemy in &mut self.enemies {
            enemy.update(dt, &self.level, player_x, &self.tuning);
        }

        if let Some(cause) = self.check_hazards() {
            self.start_dying(cause);
            return SessionSignal::None;
        }

        self.update_camera();
        SessionSignal::None
    }

    fn update_dying(&mut self, input: &InputSnapshot, dt: f32) -> SessionSignal {
        // World is frozen, only the death animation plays out
        self.player.update(input, dt, &self.level);
        self.death_timer -= dt;
        if self.death_timer > 0.0 {
            return SessionSignal::None;
        }

        self.phase = SessionPhase::GameOver;
        let distance = self.player.pos().x as u32;
        log::info!("Platformer over at distance {}", distance);
        SessionSignal::SavePrompt(SaveRequest::new("Mario", distance, "Distance"))
    }

    /// Resolve enemy and spike contacts. Returns the cause if the player died.
    fn check_hazards(&mut self) -> Option<DeathCause> {
        let player_box = self.player.body.aabb();
        let falling = self.player.body.vel.y > 0.0;

        for enemy in self.enemies.iter_mut().filter(|e| e.alive) {
            let enemy_box = enemy.body.aabb();
            if !player_box.overlaps(&enemy_box) {
                continue;
            }

            let kind = if falling && player_box.bottom() < enemy_box.center().y {
                self.player.body.vel.y = STOMP_BOUNCE;
                DefeatKind::Stomp
            } else if self.player.sliding {
                DefeatKind::Slide
            } else {
                return Some(DeathCause::Enemy);
            };

            enemy.kill();
            self.score += 100;
            self.events.push(SessionEvent::EnemyDefeated(kind));
            log::debug!("Enemy defeated ({:?}), score {}", kind, self.score);
        }

        if self.spikes.iter().any(|spike| spike.overlaps(&player_box)) {
            return Some(DeathCause::Spiked);
        }
        None
    }

    fn start_dying(&mut self, cause: DeathCause) {
        self.player.die();
        self.phase = SessionPhase::Dying;
        self.death_timer = DEATH_DELAY;
        self.events.push(SessionEvent::PlayerKilled(cause));
        log::info!("Player died: {:?}", cause);
    }

    /// Scroll when the player leaves the dead-zone window
    fn update_camera(&mut self) {
        let x = self.player.pos().x;
        let screen_x = x - self.camera_x;
        if screen_x > CAMERA_RIGHT {
            self.camera_x = x - CAMERA_RIGHT;
        } else if screen_x < CAMERA_LEFT {
            self.camera_x = x - CAMERA_LEFT;
        }
        let max = (self.level.pixel_width() - SCREEN_W).max(0.0);
        self.camera_x = self.camera_x.clamp(0.0, max);
    }
}
