//! Brick breaker session: levels, lives and score

use super::breakout::{Ball, BallStatus, Paddle};
use super::bricks::BrickGrid;
use super::session::{SaveRequest, SessionEvent, SessionPhase, SessionSignal};
use crate::consts::STARTING_LIVES;
use crate::input::{Button, InputSnapshot};

pub const GAME_NAME: &str = "Block Breaker";

#[derive(Debug, Clone)]
pub struct BlockBreakerGame {
    bricks: BrickGrid,
    pub paddle: Paddle,
    pub ball: Ball,
    level: usize,
    score: u32,
    lives: u32,
    phase: SessionPhase,
    events: Vec<SessionEvent>,
}

impl Default for BlockBreakerGame {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockBreakerGame {
    pub fn new() -> Self {
        let mut game = Self {
            bricks: BrickGrid::new(),
            paddle: Paddle::default(),
            ball: Ball::default(),
            level: 0,
            score: 0,
            lives: STARTING_LIVES,
            phase: SessionPhase::Ready,
            events: Vec::new(),
        };
        game.reset();
        game
    }

    /// Score 0, full lives, first level
    pub fn reset(&mut self) {
        self.level = 0;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.bricks.load_level(0);
        self.serve();
        self.events.push(SessionEvent::Reset { game: GAME_NAME });
        log::info!("Block breaker reset: {} bricks", self.bricks.active_bricks());
    }

    pub fn resume(&mut self) {
        self.events.push(SessionEvent::Resumed { game: GAME_NAME });
    }

    pub fn bricks(&self) -> &BrickGrid {
        &self.bricks
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance one tick
    pub fn update(&mut self, input: &InputSnapshot, dt: f32) -> SessionSignal {
        if !self.phase.is_terminal() {
            if input.was_just_pressed(Button::Sel) {
                return SessionSignal::Pause;
            }
            if input.was_just_pressed(Button::B) {
                return SessionSignal::ExitToMenu;
            }
        }

        match self.phase {
            SessionPhase::Ready => {
                self.paddle.update(input, dt);
                self.ball.update(dt, &self.paddle, &mut self.bricks);
                if input.was_just_pressed(Button::A) {
                    self.ball.launch();
                    self.phase = SessionPhase::Playing;
                }
                SessionSignal::None
            }
            SessionPhase::Playing => self.update_playing(input, dt),
            SessionPhase::LevelDone => {
                if input.was_just_pressed(Button::A) {
                    self.next_level();
                }
                SessionSignal::None
            }
            SessionPhase::Dying | SessionPhase::GameOver => SessionSignal::None,
        }
    }

    fn update_playing(&mut self, input: &InputSnapshot, dt: f32) -> SessionSignal {
        self.paddle.update(input, dt);
        let step = self.ball.update(dt, &self.paddle, &mut self.bricks);
        self.score += step.score;

        if self.bricks.is_cleared() {
            self.phase = SessionPhase::LevelDone;
            self.ball.reset(&self.paddle);
            self.events.push(SessionEvent::LevelCleared { level: self.level });
            log::info!("Level {} cleared, score {}", self.level + 1, self.score);
            return SessionSignal::None;
        }

        if step.status == BallStatus::Lost {
            return self.lose_ball();
        }
        SessionSignal::None
    }

    fn lose_ball(&mut self) -> SessionSignal {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(SessionEvent::BallLost { lives: self.lives });

        if self.lives == 0 {
            self.phase = SessionPhase::GameOver;
            log::info!("Block breaker over, score {}", self.score);
            return SessionSignal::SavePrompt(SaveRequest::new(GAME_NAME, self.score, "Points"));
        }

        self.serve();
        SessionSignal::None
    }

    /// Lives carry over to the next level
    fn next_level(&mut self) {
        self.level = (self.level + 1) % BrickGrid::level_count();
        self.bricks.load_level(self.level);
        self.serve();
        self.events.push(SessionEvent::LevelStarted { level: self.level });
    }

    fn serve(&mut self) {
        self.paddle.recenter();
        self.ball.reset(&self.paddle);
        self.phase = SessionPhase::Ready;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::*;

    const DT: f32 = 1.0 / 60.0;

    fn playing() -> BlockBreakerGame {
        let mut game = BlockBreakerGame::new();
        game.drain_events();
        game.update(&InputSnapshot::new().with_press(Button::A), DT);
        assert_eq!(game.phase(), SessionPhase::Playing);
        game
    }

    /// Ball about to leave the bottom, paddle out of the way
    fn drop_ball(game: &mut BlockBreakerGame) {
        game.paddle.x = 0.0;
        game.ball.pos = Vec2::new(200.0, SCREEN_H - 1.0);
        game.ball.vel = Vec2::new(0.0, 200.0);
    }

    #[test]
    fn test_launch_from_ready() {
        let mut game = BlockBreakerGame::new();
        assert_eq!(game.phase(), SessionPhase::Ready);
        assert!(!game.ball.active);
        game.update(&InputSnapshot::new().with_press(Button::A), DT);
        assert_eq!(game.phase(), SessionPhase::Playing);
        assert_eq!(game.ball.vel, Vec2::new(0.0, -BALL_SPEED_BASE));
    }

    #[test]
    fn test_last_life_lost_prompts_save_once() {
        let mut game = playing();
        game.lives = 1;
        game.score = 120;
        drop_ball(&mut game);

        let signal = game.update(&InputSnapshot::new(), DT);
        assert_eq!(
            signal,
            SessionSignal::SavePrompt(SaveRequest::new("Block Breaker", 120, "Points"))
        );
        assert_eq!(game.phase(), SessionPhase::GameOver);
        assert_eq!(game.lives(), 0);

        for _ in 0..120 {
            assert_eq!(game.update(&InputSnapshot::new().with_press(Button::A), DT), SessionSignal::None);
        }
        assert_eq!(game.phase(), SessionPhase::GameOver);
    }

    #[test]
    fn test_ball_lost_with_lives_left_serves_again() {
        let mut game = playing();
        game.lives = 2;
        drop_ball(&mut game);

        assert_eq!(game.update(&InputSnapshot::new(), DT), SessionSignal::None);
        assert_eq!(game.phase(), SessionPhase::Ready);
        assert_eq!(game.lives(), 1);
        assert!(!game.ball.active);
        assert_eq!(game.drain_events(), vec![SessionEvent::BallLost { lives: 1 }]);
    }

    #[test]
    fn test_clearing_level_then_advancing_keeps_lives() {
        let mut game = playing();
        game.lives = 2;
        let mut rows = [[0u8; GRID_COLS]; GRID_ROWS];
        rows[3][4] = 2;
        game.bricks = BrickGrid::from_rows(&rows);
        game.ball.pos = Vec2::new(140.0, 49.0);
        game.ball.vel = Vec2::new(0.0, -120.0);

        game.update(&InputSnapshot::new(), DT);
        assert_eq!(game.phase(), SessionPhase::LevelDone);
        assert_eq!(game.score(), 20);
        assert!(!game.ball.active);

        game.update(&InputSnapshot::new().with_press(Button::A), DT);
        assert_eq!(game.phase(), SessionPhase::Ready);
        assert_eq!(game.level(), 1);
        assert_eq!(game.lives(), 2);
        assert_eq!(game.bricks().active_bricks(), 30);
        assert_eq!(
            game.drain_events(),
            vec![SessionEvent::LevelCleared { level: 0 }, SessionEvent::LevelStarted { level: 1 }]
        );
    }

    #[test]
    fn test_level_index_wraps() {
        let mut game = BlockBreakerGame::new();
        game.level = BrickGrid::level_count() - 1;
        game.next_level();
        assert_eq!(game.level(), 0);
    }

    #[test]
    fn test_pause_and_quit_respect_terminal_phase() {
        let mut game = BlockBreakerGame::new();
        let sel = InputSnapshot::new().with_press(Button::Sel);
        let back = InputSnapshot::new().with_press(Button::B);
        assert_eq!(game.update(&sel, DT), SessionSignal::Pause);
        assert_eq!(game.update(&back, DT), SessionSignal::ExitToMenu);

        game.phase = SessionPhase::LevelDone;
        assert_eq!(game.update(&sel, DT), SessionSignal::Pause);

        game.phase = SessionPhase::GameOver;
        assert_eq!(game.update(&sel, DT), SessionSignal::None);
        assert_eq!(game.update(&back, DT), SessionSignal::None);
    }

    #[test]
    fn test_reset_restores_run() {
        let mut game = playing();
        game.score = 500;
        game.lives = 1;
        game.level = 2;
        game.reset();
        assert_eq!((game.score(), game.lives(), game.level()), (0, STARTING_LIVES, 0));
        assert_eq!(game.phase(), SessionPhase::Ready);
    }
}
