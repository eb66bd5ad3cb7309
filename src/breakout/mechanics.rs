use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use egui::Color32;
use itertools::Itertools;
use rand::Rng;

use crate::breakout::algebra_2d::{AaBB, IVec2};

/// TOP / LEFT corner is 0/0
pub const MODEL_GRID_LEN_X: i32 = 800;
pub const MODEL_GRID_LEN_Y: i32 = 600;

/// one frame at 60 frames per second
pub const TIME_GRANULARITY: Duration = Duration::from_micros(16_667);

const PADDLE_LEN_X: i32 = 100;
const PADDLE_LEN_Y: i32 = 20;
const PADDLE_DISTANCE_BOTTOM: i32 = 10;
/// paddle move per frame, while a direction key is held
const PADDLE_STEP: i32 = 5;

const BALL_RADIUS: i32 = 10;
const BALL_INITIAL_VELOCITY: IVec2 = IVec2::new(5, 5);

pub const BRICK_LEN_X: i32 = 80;
pub const BRICK_LEN_Y: i32 = 30;
pub const BRICKS_SETUP_ROWS: usize = 5;
pub const BRICKS_SETUP_COLS: usize = 10;
const BRICKS_SETUP_FIRST_ROW_TOP_Y: i32 = 50;
pub const BRICK_COLOR_CHANNEL_RANGE: RangeInclusive<u8> = 50..=200;

pub const SCORE_PER_BRICK: u32 = 10;

pub const COUNTDOWN_DURATION: Duration = Duration::from_secs(3);
pub const GAME_OVER_PAUSE: Duration = Duration::from_secs(3);

/// Paces mechanics steps to at most one per `TIME_GRANULARITY`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepClock {
    next_step_time: Instant,
}

impl StepClock {
    /// the first step is due right away
    pub fn new(start: Instant) -> Self {
        Self { next_step_time: start }
    }

    pub fn next_step_time(&self) -> Instant {
        self.next_step_time
    }

    /// Returns true if a step is due at `now` and schedules the next one.
    /// A late call still yields a single step and re-anchors the schedule to `now`.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now < self.next_step_time {
            return false;
        }
        self.next_step_time += TIME_GRANULARITY;
        if self.next_step_time <= now {
            self.next_step_time = now + TIME_GRANULARITY;
        }
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// ball and paddle stay frozen until `COUNTDOWN_DURATION` has passed
    Countdown { since: Instant },
    Playing,
    /// frozen; the game is reset after `GAME_OVER_PAUSE`
    GameOver { since: Instant },
}

#[derive(Clone, Debug)]
pub struct BreakoutMechanics {
    pub bricks: Vec<Brick>,
    pub ball: Ball,
    pub paddle: Paddle,
    pub phase: Phase,
    pub score: u32,
    /// in-memory high score; persisted by the caller
    pub high_score: u32,
}

impl BreakoutMechanics {
    pub fn new(high_score: u32, now: Instant) -> Self {
        Self {
            bricks: BreakoutMechanics::initial_bricks(&mut rand::thread_rng()),
            ball: Ball {
                shape: BreakoutMechanics::initial_ball_shape(),
                velocity: BALL_INITIAL_VELOCITY,
            },
            paddle: Paddle { shape: BreakoutMechanics::initial_paddle_shape() },
            phase: Phase::Countdown { since: now },
            score: 0,
            high_score,
        }
    }

    /// Full grid of bricks in row-major order, each with a random color
    pub fn initial_bricks<R: Rng + ?Sized>(rng: &mut R) -> Vec<Brick> {
        (0..BRICKS_SETUP_ROWS)
            .cartesian_product(0..BRICKS_SETUP_COLS)
            .map(|(row, col)| Brick {
                shape: AaBB::new(
                    col as i32 * BRICK_LEN_X,
                    BRICKS_SETUP_FIRST_ROW_TOP_Y + row as i32 * BRICK_LEN_Y,
                    BRICK_LEN_X,
                    BRICK_LEN_Y,
                ),
                color: random_brick_color(rng),
            })
            .collect()
    }

    fn initial_ball_shape() -> AaBB {
        AaBB::new(
            MODEL_GRID_LEN_X / 2,
            MODEL_GRID_LEN_Y / 2,
            BALL_RADIUS * 2,
            BALL_RADIUS * 2,
        )
    }

    fn initial_paddle_shape() -> AaBB {
        AaBB::new(
            (MODEL_GRID_LEN_X - PADDLE_LEN_X) / 2,
            MODEL_GRID_LEN_Y - PADDLE_LEN_Y - PADDLE_DISTANCE_BOTTOM,
            PADDLE_LEN_X,
            PADDLE_LEN_Y,
        )
    }

    /// Advance the game by one frame
    pub fn time_step(&mut self, input: GameInput, now: Instant) {
        match self.phase {
            Phase::Countdown { since } => {
                if now.saturating_duration_since(since) >= COUNTDOWN_DURATION {
                    log::debug!("countdown finished");
                    self.phase = Phase::Playing;
                    self.play_step(input, now);
                }
            }
            Phase::Playing => self.play_step(input, now),
            Phase::GameOver { since } => {
                if now.saturating_duration_since(since) >= GAME_OVER_PAUSE {
                    self.reset(now);
                }
            }
        }
    }

    fn play_step(&mut self, input: GameInput, now: Instant) {
        self.paddle.process_input(input);
        self.ball.proceed();
        self.resolve_collisions();
        self.check_game_end_situation(now);
    }

    /// Collision checks run on the post-move position; each of them may fire in the same frame.
    fn resolve_collisions(&mut self) {
        self.ball.bounce_off_walls();

        if self.ball.shape.overlaps(&self.paddle.shape) {
            self.ball.reflect_vertically();
        }

        // at most one brick per frame
        if let Some(idx) = self.bricks.iter().position(|b| self.ball.shape.overlaps(&b.shape)) {
            let brick = self.bricks.remove(idx);
            self.ball.reflect_vertically();
            self.score += SCORE_PER_BRICK;
            log::debug!("brick hit at {:?}, {} left, score: {}", brick.shape, self.bricks.len(), self.score);
        }
    }

    fn check_game_end_situation(&mut self, now: Instant) {
        if self.ball.shape.bottom() >= MODEL_GRID_LEN_Y {
            if self.score > self.high_score {
                self.high_score = self.score;
            }
            log::info!("game over - score: {}, high score: {}", self.score, self.high_score);
            self.phase = Phase::GameOver { since: now };
        }
    }

    /// Ball velocity survives the reset; positions, bricks and score start over.
    fn reset(&mut self, now: Instant) {
        self.ball.shape = BreakoutMechanics::initial_ball_shape();
        self.paddle.shape = BreakoutMechanics::initial_paddle_shape();
        self.bricks = BreakoutMechanics::initial_bricks(&mut rand::thread_rng());
        self.score = 0;
        self.phase = Phase::Countdown { since: now };
        log::debug!("game reset, countdown started");
    }

    /// Remaining whole seconds of the countdown (3, 2, 1), if one is running
    pub fn countdown_numeral(&self, now: Instant) -> Option<u64> {
        match self.phase {
            Phase::Countdown { since } => {
                let elapsed_secs = now.saturating_duration_since(since).as_secs();
                let remaining = COUNTDOWN_DURATION.as_secs().saturating_sub(elapsed_secs);
                (remaining > 0).then_some(remaining)
            }
            _ => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }
}

fn random_brick_color<R: Rng + ?Sized>(rng: &mut R) -> Color32 {
    Color32::from_rgb(
        rng.gen_range(BRICK_COLOR_CHANNEL_RANGE),
        rng.gen_range(BRICK_COLOR_CHANNEL_RANGE),
        rng.gen_range(BRICK_COLOR_CHANNEL_RANGE),
    )
}

/// Direction keys held during a frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameInput {
    pub left: bool,
    pub right: bool,
}

impl GameInput {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn action(left: bool, right: bool) -> Self {
        Self { left, right }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Brick {
    pub shape: AaBB,
    pub color: Color32,
}

/// Drawn as a circle, but collides as its bounding box
#[derive(Clone, Debug, PartialEq)]
pub struct Ball {
    pub shape: AaBB,
    pub velocity: IVec2,
}

impl Ball {
    /// Moves by exactly one velocity step; not scaled by frame time
    pub fn proceed(&mut self) {
        self.shape = self.shape.translate(self.velocity);
    }

    fn bounce_off_walls(&mut self) {
        if self.shape.left <= 0 || self.shape.right() >= MODEL_GRID_LEN_X {
            self.velocity.x = -self.velocity.x;
        }
        if self.shape.top <= 0 {
            self.velocity.y = -self.velocity.y;
        }
    }

    fn reflect_vertically(&mut self) {
        self.velocity.y = -self.velocity.y;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Paddle {
    pub shape: AaBB,
}

impl Paddle {
    /// Both directions are applied independently; each one only while the paddle has not reached its wall.
    pub fn process_input(&mut self, input: GameInput) {
        if input.left && self.shape.left > 0 {
            self.shape = self.shape.translate(IVec2::new(-PADDLE_STEP, 0));
        }
        if input.right && self.shape.right() < MODEL_GRID_LEN_X {
            self.shape = self.shape.translate(IVec2::new(PADDLE_STEP, 0));
        }
    }
}
