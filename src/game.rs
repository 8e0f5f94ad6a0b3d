use std::fmt;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::Size;

use crate::config::{GridSize, INITIAL_SPEED, MIN_SPEED, PALETTE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::food::Food;
use crate::input::{Direction, InputProbe, Key};
use crate::renderer;
use crate::snake::Snake;
use crate::surface::Surface;
use crate::terminal_runtime::Game;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Why the last game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

impl fmt::Display for DeathReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WallCollision => f.write_str("hit the wall"),
            Self::SelfCollision => f.write_str("hit itself"),
        }
    }
}

/// Read-only view of the state handed to the presenter each frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub snake: &'a Snake,
    pub food: Food,
    pub score: u32,
    pub game_over: bool,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    update_counter: u32,
    speed: u32,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a deterministic state for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::new(bounds, StdRng::seed_from_u64(seed))
    }

    /// Creates a running game that draws food positions from `rng`.
    #[must_use]
    pub fn new(bounds: GridSize, mut rng: StdRng) -> Self {
        let snake = Snake::new(bounds);
        let food = Food::spawn(&mut rng, bounds);

        Self {
            snake,
            food,
            score: 0,
            status: GameStatus::Running,
            death_reason: None,
            update_counter: 0,
            speed: INITIAL_SPEED,
            bounds,
            rng,
        }
    }

    /// Runs one host frame.
    ///
    /// A simulation step happens on every `speed`-th frame while running.
    /// After a game over only an `R` press has any effect.
    pub fn update(&mut self, input: &dyn InputProbe) {
        if self.status == GameStatus::GameOver {
            if input.was_just_pressed(Key::R) {
                self.restart();
            }
            return;
        }

        self.update_counter += 1;
        if self.update_counter < self.speed {
            return;
        }
        self.update_counter = 0;

        self.step(input);
    }

    /// Advances the simulation by exactly one cell.
    pub fn step(&mut self, input: &dyn InputProbe) {
        if self.status != GameStatus::Running {
            return;
        }

        self.snake.move_forward();
        // The new heading only applies from the next advance on.
        self.latch_direction(input);

        if !self.snake.head().is_within_bounds(self.bounds) {
            self.end_game(DeathReason::WallCollision);
            return;
        }

        if self.snake.head_overlaps_body() {
            self.end_game(DeathReason::SelfCollision);
            return;
        }

        if self.snake.head() == self.food.position {
            self.eat_food();
        }
    }

    /// Starts a new game from scratch with the same RNG stream.
    pub fn restart(&mut self) {
        self.snake = Snake::new(self.bounds);
        self.food = Food::spawn(&mut self.rng, self.bounds);
        self.score = 0;
        self.status = GameStatus::Running;
        self.death_reason = None;
        self.speed = INITIAL_SPEED;
        self.update_counter = 0;

        info!("game restarted");
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: &self.snake,
            food: self.food,
            score: self.score,
            game_over: self.is_game_over(),
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    /// Frames per simulation step; lower is faster.
    #[must_use]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Frames counted since the last simulation step.
    #[must_use]
    pub fn update_counter(&self) -> u32 {
        self.update_counter
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    fn latch_direction(&mut self, input: &dyn InputProbe) {
        for direction in Direction::LATCH_ORDER {
            if input.is_held(direction) && self.snake.turn(direction) {
                break;
            }
        }
    }

    fn eat_food(&mut self) {
        self.score += 1;
        self.snake.grow_next();
        self.food = Food::spawn(&mut self.rng, self.bounds);

        if self.speed > MIN_SPEED {
            self.speed -= 1;
            debug!("speed increased to {} frames per step", self.speed);
        }

        debug!(
            "food eaten, score {}, next food at ({}, {})",
            self.score, self.food.position.x, self.food.position.y
        );
    }

    fn end_game(&mut self, reason: DeathReason) {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        self.speed = INITIAL_SPEED;

        info!(
            "game over: snake {reason} with score {} and length {}",
            self.score,
            self.snake.len()
        );
    }
}

impl Game for GameState {
    fn layout(&self, _outside: Size) -> Size {
        Size {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }

    fn update(&mut self, input: &dyn InputProbe) {
        GameState::update(self, input);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        renderer::render(surface, &self.snapshot(), &PALETTE);
    }
}
