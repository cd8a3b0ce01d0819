use std::{path::PathBuf, time::{Duration, Instant}};

use log::{debug, error, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::Coords;
use crate::food::Food;
use crate::highscore::{self, HighScoreError};
use crate::snake::{Snake, Direction};
use crate::config::GameConfig;

/// What a single logic tick did, for the driver and for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Idle,
    Moved,
    Ate,
    GameOver { score: u32 },
}

/// Fires at most once per `interval`.
pub struct TickGate {
    interval: Duration,
    last: Instant,
}

impl TickGate {
    pub fn new(interval: Duration, start: Instant) -> Self {
        TickGate { interval, last: start }
    }

    pub fn ready(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}

pub struct SnakeGame {
    snake: Snake,
    food: Food,
    score: u32,
    high_score: u32,
    running: bool,
    cell_count: i16,
    points_per_food: u32,
    highscore_path: PathBuf,
    rng: StdRng,
}

impl SnakeGame {
    /// Loads the stored high score and lays out a fresh board.
    pub fn new(config: &GameConfig) -> Result<Self, HighScoreError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: &GameConfig, rng: StdRng) -> Result<Self, HighScoreError> {
        let high_score = highscore::read_highscore(&config.highscore_path)?;
        info!("loaded high score {} from {}", high_score, config.highscore_path.display());

        let mut game = SnakeGame {
            snake: Snake::new(),
            food: Food::new((0, 0)),
            score: 0,
            high_score,
            running: true,
            cell_count: config.cell_count,
            points_per_food: config.points_per_food,
            highscore_path: config.highscore_path.clone(),
            rng,
        };
        game.respawn_food();
        Ok(game)
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Coords {
        self.food.position()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn cell_count(&self) -> i16 {
        self.cell_count
    }

    pub fn steer(&mut self, dir: Direction) {
        self.snake.set_direction(dir);
    }

    /// One logic step: move, then walls, then food, then the snake's own body.
    pub fn update(&mut self) -> UpdateOutcome {
        if !self.running {
            return UpdateOutcome::Idle;
        }

        let head = self.snake.move_step();

        if self.hit_edge(head) {
            return self.game_over();
        }

        let mut outcome = UpdateOutcome::Moved;
        if head == self.food.position() {
            self.snake.grow();
            self.score += self.points_per_food;
            debug!("food eaten at {:?}, score {}", head, self.score);

            if !self.respawn_food() {
                info!("board is full");
                return self.game_over();
            }
            outcome = UpdateOutcome::Ate;
        }

        if self.snake.bites_itself() {
            return self.game_over();
        }

        outcome
    }

    /// Stops the game, keeping a pending best score.
    pub fn quit(&mut self) {
        info!("quitting with score {}", self.score);
        self.running = false;
        self.save_high_score();
    }

    /// The snake advances exactly one cell per tick, so leaving the board
    /// always lands on -1 or `cell_count`.
    fn hit_edge(&self, head: Coords) -> bool {
        let (x, y) = head;
        x == -1 || x == self.cell_count || y == -1 || y == self.cell_count
    }

    fn game_over(&mut self) -> UpdateOutcome {
        let score = self.score;
        info!("game over with score {}", score);

        self.save_high_score();
        self.snake.reset();
        self.respawn_food();
        self.score = 0;

        UpdateOutcome::GameOver { score }
    }

    fn save_high_score(&mut self) {
        if self.score <= self.high_score {
            return;
        }

        self.high_score = self.score;
        match highscore::write_highscore(&self.highscore_path, self.high_score) {
            Ok(()) => info!("new high score {} saved", self.high_score),
            Err(e) => error!("{}", e),
        }
    }

    fn respawn_food(&mut self) -> bool {
        match self.food.place(self.snake.body(), self.cell_count, &mut self.rng) {
            Some(pos) => {
                debug!("food placed at {:?}", pos);
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    fn put_food_at(&mut self, pos: Coords) {
        self.food = Food::new(pos);
    }
}
