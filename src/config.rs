use std::{path::PathBuf, time::Duration};

pub const CELL_COUNT: i16 = 25;
pub const POINTS_PER_FOOD: u32 = 10;

const DEFAULT_TICK_MS: u64 = 300;
const DEFAULT_FPS: u32 = 60;
const DEFAULT_HIGHSCORE_FILE: &str = "highscore.txt";

/// Runtime settings for one game process.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Side of the square board, in cells
    pub cell_count: i16,
    /// Time between two logic updates
    pub tick_interval: Duration,
    /// Target render and input polling rate
    pub fps: u32,
    /// Score added per food eaten
    pub points_per_food: u32,
    /// Plain-text file holding the high score
    pub highscore_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            cell_count: CELL_COUNT,
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            fps: DEFAULT_FPS,
            points_per_food: POINTS_PER_FOOD,
            highscore_path: PathBuf::from(DEFAULT_HIGHSCORE_FILE),
        }
    }
}

impl GameConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}
