mod config;
mod food;
mod game;
mod highscore;
mod play;
mod snake;
mod term;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use config::GameConfig;
use game::SnakeGame;
use play::Player;
use term::TermManager;

pub type TermInt = u16;
/// Board cell as (column, row). Signed so a head one step past the wall is representable.
pub type Coords = (i16, i16);

#[derive(Parser, Debug)]
#[command(name = "gridsnake")]
#[command(about = "Snake on a 25x25 board, in the terminal", long_about = None)]
struct Args {
    /// File the high score is read from and written to
    #[arg(long, value_name = "PATH")]
    highscore_file: Option<PathBuf>,

    /// Milliseconds between two snake moves
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: Option<u64>,

    /// Frames drawn per second
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    fps: Option<u32>,
}

impl Args {
    fn into_config(self) -> GameConfig {
        let mut config = GameConfig::default();
        if let Some(path) = self.highscore_file {
            config.highscore_path = path;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_interval = Duration::from_millis(ms);
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        config
    }
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let config = Args::parse().into_config();
    info!("starting with {:?}", config);

    let game = SnakeGame::new(&config).context("Error loading the high score")?;
    let term = TermManager::new()?;
    let mut player = Player::new(term, game, config)?;

    // On any early return or panic the terminal is restored when `player` drops
    let res = player.term_mut().setup().and_then(|()| player.play());
    if let Err(e) = &res {
        error!("{:#}", e);
    }
    player.term_mut().restore()?;

    res
}
