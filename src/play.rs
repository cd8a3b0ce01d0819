use std::time::Instant;

use anyhow::{bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;

use crate::{Coords, TermInt};
use crate::config::GameConfig;
use crate::game::{SnakeGame, TickGate, UpdateOutcome};
use crate::snake::Direction::{self, *};
use crate::term::{ScreenPos, TermManager};

const TITLE: &str = "~Snake Game~";

const SNAKE_BODY_CHAR: char = '█';
const FOOD_GLYPH: [char; 2] = ['(', ')'];
const EMPTY_GLYPH: [char; 2] = [' ', ' '];

// Board cells are two columns wide so they come out roughly square
const CELL_WIDTH: TermInt = 2;
const BOARD_TOP: TermInt = 1;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Steer(Direction),
    Quit,
}

/// Drives one `SnakeGame` on the terminal: input and drawing every frame,
/// logic whenever the tick gate opens.
pub struct Player {
    term: TermManager,
    game: SnakeGame,
    config: GameConfig,
}

impl Player {
    pub fn new(term: TermManager, game: SnakeGame, config: GameConfig) -> Result<Self> {
        let (w, h) = term.get_terminal_size();
        let (need_w, need_h) = required_size(game.cell_count());
        if w < need_w || h < need_h {
            bail!("terminal is {}x{}, the board needs at least {}x{}", w, h, need_w, need_h);
        }

        Ok(Player { term, game, config })
    }

    pub fn term_mut(&mut self) -> &mut TermManager {
        &mut self.term
    }

    pub fn play(&mut self) -> Result<()> {
        let frame = self.config.frame_interval();
        let mut gate = TickGate::new(self.config.tick_interval, Instant::now());

        self.draw_frame()?;

        while self.game.is_running() {
            // Turns apply as soon as they are read, so two quick turns within one
            // tick are each checked against the previous turn, not the last move
            for key_ev in self.term.read_key_events_until(Instant::now() + frame)? {
                match key_command(&key_ev) {
                    Some(Command::Quit) => {
                        self.game.quit();
                        break;
                    }
                    Some(Command::Steer(dir)) => self.game.steer(dir),
                    None => {}
                }
            }

            if !self.game.is_running() {
                break;
            }

            if gate.ready(Instant::now()) {
                if let UpdateOutcome::GameOver { score } = self.game.update() {
                    info!("respawning after a score of {}", score);
                }
            }

            self.draw_frame()?;
        }

        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_frame(&mut self) -> Result<()> {
        let n = self.game.cell_count();
        let board_right = n as TermInt * CELL_WIDTH + 1;
        let board_bottom = BOARD_TOP + n as TermInt + 1;

        self.term.print_str_at((0, 0), TITLE)?;
        self.term.draw_borders((0, BOARD_TOP), (board_right, board_bottom))?;

        for y in 0..n {
            for x in 0..n {
                let glyph = self.glyph_at((x, y));
                let pos = cell_to_screen((x, y));
                self.term.print_at(pos, glyph[0])?;
                self.term.print_at((pos.0 + 1, pos.1), glyph[1])?;
            }
        }

        let score = format!("Score: {:<8}", self.game.score());
        let high = format!("High Score: {:<8}", self.game.high_score());
        self.term.print_str_at((0, board_bottom + 1), &score)?;
        self.term.print_str_at((board_right / 2, board_bottom + 1), &high)?;

        self.term.flush()
    }

    fn glyph_at(&self, pos: Coords) -> [char; 2] {
        let snake = self.game.snake();
        if pos == snake.head() {
            [snake.head_char(); 2]
        } else if snake.body().contains(&pos) {
            [SNAKE_BODY_CHAR; 2]
        } else if pos == self.game.food() {
            FOOD_GLYPH
        } else {
            EMPTY_GLYPH
        }
    }
}

/// Terminal columns and rows needed for the title, the framed board and the labels.
fn required_size(cell_count: i16) -> ScreenPos {
    let n = cell_count as TermInt;
    (n * CELL_WIDTH + 2, BOARD_TOP + n + 3)
}

fn cell_to_screen(pos: Coords) -> ScreenPos {
    (1 + pos.0 as TermInt * CELL_WIDTH, BOARD_TOP + 1 + pos.1 as TermInt)
}

fn key_command(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Steer(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Steer(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Steer(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Steer(Right)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
