use std::collections::VecDeque;

use crate::Coords;
use Direction::*;

pub const INITIAL_BODY: [Coords; 3] = [(6, 9), (5, 9), (4, 9)];
pub const INITIAL_DIRECTION: Direction = Right;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit vector as (column, row) delta. Rows grow downwards.
    pub fn delta(self) -> Coords {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// Snake body, head first.
pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
    grow_next_move: bool,
}

impl Snake {
    pub fn new() -> Self {
        Snake {
            body: INITIAL_BODY.iter().copied().collect(),
            direction: INITIAL_DIRECTION,
            grow_next_move: false,
        }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    /// Advances one cell in the current direction and returns the new head.
    /// Collisions are the caller's business; the body may step off the board
    /// or onto itself.
    pub fn move_step(&mut self) -> Coords {
        let old_head = self.head();
        let (dx, dy) = self.direction.delta();
        let new_head = (old_head.0 + dx, old_head.1 + dy);

        self.body.push_front(new_head);

        if self.grow_next_move {
            self.grow_next_move = false;
        } else {
            self.body.pop_back();
        }

        new_head
    }

    pub fn reset(&mut self) {
        self.body.clear();
        self.body.extend(INITIAL_BODY.iter().copied());
        self.direction = INITIAL_DIRECTION;
        self.grow_next_move = false;
    }

    /// Turning straight back into the neck is ignored.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction != self.direction.opposite() {
            self.direction = new_direction;
        }
    }

    #[cfg(test)]
    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn grow(&mut self) {
        self.grow_next_move = true;
    }

    #[cfg(test)]
    pub fn is_growing(&self) -> bool {
        self.grow_next_move
    }

    /// Test-only constructor for arbitrary layouts, head first.
    #[cfg(test)]
    pub fn from_body(body: &[Coords], direction: Direction) -> Self {
        Snake { body: body.iter().copied().collect(), direction, grow_next_move: false }
    }

    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|pos| *pos == head)
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [Up, Down, Left, Right];

    fn body_of(snake: &Snake) -> Vec<Coords> {
        snake.body().iter().copied().collect()
    }

    #[test]
    fn new_snake_matches_initial_layout() {
        let snake = Snake::new();
        assert_eq!(body_of(&snake), vec![(6, 9), (5, 9), (4, 9)]);
        assert_eq!(snake.get_direction(), Right);
        assert!(!snake.is_growing());
    }

    #[test]
    fn set_direction_rejects_only_reversal() {
        for &current in ALL.iter() {
            for &wanted in ALL.iter() {
                let mut snake = Snake::new();
                // Route through a perpendicular turn so any starting direction is reachable
                match current {
                    Left => {
                        snake.set_direction(Up);
                        snake.set_direction(Left);
                    }
                    other => snake.set_direction(other),
                }
                assert_eq!(snake.get_direction(), current);

                snake.set_direction(wanted);
                if wanted == current.opposite() {
                    assert_eq!(snake.get_direction(), current);
                } else {
                    assert_eq!(snake.get_direction(), wanted);
                }
            }
        }
    }

    #[test]
    fn move_without_growth_keeps_length() {
        let mut snake = Snake::new();
        assert_eq!(snake.move_step(), (7, 9));
        assert_eq!(body_of(&snake), vec![(7, 9), (6, 9), (5, 9)]);
    }

    #[test]
    fn segments_follow_the_head() {
        let mut snake = Snake::new();
        snake.set_direction(Down);
        let before = body_of(&snake);
        snake.move_step();

        assert_eq!(snake.head(), (6, 10));
        let after = body_of(&snake);
        assert_eq!(&after[1..], &before[..before.len() - 1]);
    }

    #[test]
    fn grow_then_move_adds_one_segment() {
        let mut snake = Snake::new();
        snake.grow();
        assert_eq!(snake.move_step(), (7, 9));

        assert_eq!(body_of(&snake), vec![(7, 9), (6, 9), (5, 9), (4, 9)]);
        assert!(!snake.is_growing());

        snake.move_step();
        assert_eq!(snake.body().len(), 4);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut snake = Snake::new();
        snake.grow();
        snake.set_direction(Up);
        snake.move_step();
        snake.grow();

        snake.reset();
        let body_once = body_of(&snake);
        snake.reset();

        assert_eq!(body_of(&snake), body_once);
        assert_eq!(body_of(&snake), vec![(6, 9), (5, 9), (4, 9)]);
        assert_eq!(snake.get_direction(), Right);
        assert!(!snake.is_growing());
    }

    #[test]
    fn detects_self_bite() {
        let mut snake = Snake::new();
        for _ in 0..3 {
            snake.grow();
            snake.move_step();
        }
        // Body is now six long heading right; curl back onto it
        snake.set_direction(Down);
        snake.move_step();
        snake.set_direction(Left);
        snake.move_step();
        assert!(!snake.bites_itself());
        snake.set_direction(Up);
        snake.move_step();
        assert!(snake.bites_itself());
    }
}
