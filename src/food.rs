use rand::Rng;

use crate::Coords;

/// Random draws before falling back to a linear scan for a free cell.
const MAX_RANDOM_DRAWS: usize = 1000;

pub struct Food {
    position: Coords,
}

impl Food {
    pub fn new(position: Coords) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Coords {
        self.position
    }

    /// Moves the food to a random cell of the `cell_count` x `cell_count`
    /// board that is not in `excluded`. Returns `None` if every cell is taken,
    /// leaving the food where it was.
    pub fn place<'a, I, R>(&mut self, excluded: I, cell_count: i16, rng: &mut R) -> Option<Coords>
    where
        I: IntoIterator<Item = &'a Coords> + Clone,
        R: Rng + ?Sized,
    {
        let is_free = |pos: &Coords| !excluded.clone().into_iter().any(|taken| taken == pos);

        let drawn = (0..MAX_RANDOM_DRAWS)
            .map(|_| (rng.gen_range(0..cell_count), rng.gen_range(0..cell_count)))
            .find(|pos| is_free(pos));

        let pos = drawn.or_else(|| {
            (0..cell_count)
                .flat_map(|y| (0..cell_count).map(move |x| (x, y)))
                .find(|pos| is_free(pos))
        })?;

        self.position = pos;
        Some(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn never_lands_on_excluded_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut food = Food::new((0, 0));
        // Occupy every cell of the left half of a 6x6 board
        let excluded: Vec<Coords> = (0..6).flat_map(|y| (0..3).map(move |x| (x, y))).collect();

        for _ in 0..500 {
            let pos = food.place(&excluded, 6, &mut rng).unwrap();
            assert!(!excluded.contains(&pos));
            assert!((0..6).contains(&pos.0) && (0..6).contains(&pos.1));
            assert_eq!(food.position(), pos);
        }
    }

    #[test]
    fn stays_on_default_board() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut food = Food::new((0, 0));
        let snake = vec![(6, 9), (5, 9), (4, 9)];

        for _ in 0..2000 {
            let (x, y) = food.place(&snake, 25, &mut rng).unwrap();
            assert!((0..25).contains(&x));
            assert!((0..25).contains(&y));
            assert!(!snake.contains(&(x, y)));
        }
    }

    #[test]
    fn finds_the_single_free_cell() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut food = Food::new((0, 0));
        let excluded: Vec<Coords> = (0..4)
            .flat_map(|y| (0..4).map(move |x| (x, y)))
            .filter(|pos| *pos != (2, 3))
            .collect();

        assert_eq!(food.place(&excluded, 4, &mut rng), Some((2, 3)));
    }

    #[test]
    fn full_board_has_no_room() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut food = Food::new((1, 1));
        let excluded: Vec<Coords> = (0..3).flat_map(|y| (0..3).map(move |x| (x, y))).collect();

        assert_eq!(food.place(&excluded, 3, &mut rng), None);
        assert_eq!(food.position(), (1, 1));
    }
}
