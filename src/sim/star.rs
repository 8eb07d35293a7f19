//! Timed bonus star on the goal row

use rand::Rng;

use super::board::Board;
use crate::GridPos;
use crate::consts::*;

/// Bonus object that boosts the win score while it lasts
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: GridPos,
    pub available: bool,
    pub alpha: f32,
    /// Seconds since the level started
    pub age: f32,
    /// Seconds the star lasts on this level
    pub budget: f32,
}

/// Seconds the star lasts on a given level
pub fn star_time_budget(level_index: usize) -> f32 {
    (STAR_BASE_TIME - level_index as f32 * STAR_LEVEL_DEDUCTION).max(STAR_MIN_TIME)
}

impl Star {
    /// Place a star in a random column whose approach cell is free of rocks.
    /// Blocked picks slide left (wrapping) to the nearest open column.
    pub fn new(level_index: usize, board: &Board, rng: &mut impl Rng) -> Self {
        let approach_row = PLAYER_WIN_ROW - 1;
        let pick = rng.random_range(0..GRID_COLS);
        let open = (0..GRID_COLS)
            .map(|step| (pick - step).rem_euclid(GRID_COLS))
            .find(|&col| !board.is_rock(GridPos::new(col, approach_row)));

        let available = open.is_some();
        if !available {
            log::debug!("No open column for the star this level");
        }
        Self {
            pos: GridPos::new(open.unwrap_or(pick), PLAYER_WIN_ROW),
            available,
            alpha: if available { 1.0 } else { 0.0 },
            age: 0.0,
            budget: star_time_budget(level_index),
        }
    }

    /// Unavailable star, replaced on the first level reset
    pub fn hidden() -> Self {
        Self {
            pos: GridPos::new(0, PLAYER_WIN_ROW),
            available: false,
            alpha: 0.0,
            age: 0.0,
            budget: 0.0,
        }
    }

    /// Seconds before the star disappears
    pub fn remaining(&self) -> f32 {
        self.budget - self.age
    }

    pub fn update(&mut self, dt: f32) {
        if !self.available {
            return;
        }
        self.age += dt;
        let remaining = self.remaining();
        if remaining <= 0.0 {
            self.available = false;
            self.alpha = 0.0;
        } else if remaining < STAR_FADE_TIME {
            self.alpha = remaining / STAR_FADE_TIME;
        }
    }

    /// Claim the star from `col`. Succeeds once.
    pub fn claim_at(&mut self, col: i32) -> bool {
        if self.available && self.pos.col == col {
            self.available = false;
            self.alpha = 0.0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::board::Cell;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn star_on_empty_board(seed: u64) -> Star {
        let mut rng = Pcg32::seed_from_u64(seed);
        Star::new(0, &Board::default(), &mut rng)
    }

    #[test]
    fn test_star_on_goal_row() {
        for seed in 0..20 {
            let star = star_on_empty_board(seed);
            assert_eq!(star.pos.row, PLAYER_WIN_ROW);
            assert!((0..GRID_COLS).contains(&star.pos.col));
            assert!(star.available);
        }
    }

    #[test]
    fn test_star_avoids_blocked_columns() {
        let mut board = Board::default();
        for col in 0..GRID_COLS - 1 {
            board.set(GridPos::new(col, PLAYER_WIN_ROW - 1), Cell::Rock);
        }
        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let star = Star::new(0, &board, &mut rng);
            assert_eq!(star.pos.col, GRID_COLS - 1);
        }
    }

    #[test]
    fn test_star_unavailable_when_every_column_blocked() {
        let mut board = Board::default();
        for col in 0..GRID_COLS {
            board.set(GridPos::new(col, PLAYER_WIN_ROW - 1), Cell::Rock);
        }
        let mut rng = Pcg32::seed_from_u64(7);
        let mut star = Star::new(0, &board, &mut rng);
        assert!(!star.available);
        assert!(!star.claim_at(star.pos.col));
    }

    #[test]
    fn test_budget_shrinks_per_level() {
        assert_eq!(star_time_budget(0), STAR_BASE_TIME);
        assert_eq!(star_time_budget(2), STAR_BASE_TIME - 2.0 * STAR_LEVEL_DEDUCTION);
        assert_eq!(star_time_budget(50), STAR_MIN_TIME);
    }

    #[test]
    fn test_star_fades_then_expires() {
        let mut star = star_on_empty_board(1);
        star.update(star.budget - STAR_FADE_TIME / 2.0);
        assert!(star.available);
        assert!((star.alpha - 0.5).abs() < 1e-3);

        star.update(STAR_FADE_TIME);
        assert!(!star.available);
        assert_eq!(star.alpha, 0.0);
        assert!(!star.claim_at(star.pos.col));
    }

    #[test]
    fn test_claim_is_single_use() {
        let mut star = star_on_empty_board(3);
        let col = star.pos.col;
        let wrong = (col + 1) % GRID_COLS;

        assert!(!star.claim_at(wrong));
        assert!(star.available);

        assert!(star.claim_at(col));
        assert!(!star.available);
        assert!(!star.claim_at(col));
        assert!(!star.claim_at(wrong));
    }
}
