//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in `GameState`. Sub-systems get
//! borrowed only the pieces they need.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::board::{Board, Lock};
use super::enemy::EnemyRow;
use super::hud::{Lives, Score, StatusText};
use super::level::{LevelDescriptor, LevelError, PickupKind};
use super::player::Player;
use super::star::Star;
use super::tick::reset_level;
use crate::GridPos;

/// Something noteworthy that happened during a frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A level (re)started; `level` is zero based
    LevelStarted { level: usize },
    /// Touched a hazard
    PlayerDied { at: GridPos },
    /// Entered water without a platform
    PlayerDrowned { at: GridPos },
    LifeLost { remaining: u32 },
    /// The death that just happened used the last life
    OutOfLives,
    /// Reached the goal row
    LevelCompleted { award: u32 },
    StarClaimed,
    PickupCollected { kind: PickupKind, at: GridPos },
    KeyCollected,
    /// Lives ran out; back to level one
    GameRestarted,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Level table, read-only during play
    pub levels: Vec<LevelDescriptor>,
    /// Current level index (0-based)
    pub level_index: usize,
    /// Frames simulated since the game started
    pub frame: u64,
    pub board: Board,
    pub lock: Lock,
    /// Rows with enemies or platforms, top to bottom
    pub enemies: Vec<EnemyRow>,
    pub star: Star,
    pub player: Player,
    pub score: Score,
    pub lives: Lives,
    pub status: StatusText,
    /// Lives granted at the start of each game
    pub start_lives: u32,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game on the first level
    pub fn new(seed: u64, levels: Vec<LevelDescriptor>, start_lives: u32) -> Result<Self, LevelError> {
        let start = levels.first().ok_or(LevelError::Empty)?.start;

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            levels,
            level_index: 0,
            frame: 0,
            board: Board::default(),
            lock: Lock::default(),
            enemies: Vec::new(),
            star: Star::hidden(),
            player: Player::new(start),
            score: Score::new(),
            lives: Lives::new(start_lives),
            status: StatusText::new(),
            start_lives,
            events: Vec::new(),
        };
        reset_level(&mut state, false);
        Ok(state)
    }

    pub fn level(&self) -> &LevelDescriptor {
        &self.levels[self.level_index]
    }

    /// Enemy row occupying a grid row, if any
    pub fn enemy_row_at(&self, row: i32) -> Option<&EnemyRow> {
        self.enemies.iter().find(|e| e.row == row)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::level::builtin_levels;

    #[test]
    fn test_new_state_starts_level_one() {
        let mut state = GameState::new(42, builtin_levels().unwrap(), START_LIVES).unwrap();
        assert_eq!(state.level_index, 0);
        assert_eq!(state.lives.count(), START_LIVES);
        assert_eq!(state.enemies.len(), 3);
        assert!(state.lock.is_locked());
        assert_eq!(state.status.text(), "LEVEL 1");
        assert_eq!(state.drain_events(), vec![GameEvent::LevelStarted { level: 0 }]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_star_uses_first_draw_of_the_seed() {
        let levels = builtin_levels().unwrap();
        let board = Board::from_level(&levels[0]);
        for seed in 0..20 {
            let state = GameState::new(seed, levels.clone(), START_LIVES).unwrap();
            let expected = Star::new(0, &board, &mut Pcg32::seed_from_u64(seed));
            assert_eq!(state.star, expected, "seed {}", seed);
        }
    }

    #[test]
    fn test_empty_level_table_is_an_error() {
        assert!(matches!(GameState::new(1, Vec::new(), 3), Err(LevelError::Empty)));
    }

    #[test]
    fn test_enemy_row_lookup() {
        let state = GameState::new(42, builtin_levels().unwrap(), START_LIVES).unwrap();
        assert!(state.enemy_row_at(1).is_some_and(|r| r.is_platform()));
        assert!(state.enemy_row_at(3).is_none());
        assert!(state.enemy_row_at(0).is_none());
    }
}
