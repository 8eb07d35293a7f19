//! The player: grid movement, riding and scripted animations
//!
//! The player is either `Playable` (grid-stepped, driven by input) or
//! `Animating` one of the scripted sequences. While animating, the grid
//! position is frozen and only the pixel position and angle move.

use glam::Vec2;

use super::board::Board;
use super::enemy::EnemyRow;
use crate::consts::*;
use crate::{GridPos, Hitbox, grid_to_pixel, pixel_to_grid_column};

/// Directional input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Left,
    Up,
    Down,
    Right,
}

/// Which scripted sequence is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// Drop-in when a level starts or the player respawns
    Start,
    /// Spin off the top of the screen
    Death,
    /// Victory hops on the goal row
    End,
}

impl AnimationKind {
    pub fn steps(&self) -> &'static [AnimationStep] {
        match self {
            AnimationKind::Start => START_ANIMATION,
            AnimationKind::Death => DEATH_ANIMATION,
            AnimationKind::End => END_ANIMATION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMode {
    Animating(AnimationKind),
    Playable,
}

/// One leg of a scripted animation. `None` axes are left alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationStep {
    pub start_x: Option<f32>,
    pub start_y: Option<f32>,
    pub end_x: Option<f32>,
    pub end_y: Option<f32>,
    /// Coordinates are offsets from the player's rest position instead of canvas pixels
    pub relative: bool,
    /// Pixels per second
    pub speed: f32,
    /// Orientation in degrees at the start of the step
    pub angle: f32,
    /// Degrees per second
    pub spin: f32,
}

impl AnimationStep {
    const fn vertical(start_y: Option<f32>, end_y: f32, relative: bool, speed: f32, angle: f32) -> Self {
        Self {
            start_x: None,
            start_y,
            end_x: None,
            end_y: Some(end_y),
            relative,
            speed,
            angle,
            spin: 0.0,
        }
    }
}

const START_ANIMATION: &[AnimationStep] = &[
    AnimationStep::vertical(Some(-119.0), 0.0, true, 400.0, 0.0),
    AnimationStep::vertical(None, -30.0, true, 400.0, 0.0),
    AnimationStep::vertical(None, 0.0, true, 400.0, 0.0),
    AnimationStep::vertical(None, -10.0, true, 400.0, 0.0),
    AnimationStep::vertical(None, 0.0, true, 400.0, 0.0),
];

const DEATH_ANIMATION: &[AnimationStep] = &[AnimationStep {
    start_x: None,
    start_y: None,
    end_x: None,
    end_y: Some(-119.0),
    relative: false,
    speed: 500.0,
    angle: 0.0,
    spin: 720.0,
}];

const END_ANIMATION: &[AnimationStep] = &[
    AnimationStep::vertical(None, -41.0, true, 200.0, -5.0),
    AnimationStep::vertical(None, 0.0, true, 200.0, -5.0),
    AnimationStep::vertical(None, -41.0, true, 200.0, 5.0),
    AnimationStep::vertical(None, 0.0, true, 200.0, 5.0),
    AnimationStep::vertical(None, -41.0, true, 200.0, -5.0),
    AnimationStep::vertical(None, 0.0, true, 200.0, -5.0),
    AnimationStep::vertical(None, -41.0, true, 200.0, 5.0),
    AnimationStep::vertical(None, 0.0, true, 200.0, 5.0),
];

/// Move `current` toward `target` by at most `max_step`, landing exactly on it
fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    let remaining = target - current;
    if remaining.abs() <= max_step {
        target
    } else {
        current + max_step * remaining.signum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Cell the player occupies
    pub grid: GridPos,
    /// Cell the player is moving to this frame
    pub target: GridPos,
    /// Sprite origin in canvas pixels
    pub pos: Vec2,
    pub mode: PlayerMode,
    /// Index of the running animation step; `None` until the first tick
    pub cursor: Option<usize>,
    /// Degrees
    pub angle: f32,
    /// Degrees per second
    pub spin: f32,
    /// Pixels per second of the running step
    pub speed: f32,
    /// Index into the level's enemy rows of the platform being ridden
    pub riding: Option<usize>,
    /// Where the player spawns on this level
    pub start: GridPos,
}

impl Player {
    pub fn new(start: GridPos) -> Self {
        let mut player = Self {
            grid: start,
            target: start,
            pos: grid_to_pixel(start),
            mode: PlayerMode::Playable,
            cursor: None,
            angle: 0.0,
            spin: 0.0,
            speed: 0.0,
            riding: None,
            start,
        };
        player.reset(start);
        player
    }

    /// Back to the spawn cell, playing the start animation
    pub fn reset(&mut self, start: GridPos) {
        self.start = start;
        self.grid = start;
        self.target = start;
        self.pos = grid_to_pixel(start);
        self.angle = 0.0;
        self.spin = 0.0;
        self.speed = 0.0;
        self.riding = None;
        self.play(AnimationKind::Start);
    }

    /// Begin a scripted animation
    pub fn play(&mut self, kind: AnimationKind) {
        self.mode = PlayerMode::Animating(kind);
        self.cursor = None;
    }

    #[inline]
    pub fn is_playable(&self) -> bool {
        self.mode == PlayerMode::Playable
    }

    pub fn is_riding(&self) -> bool {
        self.riding.is_some()
    }

    /// Whether the player should be drawn in this cell
    pub fn is_at(&self, col: i32, row: i32) -> bool {
        self.grid.col == col && self.grid.row == row
    }

    /// Collision box: the visible part of the sprite
    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(
            self.pos + Vec2::new(PLAYER_X_OFFSET, PLAYER_Y_OFFSET),
            Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        )
    }

    /// Apply a directional input. Ignored unless playable.
    ///
    /// While the goal row is locked the player cannot step down onto it.
    pub fn handle_input(&mut self, mv: Move, locked: bool) {
        if !self.is_playable() {
            return;
        }
        let max_row = if locked {
            PLAYER_WIN_ROW - 1
        } else {
            GRID_ROWS - 1
        };
        let mut target = self.grid;
        match mv {
            Move::Left if target.col > 0 => target.col -= 1,
            Move::Right if target.col < GRID_COLS - 1 => target.col += 1,
            Move::Up if target.row > 0 => target.row -= 1,
            Move::Down if target.row < max_row => target.row += 1,
            _ => {}
        }
        self.target = target;
        self.riding = None;
    }

    /// Advance movement. Returns the animation that finished this frame, if any.
    pub fn update(&mut self, dt: f32, board: &Board, rows: &[EnemyRow]) -> Option<AnimationKind> {
        match self.mode {
            PlayerMode::Playable => {
                self.update_playable(dt, board, rows);
                None
            }
            PlayerMode::Animating(kind) => self.update_animation(kind, dt),
        }
    }

    fn update_playable(&mut self, dt: f32, board: &Board, rows: &[EnemyRow]) {
        if board.is_rock(self.target) {
            self.target = self.grid;
        }

        if let Some(row) = self.riding.and_then(|i| rows.get(i)) {
            let max_x = (GRID_COLS - 1) as f32 * CELL_W;
            self.pos.x = (self.pos.x + row.delta(dt)).clamp(0.0, max_x);
            self.grid.col = pixel_to_grid_column(self.pos.x);
            self.target.col = self.grid.col;
        } else {
            self.riding = None;
            self.grid = self.target;
            self.pos = grid_to_pixel(self.grid);
        }
    }

    fn update_animation(&mut self, kind: AnimationKind, dt: f32) -> Option<AnimationKind> {
        let steps = kind.steps();
        let index = match self.cursor {
            Some(index) => index,
            None => {
                self.load_step(steps, 0);
                0
            }
        };
        let Some(step) = steps.get(index) else {
            return self.finish_animation(kind);
        };

        let rest = grid_to_pixel(self.grid);
        let resolve = |value: Option<f32>, base: f32| {
            value.map(|v| if step.relative { base + v } else { v })
        };
        let end_x = resolve(step.end_x, rest.x);
        let end_y = resolve(step.end_y, rest.y);

        let max_step = self.speed * dt;
        if let Some(x) = end_x {
            self.pos.x = approach(self.pos.x, x, max_step);
        }
        if let Some(y) = end_y {
            self.pos.y = approach(self.pos.y, y, max_step);
        }
        self.angle += self.spin * dt;

        let done = end_x.is_none_or(|x| self.pos.x == x) && end_y.is_none_or(|y| self.pos.y == y);
        if !done {
            return None;
        }
        if index + 1 < steps.len() {
            self.load_step(steps, index + 1);
            None
        } else {
            self.finish_animation(kind)
        }
    }

    fn load_step(&mut self, steps: &[AnimationStep], index: usize) {
        self.cursor = Some(index);
        let Some(step) = steps.get(index) else {
            return;
        };
        self.angle = step.angle;
        self.spin = step.spin;
        self.speed = step.speed;

        let rest = grid_to_pixel(self.grid);
        if let Some(x) = step.start_x {
            self.pos.x = if step.relative { rest.x + x } else { x };
        }
        if let Some(y) = step.start_y {
            self.pos.y = if step.relative { rest.y + y } else { y };
        }
    }

    fn finish_animation(&mut self, kind: AnimationKind) -> Option<AnimationKind> {
        self.cursor = None;
        self.angle = 0.0;
        self.spin = 0.0;
        if kind == AnimationKind::Start {
            self.mode = PlayerMode::Playable;
            self.pos = grid_to_pixel(self.grid);
        }
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::SpriteId;
    use crate::sim::board::Cell;
    use crate::sim::level::{Direction, EnemyRowSpec, RowKind};
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn playable_at(pos: GridPos) -> Player {
        let mut player = Player::new(pos);
        player.mode = PlayerMode::Playable;
        player
    }

    fn run_until_finished(player: &mut Player, board: &Board) -> Option<AnimationKind> {
        for _ in 0..2000 {
            if let Some(kind) = player.update(DT, board, &[]) {
                return Some(kind);
            }
        }
        None
    }

    fn lily_row(row: i32, dir: Direction, speed: f32) -> EnemyRow {
        EnemyRow::new(
            row,
            &EnemyRowSpec {
                sprite: SpriteId::Lilypad,
                kind: RowKind::Platform,
                dir,
                speed,
                pattern: vec![0],
            },
        )
    }

    #[test]
    fn test_new_player_plays_start_animation() {
        let player = Player::new(GridPos::new(2, 0));
        assert_eq!(player.mode, PlayerMode::Animating(AnimationKind::Start));
        assert_eq!(player.cursor, None);
    }

    #[test]
    fn test_start_animation_drops_in_then_becomes_playable() {
        let board = Board::default();
        let mut player = Player::new(GridPos::new(2, 0));

        player.update(DT, &board, &[]);
        assert_eq!(player.cursor, Some(0));
        assert!(player.pos.y < 0.0, "starts above its cell");

        assert_eq!(run_until_finished(&mut player, &board), Some(AnimationKind::Start));
        assert!(player.is_playable());
        assert_eq!(player.pos, grid_to_pixel(GridPos::new(2, 0)));
        assert_eq!(player.grid, GridPos::new(2, 0));
    }

    #[test]
    fn test_death_animation_keeps_grid_and_spins() {
        let board = Board::default();
        let mut player = playable_at(GridPos::new(1, 3));
        player.play(AnimationKind::Death);
        player.update(0.1, &board, &[]);
        assert_eq!(player.grid, GridPos::new(1, 3));
        assert!(player.angle > 0.0);
        assert!(player.pos.y < grid_to_pixel(GridPos::new(1, 3)).y);

        assert_eq!(run_until_finished(&mut player, &board), Some(AnimationKind::Death));
        assert_eq!(player.pos.y, -119.0);
        assert_eq!(player.mode, PlayerMode::Animating(AnimationKind::Death));
    }

    #[test]
    fn test_approach_never_overshoots() {
        assert_eq!(approach(0.0, 10.0, 4.0), 4.0);
        assert_eq!(approach(8.0, 10.0, 4.0), 10.0);
        assert_eq!(approach(10.0, 0.0, 4.0), 6.0);
        assert_eq!(approach(5.0, 5.0, 0.0), 5.0);
    }

    #[test]
    fn test_input_moves_one_cell_in_bounds() {
        let board = Board::default();
        let mut player = playable_at(GridPos::new(0, 0));
        player.handle_input(Move::Left, false);
        player.handle_input(Move::Up, false);
        player.update(DT, &board, &[]);
        assert_eq!(player.grid, GridPos::new(0, 0));

        player.handle_input(Move::Right, false);
        player.update(DT, &board, &[]);
        assert_eq!(player.grid, GridPos::new(1, 0));
        assert_eq!(player.pos, grid_to_pixel(GridPos::new(1, 0)));
    }

    #[test]
    fn test_input_ignored_while_animating() {
        let mut player = Player::new(GridPos::new(2, 0));
        player.handle_input(Move::Down, false);
        assert_eq!(player.target, GridPos::new(2, 0));
    }

    #[test]
    fn test_locked_goal_row_caps_down() {
        let board = Board::default();
        let mut player = playable_at(GridPos::new(2, PLAYER_WIN_ROW - 1));
        player.handle_input(Move::Down, true);
        player.update(DT, &board, &[]);
        assert_eq!(player.grid.row, PLAYER_WIN_ROW - 1);

        player.handle_input(Move::Down, false);
        player.update(DT, &board, &[]);
        assert_eq!(player.grid.row, PLAYER_WIN_ROW);
    }

    #[test]
    fn test_rock_cancels_move() {
        let mut board = Board::default();
        board.set(GridPos::new(1, 0), Cell::Rock);
        let mut player = playable_at(GridPos::new(2, 0));
        player.handle_input(Move::Left, false);
        player.update(DT, &board, &[]);
        assert_eq!(player.grid, GridPos::new(2, 0));
        assert_eq!(player.target, GridPos::new(2, 0));
    }

    #[test]
    fn test_riding_follows_platform_and_rederives_column() {
        let board = Board::default();
        let rows = [lily_row(1, Direction::Right, 101.0)];
        let mut player = playable_at(GridPos::new(0, 1));
        player.riding = Some(0);

        player.update(0.6, &board, &rows);
        assert!((player.pos.x - 60.6).abs() < 1e-3);
        assert_eq!(player.grid.col, 1);
        assert_eq!(player.target.col, 1);
    }

    #[test]
    fn test_riding_clamps_at_board_edge() {
        let board = Board::default();
        let rows = [lily_row(1, Direction::Left, 300.0)];
        let mut player = playable_at(GridPos::new(1, 1));
        player.riding = Some(0);
        player.update(1.0, &board, &rows);
        assert_eq!(player.pos.x, 0.0);
        assert_eq!(player.grid.col, 0);
    }

    #[test]
    fn test_input_cancels_riding() {
        let mut player = playable_at(GridPos::new(1, 1));
        player.riding = Some(0);
        player.handle_input(Move::Up, false);
        assert!(!player.is_riding());
    }

    proptest! {
        #[test]
        fn prop_rider_stays_on_board(
            start_col in 0..GRID_COLS,
            speed in 0.0f32..600.0,
            left in any::<bool>(),
            steps in prop::collection::vec(0.0f32..0.5, 1..60),
        ) {
            let board = Board::default();
            let dir = if left { Direction::Left } else { Direction::Right };
            let rows = [lily_row(1, dir, speed)];
            let mut player = playable_at(GridPos::new(start_col, 1));
            player.riding = Some(0);
            let max_x = (GRID_COLS - 1) as f32 * CELL_W;
            for dt in steps {
                player.update(dt, &board, &rows);
                prop_assert!(player.pos.x >= 0.0 && player.pos.x <= max_x);
                prop_assert_eq!(player.grid.col, pixel_to_grid_column(player.pos.x));
            }
        }
    }
}
