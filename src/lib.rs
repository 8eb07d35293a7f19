//! Jump - a grid crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, enemy rows, HUD counters, level lifecycle)
//! - `renderer`: Draw sink, scene pass and WebGPU backend
//! - `platform`: Frame clock and key mapping
//! - `settings`: Runtime configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Board size in cells
    pub const GRID_COLS: i32 = 5;
    pub const GRID_ROWS: i32 = 6;

    /// Cell size in pixels
    pub const CELL_W: f32 = 101.0;
    pub const CELL_H: f32 = 83.0;

    /// Canvas size in pixels
    pub const CANVAS_WIDTH: f32 = 505.0;
    pub const CANVAS_HEIGHT: f32 = 606.0;

    /// Distance after which an enemy row offset wraps back to zero.
    /// One pixel short of the board width so the seam never shows a gap.
    pub const BOARD_WRAP_WIDTH: f32 = GRID_COLS as f32 * CELL_W - 1.0;

    /// Row the player has to reach to finish a level
    pub const PLAYER_WIN_ROW: i32 = 5;
    /// First grid row driven by the level's enemy table
    pub const ENEMY_ROW_OFFSET: i32 = 1;
    /// Enemy table slots per level
    pub const NUM_ENEMY_ROWS: usize = 4;

    /// Visible part of the player sprite (sprite-local pixels)
    pub const PLAYER_X_OFFSET: f32 = 17.0;
    pub const PLAYER_Y_OFFSET: f32 = 63.0;
    pub const PLAYER_WIDTH: f32 = 67.0;
    pub const PLAYER_HEIGHT: f32 = 76.0;

    /// Visible part of an enemy/platform sprite (sprite-local pixels)
    pub const ENEMY_X_OFFSET: f32 = 2.0;
    pub const ENEMY_Y_OFFSET: f32 = 77.0;
    pub const ENEMY_WIDTH: f32 = 97.0;
    pub const ENEMY_HEIGHT: f32 = 66.0;

    pub const START_LIVES: u32 = 5;

    /// Score awards
    pub const BLUE_SCORE: u32 = 5;
    pub const GREEN_SCORE: u32 = 10;
    pub const ORANGE_SCORE: u32 = 20;
    pub const WIN_SCORE: u32 = 50;
    pub const STAR_SCORE: u32 = 150;

    /// Seconds between displayed score increments
    pub const SCORE_DELAY: f32 = 0.05;
    /// Floating "+n" indicators
    pub const INDICATOR_LIFE: f32 = 1.0;
    pub const INDICATOR_RISE_SPEED: f32 = 40.0;

    /// Status banner timing
    pub const LEVEL_TEXT_TIME: f32 = 1.5;
    pub const TEXT_FADE_DELAY: f32 = 0.005;
    pub const TEXT_ALPHA_FADE_AMOUNT: f32 = 0.01;

    /// Star time budget (seconds)
    pub const STAR_BASE_TIME: f32 = 10.0;
    pub const STAR_LEVEL_DEDUCTION: f32 = 1.0;
    pub const STAR_MIN_TIME: f32 = 3.0;
    pub const STAR_FADE_TIME: f32 = 3.0;

    /// Longest frame delta the simulation accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Sprite pivots: enemies mirror around their horizontal middle,
    /// the player spins around its body centre
    pub const SPRITE_HALF_WIDTH: f32 = 50.0;
    pub const PLAYER_Y_CENTRE: f32 = 91.0;

    /// HUD text anchors (canvas pixels, text baseline)
    pub const SCORE_TEXT_POS: (f32, f32) = (0.0, 35.0);
    pub const LIVES_TEXT_POS: (f32, f32) = (380.0, 35.0);
    pub const STATUS_TEXT_POS: (f32, f32) = (252.0, 303.0);
}

use consts::*;

/// Discrete board coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct GridPos {
    pub col: i32,
    pub row: i32,
}

impl GridPos {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Whether the position lies on the board
    pub fn in_bounds(&self) -> bool {
        (0..GRID_COLS).contains(&self.col) && (0..GRID_ROWS).contains(&self.row)
    }
}

/// Convert a grid cell to the pixel position of its top-left corner
#[inline]
pub fn grid_to_pixel(pos: GridPos) -> Vec2 {
    Vec2::new(pos.col as f32 * CELL_W, pos.row as f32 * CELL_H)
}

/// Nearest grid column for a pixel x coordinate
#[inline]
pub fn pixel_to_grid_column(x: f32) -> i32 {
    (x / CELL_W).round() as i32
}

/// Axis-aligned overlap test on box centers and full sizes
#[inline]
pub fn boxes_overlap(a_center: Vec2, a_size: Vec2, b_center: Vec2, b_size: Vec2) -> bool {
    (a_center.x - b_center.x).abs() * 2.0 < a_size.x + b_size.x
        && (a_center.y - b_center.y).abs() * 2.0 < a_size.y + b_size.y
}

/// A collision rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Hitbox {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    pub fn overlaps(&self, other: &Hitbox) -> bool {
        boxes_overlap(self.center(), self.size, other.center(), other.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grid_to_pixel() {
        assert_eq!(grid_to_pixel(GridPos::new(0, 0)), Vec2::ZERO);
        assert_eq!(grid_to_pixel(GridPos::new(2, 3)), Vec2::new(202.0, 249.0));
    }

    #[test]
    fn test_pixel_to_grid_column_rounds() {
        assert_eq!(pixel_to_grid_column(0.0), 0);
        assert_eq!(pixel_to_grid_column(50.0), 0);
        assert_eq!(pixel_to_grid_column(51.0), 1);
        assert_eq!(pixel_to_grid_column(404.0), 4);
    }

    #[test]
    fn test_boxes_overlap_touching_edges_do_not_overlap() {
        let size = Vec2::new(10.0, 10.0);
        assert!(boxes_overlap(Vec2::ZERO, size, Vec2::new(9.9, 0.0), size));
        assert!(!boxes_overlap(Vec2::ZERO, size, Vec2::new(10.0, 0.0), size));
        assert!(!boxes_overlap(Vec2::ZERO, size, Vec2::new(0.0, 10.0), size));
    }

    #[test]
    fn test_hitbox_overlap_uses_centers() {
        let wide = Hitbox::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 10.0));
        let small = Hitbox::new(Vec2::new(90.0, 5.0), Vec2::new(5.0, 5.0));
        assert!(wide.overlaps(&small));
        let outside = Hitbox::new(Vec2::new(101.0, 0.0), Vec2::new(5.0, 5.0));
        assert!(!wide.overlaps(&outside));
    }

    #[test]
    fn test_in_bounds() {
        assert!(GridPos::new(4, 5).in_bounds());
        assert!(!GridPos::new(5, 0).in_bounds());
        assert!(!GridPos::new(0, -1).in_bounds());
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 0.0f32..200.0, ah in 0.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 0.0f32..200.0, bh in 0.0f32..200.0,
        ) {
            let a = (Vec2::new(ax, ay), Vec2::new(aw, ah));
            let b = (Vec2::new(bx, by), Vec2::new(bw, bh));
            prop_assert_eq!(boxes_overlap(a.0, a.1, b.0, b.1), boxes_overlap(b.0, b.1, a.0, a.1));
        }
    }
}
