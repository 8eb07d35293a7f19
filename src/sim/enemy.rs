//! Enemy and platform rows
//!
//! A row is a rigid band of sprites sharing one scrolling offset. Hazard
//! and platform rows move identically; only the player cares which is which.

use glam::Vec2;

use super::level::{Direction, EnemyRowSpec, RowKind};
use crate::consts::*;
use crate::renderer::SpriteId;
use crate::{GridPos, Hitbox, grid_to_pixel};

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyRow {
    /// Grid row the band occupies
    pub row: i32,
    pub dir: Direction,
    /// Pixels per second
    pub speed: f32,
    /// Starting column of each sprite
    pub pattern: Vec<i32>,
    pub kind: RowKind,
    pub sprite: SpriteId,
    /// Shared scroll offset, kept in `[0, BOARD_WRAP_WIDTH)`
    pub offset: f32,
}

impl EnemyRow {
    pub fn new(row: i32, spec: &EnemyRowSpec) -> Self {
        Self {
            row,
            dir: spec.dir,
            speed: spec.speed,
            pattern: spec.pattern.clone(),
            kind: spec.kind,
            sprite: spec.sprite,
            offset: 0.0,
        }
    }

    /// Signed horizontal travel for a frame
    #[inline]
    pub fn delta(&self, dt: f32) -> f32 {
        dt * self.speed * self.dir.sign()
    }

    pub fn update(&mut self, dt: f32) {
        let offset = (self.offset + self.delta(dt)).rem_euclid(BOARD_WRAP_WIDTH);
        // rem_euclid can round up to the modulus for tiny negative inputs
        self.offset = if offset >= BOARD_WRAP_WIDTH { 0.0 } else { offset };
    }

    /// Sprite x positions: each pattern slot and its copy one wrap width to the left
    pub fn sprite_positions(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.pattern.iter().map(move |&col| {
            let x = grid_to_pixel(GridPos::new(col, self.row)).x + self.offset;
            (x, x - BOARD_WRAP_WIDTH)
        })
    }

    /// Collision box of a sprite drawn at pixel x
    pub fn hitbox_at(&self, x: f32) -> Hitbox {
        let y = self.row as f32 * CELL_H;
        Hitbox::new(
            Vec2::new(x + ENEMY_X_OFFSET, y + ENEMY_Y_OFFSET),
            Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
        )
    }

    /// Whether any sprite of the row, including one straddling the wrap seam, touches `hitbox`
    pub fn has_overlap(&self, hitbox: &Hitbox) -> bool {
        self.sprite_positions().any(|(primary, wrapped)| {
            self.hitbox_at(primary).overlaps(hitbox) || self.hitbox_at(wrapped).overlaps(hitbox)
        })
    }

    #[inline]
    pub fn is_platform(&self) -> bool {
        self.kind == RowKind::Platform
    }
}

/// Build the rows of a level. Empty descriptor slots produce no row.
pub fn build_rows(specs: &[Option<EnemyRowSpec>]) -> Vec<EnemyRow> {
    specs
        .iter()
        .enumerate()
        .filter_map(|(slot, spec)| {
            spec.as_ref()
                .map(|spec| EnemyRow::new(slot as i32 + ENEMY_ROW_OFFSET, spec))
        })
        .collect()
}
