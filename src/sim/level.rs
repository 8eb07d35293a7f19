//! Level descriptors
//!
//! Levels are authored as JSON. Grid coordinates are zero based from the
//! top left; the bottom row is normally the flag row the player must reach.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::GridPos;
use crate::consts::*;
use crate::renderer::SpriteId;

/// Built-in level table
const BUILTIN_LEVELS: &str = include_str!("levels.json");

/// Terrain for a whole board row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Grass,
    Stone,
    Water,
    Flag,
}

impl Terrain {
    /// Standing on this terrain without a platform drowns the player
    pub fn is_water(&self) -> bool {
        matches!(self, Terrain::Water)
    }

    pub fn sprite(&self) -> SpriteId {
        match self {
            Terrain::Grass => SpriteId::Grass,
            Terrain::Stone => SpriteId::Stone,
            Terrain::Water => SpriteId::Water,
            Terrain::Flag => SpriteId::Flag,
        }
    }
}

/// Horizontal travel direction of an enemy row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// How the player reacts to touching a row element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Touching it kills the player
    Hazard,
    /// Touching it carries the player along
    Platform,
}

/// One enemy/platform row of a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyRowSpec {
    pub sprite: SpriteId,
    pub kind: RowKind,
    pub dir: Direction,
    /// Pixels per second
    pub speed: f32,
    /// Starting columns of each sprite in the row
    pub pattern: Vec<i32>,
}

/// Collectible kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupKind {
    /// Extra life
    Heart,
    GemBlue,
    GemGreen,
    GemOrange,
}

impl PickupKind {
    /// Score granted on collection (hearts grant a life instead)
    pub fn score(&self) -> Option<u32> {
        match self {
            PickupKind::Heart => None,
            PickupKind::GemBlue => Some(BLUE_SCORE),
            PickupKind::GemGreen => Some(GREEN_SCORE),
            PickupKind::GemOrange => Some(ORANGE_SCORE),
        }
    }

    pub fn sprite(&self) -> SpriteId {
        match self {
            PickupKind::Heart => SpriteId::Heart,
            PickupKind::GemBlue => SpriteId::GemBlue,
            PickupKind::GemGreen => SpriteId::GemGreen,
            PickupKind::GemOrange => SpriteId::GemOrange,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupSpec {
    pub kind: PickupKind,
    pub col: i32,
    pub row: i32,
}

impl PickupSpec {
    pub fn pos(&self) -> GridPos {
        GridPos::new(self.col, self.row)
    }
}

fn default_start() -> GridPos {
    GridPos::new(2, 0)
}

/// Static description of a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// Terrain per row, top to bottom
    pub rows: [Terrain; GRID_ROWS as usize],
    /// Rows `ENEMY_ROW_OFFSET..` in order; `None` leaves the row empty
    pub enemies: [Option<EnemyRowSpec>; NUM_ENEMY_ROWS],
    #[serde(default)]
    pub rocks: Vec<GridPos>,
    #[serde(default)]
    pub pickups: Vec<PickupSpec>,
    /// Key location; a level with a key starts locked
    #[serde(default)]
    pub key: Option<GridPos>,
    #[serde(default = "default_start")]
    pub start: GridPos,
}

impl LevelDescriptor {
    pub fn terrain(&self, row: i32) -> Option<Terrain> {
        usize::try_from(row).ok().and_then(|r| self.rows.get(r)).copied()
    }

    /// Check authoring rules that would otherwise produce a broken level
    pub fn validate(&self, index: usize) -> Result<(), LevelError> {
        let mut occupied: Vec<GridPos> = Vec::new();
        let mut place = |pos: GridPos| -> Result<(), LevelError> {
            if !pos.in_bounds() {
                return Err(LevelError::OutOfBounds { level: index, pos });
            }
            if occupied.contains(&pos) {
                return Err(LevelError::CellTaken { level: index, pos });
            }
            occupied.push(pos);
            Ok(())
        };

        for rock in &self.rocks {
            place(*rock)?;
        }
        for pickup in &self.pickups {
            place(pickup.pos())?;
        }
        if let Some(key) = self.key {
            place(key)?;
        }

        if !self.start.in_bounds() {
            return Err(LevelError::OutOfBounds {
                level: index,
                pos: self.start,
            });
        }
        if self.rocks.contains(&self.start) {
            return Err(LevelError::StartBlocked { level: index });
        }

        for (slot, spec) in self.enemies.iter().enumerate() {
            let Some(spec) = spec else { continue };
            if !(spec.speed.is_finite() && spec.speed >= 0.0) {
                return Err(LevelError::BadSpeed {
                    level: index,
                    row: slot as i32 + ENEMY_ROW_OFFSET,
                });
            }
            if let Some(&col) = spec.pattern.iter().find(|&&col| !(0..GRID_COLS).contains(&col)) {
                return Err(LevelError::BadPattern {
                    level: index,
                    row: slot as i32 + ENEMY_ROW_OFFSET,
                    col,
                });
            }
        }
        Ok(())
    }
}

/// Level table loading errors
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level table is empty")]
    Empty,
    #[error("level {level}: cell ({}, {}) is off the board", .pos.col, .pos.row)]
    OutOfBounds { level: usize, pos: GridPos },
    #[error("level {level}: cell ({}, {}) holds more than one object", .pos.col, .pos.row)]
    CellTaken { level: usize, pos: GridPos },
    #[error("level {level}: start cell is covered by a rock")]
    StartBlocked { level: usize },
    #[error("level {level}: row {row} has an invalid speed")]
    BadSpeed { level: usize, row: i32 },
    #[error("level {level}: row {row} starts a sprite in column {col}, off the board")]
    BadPattern { level: usize, row: i32, col: i32 },
}

/// Parse and validate a level table
pub fn load_levels(json: &str) -> Result<Vec<LevelDescriptor>, LevelError> {
    let levels: Vec<LevelDescriptor> = serde_json::from_str(json)?;
    if levels.is_empty() {
        return Err(LevelError::Empty);
    }
    for (index, level) in levels.iter().enumerate() {
        level.validate(index)?;
    }
    log::debug!("Loaded {} levels", levels.len());
    Ok(levels)
}

/// The levels shipped with the game
pub fn builtin_levels() -> Result<Vec<LevelDescriptor>, LevelError> {
    load_levels(BUILTIN_LEVELS)
}
