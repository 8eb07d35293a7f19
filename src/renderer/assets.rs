//! Sprite identifiers and the asset lookup
//!
//! Every sprite is a 101x171 tile image; only part of it is visible. The
//! GPU backend has no image decoder, so each sprite is drawn as a tinted
//! quad covering its visible box.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical sprite keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteId {
    Grass,
    Stone,
    Water,
    Flag,
    FlagLocked,
    Rock,
    Heart,
    Key,
    GemBlue,
    GemGreen,
    GemOrange,
    Star,
    Bug,
    Lilypad,
    Player,
}

impl SpriteId {
    pub const ALL: [SpriteId; 15] = [
        SpriteId::Grass,
        SpriteId::Stone,
        SpriteId::Water,
        SpriteId::Flag,
        SpriteId::FlagLocked,
        SpriteId::Rock,
        SpriteId::Heart,
        SpriteId::Key,
        SpriteId::GemBlue,
        SpriteId::GemGreen,
        SpriteId::GemOrange,
        SpriteId::Star,
        SpriteId::Bug,
        SpriteId::Lilypad,
        SpriteId::Player,
    ];

    /// Image path used by asset loaders
    pub fn path(&self) -> &'static str {
        match self {
            SpriteId::Grass => "images/grass-block.png",
            SpriteId::Stone => "images/stone-block.png",
            SpriteId::Water => "images/water-block.png",
            SpriteId::Flag => "images/flag-block.png",
            SpriteId::FlagLocked => "images/flag-block-locked.png",
            SpriteId::Rock => "images/Rock.png",
            SpriteId::Heart => "images/Heart.png",
            SpriteId::Key => "images/Key.png",
            SpriteId::GemBlue => "images/Gem Blue.png",
            SpriteId::GemGreen => "images/Gem Green.png",
            SpriteId::GemOrange => "images/Gem Orange.png",
            SpriteId::Star => "images/Star.png",
            SpriteId::Bug => "images/enemy-bug.png",
            SpriteId::Lilypad => "images/lilypad.png",
            SpriteId::Player => "images/char-boy.png",
        }
    }
}

/// Drawable description of one sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteInfo {
    /// Full image size
    pub size: Vec2,
    /// Visible box, sprite-local
    pub visible_min: Vec2,
    pub visible_size: Vec2,
    pub tint: [f32; 4],
}

impl SpriteInfo {
    const fn new(visible: [f32; 4], tint: [f32; 4]) -> Self {
        Self {
            size: Vec2::new(101.0, 171.0),
            visible_min: Vec2::new(visible[0], visible[1]),
            visible_size: Vec2::new(visible[2], visible[3]),
            tint,
        }
    }
}

/// Sprite id -> drawable lookup. Must be complete before the game starts.
#[derive(Debug, Clone, Default)]
pub struct SpriteSheet {
    sprites: HashMap<SpriteId, SpriteInfo>,
}

impl SpriteSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheet with every sprite registered using the built-in tints
    pub fn builtin() -> Self {
        let mut sheet = Self::new();
        for id in SpriteId::ALL {
            sheet.insert(id, builtin_info(id));
        }
        sheet
    }

    pub fn insert(&mut self, id: SpriteId, info: SpriteInfo) {
        self.sprites.insert(id, info);
    }

    pub fn get(&self, id: SpriteId) -> Option<&SpriteInfo> {
        self.sprites.get(&id)
    }

    /// Sprites not loaded yet
    pub fn missing(&self) -> Vec<SpriteId> {
        SpriteId::ALL
            .into_iter()
            .filter(|id| !self.sprites.contains_key(id))
            .collect()
    }

    pub fn is_ready(&self) -> bool {
        self.missing().is_empty()
    }
}

fn builtin_info(id: SpriteId) -> SpriteInfo {
    // Terrain tiles show their top face plus the front edge
    const TILE: [f32; 4] = [0.0, 50.0, 101.0, 121.0];
    match id {
        SpriteId::Grass => SpriteInfo::new(TILE, [0.30, 0.65, 0.25, 1.0]),
        SpriteId::Stone => SpriteInfo::new(TILE, [0.55, 0.55, 0.58, 1.0]),
        SpriteId::Water => SpriteInfo::new(TILE, [0.20, 0.45, 0.85, 1.0]),
        SpriteId::Flag => SpriteInfo::new(TILE, [0.85, 0.80, 0.35, 1.0]),
        SpriteId::FlagLocked => SpriteInfo::new(TILE, [0.45, 0.20, 0.20, 1.0]),
        SpriteId::Rock => SpriteInfo::new([8.0, 66.0, 85.0, 90.0], [0.35, 0.30, 0.28, 1.0]),
        SpriteId::Heart => SpriteInfo::new([20.0, 80.0, 61.0, 60.0], [0.90, 0.15, 0.20, 1.0]),
        SpriteId::Key => SpriteInfo::new([30.0, 60.0, 41.0, 80.0], [0.95, 0.80, 0.20, 1.0]),
        SpriteId::GemBlue => SpriteInfo::new([25.0, 70.0, 51.0, 60.0], [0.20, 0.40, 1.00, 1.0]),
        SpriteId::GemGreen => SpriteInfo::new([25.0, 70.0, 51.0, 60.0], [0.20, 0.85, 0.35, 1.0]),
        SpriteId::GemOrange => SpriteInfo::new([25.0, 70.0, 51.0, 60.0], [1.00, 0.55, 0.10, 1.0]),
        SpriteId::Star => SpriteInfo::new([15.0, 70.0, 71.0, 70.0], [1.00, 0.95, 0.40, 1.0]),
        SpriteId::Bug => SpriteInfo::new([2.0, 77.0, 97.0, 66.0], [0.75, 0.10, 0.10, 1.0]),
        SpriteId::Lilypad => SpriteInfo::new([2.0, 77.0, 97.0, 66.0], [0.25, 0.75, 0.30, 1.0]),
        SpriteId::Player => SpriteInfo::new([17.0, 63.0, 67.0, 76.0], [0.95, 0.85, 0.70, 1.0]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sheet_is_complete() {
        let sheet = SpriteSheet::builtin();
        assert!(sheet.is_ready());
        assert!(sheet.get(SpriteId::Lilypad).is_some());
    }

    #[test]
    fn test_missing_lists_unloaded_sprites() {
        let mut sheet = SpriteSheet::new();
        assert_eq!(sheet.missing().len(), SpriteId::ALL.len());
        sheet.insert(SpriteId::Bug, builtin_info(SpriteId::Bug));
        assert!(!sheet.missing().contains(&SpriteId::Bug));
        assert!(!sheet.is_ready());
    }

    #[test]
    fn test_sprite_ids_deserialize_from_snake_case() {
        let id: SpriteId = serde_json::from_str("\"flag_locked\"").unwrap();
        assert_eq!(id, SpriteId::FlagLocked);
    }
}
