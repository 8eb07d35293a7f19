//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt` handed to `frame`
//! - Seeded RNG only
//! - Stable iteration order (enemy rows top to bottom)
//! - Drawing goes through the `Canvas` trait, never a platform API

pub mod board;
pub mod collision;
pub mod enemy;
pub mod hud;
pub mod level;
pub mod player;
pub mod star;
pub mod state;
pub mod tick;

pub use board::{Board, Cell, Lock};
pub use collision::{DeathCause, resolve_collisions, resolve_pickups};
pub use enemy::EnemyRow;
pub use hud::{FloatingIndicator, Lives, Score, StatusText};
pub use level::{
    Direction, EnemyRowSpec, LevelDescriptor, LevelError, PickupKind, PickupSpec, RowKind, Terrain,
    builtin_levels, load_levels,
};
pub use player::{AnimationKind, Move, Player, PlayerMode};
pub use star::Star;
pub use state::{GameEvent, GameState};
pub use tick::{TickInput, frame, reset_level, update};
