//! Static grid contents: rocks, pickups and the key

use super::level::{LevelDescriptor, PickupKind};
use crate::GridPos;
use crate::consts::*;

/// What a board cell holds. The player is never stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Blocks movement
    Rock,
    /// Collected on contact
    Pickup(PickupKind),
    /// Unlocks the goal row
    Key,
}

/// Row-major grid of static objects
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [[Cell; GRID_COLS as usize]; GRID_ROWS as usize],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: [[Cell::Empty; GRID_COLS as usize]; GRID_ROWS as usize],
        }
    }
}

impl Board {
    /// Populate a fresh board from a level descriptor
    pub fn from_level(level: &LevelDescriptor) -> Self {
        let mut board = Self::default();
        for rock in &level.rocks {
            board.set(*rock, Cell::Rock);
        }
        for pickup in &level.pickups {
            board.set(pickup.pos(), Cell::Pickup(pickup.kind));
        }
        if let Some(key) = level.key {
            board.set(key, Cell::Key);
        }
        board
    }

    /// Cell contents; off-board positions read as empty
    pub fn get(&self, pos: GridPos) -> Cell {
        if !pos.in_bounds() {
            return Cell::Empty;
        }
        self.cells[pos.row as usize][pos.col as usize]
    }

    pub fn set(&mut self, pos: GridPos, cell: Cell) {
        if pos.in_bounds() {
            self.cells[pos.row as usize][pos.col as usize] = cell;
        }
    }

    /// Remove and return the contents of a cell
    pub fn take(&mut self, pos: GridPos) -> Cell {
        let cell = self.get(pos);
        self.set(pos, Cell::Empty);
        cell
    }

    pub fn is_rock(&self, pos: GridPos) -> bool {
        self.get(pos) == Cell::Rock
    }
}

/// Goal-row lock for the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lock {
    pub locked: bool,
    pub key: Option<GridPos>,
}

impl Lock {
    pub fn from_level(level: &LevelDescriptor) -> Self {
        Self {
            locked: level.key.is_some(),
            key: level.key,
        }
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Consume the key if the player stands on it. Clears the board cell too.
    pub fn try_unlock(&mut self, at: GridPos, board: &mut Board) -> bool {
        match self.key {
            Some(key) if key == at => {
                board.set(key, Cell::Empty);
                self.key = None;
                self.locked = false;
                true
            }
            _ => false,
        }
    }
}
