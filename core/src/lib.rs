#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// Rejects zero-sized boards and mine counts that leave no safe cell for
    /// the first reveal. Placement may assume any accepted configuration.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Result<Self> {
        if size_x == 0 || size_y == 0 || mines >= mult(size_x, size_y) {
            return Err(GameError::InvalidConfig {
                width: size_x,
                height: size_y,
                mines,
            });
        }
        Ok(Self {
            size: (size_x, size_y),
            mines,
        })
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Where the mines are. Fixed once placed; gameplay state lives in [`Board`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.mine_mask.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Number of mines among the up-to-8 in-bounds neighbors, 0..=8.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count()
            .try_into()
            .unwrap()
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize)]
    }
}

/// Result of a flag command.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FlagOutcome {
    /// The mark was added (`flagged`) or removed (`!flagged`).
    Toggled { flagged: bool },
    /// The target is an opened numbered cell; those cannot carry marks.
    RejectedNumberedCell,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Toggled { .. })
    }
}

/// Result of a reveal command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// The target was already open; nothing changed.
    AlreadyOpen,
    /// Every cell this command opened, in traversal order.
    Opened(Vec<Coord2>),
    /// Terminal loss. The exploded mine is not recorded as opened.
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::AlreadyOpen)
    }
}
