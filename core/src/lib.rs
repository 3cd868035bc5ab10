#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use leaderboard::*;
pub use session::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod grid;
mod leaderboard;
mod session;
mod types;

/// Number of rows of the standard board.
pub const ROWS: Coord = 10;
/// Number of columns of the standard board.
pub const COLS: Coord = 10;
/// Number of mines on the standard board.
pub const BOMB_COUNT: CellCount = 15;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const DEFAULT: Self = Self::new_unchecked((ROWS, COLS), BOMB_COUNT);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(size, mines).validate()
    }

    /// At least one cell must stay free of mines, which also rules out empty boards.
    pub fn validate(self) -> Result<Self> {
        if self.mines >= self.total_cells() {
            log::warn!(
                "Rejected config: {} mines do not fit a {}x{} board",
                self.mines,
                self.size.0,
                self.size.1
            );
            Err(GameError::InvalidConfig)
        } else {
            Ok(self)
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Read-only once built: every constructor recounts the mines in the mask.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout with mines at exactly `mine_coords`, duplicates counted once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        array_size(&self.mine_mask)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    /// Every mine position in row-major order.
    pub fn mine_positions(&self) -> Vec<Coord2> {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The cell was already open, nothing changed.
    AlreadyRevealed,
    /// Newly revealed cells, the selected one first.
    Continue { revealed: Vec<Coord2> },
    /// A mine was hit; carries every mine position for disclosure.
    Lost { mines: Vec<Coord2> },
}

impl RevealOutcome {
    pub fn has_update(&self) -> bool {
        !matches!(self, Self::AlreadyRevealed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    /// Revealed cells cannot be flagged.
    Blocked,
    /// The cell's new state. The grid already applied `delta` to its own
    /// counter, it is reported for counters kept outside the grid.
    Toggled { state: CellState, delta: i8 },
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Blocked => false,
            Self::Toggled { .. } => true,
        }
    }
}
