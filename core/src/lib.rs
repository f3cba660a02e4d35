#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use preset::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod preset;
mod types;

/// Board parameters, immutable once handed to [`Board::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub rows: Dim,
    pub cols: Dim,
    pub mine_count: CellCount,
    pub seed: i64,
}

impl Config {
    pub const fn new(rows: Dim, cols: Dim, mine_count: CellCount, seed: i64) -> Self {
        Self {
            rows,
            cols,
            mine_count,
            seed,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(BoardError::InvalidDimensions);
        }
        if self.mine_count > self.total_cells() {
            return Err(BoardError::InvalidMineCount);
        }
        Ok(())
    }

    pub const fn size(&self) -> (Dim, Dim) {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mine_count)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LayoutSnapshot")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

/// Untrusted wire form of [`MineLayout`].
#[derive(Deserialize)]
struct LayoutSnapshot {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl TryFrom<LayoutSnapshot> for MineLayout {
    type Error = BoardError;

    fn try_from(snapshot: LayoutSnapshot) -> Result<Self> {
        let layout = Self::from_mine_mask(snapshot.mine_mask)?;
        if layout.mine_count != snapshot.mine_count {
            return Err(BoardError::InvalidMineCount);
        }
        Ok(layout)
    }
}

/// Rejects grids with an empty axis or an axis that does not fit in [`Dim`].
pub(crate) fn validate_shape((rows, cols): (usize, usize)) -> Result<(Dim, Dim)> {
    if rows == 0 || cols == 0 {
        return Err(BoardError::InvalidDimensions);
    }
    let rows = Dim::try_from(rows).map_err(|_| BoardError::InvalidDimensions)?;
    let cols = Dim::try_from(cols).map_err(|_| BoardError::InvalidDimensions)?;
    Ok((rows, cols))
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        validate_shape(mine_mask.dim())?;
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    pub fn from_mine_coords(size: (Dim, Dim), mine_coords: &[Coord]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(BoardError::InvalidDimensions);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if !coords.in_bounds(size) {
                return Err(BoardError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn size(&self) -> (Dim, Dim) {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Dim, cols as Dim)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    /// Mined coordinates in row-major order.
    pub fn iter_mines(&self) -> impl Iterator<Item = Coord> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| Coord::new(row as Dim, col as Dim))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }
}

impl Index<Coord> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Summary of a single reveal call, never stored on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealResult {
    /// Cells opened by this call, in traversal order.
    pub revealed: Vec<Coord>,
    pub hit_mine: bool,
    pub status: Status,
}

impl RevealResult {
    pub(crate) const fn unchanged(status: Status) -> Self {
        Self {
            revealed: Vec::new(),
            hit_mine: false,
            status,
        }
    }

    /// Whether this call mutated the board
    pub fn has_update(&self) -> bool {
        !self.revealed.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation() {
        assert_eq!(Config::new(4, 4, 4, 0).validate(), Ok(()));
        assert_eq!(Config::new(4, 4, 16, 0).validate(), Ok(()));
        assert_eq!(Config::new(4, 4, 0, 0).validate(), Ok(()));
        assert_eq!(
            Config::new(0, 4, 0, 0).validate(),
            Err(BoardError::InvalidDimensions)
        );
        assert_eq!(
            Config::new(4, 0, 0, 0).validate(),
            Err(BoardError::InvalidDimensions)
        );
        assert_eq!(
            Config::new(4, 4, 17, 0).validate(),
            Err(BoardError::InvalidMineCount)
        );
    }

    #[test]
    fn largest_board_does_not_overflow() {
        let config = Config::new(Dim::MAX, Dim::MAX, 0, 0);

        assert_eq!(config.total_cells(), 65535 * 65535);
    }

    #[test]
    fn layout_rejects_out_of_bounds_mines() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 3), &[Coord::new(1, 3)]),
            Err(BoardError::OutOfBounds)
        );
    }

    #[test]
    fn layout_rejects_empty_or_oversized_masks() {
        assert_eq!(
            MineLayout::from_mine_mask(Array2::default((0, 4))),
            Err(BoardError::InvalidDimensions)
        );
        assert_eq!(
            MineLayout::from_mine_mask(Array2::default((3, 0))),
            Err(BoardError::InvalidDimensions)
        );
        assert_eq!(
            MineLayout::from_mine_mask(Array2::default((1, Dim::MAX as usize + 1))),
            Err(BoardError::InvalidDimensions)
        );
        assert_eq!(
            MineLayout::from_mine_coords((0, 3), &[]),
            Err(BoardError::InvalidDimensions)
        );
    }

    #[test]
    fn layout_snapshot_must_match_mask() {
        let layout = MineLayout::from_mine_coords((2, 2), &[Coord::new(1, 0)]).unwrap();
        let mut value = serde_json::to_value(&layout).unwrap();

        let restored: MineLayout = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(restored, layout);

        value["mine_count"] = 3.into();
        assert!(serde_json::from_value::<MineLayout>(value).is_err());
    }

    #[test]
    fn layout_counts_neighbors() {
        let mines = [Coord::new(0, 0), Coord::new(0, 2), Coord::new(2, 1)];
        let layout = MineLayout::from_mine_coords((3, 3), &mines).unwrap();

        assert_eq!(layout.mine_count(), 3);
        assert_eq!(layout.safe_cell_count(), 6);
        assert_eq!(layout.adjacent_mine_count(Coord::new(1, 1)), 3);
        assert_eq!(layout.adjacent_mine_count(Coord::new(2, 2)), 1);
        assert_eq!(layout.adjacent_mine_count(Coord::new(0, 1)), 2);
    }
}
