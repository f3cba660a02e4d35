use serde::{Deserialize, Serialize};

/// Single axis used for board rows, columns, and positions.
pub type Dim = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

pub const fn mult(a: Dim, b: Dim) -> CellCount {
    (a as CellCount) * (b as CellCount)
}

/// Grid address, valid iff `row < rows` and `col < cols`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: Dim,
    pub col: Dim,
}

impl Coord {
    pub const fn new(row: Dim, col: Dim) -> Self {
        Self { row, col }
    }

    pub(crate) const fn in_bounds(self, (rows, cols): (Dim, Dim)) -> bool {
        self.row < rows && self.col < cols
    }
}

impl From<(Dim, Dim)> for Coord {
    fn from((row, col): (Dim, Dim)) -> Self {
        Self { row, col }
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.row.into(), self.col.into()]
    }
}

impl ToNdIndex for (Dim, Dim) {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

const DISPLACEMENTS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord, delta: (i32, i32), bounds: (Dim, Dim)) -> Option<Coord> {
    let (dr, dc) = delta;
    let (rows, cols) = bounds;

    let row = coords.row.checked_add_signed(dr.try_into().ok()?)?;
    if row >= rows {
        return None;
    }

    let col = coords.col.checked_add_signed(dc.try_into().ok()?)?;
    if col >= cols {
        return None;
    }

    Some(Coord { row, col })
}

/// Iterates the up to 8 in-bounds neighbors of a cell.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord,
    bounds: (Dim, Dim),
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord, bounds: (Dim, Dim)) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
