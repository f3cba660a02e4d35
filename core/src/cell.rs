use serde::{Deserialize, Serialize};

/// A single tile of the board.
///
/// `revealed` and `flagged` are never both set; the board refuses to reveal a
/// flagged cell and to flag a revealed one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub has_mine: bool,
    /// Mined neighbors, only meaningful when `has_mine` is false.
    pub adjacent_mines: u8,
    pub revealed: bool,
    pub flagged: bool,
}

impl Cell {
    /// Whether a reveal may open this cell.
    pub const fn is_openable(self) -> bool {
        !self.revealed && !self.flagged
    }
}
