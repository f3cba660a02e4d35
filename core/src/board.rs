use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Initial state, moves are accepted
    #[default]
    Active,
    /// Every safe cell has been revealed
    Won,
    /// A mine was revealed
    Lost,
}

impl Status {
    /// Indicates the game has ended and no reveal can change the board anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Playfield for one round, mutated in place until the status is terminal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: Status,
    triggered_mine: Option<Coord>,
}

/// Untrusted wire form of [`Board`], checked before it becomes playable.
#[derive(Deserialize)]
struct BoardSnapshot {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: Status,
    triggered_mine: Option<Coord>,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = BoardError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self> {
        let board = Self {
            cells: snapshot.cells,
            mine_count: snapshot.mine_count,
            revealed_count: snapshot.revealed_count,
            flagged_count: snapshot.flagged_count,
            status: snapshot.status,
            triggered_mine: snapshot.triggered_mine,
        };
        board.validate()?;
        Ok(board)
    }
}

impl Board {
    /// Validates `config` and places its mines with a PRNG seeded from `config.seed`.
    pub fn new(config: Config) -> Result<Self> {
        log::debug!("Generating board from seed {}", config.seed);
        Self::with_source(config, SeededSource::new(config.seed))
    }

    /// Same as [`Board::new`] but draws placement randomness from `source`.
    pub fn with_source(config: Config, source: impl UniformSource) -> Result<Self> {
        let layout = ShuffleGenerator::new(source).generate(&config)?;
        Ok(Self::from_layout(layout))
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        let size = layout.size();
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            let coords = Coord::new(row as Dim, col as Dim);
            let has_mine = layout.contains_mine(coords);
            Cell {
                has_mine,
                adjacent_mines: if has_mine {
                    0
                } else {
                    layout.adjacent_mine_count(coords)
                },
                revealed: false,
                flagged: false,
            }
        });

        if layout.safe_cell_count() == 0 {
            log::warn!(
                "Board {}x{} has no safe cells and can never be won",
                size.0,
                size.1
            );
        }

        Self {
            cells,
            mine_count: layout.mine_count(),
            revealed_count: 0,
            flagged_count: 0,
            status: Status::Active,
            triggered_mine: None,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn size(&self) -> (Dim, Dim) {
        let (rows, cols) = self.cells.dim();
        (rows as Dim, cols as Dim)
    }

    pub fn rows(&self) -> Dim {
        self.size().0
    }

    pub fn cols(&self) -> Dim {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.cells.len() as CellCount - self.mine_count
    }

    /// Safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> i64 {
        i64::from(self.mine_count) - i64::from(self.flagged_count)
    }

    /// The mine that ended a lost game.
    pub fn triggered_mine(&self) -> Option<Coord> {
        self.triggered_mine
    }

    pub fn cell(&self, coords: Coord) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| (Coord::new(row as Dim, col as Dim), cell))
    }

    pub fn reveal(&mut self, coords: Coord) -> Result<RevealResult> {
        let coords = self.validate_coords(coords)?;

        if self.status.is_finished() {
            return Ok(RevealResult::unchanged(self.status));
        }

        let cell = self.cells[coords.to_nd_index()];
        if !cell.is_openable() {
            return Ok(RevealResult::unchanged(self.status));
        }

        if cell.has_mine {
            self.cells[coords.to_nd_index()].revealed = true;
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return Ok(RevealResult {
                revealed: vec![coords],
                hit_mine: true,
                status: self.status,
            });
        }

        let revealed = self.flood_reveal(coords);
        log::trace!("Reveal at {:?} opened {} cells", coords, revealed.len());

        if self.revealed_count == self.safe_cell_count() {
            self.end_game(true);
        }

        Ok(RevealResult {
            revealed,
            hit_mine: false,
            status: self.status,
        })
    }

    /// Flag or unflag a hidden cell, finished games and revealed cells are left as is
    pub fn toggle_flag(&mut self, coords: Coord) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.validate_coords(coords)?;

        if self.status.is_finished() {
            return Ok(NoChange);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.revealed {
            return Ok(NoChange);
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        Ok(Changed)
    }

    /// Opens `start` and keeps opening through zero cells, stopping at numbered borders.
    fn flood_reveal(&mut self, start: Coord) -> Vec<Coord> {
        let mut revealed = Vec::new();
        let mut to_visit = vec![start];

        while let Some(visit_coords) = to_visit.pop() {
            let cell = self.cells[visit_coords.to_nd_index()];
            // same cell can be queued from several zero neighbors
            if !cell.is_openable() || cell.has_mine {
                continue;
            }

            self.cells[visit_coords.to_nd_index()].revealed = true;
            self.revealed_count += 1;
            revealed.push(visit_coords);

            if cell.adjacent_mines == 0 {
                let cells = &self.cells;
                to_visit.extend(
                    NeighborIter::new(visit_coords, self.size()).filter(|&pos| {
                        let neighbor = cells[pos.to_nd_index()];
                        neighbor.is_openable() && !neighbor.has_mine
                    }),
                );
            }
        }

        revealed
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        self.status = if won { Status::Won } else { Status::Lost };
        log::debug!(
            "Game ended with {:?} after {} of {} safe cells",
            self.status,
            self.revealed_count,
            self.safe_cell_count()
        );
    }

    /// Checks every invariant a freshly generated board upholds and play preserves.
    fn validate(&self) -> Result<()> {
        use BoardError::*;

        let size = validate_shape(self.cells.dim())?;

        let mut mines = 0;
        let mut revealed_safe = 0;
        let mut flagged = 0;
        let mut revealed_mines = Vec::new();
        for (coords, cell) in self.iter() {
            if cell.revealed && cell.flagged {
                return Err(InvalidBoardState);
            }
            if cell.flagged {
                flagged += 1;
            }
            if cell.has_mine {
                mines += 1;
                if cell.revealed {
                    revealed_mines.push(coords);
                }
                continue;
            }
            if cell.revealed {
                revealed_safe += 1;
            }
            let adjacent = NeighborIter::new(coords, size)
                .filter(|&pos| self[pos].has_mine)
                .count();
            if usize::from(cell.adjacent_mines) != adjacent {
                return Err(InvalidBoardState);
            }
        }

        if mines != self.mine_count {
            return Err(InvalidMineCount);
        }
        if revealed_safe != self.revealed_count || flagged != self.flagged_count {
            return Err(InvalidBoardState);
        }

        let safe = self.safe_cell_count();
        let consistent = match self.status {
            Status::Active => {
                revealed_mines.is_empty()
                    && self.triggered_mine.is_none()
                    && (safe == 0 || revealed_safe < safe)
            }
            Status::Won => {
                revealed_mines.is_empty()
                    && self.triggered_mine.is_none()
                    && safe > 0
                    && revealed_safe == safe
            }
            Status::Lost => {
                revealed_mines.len() == 1 && self.triggered_mine == Some(revealed_mines[0])
            }
        };
        if consistent {
            Ok(())
        } else {
            Err(InvalidBoardState)
        }
    }

    fn validate_coords(&self, coords: Coord) -> Result<Coord> {
        if coords.in_bounds(self.size()) {
            Ok(coords)
        } else {
            Err(BoardError::OutOfBounds)
        }
    }
}

impl Index<Coord> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
