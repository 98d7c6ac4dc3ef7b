// Tic-Tac-Toe board and win tally

use thiserror::Error;

pub const SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Taken(Mark),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("cell ({row}, {col}) is off the board")]
    OutOfRange { row: usize, col: usize },
    #[error("cell ({row}, {col}) is already taken")]
    Occupied { row: usize, col: usize },
}

/// A 3x3 grid; every cell is its own value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; SIZE]; SIZE],
        }
    }

    /// Get the cell at a position, or None when off the board
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), MoveError> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(MoveError::OutOfRange { row, col })?;

        if *cell != Cell::Empty {
            return Err(MoveError::Occupied { row, col });
        }
        *cell = Cell::Taken(mark);
        Ok(())
    }

    /// The mark holding a full row, column or diagonal, if any
    pub fn winner(&self) -> Option<Mark> {
        let c = &self.cells;
        let mut lines: Vec<[Cell; SIZE]> = Vec::with_capacity(2 * SIZE + 2);
        for i in 0..SIZE {
            lines.push(c[i]);
            lines.push([c[0][i], c[1][i], c[2][i]]);
        }
        lines.push([c[0][0], c[1][1], c[2][2]]);
        lines.push([c[0][2], c[1][1], c[2][0]]);

        lines.into_iter().find_map(|line| match line[0] {
            Cell::Taken(mark) if line.iter().all(|&cell| cell == line[0]) => Some(mark),
            _ => None,
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .flatten()
            .all(|&cell| cell != Cell::Empty)
    }
}

/// Win tally across games; X counts as player one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicTacToeInformation {
    pub p1_win: u32,
    pub p2_win: u32,
}

impl TicTacToeInformation {
    /// Count a finished game; a draw (None) changes nothing
    pub fn record(&mut self, winner: Option<Mark>) {
        match winner {
            Some(Mark::X) => self.p1_win += 1,
            Some(Mark::O) => self.p2_win += 1,
            None => {}
        }
    }
}
