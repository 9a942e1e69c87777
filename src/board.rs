use crate::error::BoardError::{InvalidDimensions, Occupied, OutOfBounds};
use crate::error::{BoardError, PlaceError};
use crate::hash::ZobristKeys;
use crate::pieces::{Color, Piece};
use crate::position::{Position, Positions};
use std::fmt::{Debug, Display, Formatter};

/// A rectangular grid of cells, each holding at most one piece. The board owns the pieces placed
/// on it and keeps each piece's position backreference in sync with the cell it occupies:
/// placement writes the cell into the piece, removal clears it and hands the piece back.
///
/// Dimensions are fixed at construction. Coordinate-taking operations are bounds-checked and
/// fail with [`BoardError::OutOfBounds`] rather than trapping; [`Board::position_exists`] is the
/// never-failing boundary predicate.
pub struct Board {
    rows: u8,
    columns: u8,
    cells: Vec<Option<Box<dyn Piece>>>,
    keys: ZobristKeys,
    hash: u64,
}

impl Board {
    /// Create an empty board with the given dimensions. Fails with
    /// [`BoardError::InvalidDimensions`] unless both dimensions are at least 1.
    pub fn new(rows: u8, columns: u8) -> Result<Self, BoardError> {
        if rows < 1 || columns < 1 {
            return Err(InvalidDimensions { rows, columns });
        }
        let cell_count = rows as usize * columns as usize;
        let mut cells = Vec::with_capacity(cell_count);
        cells.resize_with(cell_count, || None);
        Ok(Self {
            rows,
            columns,
            cells,
            keys: ZobristKeys::new(rows, columns),
            hash: 0,
        })
    }

    /// The number of rows on the board.
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// The number of columns on the board.
    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Check whether the given position refers to a cell on this board.
    pub fn position_exists(&self, position: Position) -> bool {
        position.row < self.rows && position.column < self.columns
    }

    /// Row-major cell index for a position, or `OutOfBounds` if it is not on the board.
    fn index(&self, position: Position) -> Result<usize, BoardError> {
        if self.position_exists(position) {
            Ok(position.row as usize * self.columns as usize + position.column as usize)
        } else {
            Err(OutOfBounds(position))
        }
    }

    /// Get the piece occupying the given cell, if any. Fails with [`BoardError::OutOfBounds`]
    /// if the position is not on the board; a valid empty cell is `Ok(None)`, not an error.
    pub fn piece(&self, position: Position) -> Result<Option<&dyn Piece>, BoardError> {
        let i = self.index(position)?;
        Ok(self.cells[i].as_deref())
    }

    /// Check whether the given cell holds a piece. Fails with [`BoardError::OutOfBounds`] if the
    /// position is not on the board.
    pub fn is_occupied(&self, position: Position) -> Result<bool, BoardError> {
        let i = self.index(position)?;
        Ok(self.cells[i].is_some())
    }

    /// Place a piece on the given cell, taking ownership of it and setting its position
    /// backreference. A rejected placement — the cell is occupied or not on the board — returns
    /// the piece to the caller inside the [`PlaceError`], untouched.
    pub fn place_piece(
        &mut self,
        mut piece: Box<dyn Piece>,
        position: Position,
    ) -> Result<(), PlaceError> {
        let i = match self.index(position) {
            Ok(i) => i,
            Err(error) => return Err(PlaceError { piece, error }),
        };
        if self.cells[i].is_some() {
            return Err(PlaceError {
                piece,
                error: Occupied(position),
            });
        }
        piece.set_position(Some(position));
        self.hash ^= self.keys.key(piece.color(), position);
        self.cells[i] = Some(piece);
        Ok(())
    }

    /// Remove and return the piece on the given cell, clearing its position backreference and
    /// transferring ownership back to the caller. A valid empty cell yields `Ok(None)`; only an
    /// off-board position is an error.
    pub fn remove_piece(
        &mut self,
        position: Position,
    ) -> Result<Option<Box<dyn Piece>>, BoardError> {
        let i = self.index(position)?;
        match self.cells[i].take() {
            Some(mut piece) => {
                piece.set_position(None);
                self.hash ^= self.keys.key(piece.color(), position);
                Ok(Some(piece))
            }
            None => Ok(None),
        }
    }

    /// Return an iterator over the pieces of the given color currently on the board, in
    /// row-major scan order (row ascending, then column ascending).
    pub fn pieces(&self, color: Color) -> Pieces<'_> {
        Pieces {
            board: self,
            color,
            positions: Positions::new(self.rows, self.columns),
        }
    }

    /// Check whether any piece of the color opposing `color` can reach the given cell. Each
    /// opposing piece is asked for its reachability grid in row-major enumeration order, and the
    /// scan stops at the first piece that marks the cell. Fails with
    /// [`BoardError::OutOfBounds`] if the position is not on the board.
    pub fn is_under_attack(&self, position: Position, color: Color) -> Result<bool, BoardError> {
        self.index(position)?;
        for piece in self.pieces(color.other()) {
            if piece.possible_moves(self).marked(position) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Return an iterator over all positions on the board, in row-major order.
    pub fn positions(&self) -> Positions {
        Positions::new(self.rows, self.columns)
    }

    /// An occupancy hash of the board, maintained incrementally by placement and removal. Two
    /// boards of equal dimensions with the same colored-occupancy pattern hash equally. The hash
    /// distinguishes the color occupying each cell, not the kind of piece — piece kinds are
    /// invisible at this layer.
    pub fn hash(&self) -> u64 {
        self.hash
    }
}

impl Default for Board {
    /// The standard 8×8 board, empty.
    fn default() -> Self {
        Self::new(8, 8).expect("8x8 dimensions are valid")
    }
}

impl Display for Board {
    /// One line per row, each cell rendered as its piece's symbol or `.` when empty.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows {
            for column in 0..self.columns {
                let i = row as usize * self.columns as usize + column as usize;
                match self.cells[i].as_deref() {
                    Some(piece) => write!(f, "{}", piece.symbol())?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board({}x{})\n{}", self.rows, self.columns, self)
    }
}

/// Iterator over the pieces of one color on a board, in row-major scan order.
pub struct Pieces<'a> {
    board: &'a Board,
    color: Color,
    positions: Positions,
}

impl<'a> Iterator for Pieces<'a> {
    type Item = &'a dyn Piece;

    fn next(&mut self) -> Option<Self::Item> {
        for position in self.positions.by_ref() {
            let i = position.row as usize * self.board.columns as usize + position.column as usize;
            if let Some(piece) = self.board.cells[i].as_deref() {
                if piece.color() == self.color {
                    return Some(piece);
                }
            }
        }
        None
    }
}
