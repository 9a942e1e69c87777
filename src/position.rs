use crate::error::ParseError;
use crate::error::ParseError::{BadString, EmptyString};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The location of a single cell on a board, ie, row and column. This struct is only a reference
/// to a location and carries no information about piece placement. Positions may be created
/// freely; whether a position refers to a cell on a particular board is board-relative and is
/// checked by [`crate::board::Board::position_exists`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub column: u8,
}

impl Position {
    /// Create a new [`Position`] with the given row and column.
    pub fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    /// Apply a signed displacement to this position, returning the resulting position or `None`
    /// if the displacement leaves the representable coordinate range. The result may still lie
    /// outside any particular board; callers check that separately.
    pub fn offset(&self, d_row: i16, d_column: i16) -> Option<Position> {
        let row = (self.row as i16).checked_add(d_row)?;
        let column = (self.column as i16).checked_add(d_column)?;
        let range = 0..=(u8::MAX as i16);
        if range.contains(&row) && range.contains(&column) {
            Some(Position::new(row as u8, column as u8))
        } else {
            None
        }
    }
}

impl Debug for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position(row={}, column={})", self.row, self.column)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.column)
    }
}

impl FromStr for Position {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(EmptyString);
        }
        let (row, column) = s.split_once(',').ok_or_else(|| BadString(String::from(s)))?;
        Ok(Position::new(row.parse()?, column.parse()?))
    }
}

impl From<Position> for (u8, u8) {
    fn from(value: Position) -> Self {
        (value.row, value.column)
    }
}

/// Iterator over all positions of a rows×columns grid, in row-major order (row ascending, then
/// column ascending).
pub struct Positions {
    rows: u8,
    columns: u8,
    current_row: u8,
    current_column: u8,
}

impl Positions {
    pub(crate) fn new(rows: u8, columns: u8) -> Self {
        Self {
            rows,
            columns,
            current_row: 0,
            current_column: 0,
        }
    }
}

impl Iterator for Positions {
    type Item = Position;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row >= self.rows || self.columns == 0 {
            return None;
        }
        let position = Position::new(self.current_row, self.current_column);
        if self.current_column >= self.columns - 1 {
            self.current_row += 1;
            self.current_column = 0;
        } else {
            self.current_column += 1;
        }
        Some(position)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ParseError::{BadInt, BadString, EmptyString};
    use crate::position::{Position, Positions};
    use std::str::FromStr;

    #[test]
    fn test_position_creation() {
        for r in 0..16 {
            for c in 0..16 {
                let p = Position::new(r, c);
                assert_eq!(p.row, r);
                assert_eq!(p.column, c);
            }
        }
    }

    #[test]
    fn test_display_and_parse() {
        let p = Position::new(3, 12);
        assert_eq!(p.to_string(), "3,12");
        assert_eq!(Position::from_str("3,12"), Ok(p));
        assert_eq!(Position::from_str(&p.to_string()), Ok(p));

        assert_eq!(Position::from_str(""), Err(EmptyString));
        assert_eq!(
            Position::from_str("34"),
            Err(BadString(String::from("34")))
        );
        assert!(matches!(Position::from_str("a,4"), Err(BadInt(_))));
        assert!(matches!(Position::from_str("4,"), Err(BadInt(_))));
        assert!(matches!(Position::from_str("4,5,6"), Err(BadInt(_))));
        assert!(matches!(Position::from_str("300,0"), Err(BadInt(_))));
    }

    #[test]
    fn test_tuple_conversion() {
        let (row, column) = <(u8, u8)>::from(Position::new(6, 2));
        assert_eq!((row, column), (6, 2));
    }

    #[test]
    fn test_offset() {
        let p = Position::new(4, 4);
        assert_eq!(p.offset(0, 0), Some(p));
        assert_eq!(p.offset(-2, 1), Some(Position::new(2, 5)));
        assert_eq!(p.offset(-5, 0), None);
        assert_eq!(p.offset(0, -5), None);
        assert_eq!(Position::new(250, 0).offset(10, 0), None);
        assert_eq!(Position::new(0, 250).offset(0, 5), Some(Position::new(0, 255)));
    }

    #[test]
    fn test_row_major_iteration() {
        let all: Vec<Position> = Positions::new(2, 3).collect();
        assert_eq!(all, vec![
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(0, 2),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(1, 2),
        ]);

        assert_eq!(Positions::new(0, 3).count(), 0);
        assert_eq!(Positions::new(3, 0).count(), 0);
        assert_eq!(Positions::new(1, 1).count(), 1);
    }
}
