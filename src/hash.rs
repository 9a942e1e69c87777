use crate::pieces::Color;
use crate::position::Position;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// Seed for the key stream. Fixed so that boards of equal dimensions draw identical tables and
/// their hashes stay comparable.
const KEY_SEED: u64 = 42;

/// Zobrist-style key table for a rows×columns grid: one random `u64` per (color, cell)
/// combination. The board XOR-folds these keys into its occupancy hash as pieces come and go.
pub(crate) struct ZobristKeys {
    columns: u8,
    keys: Vec<u64>,
}

impl ZobristKeys {
    /// Generate the key table for a board of the given dimensions.
    pub(crate) fn new(rows: u8, columns: u8) -> Self {
        let mut rng = Pcg64::seed_from_u64(KEY_SEED);
        let cells = rows as usize * columns as usize;
        let mut keys = vec![0u64; cells * 2];
        for key in &mut keys {
            *key = rng.gen();
        }
        Self { columns, keys }
    }

    /// The key for a piece of the given color occupying the given cell. The position must lie
    /// within the dimensions the table was generated for.
    pub(crate) fn key(&self, color: Color, position: Position) -> u64 {
        let cell = position.row as usize * self.columns as usize + position.column as usize;
        let color_offset = match color {
            Color::White => 0,
            Color::Black => self.keys.len() / 2,
        };
        self.keys[color_offset + cell]
    }
}

#[cfg(test)]
mod tests {
    use crate::hash::ZobristKeys;
    use crate::pieces::Color;
    use crate::position::Position;

    #[test]
    fn test_deterministic_tables() {
        let a = ZobristKeys::new(8, 8);
        let b = ZobristKeys::new(8, 8);
        for row in 0..8 {
            for column in 0..8 {
                let position = Position::new(row, column);
                assert_eq!(a.key(Color::White, position), b.key(Color::White, position));
                assert_eq!(a.key(Color::Black, position), b.key(Color::Black, position));
            }
        }
    }

    #[test]
    fn test_colors_get_distinct_keys() {
        let keys = ZobristKeys::new(4, 4);
        let position = Position::new(2, 3);
        assert_ne!(keys.key(Color::White, position), keys.key(Color::Black, position));
    }

    #[test]
    fn test_cells_get_distinct_keys() {
        let keys = ZobristKeys::new(4, 4);
        assert_ne!(
            keys.key(Color::White, Position::new(0, 0)),
            keys.key(Color::White, Position::new(0, 1))
        );
    }
}
