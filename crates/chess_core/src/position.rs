use std::fmt;

/// A square on the board. Row 0 is Black's back rank (rank 8), column 0 is the a-file.
///
/// Coordinates are signed so that offsets can step off the board; such a position is
/// simply not `is_valid()` and every board operation treats it as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i8, // 0-7, top to bottom
    pub col: i8, // 0-7, a-h
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn is_valid(&self) -> bool {
        (0..8).contains(&self.row) && (0..8).contains(&self.col)
    }

    /// The square `(dr, dc)` away, if it is still on the board.
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Self> {
        let pos = Self::new(self.row.checked_add(dr)?, self.col.checked_add(dc)?);
        pos.is_valid().then_some(pos)
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8).flat_map(|row| (0..8).map(move |col| Position { row, col }))
    }

    /// a8 and h1 are light squares.
    pub fn is_light(&self) -> bool {
        (i16::from(self.row) + i16::from(self.col)) % 2 == 0
    }

    pub(crate) fn index(&self) -> Option<(usize, usize)> {
        if self.is_valid() {
            Some((self.row as usize, self.col as usize))
        } else {
            None
        }
    }

    pub fn from_algebraic(notation: &str) -> Option<Self> {
        let mut chars = notation.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }

        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }

        Some(Self {
            row: 8 - ((rank as u8) - b'0') as i8,
            col: ((file as u8) - b'a') as i8,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "({},{})", self.row, self.col);
        }
        let file = (b'a' + self.col as u8) as char;
        write!(f, "{}{}", file, 8 - self.row)
    }
}
