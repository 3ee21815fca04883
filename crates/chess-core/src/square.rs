//! Board square representation.

use std::fmt;

/// Number of files and ranks on the board.
pub const BOARD_SIZE: i8 = 8;

/// Total number of squares on the board.
pub const SQUARE_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// A (file, rank) coordinate pair.
///
/// File 0 is the a-file and rank 0 is White's back rank. A square may lie
/// off the board: ray and offset generators step past the edge as a matter
/// of course, and every board query treats such squares as empty.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: i8,
    rank: i8,
}

impl Square {
    /// The "no move" sentinel. Never equal to an on-board square.
    pub const NONE: Square = Square {
        file: i8::MIN,
        rank: i8::MIN,
    };

    /// Creates a square from file and rank. The result may be off the board.
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Self {
        Square { file, rank }
    }

    /// Creates a square from a 0-63 index (a1 = 0, h1 = 7, a8 = 56).
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < SQUARE_COUNT {
            Some(Square::new(
                (index % BOARD_SIZE as usize) as i8,
                (index / BOARD_SIZE as usize) as i8,
            ))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Some(Square::new((file - b'a') as i8, (rank - b'1') as i8))
    }

    /// Returns the file coordinate.
    #[inline]
    pub const fn file(self) -> i8 {
        self.file
    }

    /// Returns the rank coordinate.
    #[inline]
    pub const fn rank(self) -> i8 {
        self.rank
    }

    /// Returns true if both coordinates lie in `0..8`.
    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.file >= 0 && self.file < BOARD_SIZE && self.rank >= 0 && self.rank < BOARD_SIZE
    }

    /// Returns true for the "no move" sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.file == Self::NONE.file && self.rank == Self::NONE.rank
    }

    /// Returns the 0-63 index, or `None` off the board.
    #[inline]
    pub const fn index(self) -> Option<usize> {
        if self.is_on_board() {
            Some(self.rank as usize * BOARD_SIZE as usize + self.file as usize)
        } else {
            None
        }
    }

    /// Returns the square displaced by the given file and rank steps.
    ///
    /// Saturates instead of overflowing, so offsetting the sentinel stays off the board.
    #[inline]
    pub const fn offset(self, file_step: i8, rank_step: i8) -> Self {
        Square::new(
            self.file.saturating_add(file_step),
            self.rank.saturating_add(rank_step),
        )
    }

    /// Returns the algebraic notation for this square, or `None` off the board.
    pub fn to_algebraic(self) -> Option<String> {
        if !self.is_on_board() {
            return None;
        }
        Some(format!(
            "{}{}",
            (b'a' + self.file as u8) as char,
            (b'1' + self.rank as u8) as char
        ))
    }

    /// Iterates over all 64 squares, a1 first, rank by rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARE_COUNT).filter_map(Square::from_index)
    }

    // Common squares
    pub const A1: Square = Square::new(0, 0);
    pub const B1: Square = Square::new(1, 0);
    pub const C1: Square = Square::new(2, 0);
    pub const D1: Square = Square::new(3, 0);
    pub const E1: Square = Square::new(4, 0);
    pub const F1: Square = Square::new(5, 0);
    pub const G1: Square = Square::new(6, 0);
    pub const H1: Square = Square::new(7, 0);
    pub const A8: Square = Square::new(0, 7);
    pub const B8: Square = Square::new(1, 7);
    pub const C8: Square = Square::new(2, 7);
    pub const D8: Square = Square::new(3, 7);
    pub const E8: Square = Square::new(4, 7);
    pub const F8: Square = Square::new(5, 7);
    pub const G8: Square = Square::new(6, 7);
    pub const H8: Square = Square::new(7, 7);
}

impl Default for Square {
    fn default() -> Self {
        Square::NONE
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_algebraic() {
            Some(name) => write!(f, "{}", name),
            None if self.is_none() => write!(f, "-"),
            None => write!(f, "({},{})", self.file, self.rank),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn square_new() {
        let e4 = Square::new(4, 3);
        assert_eq!(e4.file(), 4);
        assert_eq!(e4.rank(), 3);
        assert_eq!(e4.index(), Some(28));
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(Square::from_algebraic("e4"), Some(Square::new(4, 3)));
        assert_eq!(Square::from_algebraic("H8"), Some(Square::H8));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn square_to_algebraic() {
        assert_eq!(Square::A1.to_algebraic().as_deref(), Some("a1"));
        assert_eq!(Square::H8.to_algebraic().as_deref(), Some("h8"));
        assert_eq!(Square::new(8, 0).to_algebraic(), None);
    }

    #[test]
    fn sentinel_is_never_on_board() {
        assert!(!Square::NONE.is_on_board());
        assert!(Square::NONE.is_none());
        assert!(Square::all().all(|sq| sq != Square::NONE));
        assert!(!Square::NONE.offset(-2, -1).is_on_board());
        assert_eq!(Square::NONE.index(), None);
    }

    #[test]
    fn offsets_walk_off_the_board() {
        assert_eq!(Square::A1.offset(1, 2), Square::new(1, 2));
        assert!(!Square::A1.offset(-1, 0).is_on_board());
        assert!(!Square::H8.offset(0, 1).is_on_board());
    }

    #[test]
    fn all_squares_index_round_trip() {
        let squares: Vec<_> = Square::all().collect();
        assert_eq!(squares.len(), SQUARE_COUNT);
        for (i, sq) in squares.iter().enumerate() {
            assert_eq!(sq.index(), Some(i));
        }
    }

    #[test]
    fn display() {
        assert_eq!(Square::E1.to_string(), "e1");
        assert_eq!(Square::NONE.to_string(), "-");
        assert_eq!(Square::new(-1, 3).to_string(), "(-1,3)");
    }

    proptest! {
        #[test]
        fn offset_lands_on_board_iff_coordinates_in_range(
            file in -3i8..11,
            rank in -3i8..11,
            file_step in -2i8..=2,
            rank_step in -2i8..=2,
        ) {
            let sq = Square::new(file, rank).offset(file_step, rank_step);
            let expected = (0..8).contains(&(file + file_step)) && (0..8).contains(&(rank + rank_step));
            prop_assert_eq!(sq.is_on_board(), expected);
            prop_assert_eq!(sq.index().is_some(), expected);
        }
    }
}
