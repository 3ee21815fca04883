//! Fixed-capacity destination list.

use chess_core::{Square, SQUARE_COUNT};

/// The destinations one piece may move to, in generation order.
///
/// No piece can reach more squares than the board has, so the list is a
/// fixed array of 64 slots. Unused slots always hold [`Square::NONE`]: the
/// buffer is sentinel-terminated and no real square ever follows a sentinel.
#[derive(Clone, PartialEq, Eq)]
pub struct MoveList {
    squares: [Square; Self::CAPACITY],
    len: usize,
}

impl MoveList {
    /// Maximum number of destinations a single piece can have.
    pub const CAPACITY: usize = SQUARE_COUNT;

    /// Creates an empty list with every slot set to the sentinel.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            squares: [Square::NONE; Self::CAPACITY],
            len: 0,
        }
    }

    /// Appends a destination.
    #[inline]
    pub fn push(&mut self, square: Square) {
        debug_assert!(self.len < Self::CAPACITY);
        debug_assert!(square.is_on_board(), "pushed off-board square {square}");
        self.squares[self.len] = square;
        self.len += 1;
    }

    /// Returns the number of destinations.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the destinations as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len]
    }

    /// Returns the whole buffer, sentinels included.
    #[inline]
    pub fn as_buffer(&self) -> &[Square; Self::CAPACITY] {
        &self.squares
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Square> {
        self.as_slice().iter()
    }

    /// Returns true if `square` is one of the destinations.
    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        self.as_slice().contains(&square)
    }

    /// Resets every used slot to the sentinel.
    #[inline]
    pub fn clear(&mut self) {
        self.squares[..self.len].fill(Square::NONE);
        self.len = 0;
    }

    /// Retains only destinations for which the predicate returns true.
    ///
    /// Order is preserved and freed slots go back to the sentinel.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Square) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.squares[read]) {
                self.squares[write] = self.squares[read];
                write += 1;
            }
        }
        self.squares[write..self.len].fill(Square::NONE);
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Square;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.squares[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Square;
    type IntoIter = std::slice::Iter<'a, Square>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentinel_terminated(list: &MoveList) -> bool {
        let buffer = list.as_buffer();
        let first_sentinel = buffer.iter().position(|sq| sq.is_none()).unwrap_or(buffer.len());
        first_sentinel == list.len() && buffer[first_sentinel..].iter().all(|sq| sq.is_none())
    }

    #[test]
    fn push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());
        assert!(sentinel_terminated(&list));

        list.push(Square::E1);
        list.push(Square::D8);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], Square::E1);
        assert_eq!(list[1], Square::D8);
        assert!(list.contains(Square::D8));
        assert!(!list.contains(Square::A1));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![Square::E1, Square::D8]);
        assert!(sentinel_terminated(&list));
    }

    #[test]
    fn retain_keeps_order_and_sentinels() {
        let mut list = MoveList::new();
        for sq in [Square::A1, Square::B1, Square::C1, Square::D1] {
            list.push(sq);
        }
        list.retain(|sq| sq.file() % 2 == 1);
        assert_eq!(list.as_slice(), &[Square::B1, Square::D1]);
        assert!(sentinel_terminated(&list));
    }

    #[test]
    fn clear_restores_sentinels() {
        let mut list = MoveList::new();
        list.push(Square::H8);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list, MoveList::new());
    }

    #[test]
    fn holds_a_full_board() {
        let mut list = MoveList::new();
        for sq in Square::all() {
            list.push(sq);
        }
        assert_eq!(list.len(), MoveList::CAPACITY);
        assert!(sentinel_terminated(&list));
    }
}
