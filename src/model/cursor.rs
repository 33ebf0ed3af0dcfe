//! Cursor and selection primitives

use std::ops::Range;

/// Horizontal direction, used for navigation, selection heads and directional delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Caret position: a discrete item index or a continuous playback time
///
/// A user cursor index may equal `content.len()` (end of document).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cursor {
    /// Set by keyboard/mouse navigation
    User(usize),
    /// Driven by the media player, in seconds
    Player(f64),
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::User(0)
    }
}

impl Cursor {
    pub fn is_user(&self) -> bool {
        matches!(self, Cursor::User(_))
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Cursor::Player(_))
    }
}

/// A contiguous, non-empty range of item indices with a directional head
///
/// The head is the extremity that moves under directional extension; the opposite
/// extremity is the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start_index: usize,
    pub length: usize,
    pub head_side: Direction,
}

impl Selection {
    pub fn new(start_index: usize, length: usize, head_side: Direction) -> Self {
        Self {
            start_index,
            length,
            head_side,
        }
    }

    /// One-item selection over `index`
    pub fn single(index: usize, head_side: Direction) -> Self {
        Self::new(index, 1, head_side)
    }

    /// Exclusive end index
    #[inline]
    pub fn end_index(&self) -> usize {
        self.start_index + self.length
    }

    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    /// Index boundary the head sits on (the cursor follows it)
    pub fn head_index(&self) -> usize {
        match self.head_side {
            Direction::Left => self.start_index,
            Direction::Right => self.end_index(),
        }
    }

    /// Selection clamped to `len` items, `None` if nothing remains
    pub fn clamped(&self, len: usize) -> Option<Selection> {
        let start = self.start_index.min(len);
        let end = self.end_index().min(len);
        (end > start).then(|| Selection::new(start, end - start, self.head_side))
    }

    /// Smallest selection containing both this range and `index`, anchor preserved
    pub fn grown_to_include(&self, index: usize) -> Selection {
        if index < self.start_index {
            Selection::new(index, self.end_index() - index, Direction::Left)
        } else if index >= self.end_index() {
            Selection::new(
                self.start_index,
                index + 1 - self.start_index,
                Direction::Right,
            )
        } else {
            *self
        }
    }
}
