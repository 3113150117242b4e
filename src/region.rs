use std::{
    cmp::{max, min},
    ops::{Index, Range},
};

/// Represents an area within source text.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub struct Region {
    /// The beginning of the range, inclusive.
    pub begin: usize,
    /// The ending of the range, exclusive.
    pub end: usize,
}

impl Region {
    /// Create a new [`Region`] from the given range.
    pub fn new(position: Range<usize>) -> Self {
        Self {
            begin: position.start,
            end: position.end,
        }
    }

    /// Combine will merge the indices of two [`Region`] instances.
    pub fn combine(self, other: Self) -> Self {
        Self {
            begin: min(self.begin, other.begin),
            end: max(self.end, other.end),
        }
    }

    /// Return the length of the [`Region`] in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    /// Return true if the [`Region`] covers no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Access the literal value of a [`Region`].
    ///
    /// Returns an empty string if the `Region` is out of bounds in the given source text.
    pub fn literal<'source>(&self, source: &'source str) -> &'source str {
        source.get(self.begin..self.end).unwrap_or_default()
    }
}

impl Index<Region> for str {
    type Output = str;

    fn index(&self, region: Region) -> &Self::Output {
        let Region { begin, end } = region;

        &self[begin..end]
    }
}

impl From<Range<usize>> for Region {
    fn from(value: Range<usize>) -> Self {
        Self {
            begin: value.start,
            end: value.end,
        }
    }
}

impl From<Region> for Range<usize> {
    fn from(value: Region) -> Self {
        value.begin..value.end
    }
}
