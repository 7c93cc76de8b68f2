use crate::BlockRangeError;

use alloy_primitives::BlockNumber;
use core::num::NonZeroU64;

/// An inclusive range of blocks `[from, to]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[display("[{from}, {to}]")]
pub struct BlockRange {
    from: BlockNumber,
    to: BlockNumber,
}

impl BlockRange {
    /// Returns a new [`BlockRange`], erroring if `from > to`.
    pub const fn new(from: BlockNumber, to: BlockNumber) -> Result<Self, BlockRangeError> {
        if from > to {
            return Err(BlockRangeError::Inverted { from, to });
        }
        Ok(Self { from, to })
    }

    /// Returns a range covering a single block.
    pub const fn single(number: BlockNumber) -> Self {
        Self { from: number, to: number }
    }

    /// The first block of the range.
    pub const fn from(&self) -> BlockNumber {
        self.from
    }

    /// The last block of the range.
    pub const fn to(&self) -> BlockNumber {
        self.to
    }

    /// Returns the amount of blocks covered by the range.
    pub const fn len(&self) -> u64 {
        self.to - self.from + 1
    }

    /// A range always covers at least one block.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if the block is part of the range.
    pub const fn contains(&self, number: BlockNumber) -> bool {
        self.from <= number && number <= self.to
    }

    /// Returns true if both ranges share at least one block.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.from <= other.to && other.from <= self.to
    }

    /// Returns an iterator over consecutive windows of at most `size` blocks, starting at the end
    /// of the range and walking back towards its start.
    pub const fn windows_rev(&self, size: NonZeroU64) -> WindowsRev {
        WindowsRev { from: self.from, cursor: Some(self.to), size: size.get() }
    }
}

/// Iterator over the windows of a [`BlockRange`], newest first. See [`BlockRange::windows_rev`].
#[derive(Debug, Clone)]
pub struct WindowsRev {
    from: BlockNumber,
    cursor: Option<BlockNumber>,
    size: u64,
}

impl Iterator for WindowsRev {
    type Item = BlockRange;

    fn next(&mut self) -> Option<Self::Item> {
        let to = self.cursor?;
        let from = to.saturating_sub(self.size - 1).max(self.from);

        // stop once the window reached the start of the range.
        self.cursor = from.checked_sub(1).filter(|cursor| *cursor >= self.from);

        Some(BlockRange { from, to })
    }
}
