use alloy_primitives::BlockNumber;

/// An error occurring when building a [`crate::BlockRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BlockRangeError {
    /// The start of the range is past its end.
    #[error("inverted block range: from {from} > to {to}")]
    Inverted {
        /// The requested start block.
        from: BlockNumber,
        /// The requested end block.
        to: BlockNumber,
    },
}
