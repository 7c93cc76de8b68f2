use alloy_primitives::{Selector, TxHash};

/// An error occurring while decoding calldata or logs into operations.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The calldata is shorter than a selector.
    #[error("calldata is shorter than a selector")]
    MissingSelector,
    /// No decoder is registered for the selector, at any level of delegation.
    #[error("unknown selector {0}")]
    UnknownSelector(Selector),
    /// The arguments do not match the ABI registered for the selector.
    #[error("abi decoding failed: {0}")]
    Abi(#[from] alloy_sol_types::Error),
    /// A toggle call carried arrays of different lengths.
    #[error("mismatched toggle arrays: {identities} identities for {flags} flags")]
    LengthMismatch {
        /// The length of the identities array.
        identities: usize,
        /// The length of the flags array.
        flags: usize,
    },
    /// A log does not carry the expected event.
    #[error("invalid {event} log")]
    InvalidLog {
        /// The expected event.
        event: &'static str,
    },
}

/// A transaction, or log, that could not be turned into operations.
///
/// Decode failures are expected for unknown or future protocol versions and are recovered
/// locally: the state is reconstructed without the transaction and flagged as incomplete.
#[derive(Debug, thiserror::Error)]
#[error("failed to decode transaction {transaction_hash}: {error}")]
pub struct DecodeFailure {
    /// The hash of the transaction.
    pub transaction_hash: TxHash,
    /// The reason of the failure.
    #[source]
    pub error: DecodeError,
}

impl DecodeFailure {
    /// Returns a new instance of [`DecodeFailure`].
    pub const fn new(transaction_hash: TxHash, error: DecodeError) -> Self {
        Self { transaction_hash, error }
    }
}
