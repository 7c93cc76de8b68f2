use alloy_primitives::{BlockNumber, Bytes, TxHash};
use alloy_rpc_types_eth::Log;

/// The chronological position of a log (or of the transaction that emitted it) on chain.
///
/// Keys order by block number, then transaction index, then log index.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display,
)]
#[display("{block_number}:{transaction_index}:{log_index}")]
pub struct OrderingKey {
    /// The block number.
    pub block_number: BlockNumber,
    /// The index of the transaction in the block.
    pub transaction_index: u64,
    /// The index of the log in the block.
    pub log_index: u64,
}

impl OrderingKey {
    /// Returns a new instance of [`OrderingKey`].
    pub const fn new(block_number: BlockNumber, transaction_index: u64, log_index: u64) -> Self {
        Self { block_number, transaction_index, log_index }
    }

    /// Returns the key of the provided log, if the log carries its position. Pending logs don't.
    pub const fn from_log(log: &Log) -> Option<Self> {
        match (log.block_number, log.transaction_index, log.log_index) {
            (Some(block_number), Some(transaction_index), Some(log_index)) => {
                Some(Self { block_number, transaction_index, log_index })
            }
            _ => None,
        }
    }
}

/// The input of a mined transaction along with its position on chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedTransaction {
    /// The hash of the transaction.
    pub hash: TxHash,
    /// The position of the transaction, taken from the earliest log that pointed at it.
    pub key: OrderingKey,
    /// The input calldata of the transaction.
    pub input: Bytes,
}

impl OrderedTransaction {
    /// Returns a new instance of [`OrderedTransaction`].
    pub const fn new(hash: TxHash, key: OrderingKey, input: Bytes) -> Self {
        Self { hash, key, input }
    }
}
