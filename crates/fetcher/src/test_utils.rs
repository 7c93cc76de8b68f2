use crate::{HistoryProvider, LogQuery};

use alloy_primitives::{Address, BlockNumber, Bytes, TxHash};
use alloy_rpc_types_eth::Log;
use alloy_sol_types::SolEvent;
use alloy_transport::{TransportError, TransportErrorKind, TransportResult};
use orbit_primitives::{BlockRange, OrderingKey};
use parking_lot::Mutex;
use std::collections::HashMap;

/// A mock implementation of the [`HistoryProvider`] trait, serving logs and transactions from
/// memory.
#[derive(Debug, Default)]
pub struct MockProvider {
    logs: Vec<Log>,
    transactions: HashMap<TxHash, Bytes>,
    block_number: BlockNumber,
    max_block_span: Option<u64>,
    reject_first_query: bool,
    failing_ranges: Vec<BlockRange>,
    failing_transactions: Vec<TxHash>,
    queries: Mutex<Vec<BlockRange>>,
}

impl MockProvider {
    /// Returns a new [`MockProvider`] with the provided latest block number.
    pub fn new(block_number: BlockNumber) -> Self {
        Self { block_number, ..Default::default() }
    }

    /// Adds logs to the provider.
    pub fn with_logs(mut self, logs: impl IntoIterator<Item = Log>) -> Self {
        self.logs.extend(logs);
        self.logs.sort_by_key(|log| OrderingKey::from_log(log).unwrap_or_default());
        self
    }

    /// Adds a transaction with the provided input to the provider.
    pub fn with_transaction(mut self, hash: TxHash, input: impl Into<Bytes>) -> Self {
        self.transactions.insert(hash, input.into());
        self
    }

    /// Rejects log queries spanning more than `span` blocks.
    pub const fn with_max_block_span(mut self, span: u64) -> Self {
        self.max_block_span = Some(span);
        self
    }

    /// Rejects the first log query, whatever its span.
    pub const fn with_rejected_first_query(mut self) -> Self {
        self.reject_first_query = true;
        self
    }

    /// Fails any log query overlapping the range.
    pub fn with_failing_range(mut self, range: BlockRange) -> Self {
        self.failing_ranges.push(range);
        self
    }

    /// Fails the lookup of the transaction.
    pub fn with_failing_transaction(mut self, hash: TxHash) -> Self {
        self.failing_transactions.push(hash);
        self
    }

    /// Returns the ranges of all log queries received so far, in order.
    pub fn queries(&self) -> Vec<BlockRange> {
        self.queries.lock().clone()
    }
}

#[async_trait::async_trait]
impl HistoryProvider for MockProvider {
    async fn logs(&self, query: &LogQuery) -> TransportResult<Vec<Log>> {
        let is_first = {
            let mut queries = self.queries.lock();
            queries.push(query.range);
            queries.len() == 1
        };

        if self.reject_first_query && is_first {
            return Err(TransportError::from(TransportErrorKind::custom_str(
                "query returned more than 10000 results",
            )));
        }

        if self.max_block_span.is_some_and(|span| query.range.len() > span) {
            return Err(TransportError::from(TransportErrorKind::custom_str(
                "query exceeds max block range",
            )));
        }
        if self.failing_ranges.iter().any(|range| range.overlaps(&query.range)) {
            return Err(TransportError::from(TransportErrorKind::custom_str("rate limited")));
        }

        Ok(self.logs.iter().filter(|log| query.matches(log)).cloned().collect())
    }

    async fn transaction_input(&self, hash: TxHash) -> TransportResult<Option<Bytes>> {
        if self.failing_transactions.contains(&hash) {
            return Err(TransportError::from(TransportErrorKind::custom_str("request timed out")));
        }
        Ok(self.transactions.get(&hash).cloned())
    }

    async fn block_number(&self) -> TransportResult<BlockNumber> {
        Ok(self.block_number)
    }
}

/// Returns the rpc log of `event` emitted by `address` in transaction `transaction_hash`, at the
/// position `key`.
pub fn log_at<E: SolEvent>(
    address: Address,
    event: &E,
    transaction_hash: TxHash,
    key: OrderingKey,
) -> Log {
    Log {
        inner: alloy_primitives::Log { address, data: event.encode_log_data() },
        block_number: Some(key.block_number),
        transaction_index: Some(key.transaction_index),
        log_index: Some(key.log_index),
        transaction_hash: Some(transaction_hash),
        ..Default::default()
    }
}
