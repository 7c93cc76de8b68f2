use crate::LogQuery;

use alloy_network::Ethereum;
use alloy_primitives::{BlockNumber, Bytes, TxHash};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{Filter, Log, TransactionTrait};
use alloy_transport::TransportResult;

/// The chain history capabilities required to reconstruct state from logs and calldata.
#[async_trait::async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Returns the logs matching the query, in chronological order.
    async fn logs(&self, query: &LogQuery) -> TransportResult<Vec<Log>>;

    /// Returns the input of the transaction, or `None` if the transaction is unknown.
    async fn transaction_input(&self, hash: TxHash) -> TransportResult<Option<Bytes>>;

    /// Returns the number of the latest block.
    async fn block_number(&self) -> TransportResult<BlockNumber>;
}

#[async_trait::async_trait]
impl<P: Provider<Ethereum>> HistoryProvider for P {
    async fn logs(&self, query: &LogQuery) -> TransportResult<Vec<Log>> {
        self.get_logs(&Filter::from(query)).await
    }

    async fn transaction_input(&self, hash: TxHash) -> TransportResult<Option<Bytes>> {
        Ok(self.get_transaction_by_hash(hash).await?.map(|tx| tx.input().clone()))
    }

    async fn block_number(&self) -> TransportResult<BlockNumber> {
        self.get_block_number().await
    }
}
