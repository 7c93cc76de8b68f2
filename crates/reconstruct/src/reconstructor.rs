use crate::{
    find_deployment, Deployment, Keysets, Membership, ReconstructError, ReconstructMetrics,
    ReconstructResult, ReconstructionConfig, ReplayEngine, RollupAddresses, SelectorTables,
};

use alloy_primitives::{Address, Bytes, TxHash, B256};
use alloy_rpc_types_eth::Log;
use alloy_sol_types::SolEvent;
use futures::future::try_join_all;
use orbit_abi::{
    logs::{try_decode_log, InvalidateKeyset, OwnerFunctionCalled, SetValidKeyset},
    OwnerFunction,
};
use orbit_calldata::{decode_transaction, DecodeError, DecodeFailure, Decoded, SelectorTable};
use orbit_log_fetcher::{EventFilter, HistoryProvider, RangeLogFetcher};
use orbit_primitives::{
    BlockRange, Operation, OperationKind, OrderedTransaction, OrderingKey, ReconstructionResult,
};
use std::collections::{BTreeMap, HashMap};

/// Reconstructs the current roles and keysets of a rollup from its chain history.
#[derive(Debug)]
pub struct Reconstructor<P> {
    /// The log fetcher, wrapping the execution node provider.
    fetcher: RangeLogFetcher<P>,
    /// The contracts of the rollup.
    addresses: RollupAddresses,
    /// The reconstruction configuration.
    config: ReconstructionConfig,
    /// The selector tables per role.
    tables: SelectorTables,
    /// The metrics for the reconstructions.
    metrics: ReconstructMetrics,
}

impl<P: HistoryProvider> Reconstructor<P> {
    /// Returns a new [`Reconstructor`] using the known selector tables.
    pub fn new(
        fetcher: RangeLogFetcher<P>,
        addresses: RollupAddresses,
        config: ReconstructionConfig,
    ) -> Self {
        Self {
            fetcher,
            addresses,
            config,
            tables: SelectorTables::default(),
            metrics: ReconstructMetrics::default(),
        }
    }

    /// Replaces the selector tables.
    pub fn with_tables(mut self, tables: SelectorTables) -> Self {
        self.tables = tables;
        self
    }

    /// Returns the log fetcher.
    pub const fn fetcher(&self) -> &RangeLogFetcher<P> {
        &self.fetcher
    }

    /// Returns the current validators of the rollup, in the order they were added.
    #[tracing::instrument(target = "orbit::reconstruct", skip_all, fields(rollup = %self.addresses.rollup))]
    pub async fn validators(&self) -> ReconstructResult<ReconstructionResult<Vec<Address>>> {
        self.membership(self.addresses.rollup, OwnerFunction::SetValidator, &self.tables.validators)
            .await
    }

    /// Returns the current batch posters of the rollup, in the order they were added.
    #[tracing::instrument(target = "orbit::reconstruct", skip_all, fields(inbox = %self.addresses.sequencer_inbox))]
    pub async fn batch_posters(&self) -> ReconstructResult<ReconstructionResult<Vec<Address>>> {
        self.membership(
            self.addresses.sequencer_inbox,
            OwnerFunction::SetIsBatchPoster,
            &self.tables.batch_posters,
        )
        .await
    }

    /// Returns the currently valid keysets of the rollup, by hash.
    #[tracing::instrument(target = "orbit::reconstruct", skip_all, fields(inbox = %self.addresses.sequencer_inbox))]
    pub async fn keysets(&self) -> ReconstructResult<ReconstructionResult<BTreeMap<B256, Bytes>>> {
        let (_, range) = self.search_range().await?;

        let events = EventFilter::events(vec![
            SetValidKeyset::SIGNATURE_HASH,
            InvalidateKeyset::SIGNATURE_HASH,
        ]);
        let logs = self
            .fetcher
            .fetch(
                &[self.addresses.sequencer_inbox],
                &events,
                range,
                self.config.fetch.with_stop_when_found(false),
            )
            .await?;

        let decoded = logs.iter().map(keyset_operations).collect::<ReconstructResult<Vec<_>>>()?;
        Ok(ReplayEngine::<Keysets>::reconstruct([], decoded))
    }

    /// Replays the calls of `function` on `emitter`, seeded by the deployment transaction.
    async fn membership(
        &self,
        emitter: Address,
        function: OwnerFunction,
        table: &SelectorTable,
    ) -> ReconstructResult<ReconstructionResult<Vec<Address>>> {
        let (deployment, range) = self.search_range().await?;

        let seed = match deployment {
            Some(deployment) => {
                let transaction =
                    self.transaction(deployment.transaction_hash, deployment.key).await?;
                vec![decode_transaction(&transaction, table)]
            }
            None => Vec::new(),
        };

        let events = EventFilter::event_with_indexed::<OwnerFunctionCalled>(function.topic());
        let logs = self
            .fetcher
            .fetch(&[emitter], &events, range, self.config.fetch.with_stop_when_found(false))
            .await?;

        let candidates =
            candidates(&logs, deployment.as_ref().map(|deployment| deployment.transaction_hash))?;
        tracing::debug!(target: "orbit::reconstruct", ?function, count = candidates.len(), "fetching candidate transactions");
        self.metrics.candidate_transactions.increment(candidates.len() as u64);

        let mut transactions =
            try_join_all(candidates.into_iter().map(|(hash, key)| self.transaction(hash, key)))
                .await?;
        transactions.sort_by_key(|transaction| transaction.key);

        let toggles = transactions.iter().map(|transaction| decode_transaction(transaction, table));
        Ok(ReplayEngine::<Membership>::reconstruct(seed, toggles))
    }

    /// Returns the deployment of the rollup, if found, and the range to search for changes: from
    /// the deployment block, or the earliest block without deployment, to the configured end.
    async fn search_range(&self) -> ReconstructResult<(Option<Deployment>, BlockRange)> {
        let range = self.fetcher.resolve_range(None, self.config.to_block).await?;
        let deployment =
            find_deployment(&self.fetcher, self.addresses.rollup, range, self.config.fetch).await;

        let range = deployment
            .and_then(|deployment| BlockRange::new(deployment.key.block_number, range.to()).ok())
            .unwrap_or(range);

        Ok((deployment, range))
    }

    /// Fetches the input of the transaction.
    async fn transaction(
        &self,
        hash: TxHash,
        key: OrderingKey,
    ) -> ReconstructResult<OrderedTransaction> {
        let input = self
            .fetcher
            .provider()
            .transaction_input(hash)
            .await?
            .ok_or(ReconstructError::MissingTransaction(hash))?;
        Ok(OrderedTransaction::new(hash, key, input))
    }
}

/// Returns the transactions that emitted the logs, once each at the position of their earliest
/// log, in chronological order. The `excluded` transaction is skipped.
fn candidates(
    logs: &[Log],
    excluded: Option<TxHash>,
) -> ReconstructResult<Vec<(TxHash, OrderingKey)>> {
    let mut candidates = HashMap::<TxHash, OrderingKey>::with_capacity(logs.len());
    for log in logs {
        let (hash, key) = position(log)?;
        if Some(hash) == excluded {
            continue;
        }
        candidates.entry(hash).and_modify(|earliest| *earliest = key.min(*earliest)).or_insert(key);
    }

    let mut candidates: Vec<_> = candidates.into_iter().collect();
    candidates.sort_by_key(|(_, key)| *key);
    Ok(candidates)
}

/// Returns the emitting transaction and the position of the log.
fn position(log: &Log) -> ReconstructResult<(TxHash, OrderingKey)> {
    let hash = log.transaction_hash.ok_or(ReconstructError::MissingLogField("transaction hash"))?;
    let key = OrderingKey::from_log(log).ok_or(ReconstructError::MissingLogField("position"))?;
    Ok((hash, key))
}

/// Turns a keyset log into its operation. An undecodable log is a decode failure of its
/// transaction.
fn keyset_operations(log: &Log) -> ReconstructResult<Decoded> {
    let (hash, key) = position(log)?;

    let kind = if log.topics().first() == Some(&SetValidKeyset::SIGNATURE_HASH) {
        try_decode_log::<SetValidKeyset>(&log.inner)
            .map(|log| OperationKind::SetKeyset {
                hash: log.data.keysetHash,
                bytes: log.data.keysetBytes,
            })
            .ok_or(DecodeError::InvalidLog { event: "SetValidKeyset" })
    } else {
        try_decode_log::<InvalidateKeyset>(&log.inner)
            .map(|log| OperationKind::InvalidateKeyset(log.data.keysetHash))
            .ok_or(DecodeError::InvalidLog { event: "InvalidateKeyset" })
    };

    Ok(kind
        .map(|kind| vec![Operation::new(kind, hash, key)])
        .map_err(|error| DecodeFailure::new(hash, error)))
}
