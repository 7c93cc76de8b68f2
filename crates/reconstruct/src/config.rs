use alloy_primitives::{Address, BlockNumber};
use orbit_log_fetcher::FetchOptions;

/// The contracts of a rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollupAddresses {
    /// The rollup contract, holding the validators.
    pub rollup: Address,
    /// The sequencer inbox contract, holding the batch posters and keysets.
    pub sequencer_inbox: Address,
}

impl RollupAddresses {
    /// Returns a new instance of [`RollupAddresses`].
    pub const fn new(rollup: Address, sequencer_inbox: Address) -> Self {
        Self { rollup, sequencer_inbox }
    }
}

/// The configuration of a [`crate::Reconstructor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconstructionConfig {
    /// The options of the candidate log fetches.
    pub fetch: FetchOptions,
    /// The last block to replay. Defaults to the latest block of the chain.
    pub to_block: Option<BlockNumber>,
}

impl ReconstructionConfig {
    /// Sets the fetch options.
    pub const fn with_fetch_options(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }

    /// Sets the last block to replay.
    pub const fn with_to_block(mut self, to_block: BlockNumber) -> Self {
        self.to_block = Some(to_block);
        self
    }
}
