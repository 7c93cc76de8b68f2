use alloy_primitives::{Address, BlockNumber};
use orbit_log_fetcher::DEFAULT_BATCH_SIZE;
use std::num::NonZeroU64;

/// Reconstructs the current roles of an Orbit rollup from its parent chain history.
#[derive(Debug, clap::Parser)]
#[command(name = "orbit-roles", version, about)]
pub(crate) struct RolesArgs {
    /// The parent chain RPC URL.
    #[arg(long = "rpc-url", env = "ORBIT_RPC_URL", value_name = "URL")]
    pub(crate) rpc_url: String,
    /// The rollup contract.
    #[arg(long, env = "ORBIT_ROLLUP", value_name = "ADDRESS")]
    pub(crate) rollup: Address,
    /// The sequencer inbox contract.
    #[arg(long = "sequencer-inbox", env = "ORBIT_SEQUENCER_INBOX", value_name = "ADDRESS")]
    pub(crate) sequencer_inbox: Address,
    /// The first block to scan. Defaults to the known earliest block of the parent chain.
    #[arg(long = "earliest-block", value_name = "BLOCK")]
    pub(crate) earliest_block: Option<BlockNumber>,
    /// The last block to replay. Defaults to the latest block.
    #[arg(long = "to-block", value_name = "BLOCK")]
    pub(crate) to_block: Option<BlockNumber>,
    /// The amount of blocks per query once the provider rejects a whole range query.
    #[arg(long = "batch-size", default_value_t = DEFAULT_BATCH_SIZE)]
    pub(crate) batch_size: NonZeroU64,
    /// What to reconstruct.
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// The reconstructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::Subcommand)]
pub(crate) enum Command {
    /// The validators of the rollup.
    Validators,
    /// The batch posters of the sequencer inbox.
    BatchPosters,
    /// The valid data availability keysets of the sequencer inbox.
    Keysets,
}
