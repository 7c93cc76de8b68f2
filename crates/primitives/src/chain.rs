use alloy_chains::{Chain, NamedChain};
use alloy_primitives::BlockNumber;

/// The earliest block at which a rollup creator was deployed on Ethereum mainnet.
pub const MAINNET_EARLIEST_BLOCK_NUMBER: BlockNumber = 18_706_000;

/// The earliest block at which a rollup creator was deployed on Arbitrum One.
pub const ARBITRUM_ONE_EARLIEST_BLOCK_NUMBER: BlockNumber = 150_000_000;

/// The earliest block at which a rollup creator was deployed on Arbitrum Nova.
pub const ARBITRUM_NOVA_EARLIEST_BLOCK_NUMBER: BlockNumber = 31_000_000;

/// The earliest block at which a rollup creator was deployed on Base.
pub const BASE_EARLIEST_BLOCK_NUMBER: BlockNumber = 12_000_000;

/// The earliest block at which a rollup creator was deployed on Sepolia.
pub const SEPOLIA_EARLIEST_BLOCK_NUMBER: BlockNumber = 4_741_823;

/// The earliest block at which a rollup creator was deployed on Holesky.
pub const HOLESKY_EARLIEST_BLOCK_NUMBER: BlockNumber = 1_183_682;

/// The earliest block at which a rollup creator was deployed on Arbitrum Sepolia.
pub const ARBITRUM_SEPOLIA_EARLIEST_BLOCK_NUMBER: BlockNumber = 654_628;

/// The earliest block at which a rollup creator was deployed on Base Sepolia.
pub const BASE_SEPOLIA_EARLIEST_BLOCK_NUMBER: BlockNumber = 1_000_000;

/// Returns the earliest block that can hold rollup history for the chain, if the chain is known.
///
/// Scanning from this block instead of genesis bounds the cost of whole-history searches.
pub fn earliest_block_for_chain(chain_id: u64) -> Option<BlockNumber> {
    let number = match Chain::from_id(chain_id).named()? {
        NamedChain::Mainnet => MAINNET_EARLIEST_BLOCK_NUMBER,
        NamedChain::Arbitrum => ARBITRUM_ONE_EARLIEST_BLOCK_NUMBER,
        NamedChain::ArbitrumNova => ARBITRUM_NOVA_EARLIEST_BLOCK_NUMBER,
        NamedChain::Base => BASE_EARLIEST_BLOCK_NUMBER,
        NamedChain::Sepolia => SEPOLIA_EARLIEST_BLOCK_NUMBER,
        NamedChain::Holesky => HOLESKY_EARLIEST_BLOCK_NUMBER,
        NamedChain::ArbitrumSepolia => ARBITRUM_SEPOLIA_EARLIEST_BLOCK_NUMBER,
        NamedChain::BaseSepolia => BASE_SEPOLIA_EARLIEST_BLOCK_NUMBER,
        _ => return None,
    };
    Some(number)
}
