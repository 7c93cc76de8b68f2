//! Calls whose calldata carries role changes, and the delegation calls wrapping them.
#![allow(missing_docs)]

use alloy_sol_types::sol;

sol! {
    /// Allows or disallows validators on the rollup, one flag per validator.
    #[derive(Debug, PartialEq, Eq)]
    function setValidator(address[] validators, bool[] values) external;

    /// Allows or disallows a batch poster on the sequencer inbox.
    #[derive(Debug, PartialEq, Eq)]
    function setIsBatchPoster(address addr, bool isBatchPoster) external;

    /// Executes a call on `target` from the upgrade executor.
    #[derive(Debug, PartialEq, Eq)]
    function executeCall(address target, bytes targetCallData) external payable;

    /// Executes a transaction from a multisig wallet.
    #[derive(Debug, PartialEq, Eq)]
    function execTransaction(
        address to,
        uint256 value,
        bytes data,
        uint8 operation,
        uint256 safeTxGas,
        uint256 baseGas,
        uint256 gasPrice,
        address gasToken,
        address refundReceiver,
        bytes signatures
    ) external payable returns (bool success);
}

/// The rollup deployment call of the rollup creator v1.1, which takes a single batch poster.
pub mod rollup_creator_v1 {
    use alloy_sol_types::sol;

    sol! {
        #[derive(Debug, PartialEq, Eq)]
        struct MaxTimeVariation {
            uint256 delayBlocks;
            uint256 futureBlocks;
            uint256 delaySeconds;
            uint256 futureSeconds;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct Config {
            uint64 confirmPeriodBlocks;
            uint64 extraChallengeTimeBlocks;
            address stakeToken;
            uint256 baseStake;
            bytes32 wasmModuleRoot;
            address owner;
            address loserStakeEscrow;
            uint256 chainId;
            string chainConfig;
            uint64 genesisBlockNum;
            MaxTimeVariation sequencerInboxMaxTimeVariation;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct RollupDeploymentParams {
            Config config;
            address batchPoster;
            address[] validators;
            uint256 maxDataSize;
            address nativeToken;
            bool deployFactoriesToL2;
            uint256 maxFeePerGasForRetryables;
        }

        /// Deploys a new rollup.
        #[derive(Debug, PartialEq, Eq)]
        function createRollup(RollupDeploymentParams deployParams) external payable returns (address);
    }
}

/// The rollup deployment call of the rollup creator v2.1, which takes a list of batch posters.
pub mod rollup_creator_v2 {
    use alloy_sol_types::sol;

    sol! {
        #[derive(Debug, PartialEq, Eq)]
        struct MaxTimeVariation {
            uint256 delayBlocks;
            uint256 futureBlocks;
            uint256 delaySeconds;
            uint256 futureSeconds;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct Config {
            uint64 confirmPeriodBlocks;
            uint64 extraChallengeTimeBlocks;
            address stakeToken;
            uint256 baseStake;
            bytes32 wasmModuleRoot;
            address owner;
            address loserStakeEscrow;
            uint256 chainId;
            string chainConfig;
            uint64 genesisBlockNum;
            MaxTimeVariation sequencerInboxMaxTimeVariation;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct RollupDeploymentParams {
            Config config;
            address[] validators;
            uint256 maxDataSize;
            address nativeToken;
            bool deployFactoriesToL2;
            uint256 maxFeePerGasForRetryables;
            address[] batchPosters;
            address batchPosterManager;
        }

        /// Deploys a new rollup.
        #[derive(Debug, PartialEq, Eq)]
        function createRollup(RollupDeploymentParams deployParams) external payable returns (address);
    }
}
