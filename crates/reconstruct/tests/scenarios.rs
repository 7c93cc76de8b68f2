//! End to end reconstructions over an in-memory chain history.
#![cfg(feature = "test-utils")]

use alloy_primitives::{address, Address, Bytes, LogData, TxHash, B256, U256};
use alloy_rpc_types_eth::Log;
use alloy_sol_types::{sol, SolCall, SolEvent};
use orbit_abi::{
    calls::{
        execTransactionCall, executeCallCall, rollup_creator_v1, rollup_creator_v2,
        setIsBatchPosterCall, setValidatorCall,
    },
    logs::{InvalidateKeyset, OwnerFunctionCalled, RollupInitialized, SetValidKeyset},
    OwnerFunction,
};
use orbit_log_fetcher::{
    test_utils::{log_at, MockProvider},
    FetchError, FetchOptions, RangeLogFetcher,
};
use orbit_primitives::{BlockRange, BlockRangeError, OperationKind, OrderingKey};
use orbit_reconstruct::{
    batch_poster_table, validator_table, ReconstructError, ReconstructionConfig, Reconstructor,
    RollupAddresses, SelectorTables,
};
use std::{collections::BTreeMap, num::NonZeroU64};

const ROLLUP: Address = address!("0x846387c3d6001f74170455b1074d01f05eb3067a");
const INBOX: Address = address!("0x995a9d3ca121d48d21087ede20bc8acb2398c8b1");
const EXECUTOR: Address = address!("0x3fffbadaf827559da092217e474760e2b2c3cedd");

sol! {
    /// A validator management call unknown to the default tables.
    #[derive(Debug)]
    function addValidators(address[] validators) external;
}

const EARLIEST_BLOCK: u64 = 1_000;
const LATEST_BLOCK: u64 = 50_000;
const DEPLOYMENT_BLOCK: u64 = 1_500;

fn tx_hash(n: u8) -> TxHash {
    B256::repeat_byte(n)
}

fn validators() -> Vec<Address> {
    (1..=10).map(Address::with_last_byte).collect()
}

fn max_time_variation() -> rollup_creator_v2::MaxTimeVariation {
    rollup_creator_v2::MaxTimeVariation {
        delayBlocks: U256::from(5_760),
        futureBlocks: U256::from(48),
        delaySeconds: U256::from(86_400),
        futureSeconds: U256::from(3_600),
    }
}

fn create_rollup_v2(validators: Vec<Address>, batch_posters: Vec<Address>) -> Vec<u8> {
    rollup_creator_v2::createRollupCall {
        deployParams: rollup_creator_v2::RollupDeploymentParams {
            config: rollup_creator_v2::Config {
                confirmPeriodBlocks: 45_818,
                extraChallengeTimeBlocks: 0,
                stakeToken: Address::ZERO,
                baseStake: U256::from(1),
                wasmModuleRoot: B256::repeat_byte(0x8b),
                owner: EXECUTOR,
                loserStakeEscrow: Address::ZERO,
                chainId: U256::from(412_346),
                chainConfig: String::from("{\"chainId\":412346}"),
                genesisBlockNum: 0,
                sequencerInboxMaxTimeVariation: max_time_variation(),
            },
            validators,
            maxDataSize: U256::from(117_964),
            nativeToken: Address::ZERO,
            deployFactoriesToL2: true,
            maxFeePerGasForRetryables: U256::from(100_000_000),
            batchPosters: batch_posters,
            batchPosterManager: Address::ZERO,
        },
    }
    .abi_encode()
}

fn create_rollup_v1(validators: Vec<Address>, batch_poster: Address) -> Vec<u8> {
    let variation = max_time_variation();
    rollup_creator_v1::createRollupCall {
        deployParams: rollup_creator_v1::RollupDeploymentParams {
            config: rollup_creator_v1::Config {
                confirmPeriodBlocks: 45_818,
                extraChallengeTimeBlocks: 0,
                stakeToken: Address::ZERO,
                baseStake: U256::from(1),
                wasmModuleRoot: B256::repeat_byte(0x8b),
                owner: EXECUTOR,
                loserStakeEscrow: Address::ZERO,
                chainId: U256::from(412_346),
                chainConfig: String::from("{\"chainId\":412346}"),
                genesisBlockNum: 0,
                sequencerInboxMaxTimeVariation: rollup_creator_v1::MaxTimeVariation {
                    delayBlocks: variation.delayBlocks,
                    futureBlocks: variation.futureBlocks,
                    delaySeconds: variation.delaySeconds,
                    futureSeconds: variation.futureSeconds,
                },
            },
            batchPoster: batch_poster,
            validators,
            maxDataSize: U256::from(117_964),
            nativeToken: Address::ZERO,
            deployFactoriesToL2: false,
            maxFeePerGasForRetryables: U256::from(100_000_000),
        },
    }
    .abi_encode()
}

fn set_validator(validator: Address, value: bool) -> Vec<u8> {
    setValidatorCall { validators: vec![validator], values: vec![value] }.abi_encode()
}

fn set_batch_poster(poster: Address, value: bool) -> Vec<u8> {
    setIsBatchPosterCall { addr: poster, isBatchPoster: value }.abi_encode()
}

fn through_executor(target: Address, calldata: Vec<u8>) -> Vec<u8> {
    executeCallCall { target, targetCallData: calldata.into() }.abi_encode()
}

fn through_safe(calldata: Vec<u8>) -> Vec<u8> {
    execTransactionCall {
        to: EXECUTOR,
        value: U256::ZERO,
        data: calldata.into(),
        operation: 0,
        safeTxGas: U256::ZERO,
        baseGas: U256::ZERO,
        gasPrice: U256::ZERO,
        gasToken: Address::ZERO,
        refundReceiver: Address::ZERO,
        signatures: Bytes::from_static(&[0x1; 65]),
    }
    .abi_encode()
}

fn owner_call(emitter: Address, function: OwnerFunction, hash: TxHash, key: OrderingKey) -> Log {
    log_at(emitter, &OwnerFunctionCalled { id: U256::from(function.id()) }, hash, key)
}

fn validator_call(hash: TxHash, key: OrderingKey) -> Log {
    owner_call(ROLLUP, OwnerFunction::SetValidator, hash, key)
}

fn poster_call(hash: TxHash, key: OrderingKey) -> Log {
    owner_call(INBOX, OwnerFunction::SetIsBatchPoster, hash, key)
}

/// The deployment transaction: it configures the roles through the owner functions before
/// initializing the rollup.
fn deployment_logs(hash: TxHash) -> Vec<Log> {
    vec![
        validator_call(hash, OrderingKey::new(DEPLOYMENT_BLOCK, 3, 10)),
        poster_call(hash, OrderingKey::new(DEPLOYMENT_BLOCK, 3, 11)),
        log_at(
            ROLLUP,
            &RollupInitialized {
                machineHash: B256::repeat_byte(0x8b),
                chainId: U256::from(412_346),
            },
            hash,
            OrderingKey::new(DEPLOYMENT_BLOCK, 3, 12),
        ),
    ]
}

fn reconstructor(provider: MockProvider) -> Reconstructor<MockProvider> {
    Reconstructor::new(
        RangeLogFetcher::new(provider, EARLIEST_BLOCK),
        RollupAddresses::new(ROLLUP, INBOX),
        ReconstructionConfig::default(),
    )
}

#[tokio::test]
async fn test_duplicate_validator_addition_is_idempotent() -> eyre::Result<()> {
    // Given
    let extra = Address::repeat_byte(0xee);
    let provider = MockProvider::new(LATEST_BLOCK)
        .with_logs(deployment_logs(tx_hash(0xd)))
        .with_logs(vec![
            validator_call(tx_hash(1), OrderingKey::new(2_000, 0, 0)),
            validator_call(tx_hash(2), OrderingKey::new(3_000, 1, 4)),
        ])
        .with_transaction(tx_hash(0xd), create_rollup_v2(validators(), vec![]))
        .with_transaction(tx_hash(1), set_validator(extra, true))
        .with_transaction(tx_hash(2), through_executor(ROLLUP, set_validator(extra, true)));

    // When
    let result = reconstructor(provider).validators().await?;

    // Then
    let mut expected = validators();
    expected.push(extra);
    assert_eq!(result.into_parts(), (expected, true));

    Ok(())
}

#[tokio::test]
async fn test_removing_unknown_validator_is_noop() -> eyre::Result<()> {
    // Given
    let provider = MockProvider::new(LATEST_BLOCK)
        .with_logs(deployment_logs(tx_hash(0xd)))
        .with_logs(vec![validator_call(tx_hash(1), OrderingKey::new(2_000, 0, 0))])
        .with_transaction(tx_hash(0xd), create_rollup_v2(validators(), vec![]))
        .with_transaction(tx_hash(1), set_validator(Address::repeat_byte(0xee), false));

    // When
    let result = reconstructor(provider).validators().await?;

    // Then
    assert_eq!(result.into_parts(), (validators(), true));

    Ok(())
}

#[tokio::test]
async fn test_unknown_selector_flags_batch_posters_incomplete() -> eyre::Result<()> {
    // Given
    let (first, second, seeded) =
        (Address::repeat_byte(0xa1), Address::repeat_byte(0xa2), Address::repeat_byte(0xa0));
    let provider = MockProvider::new(LATEST_BLOCK)
        .with_logs(deployment_logs(tx_hash(0xd)))
        .with_logs(vec![
            poster_call(tx_hash(1), OrderingKey::new(2_000, 0, 0)),
            poster_call(tx_hash(2), OrderingKey::new(2_001, 0, 0)),
            poster_call(tx_hash(3), OrderingKey::new(2_002, 0, 0)),
        ])
        .with_transaction(tx_hash(0xd), create_rollup_v1(validators(), seeded))
        .with_transaction(tx_hash(1), set_batch_poster(first, true))
        .with_transaction(tx_hash(2), vec![0xde, 0xad, 0xbe, 0xef, 0x00, 0x01])
        .with_transaction(
            tx_hash(3),
            through_safe(through_executor(INBOX, set_batch_poster(second, true))),
        );

    // When
    let result = reconstructor(provider).batch_posters().await?;

    // Then
    assert_eq!(result.into_parts(), (vec![seeded, first, second], false));

    Ok(())
}

#[tokio::test]
async fn test_candidates_are_replayed_in_chain_order() -> eyre::Result<()> {
    // Given
    let poster = Address::repeat_byte(0xa1);
    let provider = MockProvider::new(LATEST_BLOCK)
        .with_logs(deployment_logs(tx_hash(0xd)))
        .with_logs(vec![
            poster_call(tx_hash(2), OrderingKey::new(2_000, 7, 0)),
            poster_call(tx_hash(1), OrderingKey::new(2_000, 2, 0)),
        ])
        .with_transaction(tx_hash(0xd), create_rollup_v2(validators(), vec![]))
        .with_transaction(tx_hash(1), set_batch_poster(poster, true))
        .with_transaction(tx_hash(2), set_batch_poster(poster, false));

    // When
    let result = reconstructor(provider).batch_posters().await?;

    // Then
    assert_eq!(result.into_parts(), (vec![], true));

    Ok(())
}

#[tokio::test]
async fn test_missing_deployment_falls_back_to_earliest_block() -> eyre::Result<()> {
    // Given
    let extra = Address::repeat_byte(0xee);
    let deployment_hash = tx_hash(0xd);
    let provider = MockProvider::new(LATEST_BLOCK)
        .with_logs(
            deployment_logs(deployment_hash)
                .into_iter()
                .filter(|log| log.topics().first() != Some(&RollupInitialized::SIGNATURE_HASH)),
        )
        .with_logs(vec![validator_call(tx_hash(1), OrderingKey::new(2_000, 0, 0))])
        .with_transaction(
            deployment_hash,
            through_executor(ROLLUP, create_rollup_v2(validators(), vec![])),
        )
        .with_transaction(tx_hash(1), set_validator(extra, true));
    let reconstructor = reconstructor(provider);

    // When
    let result = reconstructor.validators().await?;

    // Then
    let mut expected = validators();
    expected.push(extra);
    assert_eq!(result.into_parts(), (expected, true));
    assert!(reconstructor
        .fetcher()
        .provider()
        .queries()
        .iter()
        .all(|range| range.from() == EARLIEST_BLOCK));

    Ok(())
}

#[tokio::test]
async fn test_batched_fallback_reconstructs_the_same_validators() -> eyre::Result<()> {
    // Given
    let extra = Address::repeat_byte(0xee);
    let history = || {
        MockProvider::new(LATEST_BLOCK)
            .with_logs(deployment_logs(tx_hash(0xd)))
            .with_logs(vec![
                validator_call(tx_hash(1), OrderingKey::new(12_000, 0, 0)),
                validator_call(tx_hash(2), OrderingKey::new(48_000, 0, 0)),
            ])
            .with_transaction(tx_hash(0xd), create_rollup_v2(validators(), vec![]))
            .with_transaction(tx_hash(1), set_validator(extra, true))
            .with_transaction(tx_hash(2), set_validator(validators()[0], false))
    };
    let batched = Reconstructor::new(
        RangeLogFetcher::new(history().with_max_block_span(5_000), EARLIEST_BLOCK),
        RollupAddresses::new(ROLLUP, INBOX),
        ReconstructionConfig::default().with_fetch_options(
            FetchOptions::default().with_batch_size(NonZeroU64::new(5_000).expect("non zero")),
        ),
    );

    // When
    let single = reconstructor(history()).validators().await?;
    let windowed = batched.validators().await?;

    // Then
    assert_eq!(single, windowed);
    assert_eq!(windowed.items().last(), Some(&extra));
    assert!(!windowed.items().contains(&validators()[0]));
    assert!(batched.fetcher().provider().queries().len() > 3);

    Ok(())
}

#[tokio::test]
async fn test_transaction_lookup_failure_is_fatal() -> eyre::Result<()> {
    // Given
    let history = || {
        MockProvider::new(LATEST_BLOCK)
            .with_logs(deployment_logs(tx_hash(0xd)))
            .with_logs(vec![validator_call(tx_hash(1), OrderingKey::new(2_000, 0, 0))])
            .with_transaction(tx_hash(0xd), create_rollup_v2(validators(), vec![]))
    };
    let failing = history()
        .with_transaction(tx_hash(1), set_validator(Address::repeat_byte(0xee), true))
        .with_failing_transaction(tx_hash(1));

    // When
    let failed = reconstructor(failing).validators().await;
    let missing = reconstructor(history()).validators().await;

    // Then
    assert!(matches!(failed, Err(ReconstructError::ProviderRpc(_))));
    assert!(matches!(
        missing,
        Err(ReconstructError::MissingTransaction(hash)) if hash == tx_hash(1)
    ));

    Ok(())
}

#[tokio::test]
async fn test_window_failure_is_fatal() -> eyre::Result<()> {
    // Given
    let provider = MockProvider::new(LATEST_BLOCK)
        .with_logs(deployment_logs(tx_hash(0xd)))
        .with_transaction(tx_hash(0xd), create_rollup_v2(validators(), vec![]))
        .with_max_block_span(9_999)
        .with_failing_range(BlockRange::single(30_000));

    // When
    let result = reconstructor(provider).validators().await;

    // Then
    assert!(matches!(result, Err(ReconstructError::Fetch(_))));

    Ok(())
}

#[tokio::test]
async fn test_keysets_follow_set_and_invalidate_events() -> eyre::Result<()> {
    // Given
    let (a, b) = (B256::repeat_byte(0xa), B256::repeat_byte(0xb));
    let set = |hash: B256, bytes: &'static [u8]| SetValidKeyset {
        keysetHash: hash,
        keysetBytes: Bytes::from_static(bytes),
    };
    let provider = MockProvider::new(LATEST_BLOCK)
        .with_logs(deployment_logs(tx_hash(0xd)))
        .with_logs(vec![
            log_at(INBOX, &set(a, &[0x1, 0x2]), tx_hash(1), OrderingKey::new(2_000, 0, 0)),
            log_at(INBOX, &set(b, &[0x3]), tx_hash(2), OrderingKey::new(2_100, 0, 0)),
            log_at(INBOX, &set(a, &[0x4]), tx_hash(3), OrderingKey::new(2_200, 0, 0)),
            log_at(
                INBOX,
                &InvalidateKeyset { keysetHash: b },
                tx_hash(4),
                OrderingKey::new(2_300, 0, 0),
            ),
        ]);

    // When
    let result = reconstructor(provider).keysets().await?;

    // Then
    assert_eq!(result.into_parts(), (BTreeMap::from([(a, Bytes::from_static(&[0x4]))]), true));

    Ok(())
}

#[tokio::test]
async fn test_malformed_keyset_log_flags_keysets_incomplete() -> eyre::Result<()> {
    // Given
    let a = B256::repeat_byte(0xa);
    let malformed = Log {
        inner: alloy_primitives::Log {
            address: INBOX,
            data: LogData::new_unchecked(
                vec![SetValidKeyset::SIGNATURE_HASH, B256::repeat_byte(0xc)],
                Bytes::from_static(&[0x1, 0x2, 0x3]),
            ),
        },
        block_number: Some(2_100),
        transaction_index: Some(0),
        log_index: Some(0),
        transaction_hash: Some(tx_hash(2)),
        ..Default::default()
    };
    let provider = MockProvider::new(LATEST_BLOCK).with_logs(vec![
        log_at(
            INBOX,
            &SetValidKeyset { keysetHash: a, keysetBytes: Bytes::from_static(&[0x1]) },
            tx_hash(1),
            OrderingKey::new(2_000, 0, 0),
        ),
        malformed,
    ]);

    // When
    let result = reconstructor(provider).keysets().await?;

    // Then
    assert_eq!(result.into_parts(), (BTreeMap::from([(a, Bytes::from_static(&[0x1]))]), false));

    Ok(())
}

#[tokio::test]
async fn test_zero_batch_poster_of_rollup_creator_v1_is_not_seeded() -> eyre::Result<()> {
    // Given
    let provider = MockProvider::new(LATEST_BLOCK)
        .with_logs(deployment_logs(tx_hash(0xd)))
        .with_transaction(tx_hash(0xd), create_rollup_v1(validators(), Address::ZERO));

    // When
    let result = reconstructor(provider).batch_posters().await?;

    // Then
    assert_eq!(result.into_parts(), (vec![], true));

    Ok(())
}

#[tokio::test]
async fn test_new_call_only_needs_a_table_entry() -> eyre::Result<()> {
    // Given
    let extra = Address::repeat_byte(0xee);
    let history = || {
        MockProvider::new(LATEST_BLOCK)
            .with_logs(deployment_logs(tx_hash(0xd)))
            .with_logs(vec![validator_call(tx_hash(1), OrderingKey::new(2_000, 0, 0))])
            .with_transaction(tx_hash(0xd), create_rollup_v2(validators(), vec![]))
            .with_transaction(
                tx_hash(1),
                through_executor(ROLLUP, addValidatorsCall { validators: vec![extra] }.abi_encode()),
            )
    };
    let tables = SelectorTables {
        validators: validator_table().with_terminal::<addValidatorsCall, _>(|call| {
            Ok(call.validators.into_iter().map(OperationKind::AddValidator).collect())
        }),
        batch_posters: batch_poster_table(),
    };

    // When
    let default = reconstructor(history()).validators().await?;
    let extended = reconstructor(history()).with_tables(tables).validators().await?;

    // Then
    assert_eq!(default.into_parts(), (validators(), false));
    let mut expected = validators();
    expected.push(extra);
    assert_eq!(extended.into_parts(), (expected, true));

    Ok(())
}

#[tokio::test]
async fn test_end_block_before_earliest_block_is_an_error() -> eyre::Result<()> {
    // Given
    let reconstructor = Reconstructor::new(
        RangeLogFetcher::new(MockProvider::new(LATEST_BLOCK), EARLIEST_BLOCK),
        RollupAddresses::new(ROLLUP, INBOX),
        ReconstructionConfig::default().with_to_block(500),
    );

    // When
    let result = reconstructor.validators().await;

    // Then
    assert!(matches!(
        result,
        Err(ReconstructError::Fetch(FetchError::Range(BlockRangeError::Inverted {
            from: EARLIEST_BLOCK,
            to: 500
        })))
    ));
    assert!(reconstructor.fetcher().provider().queries().is_empty());

    Ok(())
}
