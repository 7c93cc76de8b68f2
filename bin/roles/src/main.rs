//! Prints the current validators, batch posters or keysets of an Orbit rollup.

mod args;
use args::{Command, RolesArgs};

use alloy_primitives::Address;
use alloy_provider::{Provider, ProviderBuilder};
use clap::Parser;
use orbit_log_fetcher::{FetchOptions, RangeLogFetcher};
use orbit_primitives::{earliest_block_for_chain, ReconstructionResult};
use orbit_reconstruct::{ReconstructionConfig, Reconstructor, RollupAddresses};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = RolesArgs::parse();
    let provider = ProviderBuilder::new().connect(&args.rpc_url).await?;

    let earliest_block = match args.earliest_block {
        Some(block) => block,
        None => {
            let chain_id = provider.get_chain_id().await?;
            earliest_block_for_chain(chain_id).unwrap_or_else(|| {
                tracing::warn!(target: "orbit::roles", chain_id, "unknown chain, scanning from genesis");
                0
            })
        }
    };

    let mut config = ReconstructionConfig::default()
        .with_fetch_options(FetchOptions::default().with_batch_size(args.batch_size));
    if let Some(to_block) = args.to_block {
        config = config.with_to_block(to_block);
    }

    let reconstructor = Reconstructor::new(
        RangeLogFetcher::new(provider, earliest_block),
        RollupAddresses::new(args.rollup, args.sequencer_inbox),
        config,
    );

    match args.command {
        Command::Validators => print_members(reconstructor.validators().await?),
        Command::BatchPosters => print_members(reconstructor.batch_posters().await?),
        Command::Keysets => {
            let (keysets, is_complete) = reconstructor.keysets().await?.into_parts();
            for (hash, bytes) in keysets {
                println!("{hash} {bytes}");
            }
            print_completeness(is_complete);
        }
    }

    Ok(())
}

fn print_members(result: ReconstructionResult<Vec<Address>>) {
    let (members, is_complete) = result.into_parts();
    for member in members {
        println!("{member}");
    }
    print_completeness(is_complete);
}

fn print_completeness(is_complete: bool) {
    if !is_complete {
        eprintln!("warning: part of the history could not be decoded, the list may be incomplete");
    }
}
