//! Reconstruction of the current roles and keysets of an Orbit rollup by replaying its chain
//! history.

pub use config::{ReconstructionConfig, RollupAddresses};
mod config;

pub use deployment::{find_deployment, Deployment};
mod deployment;

pub use engine::{Keysets, Membership, ReplayEngine, ReplayState};
mod engine;

pub use error::{ReconstructError, ReconstructResult};
mod error;

pub use metrics::ReconstructMetrics;
mod metrics;

pub use reconstructor::Reconstructor;
mod reconstructor;

pub use tables::{batch_poster_table, validator_table, SelectorTables};
mod tables;
