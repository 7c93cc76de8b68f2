//! Primitive types for Orbit chain history reconstruction.

pub use block::{BlockRange, WindowsRev};
mod block;

pub use chain::*;
mod chain;

pub use error::BlockRangeError;
mod error;

pub use operation::{Operation, OperationKind};
mod operation;

pub use ordered_set::OrderedSet;
mod ordered_set;

pub use result::ReconstructionResult;
mod result;

pub use transaction::{OrderedTransaction, OrderingKey};
mod transaction;
