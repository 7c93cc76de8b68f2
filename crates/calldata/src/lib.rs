//! Selector driven calldata decoding into role operations.

pub use decoder::{decode, decode_transaction, Decoded};
mod decoder;

pub use error::{DecodeError, DecodeFailure};
mod error;

pub use table::{SelectorEntry, SelectorTable, TerminalDecoder, WrapperUnwrapper};
mod table;

pub use wrappers::zip_toggles;
mod wrappers;
