use crate::DecodeError;

use alloy_primitives::{Bytes, Selector};
use alloy_sol_types::SolCall;
use orbit_primitives::OperationKind;
use std::{collections::HashMap, fmt};

/// Decodes the full calldata of a recognized call into operations.
pub type TerminalDecoder =
    Box<dyn Fn(&[u8]) -> Result<Vec<OperationKind>, DecodeError> + Send + Sync>;

/// Extracts the calldata embedded in the full calldata of a delegation call.
pub type WrapperUnwrapper = Box<dyn Fn(&[u8]) -> Result<Bytes, DecodeError> + Send + Sync>;

/// What to do with a call, by selector.
pub enum SelectorEntry {
    /// The call itself carries the operations.
    Terminal(TerminalDecoder),
    /// The call delegates to an embedded call, which is decoded in turn.
    Wrapper(WrapperUnwrapper),
}

impl fmt::Debug for SelectorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(_) => write!(f, "Terminal"),
            Self::Wrapper(_) => write!(f, "Wrapper"),
        }
    }
}

/// A mapping from function selectors to the way calls with that selector are decoded. Supporting
/// a new protocol version means registering its calls, not changing the decoder.
#[derive(Debug, Default)]
pub struct SelectorTable {
    entries: HashMap<Selector, SelectorEntry>,
}

impl SelectorTable {
    /// Returns an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the call `C` as a terminal call, whose decoded arguments are turned into
    /// operations by `decoder`.
    pub fn with_terminal<C, F>(mut self, decoder: F) -> Self
    where
        C: SolCall + 'static,
        F: Fn(C) -> Result<Vec<OperationKind>, DecodeError> + Send + Sync + 'static,
    {
        let entry = SelectorEntry::Terminal(Box::new(
            move |calldata: &[u8]| -> Result<Vec<OperationKind>, DecodeError> {
                decoder(C::abi_decode(calldata)?)
            },
        ));
        self.entries.insert(C::SELECTOR.into(), entry);
        self
    }

    /// Registers the call `C` as a delegation call, whose embedded calldata is extracted by
    /// `unwrapper`.
    pub fn with_wrapper<C, F>(mut self, unwrapper: F) -> Self
    where
        C: SolCall + 'static,
        F: Fn(C) -> Bytes + Send + Sync + 'static,
    {
        let entry = SelectorEntry::Wrapper(Box::new(
            move |calldata: &[u8]| -> Result<Bytes, DecodeError> {
                Ok(unwrapper(C::abi_decode(calldata)?))
            },
        ));
        self.entries.insert(C::SELECTOR.into(), entry);
        self
    }

    /// Returns the entry registered for the selector, if any.
    pub fn get(&self, selector: &Selector) -> Option<&SelectorEntry> {
        self.entries.get(selector)
    }
}
