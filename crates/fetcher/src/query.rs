use alloy_primitives::{Address, B256};
use alloy_rpc_types_eth::{Filter, Log};
use alloy_sol_types::SolEvent;
use orbit_primitives::BlockRange;

/// Selects the events a [`LogQuery`] matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFilter {
    /// A single event, optionally restricted on the value of its first indexed argument.
    Event {
        /// The signature hash of the event.
        signature: B256,
        /// The expected value of the first indexed argument.
        indexed: Option<B256>,
    },
    /// Any of the listed events.
    Events(Vec<B256>),
}

impl EventFilter {
    /// Returns a filter on the event `E`.
    pub const fn event<E: SolEvent>() -> Self {
        Self::Event { signature: E::SIGNATURE_HASH, indexed: None }
    }

    /// Returns a filter on the event `E` whose first indexed argument equals `value`.
    pub const fn event_with_indexed<E: SolEvent>(value: B256) -> Self {
        Self::Event { signature: E::SIGNATURE_HASH, indexed: Some(value) }
    }

    /// Returns a filter on any of the provided event signatures.
    pub const fn events(signatures: Vec<B256>) -> Self {
        Self::Events(signatures)
    }

    /// Returns true if the log topics match the filter.
    pub fn matches(&self, topics: &[B256]) -> bool {
        match self {
            Self::Event { signature, indexed } => {
                topics.first() == Some(signature) &&
                    indexed.as_ref().is_none_or(|value| topics.get(1) == Some(value))
            }
            Self::Events(signatures) => topics.first().is_some_and(|t| signatures.contains(t)),
        }
    }
}

/// A log query on a set of contracts for a range of blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// The emitting contracts.
    pub addresses: Vec<Address>,
    /// The events to match.
    pub events: EventFilter,
    /// The blocks to query.
    pub range: BlockRange,
}

impl LogQuery {
    /// Returns a new instance of [`LogQuery`].
    pub const fn new(addresses: Vec<Address>, events: EventFilter, range: BlockRange) -> Self {
        Self { addresses, events, range }
    }

    /// Returns the same query restricted to the provided range.
    pub fn with_range(&self, range: BlockRange) -> Self {
        Self { addresses: self.addresses.clone(), events: self.events.clone(), range }
    }

    /// Returns true if the log was emitted by one of the contracts, matches the events and sits in
    /// the range.
    pub fn matches(&self, log: &Log) -> bool {
        (self.addresses.is_empty() || self.addresses.contains(&log.address())) &&
            self.events.matches(log.topics()) &&
            log.block_number.is_some_and(|number| self.range.contains(number))
    }
}

impl From<&LogQuery> for Filter {
    fn from(query: &LogQuery) -> Self {
        let filter = Self::new()
            .address(query.addresses.clone())
            .from_block(query.range.from())
            .to_block(query.range.to());

        match &query.events {
            EventFilter::Event { signature, indexed: None } => filter.event_signature(*signature),
            EventFilter::Event { signature, indexed: Some(value) } => {
                filter.event_signature(*signature).topic1(*value)
            }
            EventFilter::Events(signatures) => filter.event_signature(signatures.clone()),
        }
    }
}
