use crate::core::types::Document;
use crate::search::{hits, linear, noop};

/// A read-only view into one index's postings and document table, handed
/// to an engine for the duration of a single traversal. Engines never
/// mutate what they see here.
pub trait Indexer {
    fn postings(&self, term: &str) -> Vec<u32>;

    fn document(&self, ordinal: u32) -> Document;

    fn len(&self) -> usize;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub document: Document,
    pub hits: u32,
}

/// The engine tag carried on the wire (spec.md §4.3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    NoopZero,
    NoopAll,
    Hits,
    SmartHits,
    Linear,
}

impl Engine {
    pub fn from_wire(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Engine::NoopZero),
            1 => Some(Engine::NoopAll),
            2 => Some(Engine::Hits),
            3 => Some(Engine::SmartHits),
            4 => Some(Engine::Linear),
            _ => None,
        }
    }

    pub fn to_wire(self) -> u8 {
        match self {
            Engine::NoopZero => 0,
            Engine::NoopAll => 1,
            Engine::Hits => 2,
            Engine::SmartHits => 3,
            Engine::Linear => 4,
        }
    }

    /// Runs this engine against `terms` over `indexer`. Pure with respect
    /// to `indexer`'s state and deterministic for the same inputs.
    pub fn run(self, terms: &[String], indexer: &dyn Indexer) -> Vec<SearchResult> {
        match self {
            Engine::NoopZero => noop::zero(),
            Engine::NoopAll => noop::all(indexer),
            // SmartHits is result-equivalent to Hits; no concurrency
            // threshold is reproduced (DESIGN.md Open Question 4).
            Engine::Hits | Engine::SmartHits => hits::search(terms, indexer),
            Engine::Linear => linear::search(terms, indexer),
        }
    }
}
