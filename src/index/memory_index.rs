use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::analysis::analyzer::Analyzer;
use crate::core::types::{DocRequest, Document};
use crate::index::posting::PostingList;
use crate::search::engine::Engine;

/// A single named index: a dense document table plus per-term posting
/// lists, guarded by one reader-writer lock. `Put` takes the lock
/// exclusively; every other operation takes it shared, including the
/// duration of a search engine's traversal.
pub struct MemoryIndex {
    name: String,
    analyzer: Arc<Analyzer>,
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    docs: Vec<Document>,
    postings: HashMap<String, PostingList>,
}

impl MemoryIndex {
    pub fn new(name: impl Into<String>, analyzer: Arc<Analyzer>) -> Self {
        MemoryIndex {
            name: name.into(),
            analyzer,
            state: RwLock::new(State::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Analyzes `req.statement`, appends `(req.id, req.raw)` to the
    /// document table, and pushes the new ordinal onto every distinct
    /// term's posting list.
    pub fn put(&self, req: DocRequest) {
        let terms = self.analyzer.analyze(&req.statement);
        let mut state = self.state.write();
        let ordinal = state.docs.len() as u32;
        state.docs.push(Document::new(req.id, req.raw));

        for term in terms {
            state
                .postings
                .entry(term.text)
                .or_insert_with(PostingList::new)
                .push_unique(ordinal);
        }
    }

    /// Analyzes `query` with the same pipeline used for writes and
    /// delegates to `engine`. The shared lock is held for the whole
    /// traversal so the view `engine` sees is internally consistent.
    pub fn search(&self, query: &str, engine: Engine) -> Vec<crate::search::engine::SearchResult> {
        let terms: Vec<String> = self
            .analyzer
            .analyze(query)
            .into_iter()
            .map(|t| t.text)
            .collect();
        let state = self.state.read();
        let indexer = StateIndexer(&state);
        engine.run(&terms, &indexer)
    }

    pub fn indexed(&self, term: &str) -> Option<Vec<u32>> {
        let state = self.state.read();
        state.postings.get(term).map(|p| p.as_slice().to_vec())
    }

    pub fn document(&self, ordinal: u32) -> Document {
        let state = self.state.read();
        state.docs[ordinal as usize].clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A read-only view over a locked `State`, handed to a search engine for
/// the duration of one traversal. Engines never see the lock itself.
struct StateIndexer<'a>(&'a State);

impl crate::search::engine::Indexer for StateIndexer<'_> {
    fn postings(&self, term: &str) -> Vec<u32> {
        self.0
            .postings
            .get(term)
            .map(|p| p.as_slice().to_vec())
            .unwrap_or_default()
    }

    fn document(&self, ordinal: u32) -> Document {
        self.0.docs[ordinal as usize].clone()
    }

    fn len(&self) -> usize {
        self.0.docs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::engine::Engine;

    fn index() -> MemoryIndex {
        let idx = MemoryIndex::new("courses", Arc::new(Analyzer::spanish()));
        idx.put(DocRequest::new("/c/java", "Curso de programacion en Java"));
        idx.put(DocRequest::new("/c/php", "Curso de programacion en PHP"));
        idx
    }

    #[test]
    fn single_token_hit() {
        let idx = index();
        let results = idx.search("java", Engine::Hits);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.id, "/c/java");
        assert_eq!(results[0].hits, 1);
    }

    #[test]
    fn multi_token_and() {
        let idx = index();
        let results = idx.search("programacion java", Engine::Hits);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.id, "/c/java");
        assert_eq!(results[0].hits, 2);
    }

    #[test]
    fn repeated_term_in_statement_dedupes_to_one_posting() {
        let idx = MemoryIndex::new("repeat", Arc::new(Analyzer::spanish()));
        idx.put(DocRequest::new("d1", "java java java"));
        assert_eq!(idx.indexed("java").unwrap(), vec![0]);
    }
}
