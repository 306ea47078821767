use std::collections::HashMap;

use crate::search::engine::{Indexer, SearchResult};

/// Ranked AND: keeps ordinals matched by every distinct term, ranked by
/// distinct-term hit count. Emits `hits desc, id asc` (spec.md §4.3.1,
/// fixing the original's unstable tie order — see DESIGN.md Open Question
/// 3).
pub fn search(terms: &[String], indexer: &dyn Indexer) -> Vec<SearchResult> {
    let distinct: std::collections::HashSet<&String> = terms.iter().collect();
    let threshold = distinct.len();
    if threshold == 0 {
        return Vec::new();
    }

    let mut hits: HashMap<u32, u32> = HashMap::new();
    for term in distinct {
        for ordinal in indexer.postings(term) {
            *hits.entry(ordinal).or_insert(0) += 1;
        }
    }

    let mut results: Vec<SearchResult> = hits
        .into_iter()
        .filter(|(_, count)| *count as usize >= threshold)
        .map(|(ordinal, _)| SearchResult {
            document: indexer.document(ordinal),
            hits: threshold as u32,
        })
        .collect();

    results.sort_by(|a, b| b.hits.cmp(&a.hits).then_with(|| a.document.id.cmp(&b.document.id)));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Document;

    struct FakeIndexer {
        docs: Vec<Document>,
        postings: HashMap<String, Vec<u32>>,
    }

    impl Indexer for FakeIndexer {
        fn postings(&self, term: &str) -> Vec<u32> {
            self.postings.get(term).cloned().unwrap_or_default()
        }

        fn document(&self, ordinal: u32) -> Document {
            self.docs[ordinal as usize].clone()
        }

        fn len(&self) -> usize {
            self.docs.len()
        }
    }

    #[test]
    fn empty_terms_return_empty() {
        let indexer = FakeIndexer {
            docs: vec![],
            postings: HashMap::new(),
        };
        assert!(search(&[], &indexer).is_empty());
    }

    #[test]
    fn missing_term_excludes_all() {
        let indexer = FakeIndexer {
            docs: vec![Document::new("a", "x")],
            postings: HashMap::new(),
        };
        let results = search(&["java".to_string()], &indexer);
        assert!(results.is_empty());
    }

    #[test]
    fn ties_break_by_id_ascending() {
        let mut postings = HashMap::new();
        postings.insert("x".to_string(), vec![0, 1]);
        let indexer = FakeIndexer {
            docs: vec![Document::new("b", ""), Document::new("a", "")],
            postings,
        };
        let results = search(&["x".to_string()], &indexer);
        assert_eq!(results[0].document.id, "a");
        assert_eq!(results[1].document.id, "b");
    }
}
