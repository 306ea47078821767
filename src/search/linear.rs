use crate::search::engine::{Indexer, SearchResult};

/// Two-pointer intersection of two ascending posting lists.
fn intersection(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut result = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] < b[j] {
            i += 1;
        } else if a[i] > b[j] {
            j += 1;
        } else {
            result.push(a[i]);
            i += 1;
            j += 1;
        }
    }
    result
}

/// Set-intersection AND over the ascending posting lists of `terms`. A
/// missing term always matches zero documents, so any missing term empties
/// the result immediately.
pub fn search(terms: &[String], indexer: &dyn Indexer) -> Vec<SearchResult> {
    if terms.is_empty() {
        return Vec::new();
    }

    let mut ordinals: Option<Vec<u32>> = None;
    for term in terms {
        let postings = indexer.postings(term);
        if postings.is_empty() {
            return Vec::new();
        }
        ordinals = Some(match ordinals {
            None => postings,
            Some(acc) => {
                let merged = intersection(&acc, &postings);
                if merged.is_empty() {
                    return Vec::new();
                }
                merged
            }
        });
    }

    let hits = terms.len() as u32;
    ordinals
        .unwrap_or_default()
        .into_iter()
        .map(|ordinal| SearchResult {
            document: indexer.document(ordinal),
            hits,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Document;
    use std::collections::HashMap;

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
    fn intersects_ascending_postings() {
        let mut postings = HashMap::new();
        postings.insert("a".to_string(), vec![0, 1, 2]);
        postings.insert("b".to_string(), vec![1, 2, 3]);
        let indexer = FakeIndexer {
            docs: vec![
                Document::new("d0", ""),
                Document::new("d1", ""),
                Document::new("d2", ""),
                Document::new("d3", ""),
            ],
            postings,
        };
        let results = search(&["a".to_string(), "b".to_string()], &indexer);
        let ids: Vec<&str> = results.iter().map(|r| r.document.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d2"]);
    }

    #[test]
    fn missing_term_empties_result() {
        let indexer = FakeIndexer {
            docs: vec![],
            postings: HashMap::new(),
        };
        let results = search(&["missing".to_string()], &indexer);
        assert!(results.is_empty());
    }
}
