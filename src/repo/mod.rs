use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::task::JoinSet;

use crate::analysis::analyzer::Analyzer;
use crate::core::error::{Error, Result};
use crate::core::types::DocRequest;
use crate::index::memory_index::MemoryIndex;
use crate::search::engine::{Engine, SearchResult};

/// Named indices plus an alias-to-set-of-indices table, each guarded by its
/// own reader-writer lock. Lock acquisition order, whenever both are
/// needed, is always indices before aliases.
pub struct IndexRepo {
    indices: RwLock<HashMap<String, Arc<MemoryIndex>>>,
    aliases: RwLock<HashMap<String, Vec<String>>>,
    analyzer: Arc<Analyzer>,
}

impl IndexRepo {
    pub fn new(analyzer: Arc<Analyzer>) -> Self {
        IndexRepo {
            indices: RwLock::new(HashMap::new()),
            aliases: RwLock::new(HashMap::new()),
            analyzer,
        }
    }

    /// Resolves `name` to the list of indices it denotes: itself if it is
    /// an index name, the indices an alias currently points at (skipping
    /// any dropped since), or nothing if `name` is unknown.
    fn resolve(&self, name: &str) -> Option<Vec<Arc<MemoryIndex>>> {
        let indices = self.indices.read();
        if let Some(index) = indices.get(name) {
            return Some(vec![index.clone()]);
        }
        drop(indices);

        let aliases = self.aliases.read();
        let targets = aliases.get(name)?.clone();
        drop(aliases);

        let indices = self.indices.read();
        Some(
            targets
                .iter()
                .filter_map(|t| indices.get(t).cloned())
                .collect(),
        )
    }

    /// Writes into every index `name` resolves to, creating a new empty
    /// index under `name` if it resolves to nothing at all.
    pub async fn put(&self, name: &str, req: DocRequest) {
        let targets = match self.resolve(name) {
            Some(targets) if !targets.is_empty() => targets,
            _ => {
                let index = {
                    let mut indices = self.indices.write();
                    indices
                        .entry(name.to_string())
                        .or_insert_with(|| Arc::new(MemoryIndex::new(name, self.analyzer.clone())))
                        .clone()
                };
                vec![index]
            }
        };

        let mut tasks = JoinSet::new();
        for target in targets {
            let req = req.clone();
            tasks.spawn(async move {
                target.put(req);
            });
        }
        while tasks.join_next().await.is_some() {}
    }

    /// Fans out across every index `name` resolves to and concatenates
    /// results in fan-out completion order.
    pub async fn search(&self, name: &str, query: &str, engine: Engine) -> Result<Vec<SearchResult>> {
        let targets = self
            .resolve(name)
            .ok_or_else(|| Error::not_found(format!("index with name '{}' does not exist", name)))?;

        let mut tasks = JoinSet::new();
        for target in targets {
            let query = query.to_string();
            tasks.spawn(async move { target.search(&query, engine) });
        }

        let mut results = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            if let Ok(mut batch) = joined {
                results.append(&mut batch);
            }
        }
        Ok(results)
    }

    /// Appends `index` to `aliases[alias]` if `index` exists and is not
    /// already linked. Returns whether the alias table changed.
    pub fn alias(&self, alias: &str, index: &str) -> bool {
        let indices = self.indices.read();
        if !indices.contains_key(index) {
            return false;
        }
        drop(indices);

        let mut aliases = self.aliases.write();
        let targets = aliases.entry(alias.to_string()).or_insert_with(Vec::new);
        if targets.iter().any(|t| t == index) {
            return false;
        }
        targets.push(index.to_string());
        true
    }

    /// `index` empty drops the whole alias entry; otherwise removes just
    /// that index from it. Returns whether anything changed.
    pub fn unalias(&self, alias: &str, index: &str) -> bool {
        let mut aliases = self.aliases.write();
        if index.is_empty() {
            return aliases.remove(alias).is_some();
        }
        match aliases.get_mut(alias) {
            None => false,
            Some(targets) => {
                let before = targets.len();
                targets.retain(|t| t != index);
                let changed = targets.len() != before;
                if targets.is_empty() {
                    aliases.remove(alias);
                }
                changed
            }
        }
    }

    /// Rebinds `old` under `new`, then rewrites any alias entries
    /// referencing `old`.
    pub fn rename(&self, old: &str, new: &str) -> bool {
        let mut indices = self.indices.write();
        let index = match indices.remove(old) {
            Some(index) => index,
            None => return false,
        };
        indices.insert(new.to_string(), index);
        drop(indices);

        let mut aliases = self.aliases.write();
        for targets in aliases.values_mut() {
            for entry in targets.iter_mut() {
                if entry == old {
                    *entry = new.to_string();
                }
            }
        }
        true
    }

    /// Removes the index and scrubs it out of every alias, deleting
    /// aliases that become empty.
    pub fn drop_index(&self, name: &str) -> bool {
        let mut indices = self.indices.write();
        if indices.remove(name).is_none() {
            return false;
        }
        drop(indices);

        let mut aliases = self.aliases.write();
        aliases.retain(|_, targets| {
            targets.retain(|t| t != name);
            !targets.is_empty()
        });
        true
    }

    pub fn list(&self) -> Vec<String> {
        self.indices.read().keys().cloned().collect()
    }

    pub fn list_aliases(&self) -> Vec<(String, Vec<String>)> {
        self.aliases
            .read()
            .iter()
            .map(|(alias, targets)| (alias.clone(), targets.clone()))
            .collect()
    }

    pub fn has(&self, name: &str) -> bool {
        self.indices.read().contains_key(name)
    }

    pub fn has_alias(&self, name: &str) -> bool {
        self.aliases.read().contains_key(name)
    }
}
