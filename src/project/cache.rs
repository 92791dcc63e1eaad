//! Project graph cache keyed by project root
//!
//! Graphs are built lazily on first access and kept until a watched file below
//! their root changes. Invalidation drops the whole graph; the next request
//! rebuilds it from disk. Concurrent misses for the same root may both build,
//! and the first insert wins.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{debug, info};

use super::graph::{ProjectGraph, detect_root};

/// Cache statistics for monitoring and debugging
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphCacheStats {
    /// Total number of cache lookups
    pub total_queries: u64,
    pub hits: u64,
    pub misses: u64,
    /// Graphs built from disk
    pub builds: u64,
    /// Graphs dropped because a file below their root changed
    pub invalidations: u64,
    /// Number of cached roots
    pub current_size: usize,
}

impl GraphCacheStats {
    /// Cache hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        if self.total_queries == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_queries as f64
        }
    }
}

/// Thread-safe map from project root to its component graph
#[derive(Debug, Default)]
pub struct ProjectGraphCache {
    graphs: DashMap<PathBuf, Arc<ProjectGraph>>,
    stats: RwLock<GraphCacheStats>,
}

impl ProjectGraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&self, root: &Path) -> Arc<ProjectGraph> {
        self.stats.write().total_queries += 1;

        if let Some(graph) = self.graphs.get(root).map(|entry| Arc::clone(entry.value())) {
            self.stats.write().hits += 1;
            return graph;
        }

        self.stats.write().misses += 1;
        let built = Arc::new(ProjectGraph::build(root));
        let graph = Arc::clone(self.graphs.entry(root.to_path_buf()).or_insert(built).value());

        let mut stats = self.stats.write();
        stats.builds += 1;
        stats.current_size = self.graphs.len();
        graph
    }

    /// Graph of the project containing `path`, if `path` lies in a project
    pub fn graph_for_file(&self, path: &Path) -> Option<Arc<ProjectGraph>> {
        let root = detect_root(path)?;
        Some(self.get_or_build(&root))
    }

    pub fn invalidate(&self, root: &Path) -> bool {
        let removed = self.graphs.remove(root).is_some();
        if removed {
            debug!("Invalidated project graph for {:?}", root);
            let mut stats = self.stats.write();
            stats.invalidations += 1;
            stats.current_size = self.graphs.len();
        }
        removed
    }

    /// Drops every cached graph whose root contains one of `paths`. Returns the
    /// number of graphs dropped; roots unrelated to the changes are kept.
    pub fn invalidate_paths<'a, I>(&self, paths: I) -> usize
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let paths: Vec<&Path> = paths.into_iter().collect();
        let affected: Vec<PathBuf> = self
            .graphs
            .iter()
            .map(|entry| entry.key().clone())
            .filter(|root| paths.iter().any(|path| path.starts_with(root)))
            .collect();

        affected.iter().filter(|root| self.invalidate(root)).count()
    }

    /// Cached roots containing `path`
    pub fn roots_containing(&self, path: &Path) -> Vec<PathBuf> {
        self.graphs
            .iter()
            .map(|entry| entry.key().clone())
            .filter(|root| path.starts_with(root))
            .collect()
    }

    pub fn clear(&self) {
        let dropped = self.graphs.len();
        self.graphs.clear();
        self.stats.write().current_size = 0;
        info!("Cleared {} cached project graphs", dropped);
    }

    pub fn stats(&self) -> GraphCacheStats {
        self.stats.read().clone()
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}
