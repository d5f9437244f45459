//! A cached [`PostQuery`] result tied to one snapshot.

use blogify_types::Post;

use crate::store::Snapshot;
use crate::views::PostQuery;

struct Cached {
    source: Snapshot,
    query: PostQuery,
    indices: Vec<usize>,
}

/// Caches the result of a [`PostQuery`] over a [`Snapshot`].
///
/// The result is recomputed whenever the snapshot's collection or the query
/// differs from the cached pair, and reused otherwise.
#[derive(Default)]
pub struct MemoizedView {
    cached: Option<Cached>,
    recomputations: usize,
}

impl MemoizedView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts in `snapshot` matching `query`, in collection order.
    pub fn get<'s>(&mut self, snapshot: &'s Snapshot, query: &PostQuery) -> Vec<&'s Post> {
        let fresh = match &self.cached {
            Some(c) => c.source.same_collection(snapshot) && &c.query == query,
            None => false,
        };
        if !fresh {
            let indices = snapshot
                .iter()
                .enumerate()
                .filter(|(_, p)| query.matches(p))
                .map(|(i, _)| i)
                .collect();
            self.cached = Some(Cached {
                source: snapshot.clone(),
                query: query.clone(),
                indices,
            });
            self.recomputations += 1;
        }

        self.cached
            .as_ref()
            .map(|c| c.indices.iter().map(|&i| &snapshot[i]).collect())
            .unwrap_or_default()
    }

    /// How many times the result has been computed from scratch.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    /// Drop the cached result.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

impl std::fmt::Debug for MemoizedView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoizedView")
            .field("cached", &self.cached.as_ref().map(|c| c.indices.len()))
            .field("recomputations", &self.recomputations)
            .finish()
    }
}
