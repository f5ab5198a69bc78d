//! Uniqueness bookkeeping for a single traversal.
//!
//! `Global` scopes are backed by visited sets that only ever grow. `Path` scopes need no
//! state of their own: they are checked against the path that leads to the candidate.

use std::collections::HashSet;

use crate::graph::{EdgeRef, Path, VertexRef};
use crate::trace::trace_event;

use super::config::{Uniqueness, UniquenessConfig};

/// Visited state for one traversal run.
#[derive(Debug, Clone, Default)]
pub(crate) struct UniquenessTracker {
    rules: UniquenessConfig,
    vertices: HashSet<String>,
    edges: HashSet<String>,
}

impl UniquenessTracker {
    pub(crate) fn new(rules: UniquenessConfig) -> Self {
        Self {
            rules,
            vertices: HashSet::new(),
            edges: HashSet::new(),
        }
    }

    /// Returns `true` iff `vertex`, reached from the end of `prefix` via `edge`, may be entered.
    ///
    /// Both checks run before anything is marked, so a rejected candidate leaves no trace
    /// in the global sets.
    pub(crate) fn admit(&mut self, prefix: &Path, edge: Option<&EdgeRef>, vertex: &VertexRef) -> bool {
        if let Some(edge) = edge {
            if !Self::fresh(self.rules.edges, &self.edges, edge.id(), || prefix.contains_edge(edge.id())) {
                trace_event!(edge = edge.id(), "edge rejected by uniqueness");
                return false;
            }
        }
        if !Self::fresh(self.rules.vertices, &self.vertices, vertex.id(), || {
            prefix.contains_vertex(vertex.id())
        }) {
            trace_event!(vertex = vertex.id(), "vertex rejected by uniqueness");
            return false;
        }

        if let Some(edge) = edge {
            if self.rules.edges == Uniqueness::Global {
                self.edges.insert(edge.id().to_owned());
            }
        }
        if self.rules.vertices == Uniqueness::Global {
            self.vertices.insert(vertex.id().to_owned());
        }
        true
    }

    fn fresh(scope: Uniqueness, seen: &HashSet<String>, id: &str, on_path: impl FnOnce() -> bool) -> bool {
        match scope {
            Uniqueness::None => true,
            Uniqueness::Path => !on_path(),
            Uniqueness::Global => !seen.contains(id),
        }
    }

    /// Number of distinct vertices marked in the global scope.
    #[cfg(test)]
    pub(crate) fn global_vertices(&self) -> usize {
        self.vertices.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::graph::{Edge, Vertex};

    fn v(id: &str) -> VertexRef {
        Arc::new(Vertex::new(id))
    }

    fn e(id: &str, from: &str, to: &str) -> EdgeRef {
        Arc::new(Edge::new(id, from, to))
    }

    #[test]
    fn global_vertices_are_admitted_once() {
        let mut tracker = UniquenessTracker::new(UniquenessConfig::new(Uniqueness::Global, Uniqueness::None));
        let path = Path::new();
        assert!(tracker.admit(&path, None, &v("a")));
        assert!(!tracker.admit(&path, None, &v("a")));
        assert!(tracker.admit(&path, None, &v("b")));
        assert_eq!(tracker.global_vertices(), 2);
    }

    #[test]
    fn path_scope_only_looks_at_the_prefix() {
        let mut tracker = UniquenessTracker::new(UniquenessConfig::new(Uniqueness::Path, Uniqueness::Path));
        let a = v("a");
        let ab = e("e/ab", "a", "b");
        let mut path = Path::seed(Arc::clone(&a));

        assert!(tracker.admit(&path, Some(&ab), &v("b")));
        path.push(Some(Arc::clone(&ab)), v("b"));
        assert!(!tracker.admit(&path, Some(&e("e/ba", "b", "a")), &a));
        assert!(!tracker.admit(&path, Some(&ab), &v("c")));

        // a sibling branch starting from the seed again
        let sibling = Path::seed(Arc::clone(&a));
        assert!(tracker.admit(&sibling, Some(&ab), &v("b")));
        assert_eq!(tracker.global_vertices(), 0);
    }

    #[test]
    fn rejected_candidates_mark_nothing() {
        let mut tracker = UniquenessTracker::new(UniquenessConfig::new(Uniqueness::Global, Uniqueness::Global));
        let path = Path::seed(v("a"));
        let ab = e("e/ab", "a", "b");
        assert!(tracker.admit(&path, Some(&ab), &v("b")));

        // edge is fresh but the vertex is not: the edge must stay unmarked
        let cb = e("e/cb", "c", "b");
        assert!(!tracker.admit(&path, Some(&cb), &v("b")));
        assert!(tracker.admit(&path, Some(&cb), &v("d")));
    }

    #[test]
    fn no_uniqueness_admits_everything() {
        let mut tracker = UniquenessTracker::new(UniquenessConfig::new(Uniqueness::None, Uniqueness::None));
        let a = v("a");
        let aa = e("e/aa", "a", "a");
        let mut path = Path::seed(Arc::clone(&a));
        path.push(Some(Arc::clone(&aa)), Arc::clone(&a));
        assert!(tracker.admit(&path, Some(&aa), &a));
    }
}
