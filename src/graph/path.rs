//! The path from the seed to the vertex currently being visited.

use serde::Serialize;

use super::model::{EdgeRef, VertexRef};

/// Ordered vertices and edges walked from the seed.
///
/// Invariant: `edges.len() + 1 == vertices.len()` whenever the path is non-empty, and
/// `edges[i]` connects `vertices[i]` and `vertices[i + 1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Path {
    vertices: Vec<VertexRef>,
    edges: Vec<EdgeRef>,
}

impl Path {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a path that only holds the seed.
    pub fn seed(vertex: VertexRef) -> Self {
        Self {
            vertices: vec![vertex],
            edges: Vec::new(),
        }
    }

    /// Extends the path by one step.
    ///
    /// The first step has no edge; every following step must carry one.
    pub fn push(&mut self, edge: Option<EdgeRef>, vertex: VertexRef) {
        debug_assert_eq!(
            edge.is_some(),
            !self.vertices.is_empty(),
            "only the seed step comes without an edge"
        );
        if let Some(edge) = edge {
            self.edges.push(edge);
        }
        self.vertices.push(vertex);
    }

    /// Removes the last step, returning its vertex.
    pub fn pop(&mut self) -> Option<VertexRef> {
        let vertex = self.vertices.pop()?;
        self.edges.pop();
        Some(vertex)
    }

    /// Number of edges between the seed and the last vertex.
    pub fn depth(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the path has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in walk order, starting at the seed.
    pub fn vertices(&self) -> &[VertexRef] {
        &self.vertices
    }

    /// Edges in walk order.
    pub fn edges(&self) -> &[EdgeRef] {
        &self.edges
    }

    /// The seed vertex.
    pub fn first(&self) -> Option<&VertexRef> {
        self.vertices.first()
    }

    /// The vertex the path leads to.
    pub fn last(&self) -> Option<&VertexRef> {
        self.vertices.last()
    }

    /// The edge that led to the last vertex.
    pub fn last_edge(&self) -> Option<&EdgeRef> {
        self.edges.last()
    }

    /// Returns `true` if a vertex with this id is on the path.
    pub fn contains_vertex(&self, id: &str) -> bool {
        self.vertices.iter().any(|v| v.id() == id)
    }

    /// Returns `true` if an edge with this id is on the path.
    pub fn contains_edge(&self, id: &str) -> bool {
        self.edges.iter().any(|e| e.id() == id)
    }

    /// Vertex identifiers in walk order.
    pub fn vertex_ids(&self) -> Vec<&str> {
        self.vertices.iter().map(|v| v.id()).collect()
    }

    /// Edge identifiers in walk order.
    pub fn edge_ids(&self) -> Vec<&str> {
        self.edges.iter().map(|e| e.id()).collect()
    }
}
