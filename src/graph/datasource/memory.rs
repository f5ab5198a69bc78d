//! An in-memory adjacency-list datasource.
//!
//! Vertices live in a hash map keyed by id; every edge is appended to the outbound list
//! of its `from` and the inbound list of its `to`, so both lists keep insertion order.
//! Edges may reference vertices that were never added; such endpoints simply resolve to
//! `None`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::DatasourceError;
use crate::graph::model::{Edge, EdgeRef, Vertex, VertexRef};

use super::Datasource;

/// A fully materialized graph with no I/O.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `add_vertex` | \(O(1)\) amortized | Replaces a vertex with the same id |
/// | `add_edge` | \(O(1)\) amortized | Appends to two adjacency lists |
/// | `out_edges` | \(O(\text{out-degree})\) | Clones `Arc` handles |
/// | `in_edges` | \(O(\text{in-degree})\) | Clones `Arc` handles |
#[derive(Debug, Clone, Default)]
pub struct MemoryDatasource {
    vertices: HashMap<String, VertexRef>,
    outbound: HashMap<String, Vec<EdgeRef>>,
    inbound: HashMap<String, Vec<EdgeRef>>,
    edge_count: usize,
}

impl MemoryDatasource {
    /// Creates an empty datasource.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a datasource from vertices and edges, in order.
    pub fn from_parts(
        vertices: impl IntoIterator<Item = Vertex>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Self {
        let mut ds = Self::new();
        for vertex in vertices {
            ds.add_vertex(vertex);
        }
        for edge in edges {
            ds.add_edge(edge);
        }
        ds
    }

    /// Adds a vertex and returns its shared handle.
    pub fn add_vertex(&mut self, vertex: Vertex) -> VertexRef {
        let vertex = Arc::new(vertex);
        self.vertices
            .insert(vertex.id().to_owned(), Arc::clone(&vertex));
        vertex
    }

    /// Adds a directed edge and returns its shared handle.
    pub fn add_edge(&mut self, edge: Edge) -> EdgeRef {
        let edge = Arc::new(edge);
        self.outbound
            .entry(edge.from().to_owned())
            .or_default()
            .push(Arc::clone(&edge));
        self.inbound
            .entry(edge.to().to_owned())
            .or_default()
            .push(Arc::clone(&edge));
        self.edge_count += 1;
        edge
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the out-degree of a vertex id.
    pub fn out_degree(&self, id: &str) -> usize {
        self.outbound.get(id).map_or(0, Vec::len)
    }

    /// Returns the in-degree of a vertex id.
    pub fn in_degree(&self, id: &str) -> usize {
        self.inbound.get(id).map_or(0, Vec::len)
    }

    /// Looks up a vertex without going through the [`Datasource`] error channel.
    pub fn get(&self, id: &str) -> Option<&VertexRef> {
        self.vertices.get(id)
    }
}

impl Datasource for MemoryDatasource {
    fn vertex(&self, id: &str) -> Result<Option<VertexRef>, DatasourceError> {
        Ok(self.vertices.get(id).cloned())
    }

    fn out_edges(&self, vertex: &VertexRef) -> Result<Vec<EdgeRef>, DatasourceError> {
        Ok(self.outbound.get(vertex.id()).cloned().unwrap_or_default())
    }

    fn in_edges(&self, vertex: &VertexRef) -> Result<Vec<EdgeRef>, DatasourceError> {
        Ok(self.inbound.get(vertex.id()).cloned().unwrap_or_default())
    }
}
