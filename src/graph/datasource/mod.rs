//! Suppliers of graph data.
//!
//! The traversal engine never owns or mutates graph storage. It asks a [`Datasource`]
//! for vertices and incident edges, one vertex at a time, so implementations are free
//! to keep everything in memory or to hit a store on every call.
//!
//! Three realizations ship with the crate:
//! - [`MemoryDatasource`]: ad hoc in-memory adjacency lists
//! - [`CollectionDatasource`]: one edge collection queried by `_from`/`_to`
//! - [`GraphDatasource`]: several edge collections selected through edge definitions

use crate::error::DatasourceError;

use super::model::{EdgeRef, VertexRef};

pub mod collection;
pub mod general_graph;
pub mod memory;

pub use collection::{CollectionDatasource, CollectionSet, EdgeCollection, EdgeSource, VertexCollection, VertexResolver};
pub use general_graph::{EdgeDefinition, GraphDatasource};
pub use memory::MemoryDatasource;

/// Read-only access to vertices and their incident edges.
///
/// Lookups that find nothing return `Ok(None)`; an `Err` is reserved for failures of the
/// store itself and aborts the running traversal. Edge lists are returned in the store's
/// native order.
pub trait Datasource {
    /// Resolves a vertex by identifier.
    fn vertex(&self, id: &str) -> Result<Option<VertexRef>, DatasourceError>;

    /// Edges whose `from` is `vertex`.
    fn out_edges(&self, vertex: &VertexRef) -> Result<Vec<EdgeRef>, DatasourceError>;

    /// Edges whose `to` is `vertex`.
    fn in_edges(&self, vertex: &VertexRef) -> Result<Vec<EdgeRef>, DatasourceError>;

    /// All incident edges: inbound first, then outbound.
    fn all_edges(&self, vertex: &VertexRef) -> Result<Vec<EdgeRef>, DatasourceError> {
        let mut edges = self.in_edges(vertex)?;
        edges.extend(self.out_edges(vertex)?);
        Ok(edges)
    }

    /// The vertex an edge points to.
    fn in_vertex(&self, edge: &EdgeRef) -> Result<Option<VertexRef>, DatasourceError> {
        self.vertex(edge.to())
    }

    /// The vertex an edge starts from.
    fn out_vertex(&self, edge: &EdgeRef) -> Result<Option<VertexRef>, DatasourceError> {
        self.vertex(edge.from())
    }

    /// The endpoint of `edge` that is not `vertex`.
    ///
    /// Returns `None` when the edge does not touch `vertex` or the peer cannot be resolved.
    fn peer_vertex(
        &self,
        edge: &EdgeRef,
        vertex: &VertexRef,
    ) -> Result<Option<VertexRef>, DatasourceError> {
        match edge.peer_of(vertex.id()) {
            Some(peer) => self.vertex(peer),
            None => Ok(None),
        }
    }
}

impl<D: Datasource + ?Sized> Datasource for &D {
    fn vertex(&self, id: &str) -> Result<Option<VertexRef>, DatasourceError> {
        (**self).vertex(id)
    }

    fn out_edges(&self, vertex: &VertexRef) -> Result<Vec<EdgeRef>, DatasourceError> {
        (**self).out_edges(vertex)
    }

    fn in_edges(&self, vertex: &VertexRef) -> Result<Vec<EdgeRef>, DatasourceError> {
        (**self).in_edges(vertex)
    }

    fn all_edges(&self, vertex: &VertexRef) -> Result<Vec<EdgeRef>, DatasourceError> {
        (**self).all_edges(vertex)
    }

    fn in_vertex(&self, edge: &EdgeRef) -> Result<Option<VertexRef>, DatasourceError> {
        (**self).in_vertex(edge)
    }

    fn out_vertex(&self, edge: &EdgeRef) -> Result<Option<VertexRef>, DatasourceError> {
        (**self).out_vertex(edge)
    }

    fn peer_vertex(
        &self,
        edge: &EdgeRef,
        vertex: &VertexRef,
    ) -> Result<Option<VertexRef>, DatasourceError> {
        (**self).peer_vertex(edge, vertex)
    }
}
