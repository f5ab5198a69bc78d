//! A datasource assembled from a graph definition.
//!
//! A graph definition lists *relations*: an edge collection together with the vertex
//! collections its edges may start from and point to. For a given vertex only the
//! relations whose `from` (outbound) or `to` (inbound) side names the vertex's
//! collection are queried, in definition order.

use std::collections::BTreeSet;

use crate::error::DatasourceError;
use crate::graph::model::{EdgeRef, VertexRef};

use super::collection::{EdgeSource, VertexResolver};
use super::Datasource;

/// One relation of a graph definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeDefinition {
    collection: String,
    from: BTreeSet<String>,
    to: BTreeSet<String>,
}

impl EdgeDefinition {
    /// Declares that edges in `collection` connect `from` collections to `to` collections.
    pub fn relation<I, J, S, T>(collection: impl Into<String>, from: I, to: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            collection: collection.into(),
            from: from.into_iter().map(Into::into).collect(),
            to: to.into_iter().map(Into::into).collect(),
        }
    }

    /// Name of the edge collection.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns `true` if edges of this relation may start in `collection`.
    pub fn starts_in(&self, collection: &str) -> bool {
        self.from.contains(collection)
    }

    /// Returns `true` if edges of this relation may end in `collection`.
    pub fn ends_in(&self, collection: &str) -> bool {
        self.to.contains(collection)
    }
}

/// A datasource spanning several vertex and edge collections.
#[derive(Debug, Clone)]
pub struct GraphDatasource<V, E> {
    vertices: V,
    relations: Vec<(EdgeDefinition, E)>,
}

impl<V: VertexResolver, E: EdgeSource> GraphDatasource<V, E> {
    /// Creates a graph with no relations.
    pub fn new(vertices: V) -> Self {
        Self {
            vertices,
            relations: Vec::new(),
        }
    }

    /// Attaches the edge collection backing `definition`.
    ///
    /// Fails with [`DatasourceError::CollectionMismatch`] if the source's name differs from
    /// the collection named by the definition.
    pub fn with_relation(mut self, definition: EdgeDefinition, edges: E) -> Result<Self, DatasourceError> {
        if definition.collection() != edges.name() {
            return Err(DatasourceError::CollectionMismatch {
                expected: definition.collection().to_owned(),
                found: edges.name().to_owned(),
            });
        }
        self.relations.push((definition, edges));
        Ok(self)
    }

    /// The relations of this graph, in definition order.
    pub fn definitions(&self) -> impl Iterator<Item = &EdgeDefinition> {
        self.relations.iter().map(|(definition, _)| definition)
    }
}

impl<V: VertexResolver, E: EdgeSource> Datasource for GraphDatasource<V, E> {
    fn vertex(&self, id: &str) -> Result<Option<VertexRef>, DatasourceError> {
        self.vertices.resolve(id)
    }

    fn out_edges(&self, vertex: &VertexRef) -> Result<Vec<EdgeRef>, DatasourceError> {
        let Some(collection) = vertex.collection() else {
            return Ok(Vec::new());
        };
        let mut edges = Vec::new();
        for (definition, source) in &self.relations {
            if definition.starts_in(collection) {
                edges.extend(source.edges_from(vertex.id())?);
            }
        }
        Ok(edges)
    }

    fn in_edges(&self, vertex: &VertexRef) -> Result<Vec<EdgeRef>, DatasourceError> {
        let Some(collection) = vertex.collection() else {
            return Ok(Vec::new());
        };
        let mut edges = Vec::new();
        for (definition, source) in &self.relations {
            if definition.ends_in(collection) {
                edges.extend(source.edges_to(vertex.id())?);
            }
        }
        Ok(edges)
    }
}
