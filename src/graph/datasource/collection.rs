//! Collection-backed datasources.
//!
//! A document store exposes vertices grouped into named collections and edges stored in
//! edge collections indexed by `_from` and `_to`. The [`VertexResolver`] and
//! [`EdgeSource`] traits are the seams such a store plugs into; the in-memory
//! [`VertexCollection`], [`CollectionSet`] and [`EdgeCollection`] implement them for
//! tests and small embedded graphs.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::DatasourceError;
use crate::graph::model::{Edge, EdgeRef, Vertex, VertexRef};

use super::Datasource;

/// Resolves vertex documents by `collection/key` identifier.
pub trait VertexResolver {
    /// Returns the vertex, or `None` when no such document exists.
    fn resolve(&self, id: &str) -> Result<Option<VertexRef>, DatasourceError>;
}

/// A single edge collection that can be queried by endpoint.
pub trait EdgeSource {
    /// Name of the collection.
    fn name(&self) -> &str;

    /// Edges whose `_from` equals `vertex_id`, in collection order.
    fn edges_from(&self, vertex_id: &str) -> Result<Vec<EdgeRef>, DatasourceError>;

    /// Edges whose `_to` equals `vertex_id`, in collection order.
    fn edges_to(&self, vertex_id: &str) -> Result<Vec<EdgeRef>, DatasourceError>;
}

impl<R: VertexResolver + ?Sized> VertexResolver for Arc<R> {
    fn resolve(&self, id: &str) -> Result<Option<VertexRef>, DatasourceError> {
        (**self).resolve(id)
    }
}

impl<E: EdgeSource + ?Sized> EdgeSource for Arc<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn edges_from(&self, vertex_id: &str) -> Result<Vec<EdgeRef>, DatasourceError> {
        (**self).edges_from(vertex_id)
    }

    fn edges_to(&self, vertex_id: &str) -> Result<Vec<EdgeRef>, DatasourceError> {
        (**self).edges_to(vertex_id)
    }
}

/// A named vertex collection; documents are stored by key.
#[derive(Debug, Clone)]
pub struct VertexCollection {
    name: String,
    documents: HashMap<String, VertexRef>,
}

impl VertexCollection {
    /// Creates an empty collection.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: HashMap::new(),
        }
    }

    /// Returns the collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stores a document under `key` with a `name` attribute equal to the key and
    /// returns its handle.
    pub fn save(&mut self, key: &str) -> VertexRef {
        let vertex = Vertex::new(format!("{}/{key}", self.name)).attribute("name", key);
        self.store(vertex)
    }

    /// Stores a vertex whose id must belong to this collection.
    ///
    /// A vertex naming another collection (or none) is rejected with
    /// [`DatasourceError::UnknownCollection`] and the collection is left unchanged.
    pub fn insert(&mut self, vertex: Vertex) -> Result<VertexRef, DatasourceError> {
        if vertex.collection() == Some(self.name.as_str()) {
            return Ok(self.store(vertex));
        }
        Err(DatasourceError::UnknownCollection {
            name: vertex.collection().unwrap_or(vertex.id()).to_owned(),
        })
    }

    fn store(&mut self, vertex: Vertex) -> VertexRef {
        let vertex = Arc::new(vertex);
        self.documents
            .insert(vertex.key().to_owned(), Arc::clone(&vertex));
        vertex
    }

    /// Looks up a document by key.
    pub fn document(&self, key: &str) -> Option<&VertexRef> {
        self.documents.get(key)
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if the collection holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl VertexResolver for VertexCollection {
    fn resolve(&self, id: &str) -> Result<Option<VertexRef>, DatasourceError> {
        Ok(match id.split_once('/') {
            Some((collection, key)) if collection == self.name => self.documents.get(key).cloned(),
            _ => None,
        })
    }
}

/// Several vertex collections resolved by the collection part of an id.
#[derive(Debug, Clone, Default)]
pub struct CollectionSet {
    collections: HashMap<String, VertexCollection>,
}

impl CollectionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collection, replacing one with the same name.
    #[must_use]
    pub fn with(mut self, collection: VertexCollection) -> Self {
        self.insert(collection);
        self
    }

    /// Adds a collection, replacing one with the same name.
    pub fn insert(&mut self, collection: VertexCollection) {
        self.collections
            .insert(collection.name().to_owned(), collection);
    }

    /// Returns a collection by name.
    pub fn collection(&self, name: &str) -> Option<&VertexCollection> {
        self.collections.get(name)
    }
}

impl VertexResolver for CollectionSet {
    fn resolve(&self, id: &str) -> Result<Option<VertexRef>, DatasourceError> {
        let Some((collection, _)) = id.split_once('/') else {
            return Ok(None);
        };
        match self.collections.get(collection) {
            Some(vertices) => vertices.resolve(id),
            None => Ok(None),
        }
    }
}

/// An in-memory edge collection with `_from`/`_to` indexes.
#[derive(Debug, Clone)]
pub struct EdgeCollection {
    name: String,
    edges: Vec<EdgeRef>,
    by_from: HashMap<String, Vec<usize>>,
    by_to: HashMap<String, Vec<usize>>,
}

impl EdgeCollection {
    /// Creates an empty edge collection.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            edges: Vec::new(),
            by_from: HashMap::new(),
            by_to: HashMap::new(),
        }
    }

    /// Stores an edge `from -> to` under `key` and returns its handle.
    pub fn save(&mut self, from: &str, to: &str, key: &str) -> EdgeRef {
        let edge = Edge::new(format!("{}/{key}", self.name), from, to);
        self.insert(edge)
    }

    /// Stores an edge.
    pub fn insert(&mut self, edge: Edge) -> EdgeRef {
        let idx = self.edges.len();
        let edge = Arc::new(edge);
        self.by_from
            .entry(edge.from().to_owned())
            .or_default()
            .push(idx);
        self.by_to.entry(edge.to().to_owned()).or_default().push(idx);
        self.edges.push(Arc::clone(&edge));
        edge
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the collection holds no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    fn collect(&self, index: &HashMap<String, Vec<usize>>, vertex_id: &str) -> Vec<EdgeRef> {
        index.get(vertex_id).map_or_else(Vec::new, |idxs| {
            idxs.iter().map(|&i| Arc::clone(&self.edges[i])).collect()
        })
    }
}

impl EdgeSource for EdgeCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn edges_from(&self, vertex_id: &str) -> Result<Vec<EdgeRef>, DatasourceError> {
        Ok(self.collect(&self.by_from, vertex_id))
    }

    fn edges_to(&self, vertex_id: &str) -> Result<Vec<EdgeRef>, DatasourceError> {
        Ok(self.collect(&self.by_to, vertex_id))
    }
}

/// A datasource backed by a single edge collection.
#[derive(Debug, Clone)]
pub struct CollectionDatasource<V, E> {
    vertices: V,
    edges: E,
}

impl<V: VertexResolver, E: EdgeSource> CollectionDatasource<V, E> {
    /// Combines a vertex resolver with an edge collection.
    pub fn new(vertices: V, edges: E) -> Self {
        Self { vertices, edges }
    }

    /// The edge collection queried by this datasource.
    pub fn edge_source(&self) -> &E {
        &self.edges
    }
}

impl<V: VertexResolver, E: EdgeSource> Datasource for CollectionDatasource<V, E> {
    fn vertex(&self, id: &str) -> Result<Option<VertexRef>, DatasourceError> {
        self.vertices.resolve(id)
    }

    fn out_edges(&self, vertex: &VertexRef) -> Result<Vec<EdgeRef>, DatasourceError> {
        self.edges.edges_from(vertex.id())
    }

    fn in_edges(&self, vertex: &VertexRef) -> Result<Vec<EdgeRef>, DatasourceError> {
        self.edges.edges_to(vertex.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_set_routes_by_collection_name() {
        let mut people = VertexCollection::new("people");
        people.save("alice");
        let mut places = VertexCollection::new("places");
        places.save("paris");
        let set = CollectionSet::new().with(people).with(places);

        assert!(set.resolve("people/alice").unwrap().is_some());
        assert!(set.resolve("places/paris").unwrap().is_some());
        assert!(set.resolve("places/alice").unwrap().is_none());
        assert!(set.resolve("unknown/alice").unwrap().is_none());
        assert!(set.resolve("alice").unwrap().is_none());
    }

    #[test]
    fn edge_indexes_answer_both_directions() {
        let mut edges = EdgeCollection::new("knows");
        edges.save("people/a", "people/b", "ab");
        edges.save("people/a", "people/c", "ac");
        edges.save("people/c", "people/b", "cb");

        let from_a: Vec<_> = edges
            .edges_from("people/a")
            .unwrap()
            .iter()
            .map(|e| e.key().to_owned())
            .collect();
        assert_eq!(from_a, vec!["ab", "ac"]);

        let to_b: Vec<_> = edges
            .edges_to("people/b")
            .unwrap()
            .iter()
            .map(|e| e.key().to_owned())
            .collect();
        assert_eq!(to_b, vec!["ab", "cb"]);
        assert!(edges.edges_to("people/a").unwrap().is_empty());
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn inserting_into_the_wrong_collection_is_rejected() {
        let mut people = VertexCollection::new("people");
        let err = people.insert(Vertex::new("places/paris")).unwrap_err();
        assert!(matches!(&err, DatasourceError::UnknownCollection { name } if name == "places"));
        assert!(matches!(
            people.insert(Vertex::new("paris")),
            Err(DatasourceError::UnknownCollection { name }) if name == "paris"
        ));
        assert!(people.is_empty());

        let bob = people.insert(Vertex::new("people/bob").attribute("age", 42)).unwrap();
        assert_eq!(people.document("bob"), Some(&bob));
    }
}
