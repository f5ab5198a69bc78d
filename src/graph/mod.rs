//! Graph data model and datasources.
//!
//! The model is intentionally thin:
//! - `model`: vertices, edges and attribute-example matching
//! - `path`: the walk from the seed to the current vertex
//! - `datasource`: the read-only contract the traversal engine consumes, plus
//!   in-memory, single-collection and graph-definition realizations

pub mod datasource;
pub mod model;
pub mod path;

pub use datasource::{
    CollectionDatasource, CollectionSet, Datasource, EdgeCollection, EdgeDefinition, EdgeSource,
    GraphDatasource, MemoryDatasource, VertexCollection, VertexResolver,
};
pub use model::{Attributes, Document, Edge, EdgeRef, Vertex, VertexRef};
pub use path::Path;
