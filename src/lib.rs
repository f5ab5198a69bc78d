//! # `trailhead` - Configurable Graph Traversal
//!
//! A traversal engine for property graphs whose vertices and edges live behind a
//! read-only [`Datasource`]. One engine covers the whole family of walks a graph
//! query layer needs: depth-first or breadth-first, pre- or post-order, forward or
//! backward neighbor order, with per-vertex filtering and pluggable expansion.
//!
//! ## Guarantees
//!
//! ### Determinism
//! - **Reproducible output**: for a fixed configuration, datasource and seed, the
//!   sequence of visits (vertex and path) is always the same.
//! - **No hidden ordering**: neighbor order is the datasource's native order, an
//!   explicit comparator's order, or its reverse; nothing depends on hashing.
//!
//! ### Termination
//! - **Uniqueness**: `Path` uniqueness keeps every walk acyclic, `Global` uniqueness
//!   enters every vertex or edge at most once.
//! - **Iteration guard**: every run is bounded by `max_iterations`, so even
//!   `Uniqueness::None` on a cyclic graph ends with an error instead of looping.
//!
//! ### Isolation
//! - **Read-only datasources**: the engine never mutates graph storage.
//! - **Per-run state**: frontier, path and visited sets belong to one traversal;
//!   a [`Traverser`] can be reused and shared across threads.
//!
//! ## Architecture
//!
//! 1. **Graph model** ([`graph`]): [`Vertex`], [`Edge`], [`Path`] and the
//!    [`Datasource`] contract with in-memory, collection and graph-definition
//!    realizations.
//! 2. **Configuration** ([`traversal::config`], [`traversal::options`]): an
//!    immutable, validated [`TraversalConfig`].
//! 3. **Decisions** ([`traversal::filter`], [`traversal::expander`]): filters answer
//!    with a [`VisitDirective`]; expanders produce ordered [`Connection`]s.
//! 4. **Execution** ([`traversal::traverser`]): explicit-stack depth-first and
//!    arena-backed breadth-first engines feeding a [`Visitor`].
//!
//! ## Example
//!
//! ```rust
//! use trailhead::{Edge, MemoryDatasource, TraversalConfig, Traverser, Uniqueness, Vertex};
//!
//! let graph = MemoryDatasource::from_parts(
//!     ["v/a", "v/b", "v/c"].map(Vertex::new),
//!     [
//!         Edge::new("e/ab", "v/a", "v/b"),
//!         Edge::new("e/bc", "v/b", "v/c"),
//!         Edge::new("e/ca", "v/c", "v/a"),
//!     ],
//! );
//!
//! let config = TraversalConfig::default().with_uniqueness(Uniqueness::Global, Uniqueness::None);
//! let result = Traverser::new(config, graph)?.traverse("v/a")?;
//! assert_eq!(result.vertex_ids(), ["v/a", "v/b", "v/c"]);
//! # Ok::<(), trailhead::TraversalError>(())
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod graph;
mod trace;
pub mod traversal;

pub use error::{ConfigurationError, DatasourceError, Result, TraversalError};
pub use graph::{
    Attributes, CollectionDatasource, CollectionSet, Datasource, Document, Edge, EdgeCollection, EdgeDefinition,
    EdgeRef, EdgeSource, GraphDatasource, MemoryDatasource, Path, Vertex, VertexCollection, VertexRef,
    VertexResolver,
};
pub use traversal::{
    Connection, Direction, EdgeExpander, Expander, Filter, ItemOrder, Order, Strategy, TrackingVisitor,
    TraversalConfig, TraversalOptions, TraversalStats, Traverser, TreeVisitor, Uniqueness, VertexExampleFilter,
    VisitDirective, VisitResult, Visitor,
};

// Compile-time checks on the types shared across threads and kept per frontier entry.
const _: () = {
    use core::mem;

    const fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<TraversalConfig>();
    assert_send_sync::<TraversalError>();
    assert_send_sync::<VisitResult>();

    // Directives are two flags.
    assert!(mem::size_of::<VisitDirective>() == 2);
};
