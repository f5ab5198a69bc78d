//! Configurable graph traversal.
//!
//! A traversal is described by a [`TraversalConfig`] and executed by a [`Traverser`]:
//! - `config` / `options`: strategy, order, uniqueness, depth bounds, labels and the
//!   loosely typed [`TraversalOptions`] front end
//! - `directive` / `filter`: per-vertex visit and expand decisions
//! - `expander`: which neighbors a vertex leads to
//! - `visitor`: what happens to visited vertices
//! - `traverser`: the depth-first and breadth-first engines

pub mod config;
pub mod directive;
pub mod expander;
pub mod filter;
pub mod options;
pub mod traverser;
mod uniqueness;
pub mod visitor;

pub use config::{
    sort_by_key, Direction, EdgeComparator, ItemOrder, Order, Strategy, TraversalConfig, Uniqueness,
    UniquenessConfig, DEFAULT_MAX_ITERATIONS,
};
pub use directive::VisitDirective;
pub use expander::{
    any_expander, expand_edges_with_labels, expand_in_edges_with_labels, expand_out_edges_with_labels,
    inbound_expander, outbound_expander, Connection, EdgeExpander, Expander,
};
pub use filter::{
    Filter, FilterPipeline, IncludeMatchingAttributesFilter, MaxDepthFilter, MinDepthFilter, VertexExampleFilter,
    VisitAllFilter,
};
pub use options::{OneOrMany, TraversalOptions, UniquenessOptions};
pub use traverser::{TraversalStats, Traverser};
pub use visitor::{TrackingVisitor, TreeVisitor, VisitResult, Visited, Visitor};
